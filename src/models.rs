pub mod auth;
pub mod billing;
pub mod board;
pub mod catalog;
pub mod classroom;
pub mod enrollment;
pub mod payroll;
pub mod reports;
