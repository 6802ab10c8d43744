// src/handlers.rs

pub mod auth;
pub mod billing;
pub mod board;
pub mod catalog;
pub mod classroom;
pub mod enrollments;
pub mod payroll;
pub mod reports;
pub mod users;
