pub mod auth;
pub mod billing_service;
pub mod payroll_service;
