pub mod user_repo;
pub use user_repo::UserRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod enrollment_repo;
pub use enrollment_repo::EnrollmentRepository;
pub mod billing_repo;
pub use billing_repo::BillingRepository;
pub mod payroll_repo;
pub use payroll_repo::PayrollRepository;
pub mod board_repo;
pub use board_repo::BoardRepository;
pub mod classroom_repo;
pub use classroom_repo::ClassroomRepository;
pub mod reports_repo;
pub use reports_repo::ReportsRepository;
