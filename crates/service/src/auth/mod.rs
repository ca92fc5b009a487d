//! Admin accounts: registration and password login.
//!
//! The id returned here is what the dashboard sends as `UserAdminId` on
//! every catalog write.

pub mod domain;
pub mod service;

pub use service::AdminService;
