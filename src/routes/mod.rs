pub mod auth;
pub mod dashboard;
pub mod enterprises;
pub mod health;
pub mod proposals;
pub mod quiz;
pub mod students;
