pub mod filter_service;
pub mod quiz_service;
pub mod stats_service;
pub mod student_service;
pub mod unidraft_client;
