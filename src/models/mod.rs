pub mod enterprise;
pub mod proposal;
pub mod question;
pub mod ranking;
pub mod recruiter;
pub mod student;
