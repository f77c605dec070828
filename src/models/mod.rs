pub mod assessment;
pub mod candidate;
pub mod job;
pub mod question;
pub mod response;
