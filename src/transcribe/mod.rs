pub mod client;
pub mod job;
pub mod poller;
