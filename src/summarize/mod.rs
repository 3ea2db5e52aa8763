pub mod client;
pub mod preset;
