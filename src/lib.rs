pub mod cli;
pub mod config;
pub mod credentials;
pub mod deliver;
pub mod error;
pub mod run;
pub mod summarize;
pub mod transcribe;
pub mod ui;
