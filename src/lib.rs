pub mod cli;
pub mod core;
pub mod ingestion;
pub mod platform;
pub mod push;
