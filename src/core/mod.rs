pub mod config;
pub mod logging;

pub use config::PushConfig;
pub use logging::init_tracing;
