pub mod dispatcher;
pub mod models;
pub mod parse;
pub mod registration;
pub mod service;
pub mod xml;

pub use dispatcher::*;
pub use models::*;
pub use parse::*;
pub use registration::*;
pub use service::*;
