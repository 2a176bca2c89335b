//! SMS transport adapters.
//!
//! - `HttpSmsSender` - JSON gateway over HTTPS
//! - `LoggingSmsSender` - logs instead of sending

mod http;
mod logging;

pub use http::{HttpSmsConfig, HttpSmsSender};
pub use logging::LoggingSmsSender;
