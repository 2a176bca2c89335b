//! In-memory adapters for tests and local runs.

mod sms;
mod store;

pub use sms::{RecordingSmsSender, SentSms};
pub use store::InMemoryCashbackStore;
