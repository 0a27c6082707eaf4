//! Notification adapters.

mod log_sink;

pub use log_sink::TracingNotificationSink;
