//! Row types for each table, with conversions into `fwip_core` models.

pub mod change_request;
pub mod service;
pub mod title;
pub mod user;
pub mod watch_history;
