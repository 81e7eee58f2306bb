//! Domain core for the FWIP catalog service.
//!
//! Pure logic and trait seams only: title and change-request models, the
//! submission builder, the moderation queue and console, FWIP random
//! selection, and per-user watch history. Storage and transport live in `fwip-db` and `fwip-catalog`.

pub mod catalog;
pub mod change_request;
pub mod console;
pub mod error;
pub mod fwip;
pub mod locator;
pub mod moderation;
pub mod submission;
pub mod title;
pub mod types;
pub mod user;
pub mod watch;
