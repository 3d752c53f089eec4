/*! Core types for Herald.

Regenerate TypeScript types: `cargo test -p herald export_bindings`
*/

#![allow(missing_docs)]

mod error;
mod event;
mod outcome;
mod request;

pub use error::{HeraldError, HeraldResult, PlatformError};
pub use event::Event;
pub use outcome::{Outcome, SkipReason};
pub use request::{CorrelationId, NotificationRequest};
