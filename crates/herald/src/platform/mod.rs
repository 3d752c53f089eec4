/*!
Platform layer.

- `traits.rs` - capability traits the core is written against
- `memory.rs` - in-process backend (tests, demos, headless hosts)
- `uia.rs` - Windows UI Automation primitives
*/

pub mod memory;
mod traits;
#[cfg(target_os = "windows")]
pub mod uia;

pub use traits::{Composed, NotificationApi, PeerLookup, Platform};
