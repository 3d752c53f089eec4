/*!
Herald - accessibility notifications for UI elements

Lets a UI element announce transient, non-focus-stealing messages
("response ready") to screen readers through the platform's accessibility
notification channel. Emission is best effort: it never fails the caller,
skips work when nobody is listening, and stops for good once the platform
proves it lacks the notification primitive.

```ignore
use herald::{CapabilityGate, Herald};

// Platform = toolkit peer lookup + native notification primitives
let herald = Herald::builder()
    .gate(CapabilityGate::process())
    .build(platform);

let output = herald.element(text_block);

// Called by the toolkit when the accessibility peer is created
output.create_peer();

// Fire and forget
output.request_notification("This is the response to hello", correlation_id);

// Observe what happened
let mut events = herald.subscribe();
while let Ok(event) = events.recv().await {
    // handle event
}
```
*/

mod core;
mod element;

pub mod a11y;
pub mod platform;

mod types;
pub use types::*;

pub use crate::core::{CapabilityGate, FailurePolicy, Herald, HeraldBuilder, NotifyConfig};
pub use crate::element::NotificationElement;
