/*!
Accessibility vocabulary shared by the core and the platform bindings.
*/

mod notification;

pub use notification::{NotificationKind, NotificationProcessing};
