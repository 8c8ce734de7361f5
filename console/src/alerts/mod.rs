//! Transient alerts raised from console events.
//!
//! Handlers build [`AlertRequest`]s, the [`AlertQueue`] presents them one at
//! a time, and new sessions are mirrored to the desktop notifier.

pub mod desktop;
pub mod handlers;
pub mod queue;
pub mod types;

pub use desktop::{DesktopNotifier, NotifyError, SystemNotifier};
pub use handlers::{AlertHandlers, AlertSettings};
pub use queue::{AlertQueue, Presenter};
pub use types::{
    AboutInfo, AlertId, AlertRequest, AlertUpdate, Continuation, DialogId, DismissReason,
    DisplayMode,
};
