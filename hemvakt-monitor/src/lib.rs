//! # hemvakt-monitor
//!
//! Home security bookkeeping on top of `hemvakt-core`. Each facade wraps one
//! container, validates what goes in, and logs the outcome of every
//! operation with `tracing`.
//!
//! | Facade           | Container            |
//! |------------------|----------------------|
//! | [`EventLog`]     | singly linked list   |
//! | [`SessionTracker`] | doubly linked list |
//! | [`AlertTracker`] | doubly linked list + quick sort |
//! | [`SensorRotation`] | circular list      |
//! | [`CommandQueue`] | bounded deque        |
//! | [`DeviceGroups`] | multi-way tree       |

pub mod alerts;
pub mod commands;
pub mod devices;
pub mod error;
pub mod events;
pub mod registry;
pub mod rotation;
pub mod shared;

pub use alerts::AlertTracker;
pub use commands::{CommandQueue, End, Eviction};
pub use devices::DeviceGroups;
pub use error::MonitorError;
pub use events::{EventLog, SessionTracker};
pub use registry::{AlarmRegistry, Registry, SensorRegistry, UserRegistry};
pub use rotation::SensorRotation;
pub use shared::Shared;

/// Form under which identifiers and labels are stored and looked up.
pub(crate) fn normalize(text: &str) -> &str {
    text.trim()
}

/// Rejects empty or whitespace-only identifiers and labels.
pub(crate) fn require_text<'a>(field: &'static str, text: &'a str) -> Result<&'a str, MonitorError> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Err(MonitorError::Blank(field));
    }
    Ok(normalized)
}
