//! # Hemvakt Records
//!
//! Plain value types for the things a home monitoring setup keeps track of:
//! sensors, alarms, users, alerts, and free-form session/event labels.
//! Records carry no behaviour beyond validation and display; containers and
//! registries decide what happens to them.

mod alert;
mod device;
mod error;
mod label;
mod user;

pub use alert::{Alert, AlertKind, Priority, TIMESTAMP_FORMAT};
pub use device::{Alarm, AlarmState, Sensor, SensorStatus};
pub use error::ModelError;
pub use label::Label;
pub use user::User;

/// Records addressed by a unique identifier inside a container.
pub trait Keyed {
    fn key(&self) -> &str;
}
