//! Sensors and alarms installed around the home.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Keyed;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStatus {
    Active,
    #[default]
    Inactive,
}

impl fmt::Display for SensorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SensorStatus::Active => "active",
            SensorStatus::Inactive => "inactive",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Sensor {
    #[validate(length(min = 1))]
    pub id: String,
    /// e.g. `motion`, `door`, `window`
    #[validate(length(min = 1))]
    pub kind: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[serde(default)]
    pub status: SensorStatus,
}

impl Sensor {
    /// New sensors start inactive.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            location: location.into(),
            status: SensorStatus::Inactive,
        }
    }
}

impl Keyed for Sensor {
    fn key(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sensor(ID:{}, Type:{}, Location:{}, Status:{})",
            self.id, self.kind, self.location, self.status
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmState {
    On,
    #[default]
    Off,
}

impl fmt::Display for AlarmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlarmState::On => "on",
            AlarmState::Off => "off",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Alarm {
    #[validate(length(min = 1))]
    pub id: String,
    /// e.g. `siren`, `light`
    #[validate(length(min = 1))]
    pub kind: String,
    #[serde(default)]
    pub state: AlarmState,
}

impl Alarm {
    /// New alarms start switched off.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            state: AlarmState::Off,
        }
    }
}

impl Keyed for Alarm {
    fn key(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Alarm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Alarm(ID:{}, Type:{}, State:{})", self.id, self.kind, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_display_and_defaults() {
        let sensor = Sensor::new("S1", "motion", "Hall");
        assert_eq!(
            sensor.to_string(),
            "Sensor(ID:S1, Type:motion, Location:Hall, Status:inactive)"
        );
        assert_eq!(sensor.key(), "S1");
    }

    #[test]
    fn alarm_state_defaults_off_when_missing() {
        let alarm: Alarm = serde_yaml::from_str("id: A1\nkind: siren\n").unwrap();
        assert_eq!(alarm, Alarm::new("A1", "siren"));
        assert_eq!(alarm.to_string(), "Alarm(ID:A1, Type:siren, State:off)");
    }

    #[test]
    fn sensor_requires_id() {
        assert!(Sensor::new("", "door", "Porch").validate().is_err());
    }
}
