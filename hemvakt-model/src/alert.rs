//! Alerts raised by sensors.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Keyed, ModelError};

/// Display format for alert timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Intrusion,
    Fire,
    TemperatureAnomaly,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlertKind::Intrusion => "intrusion",
            AlertKind::Fire => "fire",
            AlertKind::TemperatureAnomaly => "temperature_anomaly",
        })
    }
}

impl FromStr for AlertKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "intrusion" => Ok(AlertKind::Intrusion),
            "fire" => Ok(AlertKind::Fire),
            "temperature_anomaly" => Ok(AlertKind::TemperatureAnomaly),
            _ => Err(ModelError::UnknownAlertKind(s.to_string())),
        }
    }
}

/// Alert urgency from 1 (highest) to 5 (lowest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const HIGHEST: Priority = Priority(1);
    pub const LOWEST: Priority = Priority(5);

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::HIGHEST.0..=Self::LOWEST.0).contains(&value) {
            Ok(Priority(value))
        } else {
            Err(ModelError::InvalidPriority(value))
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Alert {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub sensor_id: String,
    pub kind: AlertKind,
    pub priority: Priority,
    #[serde(default = "local_now")]
    pub timestamp: NaiveDateTime,
    #[validate(length(min = 1))]
    pub message: String,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl Alert {
    /// Creates an alert stamped with the current local time.
    pub fn new(
        id: impl Into<String>,
        sensor_id: impl Into<String>,
        kind: AlertKind,
        priority: Priority,
        message: impl Into<String>,
    ) -> Self {
        Self::with_timestamp(id, sensor_id, kind, priority, local_now(), message)
    }

    pub fn with_timestamp(
        id: impl Into<String>,
        sensor_id: impl Into<String>,
        kind: AlertKind,
        priority: Priority,
        timestamp: NaiveDateTime,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sensor_id: sensor_id.into(),
            kind,
            priority,
            timestamp,
            message: message.into(),
        }
    }
}

impl Keyed for Alert {
    fn key(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Alert(ID:{}, Sensor:{}, Type:{}, Priority:{}, Time:{}, Message:{})",
            self.id,
            self.sensor_id,
            self.kind,
            self.priority,
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 5)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    #[test]
    fn priority_bounds() {
        assert!(Priority::try_from(0).is_err());
        assert!(Priority::try_from(6).is_err());
        assert_eq!(Priority::try_from(1).unwrap(), Priority::HIGHEST);
        assert!(Priority::HIGHEST < Priority::LOWEST);
    }

    #[test]
    fn alert_kind_parses_case_insensitively() {
        assert_eq!("Fire".parse::<AlertKind>().unwrap(), AlertKind::Fire);
        assert_eq!(
            " temperature_anomaly ".parse::<AlertKind>().unwrap(),
            AlertKind::TemperatureAnomaly
        );
        assert!(matches!(
            "flood".parse::<AlertKind>(),
            Err(ModelError::UnknownAlertKind(kind)) if kind == "flood"
        ));
    }

    #[test]
    fn alert_display_formats_timestamp() {
        let alert = Alert::with_timestamp(
            "AL1",
            "S1",
            AlertKind::Intrusion,
            Priority::HIGHEST,
            at(14, 30),
            "Back door opened",
        );
        assert_eq!(
            alert.to_string(),
            "Alert(ID:AL1, Sensor:S1, Type:intrusion, Priority:1, Time:2025-01-05 14:30:00, Message:Back door opened)"
        );
    }

    #[test]
    fn out_of_range_priority_rejected_on_deserialize() {
        let yaml = "id: AL1\nsensor_id: S1\nkind: fire\npriority: 9\nmessage: Smoke\n";
        assert!(serde_yaml::from_str::<Alert>(yaml).is_err());
    }

    #[test]
    fn missing_timestamp_defaults_to_now() {
        let yaml = "id: AL1\nsensor_id: S1\nkind: fire\npriority: 2\nmessage: Smoke\n";
        let alert: Alert = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(alert.priority.get(), 2);
        assert!(alert.validate().is_ok());
    }
}
