//! Insertion-ordered records keyed by id.

use std::collections::HashMap;

use hemvakt_model::{Alarm, AlarmState, Keyed, ModelError, Sensor, SensorStatus, User};
use tracing::{debug, info};
use validator::Validate;

use crate::{normalize, require_text, MonitorError};

pub type SensorRegistry = Registry<Sensor>;
pub type AlarmRegistry = Registry<Alarm>;
pub type UserRegistry = Registry<User>;

#[derive(Debug, Clone)]
pub struct Registry<R> {
    kind: &'static str,
    records: Vec<R>,
    index: HashMap<String, usize>,
}

impl<R: Keyed + Validate> Registry<R> {
    /// `kind` names the records in errors and logs, e.g. `"Sensor"`.
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn insert(&mut self, record: R) -> Result<(), MonitorError> {
        let id = require_text(self.kind, record.key())?.to_owned();
        record.validate().map_err(ModelError::from)?;
        if self.index.contains_key(&id) {
            return Err(MonitorError::duplicate(self.kind, id));
        }
        self.index.insert(id.clone(), self.records.len());
        self.records.push(record);
        info!(kind = self.kind, id = %id, "Record registered");
        Ok(())
    }

    /// Ids are matched without surrounding whitespace.
    pub fn get(&self, id: &str) -> Option<&R> {
        self.index.get(normalize(id)).map(|&slot| &self.records[slot])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut R> {
        let slot = *self.index.get(normalize(id))?;
        Some(&mut self.records[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn require_mut(&mut self, id: &str) -> Result<&mut R, MonitorError> {
        let kind = self.kind;
        self.get_mut(id)
            .ok_or_else(|| MonitorError::not_found(kind, normalize(id)))
    }
}

impl Registry<Sensor> {
    pub fn sensors() -> Self {
        Self::new("Sensor")
    }

    pub fn activate(&mut self, id: &str) -> Result<&Sensor, MonitorError> {
        self.set_status(id, SensorStatus::Active)
    }

    pub fn deactivate(&mut self, id: &str) -> Result<&Sensor, MonitorError> {
        self.set_status(id, SensorStatus::Inactive)
    }

    fn set_status(&mut self, id: &str, status: SensorStatus) -> Result<&Sensor, MonitorError> {
        let sensor = self.require_mut(id)?;
        sensor.status = status;
        debug!(sensor = id, %status, "Sensor status changed");
        Ok(sensor)
    }
}

impl Registry<Alarm> {
    pub fn alarms() -> Self {
        Self::new("Alarm")
    }

    pub fn turn_on(&mut self, id: &str) -> Result<&Alarm, MonitorError> {
        self.set_state(id, AlarmState::On)
    }

    pub fn turn_off(&mut self, id: &str) -> Result<&Alarm, MonitorError> {
        self.set_state(id, AlarmState::Off)
    }

    fn set_state(&mut self, id: &str, state: AlarmState) -> Result<&Alarm, MonitorError> {
        let alarm = self.require_mut(id)?;
        alarm.state = state;
        debug!(alarm = id, %state, "Alarm state changed");
        Ok(alarm)
    }
}

impl Registry<User> {
    pub fn users() -> Self {
        Self::new("User")
    }
}
