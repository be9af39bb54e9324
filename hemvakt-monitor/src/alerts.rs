//! Active alerts with unique ids.

use std::collections::HashSet;

use hemvakt_core::{quick_sort_by_key, DoublyLinkedList};
use hemvakt_model::{Alert, ModelError, TIMESTAMP_FORMAT};
use tracing::{debug, info};
use validator::Validate;

use crate::{normalize, require_text, MonitorError};

const KIND: &str = "Alert";

/// Alerts in the order they were raised. Ids are unique while an alert is
/// active; a resolved id may be raised again.
#[derive(Default)]
pub struct AlertTracker {
    alerts: DoublyLinkedList<Alert>,
    ids: HashSet<String>,
}

impl AlertTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, mut alert: Alert) -> Result<(), MonitorError> {
        alert.id = require_text(KIND, &alert.id)?.to_owned();
        alert.validate().map_err(ModelError::from)?;
        if !self.ids.insert(alert.id.clone()) {
            return Err(MonitorError::duplicate(KIND, alert.id));
        }
        info!(
            alert = %alert.id,
            sensor = %alert.sensor_id,
            kind = %alert.kind,
            priority = alert.priority.get(),
            "Alert raised"
        );
        self.alerts.append(alert);
        Ok(())
    }

    /// Removes the alert and returns it.
    pub fn resolve(&mut self, id: &str) -> Result<Alert, MonitorError> {
        let id = normalize(id);
        let alert = self
            .alerts
            .remove_first_by(|alert| alert.id == id)
            .ok_or_else(|| MonitorError::not_found(KIND, id))?;
        self.ids.remove(id);
        info!(alert = id, remaining = self.alerts.len(), "Alert resolved");
        Ok(alert)
    }

    /// Drops every alert and reports how many there were.
    pub fn clear(&mut self) -> usize {
        let cleared = self.alerts.len();
        self.alerts.clear();
        self.ids.clear();
        info!(cleared, "Alerts cleared");
        cleared
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        let id = normalize(id);
        self.alerts.find_by(|alert| alert.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Snapshot ordered from priority 1 to 5. Equal priorities come out in
    /// no particular order.
    pub fn by_priority(&self) -> Vec<Alert> {
        let mut sorted: Vec<Alert> = self.alerts.iter().cloned().collect();
        quick_sort_by_key(&mut sorted, |alert| alert.priority);
        debug!(count = sorted.len(), "Alerts sorted by priority");
        sorted
    }

    pub fn render(&self) -> String {
        if self.alerts.is_empty() {
            return "[No active alerts]".into();
        }
        self.alerts
            .iter()
            .map(|alert| {
                format!(
                    "  ID: {}, Type: {}, Sensor: {}, Priority: {}, Time: {}, Message: {}",
                    alert.id,
                    alert.kind,
                    alert.sensor_id,
                    alert.priority,
                    alert.timestamp.format(TIMESTAMP_FORMAT),
                    alert.message
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
