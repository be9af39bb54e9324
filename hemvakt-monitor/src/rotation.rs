//! Round-robin sensor polling order.

use hemvakt_core::{CircularList, ContainerError};
use tracing::{debug, info, warn};

use crate::{normalize, require_text, MonitorError};

const KIND: &str = "Sensor";

#[derive(Default)]
pub struct SensorRotation {
    ring: CircularList<String>,
}

impl SensorRotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sensor at the end of the rotation. A sensor is enrolled at
    /// most once.
    pub fn enroll(&mut self, sensor_id: &str) -> Result<(), MonitorError> {
        let sensor_id = require_text("Sensor ID", sensor_id)?;
        if self.contains(sensor_id) {
            return Err(MonitorError::duplicate(KIND, sensor_id));
        }
        self.ring.append(sensor_id.to_owned());
        info!(sensor = sensor_id, enrolled = self.ring.len(), "Sensor enrolled in rotation");
        Ok(())
    }

    pub fn retire(&mut self, sensor_id: &str) -> bool {
        let sensor_id = normalize(sensor_id);
        let retired = self.ring.remove(&sensor_id.to_owned());
        if retired {
            info!(sensor = sensor_id, enrolled = self.ring.len(), "Sensor retired from rotation");
        } else {
            warn!(sensor = sensor_id, "Sensor not in rotation");
        }
        retired
    }

    /// The next `steps` sensors to poll, starting at the head and wrapping.
    pub fn rotate(&self, steps: usize) -> Result<Vec<&str>, MonitorError> {
        if steps == 0 {
            return Err(MonitorError::InvalidSteps);
        }
        let visited: Vec<&str> = self
            .ring
            .rotate(steps)
            .ok_or(ContainerError::Empty)?
            .map(String::as_str)
            .collect();
        debug!(steps, "Rotation walked");
        Ok(visited)
    }

    pub fn contains(&self, sensor_id: &str) -> bool {
        let sensor_id = normalize(sensor_id);
        self.ring.iter().any(|enrolled| enrolled == sensor_id)
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// `S1 -> S2 -> S3 -> ...`, or `Rotation list is empty.`
    pub fn render(&self) -> String {
        if self.ring.is_empty() {
            return "Rotation list is empty.".into();
        }
        let mut line = self
            .ring
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" -> ");
        line.push_str(" -> ...");
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rotation(ids: &[&str]) -> SensorRotation {
        let mut rotation = SensorRotation::new();
        for id in ids {
            rotation.enroll(id).unwrap();
        }
        rotation
    }

    #[test]
    fn wraps_past_the_last_sensor() {
        let rotation = rotation(&["S1", "S2", "S3"]);
        assert_eq!(rotation.rotate(5).unwrap(), vec!["S1", "S2", "S3", "S1", "S2"]);
        assert_eq!(rotation.render(), "S1 -> S2 -> S3 -> ...");
    }

    #[test]
    fn zero_steps_and_empty_ring() {
        let mut rotation = rotation(&["S1"]);
        assert!(matches!(rotation.rotate(0), Err(MonitorError::InvalidSteps)));

        assert!(rotation.retire("S1"));
        assert!(matches!(
            rotation.rotate(2),
            Err(MonitorError::Container(ContainerError::Empty))
        ));
        assert_eq!(rotation.render(), "Rotation list is empty.");
    }

    #[test]
    fn padded_sensor_retires() {
        let mut rotation = rotation(&[" S1 ", "S2"]);
        assert!(rotation.contains(" S1"));
        assert!(matches!(
            rotation.enroll("S1"),
            Err(MonitorError::DuplicateId { .. })
        ));

        assert!(rotation.retire(" S1 "));
        assert_eq!(rotation.render(), "S2 -> ...");
    }

    #[test]
    fn enrolment_is_unique() {
        let mut rotation = rotation(&["S1", "S2"]);
        assert!(matches!(
            rotation.enroll("S2"),
            Err(MonitorError::DuplicateId { .. })
        ));
        assert!(!rotation.retire("S9"));
        assert!(rotation.retire("S1"));
        assert_eq!(rotation.rotate(3).unwrap(), vec!["S2", "S2", "S2"]);
    }
}
