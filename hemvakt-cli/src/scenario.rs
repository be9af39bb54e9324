//! Declarative scenarios.
//!
//! A scenario is a YAML list of steps run in order against one
//! [`Household`]. Each step produces transcript lines; a failing step adds an
//! `[Error]` line and the run carries on.

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDateTime;
use hemvakt_config::HemvaktConfig;
use hemvakt_core::ContainerError;
use hemvakt_model::{
    Alarm, Alert, AlertKind, Priority, Sensor, User, TIMESTAMP_FORMAT,
};
use hemvakt_monitor::{
    AlarmRegistry, AlertTracker, CommandQueue, DeviceGroups, End, EventLog, Eviction,
    MonitorError, SensorRegistry, SensorRotation, SessionTracker, UserRegistry,
};
use hemvakt_telemetry::{EventLogger, MetricsRecorder, Outcome};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Monitor(#[from] MonitorError),

    #[error("Invalid timestamp (expected YYYY-MM-DD HH:MM:SS): {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("{0}")]
    Miss(String),
}

impl StepError {
    fn outcome(&self) -> Outcome {
        match self {
            StepError::Miss(_)
            | StepError::Monitor(MonitorError::NotFound { .. })
            | StepError::Monitor(MonitorError::Container(
                ContainerError::NotFound(_) | ContainerError::Empty,
            )) => Outcome::Miss,
            _ => Outcome::Rejected,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueEnd {
    Front,
    #[default]
    Rear,
}

impl From<QueueEnd> for End {
    fn from(end: QueueEnd) -> Self {
        match end {
            QueueEnd::Front => End::Front,
            QueueEnd::Rear => End::Rear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Events,
    Sessions,
    Alerts,
    Rotation,
    Commands,
    Devices,
    Sensors,
    Alarms,
    Users,
}

fn evict_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    LogEvent {
        event: String,
    },
    OpenSession {
        session: String,
    },
    CloseSession {
        session: String,
    },
    AddSensor {
        id: String,
        kind: String,
        location: String,
    },
    ActivateSensor {
        id: String,
    },
    DeactivateSensor {
        id: String,
    },
    AddAlarm {
        id: String,
        kind: String,
    },
    AlarmOn {
        id: String,
    },
    AlarmOff {
        id: String,
    },
    AddUser {
        id: String,
        name: String,
        role: String,
    },
    RaiseAlert {
        id: String,
        sensor_id: String,
        kind: AlertKind,
        priority: Priority,
        message: String,
        /// `YYYY-MM-DD HH:MM:SS`; the current local time when omitted.
        #[serde(default)]
        timestamp: Option<String>,
    },
    ResolveAlert {
        id: String,
    },
    ClearAlerts,
    SortAlerts,
    EnrollSensor {
        id: String,
    },
    RetireSensor {
        id: String,
    },
    Rotate {
        #[serde(default)]
        steps: Option<usize>,
    },
    PushCommand {
        command: String,
        #[serde(default)]
        end: QueueEnd,
        /// Evict the opposite end when full instead of refusing.
        #[serde(default = "evict_by_default")]
        evict: bool,
    },
    PopCommand {
        #[serde(default)]
        end: QueueEnd,
    },
    SearchCommand {
        command: String,
    },
    ClearCommands,
    AddDevice {
        parent: String,
        device: String,
    },
    RemoveDevice {
        parent: String,
        device: String,
    },
    MoveDevice {
        device: String,
        from: String,
        to: String,
    },
    FindDevice {
        name: String,
    },
    Show {
        view: View,
    },
}

impl Step {
    /// `(container, operation)` labels for logs and metrics.
    fn labels(&self) -> (&'static str, &'static str) {
        match self {
            Step::LogEvent { .. } => ("event_log", "record"),
            Step::OpenSession { .. } => ("sessions", "open"),
            Step::CloseSession { .. } => ("sessions", "close"),
            Step::AddSensor { .. } => ("sensors", "insert"),
            Step::ActivateSensor { .. } => ("sensors", "activate"),
            Step::DeactivateSensor { .. } => ("sensors", "deactivate"),
            Step::AddAlarm { .. } => ("alarms", "insert"),
            Step::AlarmOn { .. } => ("alarms", "turn_on"),
            Step::AlarmOff { .. } => ("alarms", "turn_off"),
            Step::AddUser { .. } => ("users", "insert"),
            Step::RaiseAlert { .. } => ("alerts", "raise"),
            Step::ResolveAlert { .. } => ("alerts", "resolve"),
            Step::ClearAlerts => ("alerts", "clear"),
            Step::SortAlerts => ("alerts", "sort"),
            Step::EnrollSensor { .. } => ("rotation", "enroll"),
            Step::RetireSensor { .. } => ("rotation", "retire"),
            Step::Rotate { .. } => ("rotation", "rotate"),
            Step::PushCommand { .. } => ("commands", "push"),
            Step::PopCommand { .. } => ("commands", "pop"),
            Step::SearchCommand { .. } => ("commands", "search"),
            Step::ClearCommands => ("commands", "clear"),
            Step::AddDevice { .. } => ("devices", "add"),
            Step::RemoveDevice { .. } => ("devices", "remove"),
            Step::MoveDevice { .. } => ("devices", "move"),
            Step::FindDevice { .. } => ("devices", "find"),
            Step::Show { .. } => ("household", "show"),
        }
    }
}

/// Every facade a scenario can touch.
pub struct Household {
    events: EventLog,
    sessions: SessionTracker,
    sensors: SensorRegistry,
    alarms: AlarmRegistry,
    users: UserRegistry,
    alerts: AlertTracker,
    rotation: SensorRotation,
    commands: CommandQueue,
    devices: DeviceGroups,
    default_steps: usize,
    metrics: Option<MetricsRecorder>,
}

impl Household {
    pub fn new(config: &HemvaktConfig, metrics: Option<MetricsRecorder>) -> anyhow::Result<Self> {
        Ok(Self {
            events: EventLog::new(),
            sessions: SessionTracker::new(),
            sensors: SensorRegistry::sensors(),
            alarms: AlarmRegistry::alarms(),
            users: UserRegistry::users(),
            alerts: AlertTracker::new(),
            rotation: SensorRotation::new(),
            commands: CommandQueue::new(config.commands.capacity)
                .context("creating command queue")?,
            devices: DeviceGroups::new(&config.devices.root).context("creating device tree")?,
            default_steps: config.rotation.default_steps,
            metrics,
        })
    }

    /// Runs every step and returns the transcript.
    pub fn run(&mut self, scenario: &Scenario) -> Vec<String> {
        let mut transcript = Vec::new();
        for step in &scenario.steps {
            let (container, operation) = step.labels();
            let outcome = match self.apply(step) {
                Ok(lines) => {
                    transcript.extend(lines);
                    Outcome::Ok
                }
                Err(err) => {
                    warn!(container, operation, error = %err, "Step failed");
                    transcript.push(format!("[Error] {err}"));
                    err.outcome()
                }
            };
            EventLogger::log_operation(container, operation, outcome);
            if let Some(metrics) = &self.metrics {
                metrics.record_operation(container, operation, outcome);
            }
        }
        transcript
    }

    pub fn apply(&mut self, step: &Step) -> Result<Vec<String>, StepError> {
        let line = match step {
            Step::LogEvent { event } => {
                self.events.record(event)?;
                format!("[Event Log] Appended '{}' to the event log.", event.trim())
            }
            Step::OpenSession { session } => {
                self.sessions.open(session)?;
                format!("[Active Sessions] Added '{}' to active sessions.", session.trim())
            }
            Step::CloseSession { session } => {
                if !self.sessions.close(session) {
                    return Err(StepError::Miss(format!("Session '{session}' not found.")));
                }
                format!("[Active Sessions] Removed session '{session}'.")
            }
            Step::AddSensor { id, kind, location } => {
                let sensor = Sensor::new(id.as_str(), kind.as_str(), location.as_str());
                let line = format!("[Sensors] Added {sensor}.");
                self.sensors.insert(sensor)?;
                line
            }
            Step::ActivateSensor { id } => {
                format!("[Sensors] {}", self.sensors.activate(id)?)
            }
            Step::DeactivateSensor { id } => {
                format!("[Sensors] {}", self.sensors.deactivate(id)?)
            }
            Step::AddAlarm { id, kind } => {
                let alarm = Alarm::new(id.as_str(), kind.as_str());
                let line = format!("[Alarms] Added {alarm}.");
                self.alarms.insert(alarm)?;
                line
            }
            Step::AlarmOn { id } => format!("[Alarms] {}", self.alarms.turn_on(id)?),
            Step::AlarmOff { id } => format!("[Alarms] {}", self.alarms.turn_off(id)?),
            Step::AddUser { id, name, role } => {
                let user = User::new(id.as_str(), name.as_str(), role.as_str());
                let line = format!("[Users] Added {user}.");
                self.users.insert(user)?;
                line
            }
            Step::RaiseAlert {
                id,
                sensor_id,
                kind,
                priority,
                message,
                timestamp,
            } => {
                let alert = match timestamp {
                    Some(text) => {
                        let at = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)?;
                        Alert::with_timestamp(
                            id.as_str(),
                            sensor_id.as_str(),
                            *kind,
                            *priority,
                            at,
                            message.as_str(),
                        )
                    }
                    None => Alert::new(
                        id.as_str(),
                        sensor_id.as_str(),
                        *kind,
                        *priority,
                        message.as_str(),
                    ),
                };
                self.alerts.raise(alert)?;
                format!("[Active Alerts] Added '{id}' to active alerts.")
            }
            Step::ResolveAlert { id } => {
                self.alerts.resolve(id)?;
                format!("[Active Alerts] Resolved and removed alert '{id}'.")
            }
            Step::ClearAlerts => {
                let cleared = self.alerts.clear();
                format!("[Active Alerts] Cleared {cleared} active alert(s).")
            }
            Step::SortAlerts => {
                if self.alerts.is_empty() {
                    return Err(StepError::Miss("No alerts to sort.".into()));
                }
                let sorted = match &self.metrics {
                    Some(metrics) => metrics.time_sort(|| self.alerts.by_priority()),
                    None => self.alerts.by_priority(),
                };
                let mut lines = vec!["--- Alerts by priority ---".to_string()];
                lines.extend(sorted.iter().map(Alert::to_string));
                return Ok(lines);
            }
            Step::EnrollSensor { id } => {
                self.rotation.enroll(id)?;
                format!("[Sensor Rotation] Appended '{}' to the rotation list.", id.trim())
            }
            Step::RetireSensor { id } => {
                if !self.rotation.retire(id) {
                    return Err(StepError::Miss(format!(
                        "Sensor '{id}' not found in rotation list."
                    )));
                }
                format!("[Sensor Rotation] Removed '{id}' from rotation list.")
            }
            Step::Rotate { steps } => {
                let visited = self.rotation.rotate(steps.unwrap_or(self.default_steps))?;
                format!("Traversal: {} -> ...", visited.join(" -> "))
            }
            Step::PushCommand {
                command,
                end,
                evict,
            } => {
                let eviction = if *evict {
                    Eviction::Evict
                } else {
                    Eviction::Refuse
                };
                let evicted = self.commands.push((*end).into(), command, eviction)?;
                let place = match end {
                    QueueEnd::Front => "front",
                    QueueEnd::Rear => "rear",
                };
                let mut lines = Vec::new();
                if let Some(evicted) = evicted {
                    lines.push(format!(
                        "[Warning] Queue at capacity {}; removed '{evicted}'.",
                        self.commands.capacity()
                    ));
                }
                lines.push(format!("[Deque] Added '{}' to the {place}.", command.trim()));
                return Ok(lines);
            }
            Step::PopCommand { end } => {
                let command = self.commands.pop((*end).into())?;
                let place = match end {
                    QueueEnd::Front => "front",
                    QueueEnd::Rear => "rear",
                };
                format!("[Deque] Removed '{command}' from the {place}.")
            }
            Step::SearchCommand { command } => match self.commands.search(command) {
                Some(position) => format!(
                    "[Deque] Command '{command}' found at position {position} from the front."
                ),
                None => {
                    return Err(StepError::Miss(format!(
                        "Command '{command}' not found in the deque."
                    )))
                }
            },
            Step::ClearCommands => {
                let cleared = self.commands.clear();
                format!("[Deque] Cleared {cleared} command(s).")
            }
            Step::AddDevice { parent, device } => {
                self.devices.add(parent, device)?;
                format!("[Tree] Added child '{}' to parent '{parent}'.", device.trim())
            }
            Step::RemoveDevice { parent, device } => {
                self.devices.remove(parent, device)?;
                format!("[Tree] Removed child '{device}' from parent '{parent}'.")
            }
            Step::MoveDevice { device, from, to } => {
                self.devices.relocate(device, from, to)?;
                format!("[Tree] Moved '{device}' from '{from}' to '{to}'.")
            }
            Step::FindDevice { name } => {
                let subtree = self.devices.subtree(name).ok_or_else(|| {
                    StepError::Miss(format!("Node '{name}' not found in the tree."))
                })?;
                let mut lines = vec![format!("--- Subtree for '{name}' ---")];
                lines.extend(subtree.lines().map(str::to_owned));
                return Ok(lines);
            }
            Step::Show { view } => return Ok(self.show(*view)),
        };
        Ok(vec![line])
    }

    fn show(&self, view: View) -> Vec<String> {
        match view {
            View::Events => vec![format!("Event Logs: {}", self.events.render())],
            View::Sessions => vec![format!("Active Sessions: {}", self.sessions.render())],
            View::Alerts => with_heading("Active Alerts:", &self.alerts.render()),
            View::Rotation => vec![format!("Sensor Rotation List: {}", self.rotation.render())],
            View::Commands => with_heading("Current Deque:", &self.commands.render()),
            View::Devices => with_heading("--- Hierarchical Device Groupings ---", &self.devices.render()),
            View::Sensors => listing("Sensors:", self.sensors.iter()),
            View::Alarms => listing("Alarms:", self.alarms.iter()),
            View::Users => listing("Users:", self.users.iter()),
        }
    }
}

fn with_heading(heading: &str, body: &str) -> Vec<String> {
    std::iter::once(heading.to_owned())
        .chain(body.lines().map(str::to_owned))
        .collect()
}

fn listing<T: std::fmt::Display>(heading: &str, records: impl Iterator<Item = T>) -> Vec<String> {
    let mut lines = vec![heading.to_owned()];
    lines.extend(records.map(|record| format!("  {record}")));
    if lines.len() == 1 {
        lines.push("  [None]".into());
    }
    lines
}
