//! Event log and active user sessions.

use hemvakt_core::{DoublyLinkedList, SinglyLinkedList};
use hemvakt_model::Label;
use tracing::{info, warn};

use crate::{normalize, require_text, MonitorError};

/// Append-only record of security events, oldest first.
#[derive(Default)]
pub struct EventLog {
    events: SinglyLinkedList<Label>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &str) -> Result<(), MonitorError> {
        let event = require_text("Event", event)?;
        self.events.append(Label::from(event));
        info!(event, total = self.events.len(), "Event recorded");
        Ok(())
    }

    pub fn entries(&self) -> impl Iterator<Item = &Label> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// `A -> B -> C`, or `No events recorded.`
    pub fn render(&self) -> String {
        if self.events.is_empty() {
            return "No events recorded.".into();
        }
        join(self.events.iter(), " -> ")
    }
}

/// Sessions currently open, in the order they were opened.
#[derive(Default)]
pub struct SessionTracker {
    sessions: DoublyLinkedList<Label>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, session: &str) -> Result<(), MonitorError> {
        let session = require_text("Session", session)?;
        self.sessions.append(Label::from(session));
        info!(session, active = self.sessions.len(), "Session opened");
        Ok(())
    }

    /// Closes the earliest session with this label.
    pub fn close(&mut self, session: &str) -> bool {
        let session = normalize(session);
        let closed = self
            .sessions
            .remove_first_by(|open| open.as_str() == session)
            .is_some();
        if closed {
            info!(session, active = self.sessions.len(), "Session closed");
        } else {
            warn!(session, "Session not found");
        }
        closed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.sessions.iter()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// `A <-> B`, or `No active sessions.`
    pub fn render(&self) -> String {
        if self.sessions.is_empty() {
            return "No active sessions.".into();
        }
        join(self.sessions.iter(), " <-> ")
    }
}

fn join<'a>(labels: impl Iterator<Item = &'a Label>, separator: &str) -> String {
    labels.map(Label::as_str).collect::<Vec<_>>().join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn event_log_renders_in_order() {
        let mut log = EventLog::new();
        assert_eq!(log.render(), "No events recorded.");

        log.record("Door opened").unwrap();
        log.record("  Motion in hall ").unwrap();
        assert_eq!(log.render(), "Door opened -> Motion in hall");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn blank_event_rejected() {
        let mut log = EventLog::new();
        assert!(matches!(log.record("   "), Err(MonitorError::Blank("Event"))));
        assert!(log.is_empty());
    }

    #[test]
    fn padded_session_closes() {
        let mut sessions = SessionTracker::new();
        sessions.open(" X ").unwrap();
        assert_eq!(sessions.render(), "X");

        assert!(sessions.close(" X "));
        assert!(sessions.is_empty());
    }

    #[traced_test]
    #[test]
    fn closing_sessions() {
        let mut sessions = SessionTracker::new();
        for user in ["X", "Y", "Z"] {
            sessions.open(user).unwrap();
        }

        assert!(sessions.close("Y"));
        assert_eq!(sessions.render(), "X <-> Z");
        assert!(!sessions.close("Y"));
        assert!(logs_contain("Session not found"));

        assert!(sessions.close("X"));
        assert!(sessions.close("Z"));
        assert_eq!(sessions.render(), "No active sessions.");
    }
}
