//! Bounded queue of pending security commands.
//!
//! A full queue never grows. Pushing onto it either evicts the command at the
//! opposite end ([`Eviction::Evict`]) or leaves the queue as it was
//! ([`Eviction::Refuse`]). [`CommandQueue::eviction_candidate`] tells a
//! caller in advance what would be lost.

use hemvakt_core::{BoundedDeque, ContainerError, Full};
use tracing::{info, warn};

use crate::{normalize, require_text, MonitorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum End {
    Front,
    Rear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eviction {
    Evict,
    Refuse,
}

pub struct CommandQueue {
    commands: BoundedDeque<String>,
}

impl CommandQueue {
    pub fn new(capacity: usize) -> Result<Self, MonitorError> {
        Ok(Self {
            commands: BoundedDeque::with_capacity(capacity)?,
        })
    }

    pub fn capacity(&self) -> usize {
        self.commands.capacity()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.commands.is_full()
    }

    /// The command a push at `end` would evict, if the queue is full.
    pub fn eviction_candidate(&self, end: End) -> Option<&str> {
        if !self.commands.is_full() {
            return None;
        }
        let candidate = match end {
            End::Front => self.commands.peek_rear(),
            End::Rear => self.commands.peek_front(),
        };
        candidate.map(String::as_str)
    }

    pub fn push_front(
        &mut self,
        command: &str,
        eviction: Eviction,
    ) -> Result<Option<String>, MonitorError> {
        self.push(End::Front, command, eviction)
    }

    pub fn push_rear(
        &mut self,
        command: &str,
        eviction: Eviction,
    ) -> Result<Option<String>, MonitorError> {
        self.push(End::Rear, command, eviction)
    }

    /// Pushes `command` at `end` and returns the evicted command, if any.
    pub fn push(
        &mut self,
        end: End,
        command: &str,
        eviction: Eviction,
    ) -> Result<Option<String>, MonitorError> {
        let command = require_text("Command", command)?.to_owned();

        let evicted = match (self.commands.is_full(), eviction) {
            (false, _) => None,
            (true, Eviction::Refuse) => {
                warn!(command = %command, capacity = self.capacity(), "Command refused, queue full");
                return Err(MonitorError::QueueFull(command));
            }
            (true, Eviction::Evict) => match end {
                End::Front => self.commands.pop_rear(),
                End::Rear => self.commands.pop_front(),
            },
        };

        let pushed = match end {
            End::Front => self.commands.push_front(command),
            End::Rear => self.commands.push_rear(command),
        };
        pushed.map_err(|Full(command)| MonitorError::QueueFull(command))?;

        if let Some(evicted) = &evicted {
            warn!(evicted = %evicted, ?end, "Command evicted to make room");
        }
        info!(?end, queued = self.commands.len(), "Command queued");
        Ok(evicted)
    }

    pub fn pop_front(&mut self) -> Result<String, MonitorError> {
        self.pop(End::Front)
    }

    pub fn pop_rear(&mut self) -> Result<String, MonitorError> {
        self.pop(End::Rear)
    }

    pub fn pop(&mut self, end: End) -> Result<String, MonitorError> {
        let command = match end {
            End::Front => self.commands.pop_front(),
            End::Rear => self.commands.pop_rear(),
        }
        .ok_or(ContainerError::Empty)?;
        info!(command = %command, ?end, "Command removed");
        Ok(command)
    }

    /// 1-based position from the front.
    pub fn search(&self, command: &str) -> Option<usize> {
        self.commands.position(&normalize(command).to_owned())
    }

    /// Drops every command and reports how many there were.
    pub fn clear(&mut self) -> usize {
        let cleared = self.commands.len();
        self.commands.clear();
        info!(cleared, "Command queue cleared");
        cleared
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    /// Numbered lines from the front, or `[Empty]`.
    pub fn render(&self) -> String {
        if self.commands.is_empty() {
            return "[Empty]".into();
        }
        self.iter()
            .enumerate()
            .map(|(index, command)| format!("  {}. {command}", index + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
