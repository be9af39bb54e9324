//! Thread-safe handle for facades used from several threads.
//!
//! The facades themselves are single-owner. Library callers that feed one
//! tracker from several threads (a sensor poller and an operator console,
//! say) wrap it in [`Shared`]. Container updates relink several nodes, so
//! every access holds the lock for the whole closure.
//!
//! ```
//! use std::thread;
//!
//! use hemvakt_model::{Alert, AlertKind, Priority};
//! use hemvakt_monitor::{AlertTracker, Shared};
//!
//! let alerts = Shared::new(AlertTracker::new());
//! let poller = alerts.clone();
//! thread::spawn(move || {
//!     let alert = Alert::new("A1", "S1", AlertKind::Fire, Priority::HIGHEST, "Smoke");
//!     poller.with(|tracker| tracker.raise(alert)).unwrap();
//! })
//! .join()
//! .unwrap();
//!
//! assert_eq!(alerts.with(|tracker| tracker.len()), 1);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;

pub struct Shared<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    /// Runs `f` with exclusive access.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandQueue, Eviction};
    use std::thread;

    #[test]
    fn concurrent_pushes_respect_capacity() {
        let queue = Shared::new(CommandQueue::new(8).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let queue = queue.clone();
                thread::spawn(move || {
                    for n in 0..25 {
                        queue
                            .with(|q| q.push_rear(&format!("w{worker}-{n}"), Eviction::Evict))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        queue.with(|q| {
            assert_eq!(q.len(), 8);
            assert!(q.is_full());
        });
    }
}
