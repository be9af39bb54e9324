//! # hemvakt-core
//!
//! Node-based containers and sorting for the Hemvakt home monitoring toolkit.
//! Every container owns its payloads and stays usable after any failed
//! operation; misses are reported as `bool`/`Option`/`Result`, never panics.
//!
//! ### Key Submodules:
//! - `alloc`: Index-addressed node arena shared by the linked structures
//! - `list`: Singly, doubly and circular linked lists
//! - `deque`: Fixed-capacity double-ended queue
//! - `tree`: Multi-way tree with pre-order lookup by value
//! - `sort`: In-place quick sort keyed by an extraction function
//!
//! ### Concurrency:
//! All containers are single-owner and synchronous. Wrap them in a mutex
//! before sharing across threads; link updates are multi-step.

pub mod alloc;
pub mod deque;
pub mod error;
pub mod list;
pub mod sort;
pub mod tree;

pub mod prelude {
    pub use crate::alloc::*;
    pub use crate::deque::*;
    pub use crate::error::*;
    pub use crate::list::*;
    pub use crate::sort::*;
    pub use crate::tree::*;
}

pub use deque::{BoundedDeque, Full};
pub use error::{ContainerError, Missing};
pub use list::{CircularList, DoublyLinkedList, SinglyLinkedList};
pub use sort::{quick_sort, quick_sort_by_key};
pub use tree::{MultiwayTree, TreeNode};
