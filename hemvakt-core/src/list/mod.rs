//! ## hemvakt-core::list
//! **Linked sequences**
//!
//! - `singly/`: append-only forward list, nodes own their successor
//! - `doubly/`: arena-backed list with non-owning back links
//! - `circular/`: arena-backed ring whose tail links back to the head
//!
//! Appends walk from the head to the tail on every call; none of the lists
//! caches a tail link.

pub mod circular;
pub mod doubly;
pub mod singly;

pub use circular::{CircularList, Rotation};
pub use doubly::DoublyLinkedList;
pub use singly::SinglyLinkedList;
