//! ## hemvakt-core::alloc
//! **Index-addressed node storage for linked containers**
//!
//! Doubly linked and circular lists cannot express their back edges with
//! exclusive ownership. Their nodes live in a [`NodeArena`] and refer to
//! each other by [`NodeId`]; the arena is the only owner.
//!
//! ### Key Submodules:
//! - `arena/`: Slot arena with free-slot reuse

pub mod arena;

pub use arena::{NodeArena, NodeId};
