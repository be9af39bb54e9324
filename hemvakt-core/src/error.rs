use std::fmt;

use thiserror::Error;

/// Which lookup failed when a container reports [`ContainerError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Value,
    Parent,
    Child,
    CurrentParent,
    NewParent,
    /// Neither the current nor the new parent exists.
    BothParents,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self {
            Missing::Value => "value",
            Missing::Parent => "parent",
            Missing::Child => "child",
            Missing::CurrentParent => "current parent",
            Missing::NewParent => "new parent",
            Missing::BothParents => "current and new parent",
        };
        f.write_str(what)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("{0} not found")]
    NotFound(Missing),

    #[error("Duplicate key rejected")]
    DuplicateKey,

    #[error("Container is empty")]
    Empty,

    #[error("Invalid capacity (must be at least 1)")]
    InvalidCapacity,

    #[error("Move would place a node under its own descendant")]
    WouldCycle,
}
