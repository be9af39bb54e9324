use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::Keyed;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub name: String,
    /// e.g. `admin`, `guest`
    #[validate(length(min = 1))]
    pub role: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: role.into(),
        }
    }
}

impl Keyed for User {
    fn key(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User(ID:{}, Name:{}, Role:{})", self.id, self.name, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_fails_validation() {
        let user = User::new("U1", "", "admin");
        assert!(user.validate().is_err());
        assert!(User::new("U1", "Alva", "admin").validate().is_ok());
    }
}
