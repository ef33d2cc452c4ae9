//! Authenticated identity
//!
//! The portal performs no authentication of its own. Whatever session layer
//! sits in front of it hands an [`Actor`] into each operation, and the actor's
//! id and name are what end up in `farmer_id` / `reviewed_by` fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Portal user roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Files IFR/CR claims and plantation records
    Farmer,
    /// Reviews claims and verifies plantation survival in the field
    Guard,
    /// District administrator
    Admin,
}

impl UserRole {
    /// Whether this role may approve or reject claims
    pub fn can_review(&self) -> bool {
        match self {
            UserRole::Guard | UserRole::Admin => true,
            UserRole::Farmer => false,
        }
    }

    /// Whether this role may file claims and plantation records
    pub fn can_submit(&self) -> bool {
        match self {
            UserRole::Farmer => true,
            UserRole::Guard | UserRole::Admin => false,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            UserRole::Farmer => "farmer",
            UserRole::Guard => "guard",
            UserRole::Admin => "admin",
        };
        f.write_str(label)
    }
}

/// An already-authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    /// Home village for farmers and guards
    pub village: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            village: None,
        }
    }

    pub fn farmer(id: impl Into<String>, name: impl Into<String>, village: impl Into<String>) -> Self {
        Self {
            village: Some(village.into()),
            ..Self::new(id, name, UserRole::Farmer)
        }
    }

    pub fn guard(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, UserRole::Guard)
    }

    pub fn admin(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name, UserRole::Admin)
    }

    pub fn with_village(mut self, village: impl Into<String>) -> Self {
        self.village = Some(village.into());
        self
    }
}
