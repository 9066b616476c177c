//! Session roles
//!
//! Roles are a client-side privilege tier. They gate command availability
//! and decide whether document fields are shown plainly or redacted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Guest,
    Builder,
    Admin,
}

impl Role {
    /// Builder and admin see everything unmasked
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Builder | Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Builder => "builder",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
