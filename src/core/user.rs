//! User identity types.
//!
//! A user is identified by a wallet address; the role decides which workflow
//! transitions are permitted.

use serde::{Deserialize, Serialize};

/// Role of an acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Project creator: may approve tasks into Done
    Owner,
    /// Task executor: may take and submit tasks
    Builder,
}

impl Role {
    /// Whether this role may move tasks into the Done column.
    pub fn can_approve(self) -> bool {
        matches!(self, Self::Owner)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Owner => write!(f, "Owner"),
            Self::Builder => write!(f, "Builder"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "builder" => Ok(Self::Builder),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// A user as returned by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier
    #[serde(default)]
    pub id: u64,
    /// Wallet address, unique, used as the actor's identity
    pub address: String,
    /// Owner or Builder
    pub role: Role,
}

impl User {
    /// Construct an actor for local permission checks.
    pub fn new(address: impl Into<String>, role: Role) -> Self {
        Self { id: 0, address: address.into(), role }
    }
}

/// Payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub address: String,
    pub role: Role,
}

/// Partial user mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}
