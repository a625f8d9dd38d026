use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    #[serde(rename = "users", alias = "technician")]
    Technician,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::Technician];

    /// Key of this role's mapping in the credential document.
    pub fn document_key(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::Technician => "users",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Admin => "Admin",
            Role::Technician => "Technician",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Role::SuperAdmin),
            "admin" => Ok(Role::Admin),
            "users" | "technician" => Ok(Role::Technician),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// Username to password hash, one mapping per role. A username may appear
/// under several roles; each entry is independent.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CredentialDocument {
    #[serde(default)]
    pub super_admin: BTreeMap<String, String>,
    #[serde(default)]
    pub admin: BTreeMap<String, String>,
    #[serde(default, rename = "users")]
    pub technicians: BTreeMap<String, String>,
}

impl CredentialDocument {
    pub fn accounts(&self, role: Role) -> &BTreeMap<String, String> {
        match role {
            Role::SuperAdmin => &self.super_admin,
            Role::Admin => &self.admin,
            Role::Technician => &self.technicians,
        }
    }

    pub fn accounts_mut(&mut self, role: Role) -> &mut BTreeMap<String, String> {
        match role {
            Role::SuperAdmin => &mut self.super_admin,
            Role::Admin => &mut self.admin,
            Role::Technician => &mut self.technicians,
        }
    }
}

/// Identity of the caller for one request. Handed out by a successful login
/// and passed explicitly into every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }
}
