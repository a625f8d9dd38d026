use bcrypt::{hash, verify};
use std::path::PathBuf;
use std::sync::Arc;

use super::document::JsonDocument;
use crate::errors::validation::require;
use crate::errors::{StoreError, StoreResult, ValidationError};
use crate::models::{CredentialDocument, Role};

/// Account created when no credential document exists yet.
/// Rotate it (register a new super admin, remove this one) before real use.
pub const DEFAULT_SUPER_ADMIN: &str = "superadmin";
pub const DEFAULT_SUPER_ADMIN_PASSWORD: &str = "superadmin123";

pub struct CredentialService {
    document: JsonDocument<CredentialDocument>,
    cost: u32,
    // Verified against when the username is unknown, so both failure paths cost one bcrypt check.
    dummy_hash: Arc<String>,
}

impl CredentialService {
    pub fn open(path: impl Into<PathBuf>, cost: u32) -> StoreResult<Self> {
        let document: JsonDocument<CredentialDocument> = JsonDocument::new(path, move || {
            tracing::warn!(
                "Creating credential store with default super admin '{}' / '{}'. \
                 Change this account before production use.",
                DEFAULT_SUPER_ADMIN,
                DEFAULT_SUPER_ADMIN_PASSWORD
            );
            let mut doc = CredentialDocument::default();
            doc.super_admin.insert(
                DEFAULT_SUPER_ADMIN.to_string(),
                hash(DEFAULT_SUPER_ADMIN_PASSWORD, cost)?,
            );
            Ok(doc)
        });
        document.ensure()?;

        Ok(Self {
            document,
            cost,
            dummy_hash: Arc::new(hash("fixflow-unknown-account", cost)?),
        })
    }

    pub fn register(&self, role: Role, username: &str, password: &str) -> StoreResult<()> {
        require("username", username)?;
        require("password", password)?;
        let username = username.trim();

        // Hash before taking the document lock
        let password_hash = hash(password, self.cost)?;

        self.document.update(|doc| {
            let accounts = doc.accounts_mut(role);
            if accounts.contains_key(username) {
                tracing::info!("{} '{}' already exists", role, username);
                return Err(StoreError::AlreadyExists(format!("{} '{}'", role, username)));
            }
            accounts.insert(username.to_string(), password_hash);
            Ok(())
        })?;

        tracing::info!("Registered {} '{}'", role, username);
        Ok(())
    }

    /// `false` for an unknown user and for a wrong password alike.
    pub fn authenticate(&self, role: Role, username: &str, password: &str) -> StoreResult<bool> {
        let username = username.trim();
        let doc = self.document.read()?;

        let verified = match doc.accounts(role).get(username) {
            Some(stored_hash) => verify(password, stored_hash).unwrap_or_else(|e| {
                tracing::warn!("Stored hash for {} '{}' is unreadable: {}", role, username, e);
                false
            }),
            None => {
                let _ = verify(password, &self.dummy_hash);
                false
            }
        };

        if verified
            && role == Role::SuperAdmin
            && username == DEFAULT_SUPER_ADMIN
            && password == DEFAULT_SUPER_ADMIN_PASSWORD
        {
            tracing::warn!(
                "Login with the default super admin password; register a new super admin and remove '{}'",
                DEFAULT_SUPER_ADMIN
            );
        }

        tracing::debug!("Authentication for {} '{}': {}", role, username, verified);
        Ok(verified)
    }

    /// Returns whether an account was removed; removing an absent one is a no-op.
    pub fn remove(&self, role: Role, username: &str) -> StoreResult<bool> {
        let username = username.trim();
        let removed = self
            .document
            .update(|doc| Ok(doc.accounts_mut(role).remove(username).is_some()))?;

        if removed {
            tracing::info!("Removed {} '{}'", role, username);
        } else {
            tracing::debug!("Nothing to remove for {} '{}'", role, username);
        }
        Ok(removed)
    }

    /// Like [`remove`](Self::remove), but refuses to delete the only remaining
    /// super admin. The check runs under the document lock.
    pub fn remove_unless_last(&self, role: Role, username: &str) -> StoreResult<bool> {
        let username = username.trim();
        let removed = self.document.update(|doc| {
            let accounts = doc.accounts_mut(role);
            if role == Role::SuperAdmin && accounts.len() == 1 && accounts.contains_key(username) {
                tracing::warn!("Refusing to remove the last super admin '{}'", username);
                return Err(ValidationError::LastSuperAdmin.into());
            }
            Ok(accounts.remove(username).is_some())
        })?;

        if removed {
            tracing::info!("Removed {} '{}'", role, username);
        }
        Ok(removed)
    }

    /// Usernames registered under `role`, sorted.
    pub fn usernames(&self, role: Role) -> StoreResult<Vec<String>> {
        Ok(self.document.read()?.accounts(role).keys().cloned().collect())
    }

    pub fn exists(&self, role: Role, username: &str) -> StoreResult<bool> {
        Ok(self.document.read()?.accounts(role).contains_key(username.trim()))
    }

    pub fn snapshot(&self) -> StoreResult<CredentialDocument> {
        self.document.read()
    }
}

impl Clone for CredentialService {
    fn clone(&self) -> Self {
        Self {
            document: self.document.clone(),
            cost: self.cost,
            dummy_hash: self.dummy_hash.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const COST: u32 = 4;

    #[test]
    fn bootstrap_contains_only_default_super_admin() {
        let dir = TempDir::new().unwrap();
        let service = CredentialService::open(dir.path().join("users.json"), COST).unwrap();

        assert_eq!(service.usernames(Role::SuperAdmin).unwrap(), vec![DEFAULT_SUPER_ADMIN]);
        assert!(service.usernames(Role::Admin).unwrap().is_empty());
        assert!(service.usernames(Role::Technician).unwrap().is_empty());
        assert!(service
            .authenticate(Role::SuperAdmin, DEFAULT_SUPER_ADMIN, DEFAULT_SUPER_ADMIN_PASSWORD)
            .unwrap());
    }

    #[test]
    fn credentials_are_scoped_per_role() {
        let dir = TempDir::new().unwrap();
        let service = CredentialService::open(dir.path().join("users.json"), COST).unwrap();
        service.register(Role::Admin, "alex", "pw-admin").unwrap();
        service.register(Role::Technician, "alex", "pw-tech").unwrap();

        assert!(service.authenticate(Role::Admin, "alex", "pw-admin").unwrap());
        assert!(!service.authenticate(Role::Admin, "alex", "pw-tech").unwrap());
        assert!(service.authenticate(Role::Technician, "alex", "pw-tech").unwrap());
        assert!(!service.authenticate(Role::SuperAdmin, "alex", "pw-admin").unwrap());
    }

    #[test]
    fn padded_username_round_trips() {
        let dir = TempDir::new().unwrap();
        let service = CredentialService::open(dir.path().join("users.json"), COST).unwrap();
        service.register(Role::Admin, " ada ", "pw").unwrap();

        assert_eq!(service.usernames(Role::Admin).unwrap(), vec!["ada"]);
        assert!(service.authenticate(Role::Admin, " ada ", "pw").unwrap());
        assert!(service.authenticate(Role::Admin, "ada", "pw").unwrap());
        assert!(service.exists(Role::Admin, " ada").unwrap());
        assert!(service.remove(Role::Admin, "ada ").unwrap());
        assert!(!service.exists(Role::Admin, "ada").unwrap());
    }

    #[test]
    fn last_super_admin_survives_concurrent_removals() {
        let dir = TempDir::new().unwrap();
        let service = CredentialService::open(dir.path().join("users.json"), COST).unwrap();
        service.register(Role::SuperAdmin, "chief", "pw").unwrap();

        let barrier = std::sync::Barrier::new(2);
        let results: Vec<StoreResult<bool>> = std::thread::scope(|scope| {
            let handles: Vec<_> = [DEFAULT_SUPER_ADMIN, "chief"]
                .into_iter()
                .map(|username| {
                    let service = service.clone();
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        service.remove_unless_last(Role::SuperAdmin, username)
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| matches!(r, Ok(true))).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(StoreError::Validation(ValidationError::LastSuperAdmin))))
                .count(),
            1
        );
        assert_eq!(service.usernames(Role::SuperAdmin).unwrap().len(), 1);
    }

    #[test]
    fn remove_unless_last_only_guards_super_admins() {
        let dir = TempDir::new().unwrap();
        let service = CredentialService::open(dir.path().join("users.json"), COST).unwrap();
        service.register(Role::Admin, "solo", "pw").unwrap();

        assert!(service.remove_unless_last(Role::Admin, "solo").unwrap());
        assert!(!service.remove_unless_last(Role::SuperAdmin, "ghost").unwrap());
        assert!(matches!(
            service.remove_unless_last(Role::SuperAdmin, DEFAULT_SUPER_ADMIN),
            Err(StoreError::Validation(ValidationError::LastSuperAdmin))
        ));
    }

    #[test]
    fn unreadable_stored_hash_fails_closed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(
            &path,
            r#"{"super_admin": {}, "admin": {"broken": "not-a-bcrypt-hash"}, "users": {}}"#,
        )
        .unwrap();
        let service = CredentialService::open(&path, COST).unwrap();
        assert!(!service.authenticate(Role::Admin, "broken", "anything").unwrap());
    }
}
