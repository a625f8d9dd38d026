use crate::errors::{StoreError, StoreResult};
use crate::models::{Role, Session};

/// Lets the request through only if the session's role is one of `allowed`.
pub fn require_role(session: &Session, allowed: &[Role], action: &str) -> StoreResult<()> {
    if allowed.contains(&session.role) {
        return Ok(());
    }

    tracing::warn!(
        "{} '{}' attempted to {} without permission",
        session.role,
        session.username,
        action
    );
    Err(StoreError::Forbidden(action.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_listed_roles_pass() {
        let tech = Session::new("t", Role::Technician);
        assert!(require_role(&tech, &[Role::Technician], "complete tasks").is_ok());
        let err = require_role(&tech, &[Role::Admin, Role::SuperAdmin], "assign tasks").unwrap_err();
        assert_eq!(err.user_message(), "You are not allowed to assign tasks");
    }
}
