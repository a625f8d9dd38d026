use crate::errors::{StoreError, StoreResult};
use crate::middleware::require_role;
use crate::models::{LoginForm, RegisterForm, Role, Session};
use crate::services::Stores;

/// Checks the credentials and hands back the session for later requests.
pub fn login(stores: &Stores, login_form: LoginForm) -> StoreResult<Session> {
    let username = login_form.username.trim();
    tracing::info!("Login attempt for {} '{}'", login_form.role, username);

    if stores
        .credentials
        .authenticate(login_form.role, username, &login_form.password)?
    {
        tracing::info!("{} '{}' logged in", login_form.role, username);
        Ok(Session::new(username, login_form.role))
    } else {
        // Same error whether the user is unknown or the password is wrong
        tracing::info!("Login failed for {} '{}'", login_form.role, username);
        Err(StoreError::Auth(format!("invalid {} credentials", login_form.role)))
    }
}

/// Super admins may create any account; admins only technicians.
pub fn register_account(stores: &Stores, session: &Session, register_form: RegisterForm) -> StoreResult<()> {
    let allowed: &[Role] = match register_form.role {
        Role::Technician => &[Role::SuperAdmin, Role::Admin],
        Role::Admin | Role::SuperAdmin => &[Role::SuperAdmin],
    };
    require_role(
        session,
        allowed,
        &format!("register {} accounts", register_form.role.display_name().to_lowercase()),
    )?;

    stores
        .credentials
        .register(register_form.role, &register_form.username, &register_form.password)?;

    tracing::info!(
        "{} '{}' registered {} '{}'",
        session.role,
        session.username,
        register_form.role,
        register_form.username.trim()
    );
    Ok(())
}

/// Idempotent; the last super admin account is kept so the store stays reachable.
pub fn remove_account(stores: &Stores, session: &Session, role: Role, username: &str) -> StoreResult<bool> {
    require_role(session, &[Role::SuperAdmin], "remove accounts")?;
    stores.credentials.remove_unless_last(role, username)
}

/// Usernames of one role, for removal lists and assignment dropdowns.
pub fn list_accounts(stores: &Stores, session: &Session, role: Role) -> StoreResult<Vec<String>> {
    match (session.role, role) {
        (Role::SuperAdmin, _) | (Role::Admin, Role::Technician) => stores.credentials.usernames(role),
        (Role::Admin, _) | (Role::Technician, _) => Err(StoreError::Forbidden(format!(
            "list {} accounts",
            role.display_name().to_lowercase()
        ))),
    }
}
