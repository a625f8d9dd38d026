use anyhow::{bail, Context, Result};
use fixflow::{Config, Stores};

const USAGE: &str = "usage: fixflow <init | hash-password <password>>";

fn main() -> Result<()> {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["init"] => init(),
        ["hash-password", password] => hash_password(password),
        _ => bail!(USAGE),
    }
}

// Creates any missing documents with their seed contents
fn init() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let stores = Stores::open(&config).with_context(|| {
        format!("Failed to open stores in {}", config.storage.data_dir.display())
    })?;

    let super_admins = stores.credentials.usernames(fixflow::models::Role::SuperAdmin)?;
    let tasks = stores.tasks.list_all()?;

    println!("Data directory: {}", config.storage.data_dir.display());
    println!("  accounts: {}", config.storage.users_path().display());
    println!("  tasks:    {} ({} tasks)", config.storage.tasks_path().display(), tasks.len());
    println!("  lists:    {}", config.storage.taxonomy_path().display());
    println!("Super admins: {}", super_admins.join(", "));
    if super_admins.iter().any(|u| u == fixflow::services::DEFAULT_SUPER_ADMIN) {
        println!(
            "WARNING: the default '{}' account is active. Register a new super admin and remove it.",
            fixflow::services::DEFAULT_SUPER_ADMIN
        );
    }
    Ok(())
}

// Prints a bcrypt hash for hand-editing the accounts document
fn hash_password(password: &str) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let hashed = bcrypt::hash(password, config.security.bcrypt_cost).context("Failed to hash password")?;
    let valid = bcrypt::verify(password, &hashed).context("Failed to verify hash")?;

    println!("Hash: {}", hashed);
    println!("Verification test: {}", valid);
    Ok(())
}
