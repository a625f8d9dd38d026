mod credential_service;
pub mod document;
mod task_service;
mod taxonomy_service;

pub use credential_service::{CredentialService, DEFAULT_SUPER_ADMIN, DEFAULT_SUPER_ADMIN_PASSWORD};
pub use task_service::TaskService;
pub use taxonomy_service::TaxonomyService;

use crate::config::Config;
use crate::errors::StoreResult;

/// The three stores a request works against. Cloning is cheap and clones
/// share each document's write lock.
#[derive(Clone)]
pub struct Stores {
    pub credentials: CredentialService,
    pub tasks: TaskService,
    pub taxonomy: TaxonomyService,
}

impl Stores {
    /// Opens every document under the configured data directory, creating
    /// missing ones with their seed contents.
    pub fn open(config: &Config) -> StoreResult<Self> {
        let storage = &config.storage;
        tracing::info!("Opening stores in {}", storage.data_dir.display());

        Ok(Self {
            credentials: CredentialService::open(storage.users_path(), config.security.bcrypt_cost)?,
            tasks: TaskService::open(storage.tasks_path())?,
            taxonomy: TaxonomyService::open(storage.taxonomy_path())?,
        })
    }
}
