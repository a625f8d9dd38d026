use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub storage: StorageConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub users_file: String,
    pub tasks_file: String,
    pub taxonomy_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    pub bcrypt_cost: u32,  // 4..=31, bcrypt rejects anything else
}

impl StorageConfig {
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(&self.tasks_file)
    }

    pub fn taxonomy_path(&self) -> PathBuf {
        self.data_dir.join(&self.taxonomy_file)
    }
}

impl Config {
    /// Built-in defaults, overlaid by `config/default.toml` when present and
    /// then by `FIXFLOW_*` environment variables
    /// (e.g. `FIXFLOW_STORAGE__DATA_DIR=/var/lib/fixflow`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .set_default("storage.data_dir", "data")?
            .set_default("storage.users_file", "users.json")?
            .set_default("storage.tasks_file", "tasks.json")?
            .set_default("storage.taxonomy_file", "config.json")?
            .set_default("security.bcrypt_cost", bcrypt::DEFAULT_COST as i64)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::Environment::with_prefix("FIXFLOW").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Default file names under the given data directory.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            storage: StorageConfig {
                data_dir: data_dir.as_ref().to_path_buf(),
                users_file: "users.json".into(),
                tasks_file: "tasks.json".into(),
                taxonomy_file: "config.json".into(),
            },
            security: SecurityConfig {
                bcrypt_cost: bcrypt::DEFAULT_COST,
            },
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.security.bcrypt_cost = cost;
        self
    }
}
