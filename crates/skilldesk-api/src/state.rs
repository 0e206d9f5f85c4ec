//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and HTTP
//! handlers. Services are generic over repository/hasher traits; AppState
//! pins them to the concrete infra implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use skilldesk_core::service::skill::SkillService;
use skilldesk_core::service::user::UserService;
use skilldesk_infra::config::load_app_config;
use skilldesk_infra::crypto::hash::Sha256KeyHasher;
use skilldesk_infra::filesystem::{database_url, resolve_data_dir};
use skilldesk_infra::identity::ConfiguredAppIdentity;
use skilldesk_infra::sqlite::pool::DatabasePool;
use skilldesk_infra::sqlite::skill::SqliteSkillRepository;
use skilldesk_infra::sqlite::user::SqliteUserRepository;
use skilldesk_types::config::AppConfig;

pub type ConcreteSkillService = SkillService<SqliteSkillRepository>;

pub type ConcreteUserService = UserService<SqliteUserRepository, Sha256KeyHasher>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub skill_service: Arc<ConcreteSkillService>,
    pub user_service: Arc<ConcreteUserService>,
    pub app_identity: Arc<ConfiguredAppIdentity>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load `config.toml`, open the database.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_app_config(&data_dir).await;
        Self::open(&data_dir, config).await
    }

    /// Wire services against the database in `data_dir` with an explicit config.
    pub async fn open(data_dir: &Path, config: AppConfig) -> anyhow::Result<Self> {
        let db_pool = DatabasePool::new(&database_url(data_dir)).await?;

        let skill_service = SkillService::new(SqliteSkillRepository::new(db_pool.clone()));
        let user_service = UserService::new(
            SqliteUserRepository::new(db_pool),
            Sha256KeyHasher,
        );
        let app_identity = ConfiguredAppIdentity::from_config(&config.app_identity);

        tracing::debug!(
            data_dir = %data_dir.display(),
            enable_new_structures = config.enable_new_structures,
            "application state ready"
        );

        Ok(Self {
            skill_service: Arc::new(skill_service),
            user_service: Arc::new(user_service),
            app_identity: Arc::new(app_identity),
            config: Arc::new(config),
            data_dir: data_dir.to_path_buf(),
        })
    }
}
