use std::sync::Arc;

use crate::auth::{jwt::JwtKeys, password::Passwords, repo::{PgUserStore, UserStore}};
use crate::candidates::repo::{CandidateStore, PgCandidateStore};
use crate::config::AppConfig;
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub keys: JwtKeys,
    pub passwords: Passwords,
    pub users: Arc<dyn UserStore>,
    pub candidates: Arc<dyn CandidateStore>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config).await?;
        let users = Arc::new(PgUserStore::new(pool.clone())) as Arc<dyn UserStore>;
        let candidates = Arc::new(PgCandidateStore::new(pool)) as Arc<dyn CandidateStore>;
        Self::from_parts(Arc::new(config), users, candidates)
    }

    /// Signing keys and hasher are derived from `config`; the stores are injected.
    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        candidates: Arc<dyn CandidateStore>,
    ) -> anyhow::Result<Self> {
        let keys = JwtKeys::new(&config.jwt);
        let passwords = Passwords::new(&config.password)?;
        Ok(Self {
            config,
            keys,
            passwords,
            users,
            candidates,
        })
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        crate::testing::fixture().state
    }
}
