use std::sync::Arc;
use chrono::Utc;

use crate::auth::AuthService;
use crate::collab::CollabServer;
use crate::config::Config;
use crate::contest::{seed, ContestStore};
use crate::error::Result;

/// Everything the HTTP and socket handlers share
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<AuthService>,
    pub contests: Arc<ContestStore>,
    pub collab: Arc<CollabServer>,
}

impl AppState {
    pub async fn build(config: Config) -> Result<Self> {
        let auth = AuthService::new(&config.auth);

        let contests = if config.seed_demo_data {
            auth.users().seed_demo_user().await?;
            let data = seed::demo_data(Utc::now());
            tracing::info!(
                contests = data.contests.len(),
                problems = data.problems.len(),
                submissions = data.submissions.len(),
                "Loaded demo data"
            );
            ContestStore::with_seed(data)
        } else {
            ContestStore::new()
        };

        Ok(Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            contests: Arc::new(contests),
            collab: Arc::new(CollabServer::new()),
        })
    }
}
