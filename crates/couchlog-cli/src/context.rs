use color_eyre::Result;
use std::time::Duration;
use watchlist_client::HttpWatchlistClient;
use watchlist_config::{Config, PathManager, SessionStore};
use watchlist_core::TransitionController;

/// Everything a command needs: config, the stored session, and the paths
/// they came from. Loaded once per invocation; no state is shared across
/// invocations beyond these files.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub session: SessionStore,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config = Config::load(&paths.config_file())
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config: {}", e))?;
        let mut session = SessionStore::new(paths.session_file());
        session
            .load()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load session: {}", e))?;
        Ok(Self {
            paths,
            config,
            session,
        })
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.user_token().is_some()
    }

    pub fn page_size(&self) -> u32 {
        self.config.list.page_size
    }

    /// HTTP store client carrying the stored session token, if any.
    pub fn client(&self) -> Result<HttpWatchlistClient> {
        let client = HttpWatchlistClient::new(
            self.config.server.base_url.clone(),
            Duration::from_secs(self.config.server.timeout_secs),
        )?
        .with_token(self.session.user_token().cloned());
        Ok(client)
    }

    pub fn controller(&self) -> Result<TransitionController<HttpWatchlistClient>> {
        Ok(TransitionController::new(self.client()?))
    }
}
