use std::sync::Arc;

use crate::{
    accounts::{CredentialStore, MemoryAccounts},
    config::Config,
    news::NewsClient,
    session::SessionStore,
};

pub struct AppState {
    pub config: Config,
    pub accounts: Arc<dyn CredentialStore>,
    pub sessions: SessionStore,
    pub news: NewsClient,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let news = NewsClient::new(&config);

        Arc::new(Self {
            config,
            accounts: Arc::new(MemoryAccounts::new()),
            sessions: SessionStore::new(),
            news,
        })
    }
}
