//! Service wiring: one shared store behind every service.

use rosterdesk_core::DomainResult;
use rosterdesk_infra::seed::seed_demo_data;
use rosterdesk_infra::{
    AppConfig, InMemoryEntityStore, ProfileService, SessionService, SharedStore, UserService,
};

pub type Store = InMemoryEntityStore;

pub struct AppServices {
    pub users: UserService<Store>,
    pub profiles: ProfileService<Store>,
    pub sessions: SessionService<Store>,
}

impl AppServices {
    pub fn new(store: SharedStore<Store>, config: &AppConfig) -> Self {
        Self {
            users: UserService::new(store.clone(), config.delete_policy),
            profiles: ProfileService::new(store.clone()),
            sessions: SessionService::new(store),
        }
    }

    /// Fresh in-memory store, seeded when the config asks for it.
    pub fn from_config(config: &AppConfig) -> DomainResult<Self> {
        let store = SharedStore::default();
        if config.seed_demo_data {
            seed_demo_data(&store)?;
        }
        Ok(Self::new(store, config))
    }
}
