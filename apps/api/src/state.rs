use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::Config;
use crate::content::collections::ContentCollections;
use crate::policy::documents::PolicyDocuments;
use crate::storage::KeyValueStore;
use crate::users::detail::UserDetail;
use crate::users::seed::seed_users;
use crate::users::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Single source of truth for user records; readers take snapshots.
    pub users: RecordStore,
    /// Edit sessions for the user detail screen, one per record.
    pub user_detail: Arc<Mutex<UserDetail>>,
    pub academy: Arc<Mutex<ContentCollections>>,
    pub policies: Arc<Mutex<PolicyDocuments>>,
}

impl AppState {
    /// Seeds the record store and loads persisted content from `storage`.
    pub fn new(config: Config, storage: Arc<dyn KeyValueStore>) -> Self {
        let users = RecordStore::new(seed_users());
        AppState {
            config,
            user_detail: Arc::new(Mutex::new(UserDetail::new(users.clone()))),
            users,
            academy: Arc::new(Mutex::new(ContentCollections::load(storage.clone()))),
            policies: Arc::new(Mutex::new(PolicyDocuments::load(storage))),
        }
    }
}
