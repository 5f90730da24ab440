use std::sync::Arc;

use crate::auth::{SessionCarrier, TokenCodec};
use crate::config::AppConfig;
use crate::database::Store;

/// Shared application state handed to every handler and middleware.
///
/// Built once at startup; everything inside is read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub codec: Arc<TokenCodec>,
    pub carrier: SessionCarrier,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn Store>) -> Self {
        let codec = TokenCodec::from_config(&config.security);
        let carrier = SessionCarrier::from_config(&config.security);

        Self {
            config: Arc::new(config),
            codec: Arc::new(codec),
            carrier,
            store,
        }
    }
}
