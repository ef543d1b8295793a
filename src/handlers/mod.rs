pub mod catalog;
pub mod health;
pub mod metrics_handler;
pub mod pricing;
pub mod quotes;

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::config::Config;

/// Application state
///
/// Handlers load one configuration snapshot per request, so a SIGHUP reload
/// never mixes old and new prices within a single calculation.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ArcSwap<Config>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
        }
    }
}
