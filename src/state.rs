use crate::config::Config;
use crate::favorites::FavoritesRegistry;
use crate::search::TrackSearchService;

/// Everything the handlers share for the lifetime of the process.
pub struct AppState {
    pub search: TrackSearchService,
    pub favorites: FavoritesRegistry,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_search(TrackSearchService::from_config(config))
    }

    pub fn with_search(search: TrackSearchService) -> Self {
        Self {
            search,
            favorites: FavoritesRegistry::new(),
        }
    }
}
