use crate::config::Config;
use crate::error::AppError;
use crate::itunes::ITunesClient;
use crate::models::{ITunesItem, Price, SearchResponse, TrackResult};
use moka::future::Cache;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const MAX_TRACKS: usize = 25;
pub const CACHE_KEY_PREFIX: &str = "search_";

/// Band track search backed by the iTunes catalog, with responses cached per
/// query string for a fixed time window.
#[derive(Clone)]
pub struct TrackSearchService {
    itunes: ITunesClient,
    cache: Cache<String, Arc<SearchResponse>>,
}

impl TrackSearchService {
    pub fn new(itunes: ITunesClient, ttl: Duration, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self { itunes, cache }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ITunesClient::from_config(config),
            config.cache_ttl(),
            config.cache_max_entries,
        )
    }

    pub async fn search_tracks(&self, band_name: &str) -> Result<Arc<SearchResponse>, AppError> {
        if band_name.is_empty() {
            return Err(AppError::InvalidRequest(
                "Missing band name (query parameter 'name')".to_string(),
            ));
        }

        let cache_key = cache_key(band_name);

        if let Some(cached) = self.cache.get(&cache_key).await {
            debug!("Cache hit for {:?}", cache_key);
            return Ok(cached);
        }

        debug!("Cache miss for {:?}, querying iTunes", cache_key);

        // Concurrent misses on the same key may both reach iTunes; the last insert wins.
        let items = self.itunes.search_songs(band_name).await?;
        let response = Arc::new(build_search_response(band_name, &items));

        self.cache.insert(cache_key, response.clone()).await;

        Ok(response)
    }

    pub async fn cached_entries(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

/// Keys are the verbatim query, so "Queen" and "queen" are cached separately.
pub fn cache_key(band_name: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, band_name)
}

/// Keeps songs whose artist is exactly `band_name`, ignoring case.
pub fn filter_band_tracks<'a>(
    band_name: &str,
    items: &'a [ITunesItem],
) -> impl Iterator<Item = &'a ITunesItem> {
    let band_lower = band_name.to_lowercase();

    items.iter().filter(move |item| {
        item.wrapper_type.as_deref() == Some("track")
            && item.kind.as_deref() == Some("song")
            && item
                .artist_name
                .as_deref()
                .is_some_and(|artist| artist.to_lowercase() == band_lower)
    })
}

pub fn build_search_response(band_name: &str, items: &[ITunesItem]) -> SearchResponse {
    // Cap first, then format: an id-less item still uses up one of the slots.
    let tracks: Vec<TrackResult> = filter_band_tracks(band_name, items)
        .take(MAX_TRACKS)
        .filter_map(format_track)
        .collect();

    summarize_tracks(tracks)
}

fn format_track(item: &ITunesItem) -> Option<TrackResult> {
    Some(TrackResult {
        track_id: item.track_id?,
        album_name: item.collection_name.clone().unwrap_or_default(),
        track_name: item.track_name.clone().unwrap_or_default(),
        preview_url: item.preview_url.clone(),
        release_date: item.release_date.clone(),
        price: Price {
            amount: item.track_price.into(),
            currency: item.currency.clone(),
        },
    })
}

fn summarize_tracks(tracks: Vec<TrackResult>) -> SearchResponse {
    let albums: Vec<String> = {
        let mut seen = FxHashSet::default();
        tracks
            .iter()
            .filter(|track| seen.insert(track.album_name.as_str()))
            .map(|track| track.album_name.clone())
            .collect()
    };

    SearchResponse {
        total_albums: albums.len(),
        total_tracks: tracks.len(),
        albums,
        tracks,
    }
}
