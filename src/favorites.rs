use crate::error::AppError;
use crate::models::{FavoriteEntry, FavoriteRequest};
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::info;

pub const INCOMPLETE_REQUEST_MESSAGE: &str = "Incomplete data in request";

/// Identity of a favorite: exact track id plus case-folded band name.
/// `user` and `ranking` are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FavoriteKey {
    track_id: i64,
    band_name: String,
}

impl FavoriteKey {
    pub fn new(track_id: i64, band_name: &str) -> Self {
        Self {
            track_id,
            band_name: band_name.to_lowercase(),
        }
    }

    pub fn of(entry: &FavoriteEntry) -> Self {
        Self::new(entry.track_id, &entry.band_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToggleResult {
    Added(FavoriteEntry),
    Removed(FavoriteEntry),
}

#[derive(Default)]
struct Favorites {
    next_seq: u64,
    index: FxHashMap<FavoriteKey, u64>,
    entries: BTreeMap<u64, FavoriteEntry>,
}

/// In-memory favorites list. Toggles hold the write lock for the whole
/// lookup-then-mutate step, so one identity never appears twice.
#[derive(Default)]
pub struct FavoritesRegistry {
    favorites: RwLock<Favorites>,
}

impl FavoritesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn toggle_favorite(&self, request: FavoriteRequest) -> Result<ToggleResult, AppError> {
        let entry = validate_request(request)?;
        Ok(self.toggle(entry).await)
    }

    pub async fn toggle(&self, entry: FavoriteEntry) -> ToggleResult {
        let key = FavoriteKey::of(&entry);
        let mut favorites = self.favorites.write().await;

        if let Some(seq) = favorites.index.remove(&key) {
            if let Some(removed) = favorites.entries.remove(&seq) {
                info!(
                    "Removed favorite track {} of {:?} (user {:?})",
                    removed.track_id, removed.band_name, entry.user
                );
                return ToggleResult::Removed(removed);
            }
        }

        let seq = favorites.next_seq;
        favorites.next_seq += 1;
        favorites.index.insert(key, seq);
        favorites.entries.insert(seq, entry.clone());

        info!(
            "Added favorite track {} of {:?} (user {:?})",
            entry.track_id, entry.band_name, entry.user
        );

        ToggleResult::Added(entry)
    }

    /// All favorites in insertion order.
    pub async fn list(&self) -> Vec<FavoriteEntry> {
        let favorites = self.favorites.read().await;
        favorites.entries.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.favorites.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Every field must be present and truthy: empty strings, a zero id and a
/// `null`, `false`, `0` or `""` ranking all count as missing.
pub fn validate_request(request: FavoriteRequest) -> Result<FavoriteEntry, AppError> {
    let incomplete = || AppError::InvalidRequest(INCOMPLETE_REQUEST_MESSAGE.to_string());

    let band_name = request.band_name.filter(|s| !s.is_empty()).ok_or_else(incomplete)?;
    let track_id = request.track_id.filter(|id| *id != 0).ok_or_else(incomplete)?;
    let user = request.user.filter(|s| !s.is_empty()).ok_or_else(incomplete)?;
    let ranking = request.ranking.filter(is_truthy).ok_or_else(incomplete)?;

    Ok(FavoriteEntry {
        band_name,
        track_id,
        user,
        ranking,
    })
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
