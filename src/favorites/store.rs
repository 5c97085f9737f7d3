use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

use super::asset::{Asset, AssetKind, FavoriteAsset};

/// Errors returned by [`FavoritesStore`] mutations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Asset '{asset_id}' already exists in favorites of user '{user_id}'")]
    DuplicateAsset { user_id: String, asset_id: String },
}

/// Counters reported by the health endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub users: usize,
    pub assets: usize,
}

/// In-memory registry of every user's favorite assets.
///
/// One reader-writer lock guards the whole map. Each public method takes the
/// lock once and never awaits while holding it, so every call is atomic with
/// respect to the others. Queries hand out clones, never references into the map.
#[derive(Debug, Default)]
pub struct FavoritesStore {
    collections: RwLock<HashMap<String, Vec<Asset>>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an asset to the user's collection, creating the collection on
    /// first use. An asset whose id is already present is rejected, not replaced.
    pub async fn add_favorite(&self, user_id: &str, asset: Asset) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let collection = collections.entry(user_id.to_string()).or_default();

        if collection.iter().any(|existing| existing.id() == asset.id()) {
            return Err(StoreError::DuplicateAsset {
                user_id: user_id.to_string(),
                asset_id: asset.id().to_string(),
            });
        }

        collection.push(asset);
        Ok(())
    }

    /// Snapshot of the user's favorites in insertion order
    pub async fn get_favorites(&self, user_id: &str) -> Vec<Asset> {
        let collections = self.collections.read().await;
        collections.get(user_id).cloned().unwrap_or_default()
    }

    /// Snapshot of the user's favorites of one kind, in insertion order
    pub async fn get_favorites_by_kind(&self, user_id: &str, kind: AssetKind) -> Vec<Asset> {
        let collections = self.collections.read().await;
        let matching: Vec<Asset> = collections
            .get(user_id)
            .map(|assets| assets.iter().filter(|a| a.kind() == kind).cloned().collect())
            .unwrap_or_default();

        debug!(user_id, %kind, count = matching.len(), "filtered favorites by kind");
        matching
    }

    pub async fn get_favorite(&self, user_id: &str, asset_id: &str) -> Option<Asset> {
        let collections = self.collections.read().await;
        collections
            .get(user_id)
            .and_then(|assets| assets.iter().find(|a| a.id() == asset_id))
            .cloned()
    }

    /// Remove the asset with the given id. Absent ids are a no-op; the removed
    /// asset is returned so callers can tell the two apart.
    pub async fn remove_favorite(&self, user_id: &str, asset_id: &str) -> Option<Asset> {
        let mut collections = self.collections.write().await;
        let assets = collections.get_mut(user_id)?;
        let index = assets.iter().position(|a| a.id() == asset_id)?;
        Some(assets.remove(index))
    }

    /// Replace the description of an asset in place. Returns false (and changes
    /// nothing) when the asset is absent.
    pub async fn edit_favorite(&self, user_id: &str, asset_id: &str, new_description: &str) -> bool {
        let mut collections = self.collections.write().await;
        let asset = collections
            .get_mut(user_id)
            .and_then(|assets| assets.iter_mut().find(|a| a.id() == asset_id));

        match asset {
            Some(asset) => {
                asset.set_description(new_description.to_string());
                true
            }
            None => false,
        }
    }

    /// A user exists once their first favorite has been added
    pub async fn user_exists(&self, user_id: &str) -> bool {
        self.collections.read().await.contains_key(user_id)
    }

    pub async fn asset_exists(&self, user_id: &str, asset_id: &str) -> bool {
        let collections = self.collections.read().await;
        collections
            .get(user_id)
            .is_some_and(|assets| assets.iter().any(|a| a.id() == asset_id))
    }

    pub async fn stats(&self) -> StoreStats {
        let collections = self.collections.read().await;
        StoreStats {
            users: collections.len(),
            assets: collections.values().map(Vec::len).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_audience, sample_chart, sample_insight};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn scenario_chart() -> Asset {
        let mut chart = sample_chart("1");
        chart.set_description("Stock trends".to_string());
        chart
    }

    #[tokio::test]
    async fn add_then_get_returns_the_chart() {
        let store = FavoritesStore::new();
        store.add_favorite("123", scenario_chart()).await.unwrap();

        let favorites = store.get_favorites("123").await;
        assert_eq!(favorites, vec![scenario_chart()]);
        assert!(store.user_exists("123").await);
        assert!(store.asset_exists("123", "1").await);
    }

    #[tokio::test]
    async fn duplicate_id_is_rejected_without_overwrite() {
        let store = FavoritesStore::new();
        store.add_favorite("123", scenario_chart()).await.unwrap();

        let err = store.add_favorite("123", sample_insight("1")).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::DuplicateAsset { user_id: "123".into(), asset_id: "1".into() }
        );

        let favorites = store.get_favorites("123").await;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].kind(), AssetKind::Chart);
    }

    #[tokio::test]
    async fn same_id_is_allowed_for_different_users() {
        let store = FavoritesStore::new();
        store.add_favorite("alice", sample_chart("1")).await.unwrap();
        store.add_favorite("bob", sample_chart("1")).await.unwrap();

        assert_eq!(store.stats().await, StoreStats { users: 2, assets: 2 });
    }

    #[tokio::test]
    async fn unknown_user_reads_as_empty() {
        let store = FavoritesStore::new();
        assert!(store.get_favorites("ghost").await.is_empty());
        assert!(store.get_favorites_by_kind("ghost", AssetKind::Chart).await.is_empty());
        assert!(!store.user_exists("ghost").await);
        assert!(!store.asset_exists("ghost", "1").await);
        assert!(store.get_favorite("ghost", "1").await.is_none());
    }

    #[tokio::test]
    async fn filter_by_kind_keeps_insertion_order() {
        let store = FavoritesStore::new();
        store.add_favorite("123", sample_chart("c1")).await.unwrap();
        store.add_favorite("123", sample_audience("a1")).await.unwrap();
        store.add_favorite("123", sample_chart("c2")).await.unwrap();
        store.add_favorite("123", sample_insight("i1")).await.unwrap();
        store.add_favorite("123", sample_chart("c3")).await.unwrap();

        let charts: Vec<String> = store
            .get_favorites_by_kind("123", AssetKind::Chart)
            .await
            .iter()
            .map(|a| a.id().to_string())
            .collect();
        assert_eq!(charts, vec!["c1", "c2", "c3"]);

        let all: Vec<String> = store
            .get_favorites("123")
            .await
            .iter()
            .map(|a| a.id().to_string())
            .collect();
        assert_eq!(all, vec!["c1", "a1", "c2", "i1", "c3"]);
    }

    #[tokio::test]
    async fn filter_for_absent_kind_is_empty() {
        let store = FavoritesStore::new();
        store.add_favorite("123", scenario_chart()).await.unwrap();
        assert!(store.get_favorites_by_kind("123", AssetKind::Audience).await.is_empty());
    }

    #[tokio::test]
    async fn edit_changes_only_the_description() {
        let store = FavoritesStore::new();
        store.add_favorite("123", scenario_chart()).await.unwrap();

        assert!(store.edit_favorite("123", "1", "Updated").await);

        let favorites = store.get_favorites("123").await;
        let mut expected = scenario_chart();
        expected.set_description("Updated".to_string());
        assert_eq!(favorites, vec![expected]);
    }

    #[tokio::test]
    async fn remove_then_remove_again_is_a_no_op() {
        let store = FavoritesStore::new();
        store.add_favorite("123", scenario_chart()).await.unwrap();

        let removed = store.remove_favorite("123", "1").await;
        assert_eq!(removed, Some(scenario_chart()));
        assert!(store.get_favorites("123").await.is_empty());

        assert_eq!(store.remove_favorite("123", "1").await, None);
        assert!(store.get_favorites("123").await.is_empty());
        // the collection outlives its last asset
        assert!(store.user_exists("123").await);
    }

    #[tokio::test]
    async fn mutations_on_absent_ids_leave_collection_untouched() {
        let store = FavoritesStore::new();
        store.add_favorite("123", sample_chart("1")).await.unwrap();
        store.add_favorite("123", sample_insight("2")).await.unwrap();
        let before = store.get_favorites("123").await;

        assert_eq!(store.remove_favorite("123", "missing").await, None);
        assert!(!store.edit_favorite("123", "missing", "whatever").await);
        assert!(!store.edit_favorite("nobody", "1", "whatever").await);

        assert_eq!(store.get_favorites("123").await, before);
        assert!(!store.user_exists("nobody").await);
    }

    #[tokio::test]
    async fn snapshots_are_detached_from_the_store() {
        let store = FavoritesStore::new();
        store.add_favorite("123", sample_chart("1")).await.unwrap();

        let mut snapshot = store.get_favorites("123").await;
        snapshot[0].set_description("local edit".to_string());
        snapshot.clear();

        let favorites = store.get_favorites("123").await;
        assert_eq!(favorites, vec![sample_chart("1")]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_duplicate_adds_yield_one_success() {
        let store = Arc::new(FavoritesStore::new());
        let attempts = 64;

        let handles: Vec<_> = (0..attempts)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add_favorite("123", sample_chart("x")).await })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(StoreError::DuplicateAsset { .. }) => duplicates += 1,
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, attempts - 1);
        assert_eq!(store.get_favorites("123").await.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_mixed_operations_keep_ids_unique() {
        let store = Arc::new(FavoritesStore::new());

        let handles: Vec<_> = (0..200)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    let id = format!("a{}", i % 10);
                    match i % 4 {
                        0 | 1 => {
                            let _ = store.add_favorite("123", sample_insight(&id)).await;
                        }
                        2 => {
                            store.remove_favorite("123", &id).await;
                        }
                        _ => {
                            store.edit_favorite("123", &id, "edited").await;
                        }
                    }
                    // every read must be a consistent snapshot
                    let snapshot = store.get_favorites("123").await;
                    let ids: HashSet<&str> = snapshot.iter().map(|a| a.id()).collect();
                    assert_eq!(ids.len(), snapshot.len());
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        let favorites = store.get_favorites("123").await;
        let ids: HashSet<&str> = favorites.iter().map(|a| a.id()).collect();
        assert_eq!(ids.len(), favorites.len());
        assert!(favorites.iter().all(|a| a.kind() == AssetKind::Insight));
    }
}
