pub mod asset;
pub mod store;

pub use asset::{Asset, AssetError, AssetKind, Audience, Chart, FavoriteAsset, Insight};
pub use store::{FavoritesStore, StoreError, StoreStats};
