// Favorites handlers: request validation and outcome mapping on top of
// `FavoritesStore`. Each handler validates its inputs before the store is
// touched and turns store outcomes into status codes one-to-one.

pub mod add;
pub mod list;
pub mod record;
pub mod utils;

pub use add::add_favorite;
pub use list::list_favorites;
pub use record::{edit_favorite, get_favorite, remove_favorite};
