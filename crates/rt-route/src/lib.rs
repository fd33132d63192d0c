//! `rt-route` — the catalog of predefined routes.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`route`]   | `Route`                                                    |
//! | [`catalog`] | `RouteCatalog`, `RouteCatalogBuilder`                      |
//! | [`loader`]  | `load_routes_csv`, `load_routes_reader`                    |
//! | [`error`]   | `RouteError`, `RouteResult<T>`                             |
//!
//! Routes are never computed here: they are precomputed block sequences
//! seeded once at start-up.  Every seeded route is paired with a reverse
//! route (same blocks reversed, endpoints swapped, name suffixed with
//! `" (Reverse)"`).

pub mod catalog;
pub mod error;
pub mod loader;
pub mod route;

#[cfg(test)]
mod tests;

pub use catalog::{RouteCatalog, RouteCatalogBuilder};
pub use error::{RouteError, RouteResult};
pub use loader::{load_routes_csv, load_routes_reader};
pub use route::Route;
