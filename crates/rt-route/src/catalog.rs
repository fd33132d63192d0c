//! The `RouteCatalog` and its builder.

use std::collections::BTreeSet;

use log::warn;

use rt_core::{BlockId, RouteId, StationId};

use crate::{Route, RouteError, RouteResult};

// ── RouteCatalog ──────────────────────────────────────────────────────────────

/// All predefined routes, in catalog order.
///
/// Catalog order is the order routes were added (for seeded routes: file
/// order, each forward route immediately followed by its reverse).  Every
/// "first match" query breaks ties by this order.
#[derive(Debug, Default, Clone)]
pub struct RouteCatalog {
    routes: Vec<Route>,
}

impl RouteCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from loaded routes, keeping their order.
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> RouteResult<Self> {
        let mut builder = RouteCatalogBuilder::new();
        for route in routes {
            builder.add_route(route);
        }
        builder.build()
    }

    /// Every route in catalog order.
    pub fn all(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == id)
    }

    /// The first route from `start` to `end`.
    pub fn route_between(&self, start: StationId, end: StationId) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.start == Some(start) && r.end == Some(end))
    }

    /// Every route leaving `station`, in catalog order.
    pub fn routes_from(&self, station: StationId) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(move |r| r.start == Some(station))
    }

    /// The first route leaving `station` whose id is not in `used`.
    pub fn first_unused_from<F>(&self, station: StationId, used: F) -> Option<&Route>
    where
        F: Fn(RouteId) -> bool,
    {
        self.routes_from(station).find(|r| !used(r.id))
    }
}

// ── RouteCatalogBuilder ───────────────────────────────────────────────────────

/// Construct a [`RouteCatalog`].
///
/// Routes added with [`add_route_with_reverse`](Self::add_route_with_reverse)
/// get sequential ids starting after the highest id seen so far.
pub struct RouteCatalogBuilder {
    routes:  Vec<Route>,
    /// `None` once `RouteId(u32::MAX)` has been used.
    next_id: Option<u32>,
}

impl RouteCatalogBuilder {
    pub fn new() -> Self {
        Self { routes: Vec::new(), next_id: Some(1) }
    }

    /// Add a route with an explicit id.
    pub fn add_route(&mut self, route: Route) -> &mut Self {
        self.next_id = match (self.next_id, route.id.0.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
        self.routes.push(route);
        self
    }

    /// Add a route and its reverse, allocating both ids.
    ///
    /// Returns `(forward, reverse)` ids.
    ///
    /// # Errors
    ///
    /// [`RouteError::IdsExhausted`] if no two ids are left above the highest
    /// one seen.  Nothing is added in that case.
    pub fn add_route_with_reverse(
        &mut self,
        name:      impl Into<String>,
        start:     Option<StationId>,
        end:       Option<StationId>,
        block_ids: Vec<BlockId>,
    ) -> RouteResult<(RouteId, RouteId)> {
        let name = name.into();
        let forward_id = self.next_id.ok_or_else(|| RouteError::IdsExhausted(name.clone()))?;
        let reverse_id = forward_id
            .checked_add(1)
            .ok_or_else(|| RouteError::IdsExhausted(name.clone()))?;

        let forward = Route { id: RouteId(forward_id), name, start, end, block_ids };
        let reverse = forward.reversed(RouteId(reverse_id));
        let ids = (forward.id, reverse.id);
        self.add_route(forward);
        self.add_route(reverse);
        Ok(ids)
    }

    /// Validate ids and produce the catalog.
    ///
    /// Routes without blocks are kept (the scheduler refuses to start them)
    /// but are logged, since they usually mean a seeding mistake.
    pub fn build(self) -> RouteResult<RouteCatalog> {
        let mut seen = BTreeSet::new();
        for route in &self.routes {
            if !seen.insert(route.id) {
                return Err(RouteError::Duplicate(route.id));
            }
            if route.is_empty() {
                warn!("route {} ({:?}) has no blocks", route.id, route.name);
            }
        }
        Ok(RouteCatalog { routes: self.routes })
    }
}

impl Default for RouteCatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}
