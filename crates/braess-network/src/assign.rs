//! Loading routes onto the network.
//!
//! A traveler that has picked a route occupies every link on it. Assigning
//! travelers one after another lets each see the congestion left by the
//! previous ones.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{Error, LinkId, Network, NodeId, OccupantId, Result, Route, Router, RouterConfig};

impl<N: NodeId> Network<N> {
    /// Add one occupant to every link on `route`.
    ///
    /// All links are checked first; an unknown link fails the whole call.
    pub fn load_route(&mut self, route: &Route<N>) -> Result<Vec<OccupantId>> {
        if let Some(id) = route.links().find(|&id| self.link(id).is_none()) {
            return Err(Error::UnknownLink(id));
        }
        Ok(route
            .links()
            .filter_map(|id| self.link_mut(id).map(|link| link.add_occupant()))
            .collect())
    }

    /// Remove one occupant (the oldest) from every link on `route`.
    ///
    /// Fails without changes if a link is unknown or would underflow.
    pub fn unload_route(&mut self, route: &Route<N>) -> Result<()> {
        let mut wanted: BTreeMap<LinkId, u64> = BTreeMap::new();
        for id in route.links() {
            *wanted.entry(id).or_default() += 1;
        }
        for (&id, &requested) in &wanted {
            let link = self.link(id).ok_or(Error::UnknownLink(id))?;
            if link.occupancy() < requested {
                return Err(Error::Underflow {
                    requested,
                    present: link.occupancy(),
                });
            }
        }
        for (id, requested) in wanted {
            if let Some(link) = self.link_mut(id) {
                link.remove_occupants(requested)?;
            }
        }
        Ok(())
    }

    /// Send `count` travelers from `source` one at a time.
    ///
    /// Each traveler routes over the load left by its predecessors and then
    /// occupies its own route. Returns the routes in departure order.
    pub fn assign_travelers(
        &mut self,
        source: &N,
        count: usize,
        config: &RouterConfig,
    ) -> Result<Vec<Route<N>>> {
        let mut routes = Vec::with_capacity(count);
        for traveler in 0..count {
            let route = Router::new(self, config.clone()).route(source)?;
            self.load_route(&route)?;
            debug!(
                traveler,
                hops = route.len(),
                total_cost = route.total_cost,
                "traveler assigned"
            );
            routes.push(route);
        }
        Ok(routes)
    }
}
