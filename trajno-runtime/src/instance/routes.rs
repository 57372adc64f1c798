use log::debug;

use super::topo::{NodeID, Topo};

/// One usable route from origin to destination.
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Route {
    pub(crate) nodes: Vec<NodeID>,
}

impl Route {
    /// Number of tracks; a lone train needs exactly this many turns.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub(crate) fn last(&self) -> NodeID {
        self.nodes[self.nodes.len() - 1]
    }
}

/// The chosen routes, how many trains ride each, and the turn on which
/// the last train arrives.
#[derive(Debug)]
pub(crate) struct RoutePlan {
    pub(crate) routes: Vec<Route>,
    pub(crate) counts: Vec<usize>,
    pub(crate) horizon: usize,
}

/// Sequential edge-disjoint discovery: find a shortest path on a
/// working copy, strip every track along it, repeat. The result is
/// edge-disjoint by construction and sorted ascending by length, since
/// each iteration searches a poorer graph.
pub(crate) fn discover_routes(
    topo: &Topo,
    start: NodeID,
    goal: NodeID,
    cap: usize,
) -> Vec<Route> {
    let mut scratch = topo.clone();
    let mut routes = Vec::new();

    while routes.len() < cap {
        let path = match scratch.shortest_path(start, goal) {
            Some(path) => path,
            None => break,
        };
        for pair in path.windows(2) {
            scratch.remove_track(pair[0], pair[1]);
        }
        debug!(
            "route {}: {} tracks via {:?}",
            routes.len() + 1,
            path.len() - 1,
            path
        );
        routes.push(Route { nodes: path });
    }
    routes
}

/// Discovers up to `trains` candidate routes and splits the fleet over
/// them so the completion turn is minimal. Returns `None` when the
/// destination is unreachable.
pub(crate) fn plan_routes(
    topo: &Topo,
    start: NodeID,
    goal: NodeID,
    trains: usize,
) -> Option<RoutePlan> {
    let routes = discover_routes(topo, start, goal, trains);
    if routes.is_empty() {
        return None;
    }

    let horizon = min_horizon(&routes, trains);
    let counts = spread_fleet(&routes, trains, horizon);
    debug!("plan: horizon {} turns, counts {:?}", horizon, counts);

    Some(RoutePlan {
        routes,
        counts,
        horizon,
    })
}

/// A route of length L drains k trains in (L - 1) + k turns, so by
/// turn T it can absorb at most T - L + 1 of them.
fn capacity(route: &Route, horizon: usize) -> usize {
    (horizon + 1).saturating_sub(route.len())
}

fn fleet_capacity(routes: &[Route], horizon: usize) -> usize {
    routes.iter().map(|r| capacity(r, horizon)).sum()
}

/// Smallest T at which the routes can absorb the whole fleet, found by
/// binary search on T.
fn min_horizon(routes: &[Route], trains: usize) -> usize {
    let longest = routes[routes.len() - 1].len();
    let mut lo = 1;
    let mut hi = trains + longest;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if fleet_capacity(routes, mid) >= trains {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Fills routes from the longest toward the shortest, each up to its
/// capacity at the horizon. Routes too long to help stay at zero.
fn spread_fleet(routes: &[Route], trains: usize, horizon: usize) -> Vec<usize> {
    let mut counts = vec![0; routes.len()];
    let mut remaining = trains;
    for (i, route) in routes.iter().enumerate().rev() {
        let take = remaining.min(capacity(route, horizon));
        counts[i] = take;
        remaining -= take;
    }
    debug_assert_eq!(remaining, 0);
    counts
}
