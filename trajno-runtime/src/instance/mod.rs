pub(crate) mod fsm;
pub(crate) mod routes;
pub(crate) mod topo;
pub(crate) mod train;

use log::debug;

use trajno_common::error::{Error, Result};
use trajno_common::station::Network;

use self::fsm::InstanceFSM;
use self::routes::{plan_routes, RoutePlan};
use self::topo::{NodeID, Topo};
use self::train::{Train, TrainID};

/// Hard ceiling on simulated turns, far above anything a valid plan
/// needs. Crossing it means the scheduler itself is broken, not the
/// input.
const MAX_TURNS: usize = 10_000;

/// Everything one simulation run needs.
pub struct InstanceConfig {
    pub network: Network,
    pub start: String,
    pub end: String,
    pub trains: usize,
}

/// A configured run: the frozen graph, the route plan, and the fleet.
#[derive(Debug)]
pub struct Instance {
    topo: Topo,
    plan: RoutePlan,
    fleet: Vec<Train>,
    fsm: InstanceFSM,
    start: NodeID,
    goal: NodeID,
}

impl Instance {
    pub fn new(cfg: &InstanceConfig) -> Result<Self> {
        let topo = Topo::new(&cfg.network);
        let start = topo.id(&cfg.start).ok_or(Error::StartStationNotFound)?;
        let goal = topo.id(&cfg.end).ok_or(Error::EndStationNotFound)?;
        if start == goal {
            return Err(Error::SameStartAndEnd);
        }

        let plan = plan_routes(&topo, start, goal, cfg.trains).ok_or(Error::NoPath)?;
        debug_assert!(plan.routes.iter().all(|r| r.last() == goal));

        // lowest-id trains ride the lowest-indexed routes
        let mut fleet = Vec::with_capacity(cfg.trains);
        for (route, &count) in plan.counts.iter().enumerate() {
            for _ in 0..count {
                fleet.push(Train::new(fleet.len() + 1, route));
            }
        }

        let fsm = InstanceFSM::new(topo.station_count(), start, cfg.trains as u32);

        Ok(Instance {
            topo,
            plan,
            fleet,
            fsm,
            start,
            goal,
        })
    }

    /// The turn on which the plan has the last train arriving.
    pub fn horizon(&self) -> usize {
        self.plan.horizon
    }

    /// Advances the fleet turn by turn until every train stands at the
    /// destination, returning the move log: one line per turn, listing
    /// the trains that moved, ascending by id.
    pub fn run(mut self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        let mut turn = 0;

        loop {
            if self.all_arrived() {
                return Ok(lines);
            }
            turn += 1;
            if turn > MAX_TURNS {
                return Err(Error::TurnLimitExceeded);
            }

            self.fsm.begin_turn();
            let mut moves: Vec<(TrainID, NodeID)> = Vec::new();

            // trains further along move first, so a vacated station can
            // be entered later in the same turn
            for idx in self.move_order() {
                let route = &self.plan.routes[self.fleet[idx].route];
                let target = match self.fleet[idx].next_node(route) {
                    Some(node) => node,
                    None => continue,
                };
                if self.fleet[idx].can_move_to(target, route, &self.fsm, self.start, self.goal) {
                    self.fleet[idx].move_to(target, route, &mut self.fsm);
                    moves.push((self.fleet[idx].id, target));
                } else {
                    debug!(
                        "turn {}: T{} holds, {} is {}",
                        turn,
                        self.fleet[idx].id,
                        self.topo.name(target),
                        self.fsm.node(target).status()
                    );
                }
            }

            if !moves.is_empty() {
                moves.sort_by_key(|&(id, _)| id);
                let tokens: Vec<String> = moves
                    .iter()
                    .map(|&(id, node)| format!("T{}-{}", id, self.topo.name(node)))
                    .collect();
                let line = tokens.join(" ");
                debug!("turn {}: {}", turn, line);
                lines.push(line);
            }
        }
    }

    /// Movement priority within a turn: position index descending,
    /// train id ascending.
    fn move_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.fleet.len()).collect();
        order.sort_by(|&i, &j| {
            self.fleet[j]
                .pos
                .cmp(&self.fleet[i].pos)
                .then(self.fleet[i].id.cmp(&self.fleet[j].id))
        });
        order
    }

    fn all_arrived(&self) -> bool {
        self.fleet
            .iter()
            .all(|t| t.arrived(&self.plan.routes[t.route]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trajno_common::station::{Network, Station};

    fn config(
        names: &[&str],
        tracks: &[(&str, &str)],
        start: &str,
        end: &str,
        trains: usize,
    ) -> InstanceConfig {
        let mut network = Network::new();
        for (i, name) in names.iter().enumerate() {
            network.stations.insert(
                name.to_string(),
                Station {
                    name: name.to_string(),
                    x: i as u32,
                    y: 0,
                },
            );
        }
        for (a, b) in tracks {
            network.connections.push((a.to_string(), b.to_string()));
        }
        InstanceConfig {
            network,
            start: start.to_string(),
            end: end.to_string(),
            trains,
        }
    }

    #[test]
    fn test_topology_errors() {
        let cfg = config(&["a", "b"], &[("a", "b")], "nowhere", "b", 1);
        assert!(matches!(
            Instance::new(&cfg),
            Err(Error::StartStationNotFound)
        ));

        let cfg = config(&["a", "b"], &[("a", "b")], "a", "nowhere", 1);
        assert!(matches!(Instance::new(&cfg), Err(Error::EndStationNotFound)));

        let cfg = config(&["a", "b"], &[("a", "b")], "a", "a", 1);
        assert!(matches!(Instance::new(&cfg), Err(Error::SameStartAndEnd)));

        let cfg = config(&["a", "b", "x", "y"], &[("a", "b"), ("x", "y")], "a", "y", 1);
        assert!(matches!(Instance::new(&cfg), Err(Error::NoPath)));
    }

    #[test]
    fn test_fleet_assignment_is_stable() {
        // routes of 2 and 3 tracks, one train each: T1 takes the first
        let cfg = config(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("a", "d"), ("d", "e"), ("e", "c")],
            "a",
            "c",
            2,
        );
        let instance = Instance::new(&cfg).unwrap();
        assert_eq!(instance.fleet.len(), 2);
        assert_eq!(instance.fleet[0].id, 1);
        assert_eq!(instance.fleet[0].route, 0);
        assert_eq!(instance.fleet[1].id, 2);
        assert_eq!(instance.fleet[1].route, 1);
    }

    #[test]
    fn test_move_order_prefers_downstream_then_low_id() {
        let cfg = config(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("b", "c"), ("c", "d")],
            "a",
            "d",
            3,
        );
        let mut instance = Instance::new(&cfg).unwrap();
        instance.fleet[2].pos = 2;
        instance.fleet[1].pos = 1;
        let order = instance.move_order();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_single_edge_single_train() {
        let cfg = config(&["a", "b"], &[("a", "b")], "a", "b", 1);
        let lines = Instance::new(&cfg).unwrap().run().unwrap();
        assert_eq!(lines, vec!["T1-b"]);
    }

    #[test]
    fn test_run_matches_planned_horizon() {
        let cfg = config(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("a", "d"), ("d", "e"), ("e", "c")],
            "a",
            "c",
            4,
        );
        let instance = Instance::new(&cfg).unwrap();
        let horizon = instance.horizon();
        let lines = instance.run().unwrap();
        assert_eq!(lines.len(), horizon);
    }
}
