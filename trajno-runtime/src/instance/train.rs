use super::fsm::InstanceFSM;
use super::routes::Route;
use super::topo::NodeID;

pub(crate) type TrainID = usize;

/// One train of the fleet: a stable 1-based id, the route it was
/// assigned at planning time, and how far along it stands. Only `pos`
/// ever changes, and only through [`Train::move_to`].
#[derive(Debug)]
pub(crate) struct Train {
    pub(crate) id: TrainID,
    pub(crate) route: usize,
    pub(crate) pos: usize,
}

impl Train {
    pub(crate) fn new(id: TrainID, route: usize) -> Self {
        Train { id, route, pos: 0 }
    }

    pub(crate) fn curr_node(&self, route: &Route) -> NodeID {
        route.nodes[self.pos]
    }

    pub(crate) fn next_node(&self, route: &Route) -> Option<NodeID> {
        route.nodes.get(self.pos + 1).copied()
    }

    pub(crate) fn arrived(&self, route: &Route) -> bool {
        self.pos == route.nodes.len() - 1
    }

    /// A train may advance when its next track is unclaimed this turn
    /// and the station ahead can take it: the endpoints always can, an
    /// intermediate station only while nobody stands there.
    pub(crate) fn can_move_to(
        &self,
        target: NodeID,
        route: &Route,
        fsm: &InstanceFSM,
        start: NodeID,
        goal: NodeID,
    ) -> bool {
        if !fsm.track_free(self.curr_node(route), target) {
            return false;
        }
        target == start || target == goal || fsm.node(target).trains == 0
    }

    pub(crate) fn move_to(&mut self, target: NodeID, route: &Route, fsm: &mut InstanceFSM) {
        fsm.apply_move(self.curr_node(route), target);
        self.pos += 1;
    }
}
