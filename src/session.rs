use crate::layout::DepartmentName;
use crate::pathfinding::Pathfinder;
use crate::sequencer::{plan_route, Leg, ShoppingListItem};
use tracing::debug;

/// Caller-side navigation state.
///
/// Planning may run elsewhere (e.g. on a worker thread); responses carry the
/// id of the request they answer and only the newest one is accepted.
#[derive(Debug, Default)]
pub struct NavigationSession {
    next_id: u64,
    latest_request: Option<u64>,
    accepted: Option<u64>,
    target: Option<DepartmentName>,
    legs: Vec<Leg>,
}

/// Inputs for one planning run, detached from the session
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub id: u64,
    pub items: Vec<ShoppingListItem>,
    pub target: Option<DepartmentName>,
}

#[derive(Debug, Clone)]
pub struct RouteResponse {
    pub id: u64,
    pub legs: Vec<Leg>,
}

impl RouteRequest {
    pub fn execute(&self, pathfinder: &Pathfinder) -> RouteResponse {
        let visit_order = pathfinder.layout().visit_order();
        RouteResponse {
            id: self.id,
            legs: plan_route(pathfinder, &self.items, visit_order),
        }
    }
}

impl NavigationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new planning run; earlier outstanding requests become stale
    pub fn request(&mut self, items: &[ShoppingListItem], target: Option<DepartmentName>) -> RouteRequest {
        self.next_id += 1;
        self.latest_request = Some(self.next_id);
        self.target = target;
        RouteRequest {
            id: self.next_id,
            items: items.to_vec(),
            target,
        }
    }

    /// Store the response unless a newer request has been issued since
    pub fn accept(&mut self, response: RouteResponse) -> bool {
        if self.latest_request != Some(response.id) {
            debug!(id = response.id, latest = ?self.latest_request, "dropping stale route response");
            return false;
        }
        self.accepted = Some(response.id);
        self.legs = response.legs;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.latest_request.is_some() && self.latest_request != self.accepted
    }

    pub fn target(&self) -> Option<DepartmentName> {
        self.target
    }

    pub fn set_target(&mut self, target: Option<DepartmentName>) {
        self.target = target;
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// The leg ending at the current target, else the first leg
    pub fn active_leg(&self) -> Option<&Leg> {
        self.target
            .and_then(|target| self.legs.iter().find(|leg| leg.department == target))
            .or_else(|| self.legs.first())
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.legs.clear();
    }
}
