use std::rc::Rc;

use crate::orchestrator::orchestrator::OrchestratorHandle;
use crate::screen::{LifecycleEvent, Screen, dispatch_lifecycle};

/// Maps segue identifiers to the orchestrators that animate them.
#[derive(Clone, Debug, Default)]
pub struct SegueRouter {
    routes: Vec<OrchestratorHandle>,
}

impl SegueRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an orchestrator under its configured segue identifier.
    pub fn register(&mut self, orchestrator: OrchestratorHandle) {
        let segue = orchestrator.borrow().segue_identifier().to_owned();
        if self
            .routes
            .iter()
            .any(|r| r.borrow().segue_identifier() == segue)
        {
            tracing::warn!(segue = %segue, "segue already routed; first registration wins");
        }
        self.routes.push(orchestrator);
    }

    /// First orchestrator registered for `segue_identifier`.
    pub fn orchestrator_for(&self, segue_identifier: &str) -> Option<OrchestratorHandle> {
        self.routes
            .iter()
            .find(|r| r.borrow().segue_identifier() == segue_identifier)
            .map(Rc::clone)
    }

    /// Look up the orchestrator for `segue_identifier` and let `destination` (and its nested
    /// screens) prepare for its transition.
    ///
    /// Returns `None`, and notifies nobody, for unrouted segues.
    pub fn prepare_for_segue(
        &self,
        segue_identifier: &str,
        destination: &dyn Screen,
    ) -> Option<OrchestratorHandle> {
        let Some(orchestrator) = self.orchestrator_for(segue_identifier) else {
            tracing::debug!(segue = %segue_identifier, "no transition routed for segue");
            return None;
        };
        let transition = orchestrator.borrow().transition_identifier().to_owned();
        dispatch_lifecycle(destination, LifecycleEvent::Prepare, &transition);
        Some(orchestrator)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/router.rs"]
mod tests;
