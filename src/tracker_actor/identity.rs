//! Which place is on screen, as far as the lookup pipeline is concerned.

use crate::model::PlaceIdentity;

/// Two observable states. One slot, overwritten on each new detection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TrackerState {
    /// No place confirmed yet.
    #[default]
    Idle,
    Tracking(PlaceIdentity),
}

impl TrackerState {
    pub fn current(&self) -> Option<&PlaceIdentity> {
        match self {
            TrackerState::Idle => None,
            TrackerState::Tracking(identity) => Some(identity),
        }
    }

    /// Whether `name` is the place currently on screen.
    ///
    /// This is the receipt-time relevance check: results are matched against the
    /// identity *now*, not the one that was current when the lookup was sent.
    pub fn is_tracking(&self, name: &str) -> bool {
        self.current().is_some_and(|identity| identity.matches(name))
    }

    /// Switches to `identity`. Returns `false` when it was already current.
    pub fn track(&mut self, identity: PlaceIdentity) -> bool {
        if self.is_tracking(identity.as_str()) {
            return false;
        }
        *self = TrackerState::Tracking(identity);
        true
    }
}
