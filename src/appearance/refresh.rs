//! Re-entrancy bookkeeping for bulk refreshes

use crate::core::types::CharacterRole;

/// Tracks an in-progress bulk refresh
///
/// While refreshing, the orchestrator visits every head slot, and each of
/// them would normally trigger a full head-group pass. Only the first claim
/// per character runs the pass.
#[derive(Debug, Clone, Default)]
pub struct RefreshGuard {
    refreshing: bool,
    head_pass_claimed: [bool; 2],
}

impl RefreshGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.refreshing = true;
        self.head_pass_claimed = [false; 2];
    }

    pub fn end(&mut self) {
        self.refreshing = false;
        self.head_pass_claimed = [false; 2];
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Whether a head-group pass for `role` should run now
    ///
    /// Outside a refresh every notification runs its own pass.
    pub fn claim_head_pass(&mut self, role: CharacterRole) -> bool {
        if !self.refreshing {
            return true;
        }
        let claimed = &mut self.head_pass_claimed[role.as_index() as usize];
        if *claimed {
            false
        } else {
            *claimed = true;
            true
        }
    }
}

/// Counters from one bulk refresh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Slots handed to the engine
    pub visited: usize,
    /// Slots skipped as empty and unconfigured
    pub skipped: usize,
    /// Characters skipped because they were not ready
    pub characters_skipped: usize,
    /// Head-group passes run
    pub head_passes: usize,
    /// Slots the host rendered itself after the engine deferred
    pub deferred: usize,
    /// Slots that failed to render
    pub failures: usize,
}
