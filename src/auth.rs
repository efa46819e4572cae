//! Admin gate for the editing workflow.
//!
//! A small state machine: `Closed → Locked → Unlocked → Closed`. Triggering
//! the gate (the admin entry point in the UI) moves it to `Locked`; a correct
//! passphrase unlocks it; closing the edit session — commit or cancel — moves
//! it back to `Closed`.
//!
//! This is cosmetic access control, not a security boundary. The passphrase
//! is embedded in the running binary (`FOLIO_ADMIN_SECRET` at build time) and
//! visible to anyone inspecting it. It keeps casual visitors out of the edit
//! mode; it must never guard sensitive data.

/// Passphrase the gate compares against, fixed at build time.
pub fn admin_secret() -> &'static str {
    env!("FOLIO_ADMIN_SECRET")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Edit mode not requested.
    Closed,
    /// Edit mode requested, passphrase not yet accepted.
    Locked,
    /// Passphrase accepted; editing allowed.
    Unlocked,
}

#[derive(Debug, Default)]
pub struct AuthGate {
    state: GateState,
}

impl Default for GateState {
    fn default() -> Self {
        GateState::Closed
    }
}

impl AuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    /// Request edit mode. Moves `Closed → Locked`; in any other state this
    /// is a no-op (edit mode is already underway).
    pub fn trigger(&mut self) {
        if self.state == GateState::Closed {
            self.state = GateState::Locked;
        }
    }

    /// Check a passphrase candidate against the configured secret.
    ///
    /// An exact match while `Locked` unlocks the gate. A wrong candidate is
    /// an expected outcome, not an error: the gate stays `Locked` and the
    /// caller re-prompts. Returns whether the gate is unlocked afterwards.
    pub fn verify(&mut self, candidate: &str) -> bool {
        match self.state {
            GateState::Locked => {
                if candidate == admin_secret() {
                    self.state = GateState::Unlocked;
                }
                self.state == GateState::Unlocked
            }
            GateState::Unlocked => true,
            GateState::Closed => false,
        }
    }

    /// End the editing workflow (after commit or cancel). Any state → `Closed`.
    pub fn close(&mut self) {
        self.state = GateState::Closed;
    }
}
