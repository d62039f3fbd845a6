//! Trigger input debouncing.
//!
//! The game consumes one discrete trigger event per physical press. Host
//! input sources that auto-repeat while a key is held must be collapsed to a
//! single event; this gate does that. Suppressing the host's default
//! handling of the bound key (page scroll, focus changes) is the embedder's
//! responsibility at the same boundary.

/// Collapses key auto-repeat into one trigger per physical press.
#[derive(Debug, Default)]
pub struct TriggerGate {
    held: bool,
}

impl TriggerGate {
    /// Create a gate in the released position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down. Returns `true` only on the released-to-held
    /// transition; repeats while held yield `false`.
    pub fn press(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    /// Record a key-up, re-arming the gate for the next press.
    pub fn release(&mut self) {
        self.held = false;
    }
}
