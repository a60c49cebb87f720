//! The transition table: a pure mapping (state, symbol) → next state.
//!
//! Expressed as a match over tagged pairs rather than an array indexed by
//! enum discriminants, so the mapping is exhaustiveness-checked by the
//! compiler.  Instance-owned and immutable after construction; the only
//! parameter is the yellow dwell duration.
//!
//! ```text
//!  state   | Neither | Alarm  | Clear | Both
//!  --------+---------+--------+-------+------
//!  Green   | Green   | Yellow | Green | Green
//!  Yellow  | Red*    | Red*   | Green | Green
//!  Red     | Red     | Red    | Green | Green
//!
//!  (*) gated by the yellow dwell; Green and Red have no dwell.
//! ```

use super::input::InputSymbol;
use super::AlarmState;

/// Immutable transition mapping, parameterized by the yellow dwell.
#[derive(Debug, Clone, Copy)]
pub struct TransitionTable {
    yellow_dwell_ms: u64,
}

impl TransitionTable {
    pub fn new(yellow_dwell_ms: u64) -> Self {
        Self { yellow_dwell_ms }
    }

    /// Look up the successor state.  Total over all 12 (state, symbol)
    /// pairs; dwell gating is applied by the engine, not here.
    pub fn next(&self, state: AlarmState, symbol: InputSymbol) -> AlarmState {
        match (state, symbol) {
            // Clear wins in every state, alone or combined with the alarm
            // line — the system always favours returning to Green over
            // escalating.
            (_, InputSymbol::Clear | InputSymbol::Both) => AlarmState::Green,

            (AlarmState::Green, InputSymbol::Alarm) => AlarmState::Yellow,
            (AlarmState::Green, InputSymbol::Neither) => AlarmState::Green,

            // An un-cleared alarm escalates once the grace period is over,
            // whether or not the alarm line is still held.
            (AlarmState::Yellow, InputSymbol::Neither | InputSymbol::Alarm) => AlarmState::Red,

            // Red latches until cleared.
            (AlarmState::Red, InputSymbol::Neither | InputSymbol::Alarm) => AlarmState::Red,
        }
    }

    /// Dwell duration on entry to `state`.  Only Yellow dwells.
    pub fn dwell_ms(&self, state: AlarmState) -> u64 {
        match state {
            AlarmState::Yellow => self.yellow_dwell_ms,
            AlarmState::Green | AlarmState::Red => 0,
        }
    }
}
