//! Three-state alarm finite-state machine engine.
//!
//! ```text
//!           alarm line                 dwell elapsed
//!  GREEN ───────────────▶ YELLOW ───────────────────▶ RED
//!    ▲                      │                           │
//!    │      clear line      │        clear line         │
//!    └──────────────────────┴───────────────────────────┘
//! ```
//!
//! Each tick the engine classifies the two input lines into an
//! [`InputSymbol`], looks up the successor in the [`TransitionTable`],
//! and applies it subject to two policies:
//!
//! - **Priority override** — `Clear` and `Both` apply immediately and
//!   cancel any pending dwell.  The operator always wins.
//! - **Dwell gating** — for `Neither`/`Alarm` the lookup applies only
//!   once the dwell armed on entry to Yellow has elapsed; while it is
//!   pending the state holds.
//!
//! The engine is pure logic with bounded, constant-time ticks: no I/O,
//! no allocation, no suspension.  Indicator writes happen in the service
//! layer, driven by the entry flag this module maintains.

pub mod input;
pub mod table;
pub mod timer;

pub use input::InputSymbol;
pub use table::TransitionTable;
pub use timer::DwellTimer;

use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of the three controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlarmState {
    /// Cleared / armed-idle.
    Green = 0,
    /// Alarm detected, grace period running.
    Yellow = 1,
    /// Alarm confirmed and latched.
    Red = 2,
}

impl AlarmState {
    /// All states, in escalation order.
    pub const ALL: [Self; 3] = [Self::Green, Self::Yellow, Self::Red];

    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The alarm state machine.
///
/// Owns the immutable [`TransitionTable`] and the single [`DwellTimer`];
/// the timer is only ever armed for the state currently occupied.
pub struct AlarmFsm {
    table: TransitionTable,
    state: AlarmState,
    dwell: DwellTimer,
    /// Set by the most recent tick iff it performed a transition.
    entered: bool,
}

impl AlarmFsm {
    /// Construct the machine in the initial Green state, dwell disarmed.
    pub fn new(table: TransitionTable) -> Self {
        Self {
            table,
            state: AlarmState::Green,
            dwell: DwellTimer::new(0),
            entered: false,
        }
    }

    /// Advance by one tick: evaluate the table for `symbol` with dwell
    /// gating and return the (possibly unchanged) current state.
    ///
    /// `now_ms` must come from a monotonic clock; it is used both to
    /// check a pending dwell and as the epoch for a dwell armed by a
    /// transition this tick.
    pub fn tick(&mut self, symbol: InputSymbol, now_ms: u64) -> AlarmState {
        self.entered = false;

        let next = self.table.next(self.state, symbol);
        if symbol.overrides_dwell() {
            self.dwell.cancel();
            self.apply(next, now_ms);
        } else if !self.dwell.pending(now_ms) {
            self.apply(next, now_ms);
        }

        self.state
    }

    /// Jump straight to `target`, cancelling any pending dwell (used by
    /// the debug force command).
    pub fn force(&mut self, target: AlarmState, now_ms: u64) {
        self.entered = false;
        self.dwell.cancel();
        self.apply(target, now_ms);
    }

    /// Replace the transition table (config hot-reload).  An already
    /// armed dwell keeps the duration it was armed with; the new value
    /// applies from the next Yellow entry.
    pub fn set_table(&mut self, table: TransitionTable) {
        self.table = table;
    }

    /// The current state.
    pub fn state(&self) -> AlarmState {
        self.state
    }

    /// Whether the most recent tick (or force) entered a new state.
    /// The service layer runs the indicator write exactly when this is
    /// set, so outputs are touched once per state change, not every tick.
    pub fn just_entered(&self) -> bool {
        self.entered
    }

    /// Whether a dwell is armed and not yet elapsed.
    pub fn dwell_pending(&self, now_ms: u64) -> bool {
        self.dwell.pending(now_ms)
    }

    /// Milliseconds left on the active dwell (0 when none).
    pub fn dwell_remaining_ms(&self, now_ms: u64) -> u64 {
        self.dwell.remaining_ms(now_ms)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn apply(&mut self, next: AlarmState, now_ms: u64) {
        if next == self.state {
            return;
        }

        info!("FSM transition: {} -> {}", self.state.name(), next.name());

        self.state = next;
        self.entered = true;

        // Arm the dwell at the instant of entry; states with no dwell
        // leave the timer disarmed.
        let dwell_ms = self.table.dwell_ms(next);
        self.dwell = DwellTimer::new(dwell_ms);
        if dwell_ms > 0 {
            self.dwell.arm(now_ms);
        }
    }
}
