//! Serial-log event sink.
//!
//! Renders every [`AppEvent`] as a line on the ESP-IDF logger (UART /
//! USB-CDC in production, stdout on the host).  Alarm escalations log at
//! warn so they stand out in a scrollback full of telemetry.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={:?} | alarm={} clear={} | dwell_remaining={}ms | ticks={}",
                    t.state,
                    if t.alarm_line { "ASSERTED" } else { "idle" },
                    if t.clear_line { "ASSERTED" } else { "idle" },
                    t.dwell_remaining_ms,
                    t.tick_count,
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::AlarmRaised { dwell_ms } => {
                warn!("ALARM | raised, grace period {}ms", dwell_ms);
            }
            AppEvent::AlarmLatched => {
                warn!("ALARM | latched, awaiting operator clear");
            }
            AppEvent::AlarmCleared { from } => {
                info!("ALARM | cleared (was {:?})", from);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
