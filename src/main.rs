//! Sentinel Firmware — Main Entry Point
//!
//! Hexagonal architecture around a single polled control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter       LogEventSink    NvsAdapter   Esp32Time  │
//! │  (Input+Indicator)     (EventSink)     (ConfigPort) (clock)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  AlarmFsm · TransitionTable · DwellTimer               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod pins;

pub mod app;
mod adapters;
mod drivers;
pub mod fsm;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::nvs::NvsAdapter;
use adapters::time::Esp32TimeAdapter;
use app::events::AppEvent;
use app::ports::{ConfigPort, EventSink};
use app::service::AppService;
use config::SystemConfig;
use drivers::indicator_led::IndicatorLeds;
use drivers::line_input::LineInput;
use error::Error;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!(
        "sentinel v{} — three-state alarm annunciator",
        env!("CARGO_PKG_VERSION")
    );

    // ── 2. GPIO bring-up ──────────────────────────────────────
    drivers::hw_init::init_peripherals().map_err(Error::Init)?;

    // ── 3. Configuration ──────────────────────────────────────
    // A dead NVS partition must not keep the annunciator down: fall back
    // to defaults and run without persistence until the next reboot.
    let nvs = match NvsAdapter::new() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("NVS unavailable ({}), defaults only, nothing will persist", e);
            None
        }
    };
    let config = match nvs.as_ref().map(ConfigPort::load) {
        Some(Ok(cfg)) => {
            info!("config loaded from NVS");
            cfg
        }
        Some(Err(e)) => {
            warn!("stored config unusable ({}), using defaults", e);
            SystemConfig::default()
        }
        None => SystemConfig::default(),
    };

    // ── 4. Adapters ───────────────────────────────────────────
    let clock = Esp32TimeAdapter::new();

    let mut hw = HardwareAdapter::new(
        LineInput::new(pins::ALARM_GPIO, pins::LINES_ACTIVE_LOW),
        LineInput::new(pins::CLEAR_GPIO, pins::LINES_ACTIVE_LOW),
        IndicatorLeds::new(),
    );

    let mut log_sink = LogEventSink::new();

    // ── 5. Application service ────────────────────────────────
    let tick_ms = config.control_loop_interval_ms;
    let telemetry_every_ticks =
        (u64::from(config.telemetry_interval_secs) * 1000 / u64::from(tick_ms)).max(1);

    let mut app = AppService::new(config);
    app.start(&mut hw, &mut log_sink);

    info!("entering control loop ({} ms per tick)", tick_ms);

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        // Pace the poll; FreeRTOS yields the core while we sleep.
        std::thread::sleep(std::time::Duration::from_millis(u64::from(tick_ms)));

        let now_ms = clock.uptime_ms();
        app.tick(now_ms, &mut hw, &mut log_sink);

        if app.tick_count() % telemetry_every_ticks == 0 {
            let snapshot = app.build_telemetry(now_ms);
            log_sink.emit(&AppEvent::Telemetry(snapshot));
        }

        if let Some(nvs) = nvs.as_ref() {
            app.auto_save_if_needed(nvs);
        }
    }
}
