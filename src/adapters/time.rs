//! Monotonic clock source for the control loop.
//!
//! The FSM ticks against milliseconds since boot.  On the target that is
//! `esp_timer_get_time()` (64-bit, monotonic, microsecond resolution);
//! on the host a `std::time::Instant` captured at construction stands in
//! so timing code runs unmodified in tests.

/// Time adapter for the ESP32-S3 platform.
pub struct Esp32TimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    boot: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            boot: std::time::Instant::now(),
        }
    }

    /// Milliseconds since boot.
    pub fn uptime_ms(&self) -> u64 {
        self.uptime_us() / 1_000
    }

    /// Microseconds since boot.
    pub fn uptime_us(&self) -> u64 {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: esp_timer_get_time has no preconditions after boot.
            (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
        }

        #[cfg(not(target_os = "espidf"))]
        {
            self.boot.elapsed().as_micros() as u64
        }
    }
}
