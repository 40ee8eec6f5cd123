//! Wall-clock move timing.
//!
//! Move times are telemetry only and never influence play. Browsers have no
//! monotonic `Instant`, so the `wasm` build reads `Date.now()` instead.

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
use std::time::Instant;

/// Measures the time between consecutive moves.
#[derive(Debug, Clone)]
pub struct MoveClock {
    #[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
    last_tick: Instant,
    #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
    last_tick_ms: f64,
}

impl MoveClock {
    /// Start timing from now
    #[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
    pub fn start() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Start timing from now
    #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
    pub fn start() -> Self {
        Self {
            last_tick_ms: js_sys::Date::now(),
        }
    }

    /// Seconds since the previous lap (or since start), then restart.
    #[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
    pub fn lap(&mut self) -> f64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;
        elapsed
    }

    /// Seconds since the previous lap (or since start), then restart.
    #[cfg(all(target_arch = "wasm32", feature = "wasm"))]
    pub fn lap(&mut self) -> f64 {
        let now = js_sys::Date::now();
        let elapsed = ((now - self.last_tick_ms) / 1000.0).max(0.0);
        self.last_tick_ms = now;
        elapsed
    }
}

impl Default for MoveClock {
    fn default() -> Self {
        Self::start()
    }
}

/// Round seconds to two decimal places for reporting
pub fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}
