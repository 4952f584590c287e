//! The results screen lies. Real metrics go in, flattering ones come out,
//! and the two are connected by exactly one call site so the substitution
//! stays auditable (and, should anyone ever want the truth, swappable).

use rand::Rng;
use std::f64::consts::TAU;

use crate::session::TestMode;
use crate::stats::RealStats;
use crate::time_series::GraphPoint;
use crate::util::round2;

/// What the user is shown. Rates are fabricated; duration and mode pass
/// through untouched. Built once per finished test, discarded on restart.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayStats {
    pub wpm: f64,
    pub raw_wpm: f64,
    pub accuracy: f64,
    pub consistency: f64,
    pub duration_sec: f64,
    pub mode: TestMode,
}

/// Uniform integer wpm in [150, 273].
pub fn vibe_wpm() -> f64 {
    rand::thread_rng().gen_range(150..=273) as f64
}

/// Uniform accuracy in [95, 100), still below 100 after 2dp rounding.
pub fn vibe_accuracy() -> f64 {
    round2(rand::thread_rng().gen_range(95.0..99.99))
}

/// Raw wpm rides a little above the fabricated wpm, never below it.
pub fn vibe_raw_wpm(wpm: f64) -> f64 {
    wpm + rand::thread_rng().gen_range(0..=20) as f64
}

/// Uniform consistency in [60, 95].
pub fn vibe_consistency() -> f64 {
    round2(rand::thread_rng().gen_range(60.0..=95.0))
}

/// Replace every rate in `real` with an independently sampled one. Each
/// call draws fresh values; two calls on the same input will almost
/// certainly disagree, and that is the point.
pub fn to_display_stats(real: &RealStats) -> DisplayStats {
    let wpm = vibe_wpm();
    DisplayStats {
        wpm,
        raw_wpm: vibe_raw_wpm(wpm),
        accuracy: vibe_accuracy(),
        consistency: vibe_consistency(),
        duration_sec: real.duration_sec,
        mode: real.mode,
    }
}

/// Synthesize the results graph: 10 to 30 samples across the test
/// duration, a slow swell plus noise around the fabricated wpm, floored
/// at 50, with sparse error marks. Never derived from the keystroke log.
pub fn graph(display: &DisplayStats) -> Vec<GraphPoint> {
    let mut rng = rand::thread_rng();
    let duration = display.duration_sec.max(0.0);
    let samples = ((duration / 2.0) as usize).clamp(10, 30);

    (0..samples)
        .map(|i| {
            let t = if samples > 1 {
                i as f64 / (samples - 1) as f64 * duration
            } else {
                0.0
            };
            let swell = (i as f64 / samples as f64 * TAU).sin() * 15.0;
            let noise = (rng.gen::<f64>() - 0.5) * 10.0;
            let wpm = (display.wpm + swell + noise).max(50.0);
            let raw_wpm = wpm + rng.gen_range(0..=20) as f64;
            let errors = if rng.gen_bool(0.1) {
                rng.gen_range(1..=2)
            } else {
                0
            };
            GraphPoint::new(t, wpm.round(), raw_wpm.round(), errors)
        })
        .collect()
}
