// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod bank;
pub mod clock;
pub mod config;
pub mod corpus;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod time_series;
pub mod token;
pub mod util;
pub mod vibe;

/// Event-loop tick granularity; the countdown rides on these ticks.
pub const TICK_RATE_MS: u64 = 50;
