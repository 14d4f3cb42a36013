// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod event_log;
pub mod pattern;
pub mod runtime;
pub mod scene;
pub mod session;
pub mod trail;
pub mod util;
