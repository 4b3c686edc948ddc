// Composition root for the timesheets service.
//
// Responsibilities
// - Shared request state.
// - Router with its middleware stack.
// - Tracing subscriber set up.

pub mod http;
pub mod state;
pub mod telemetry;
