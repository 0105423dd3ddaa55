pub mod codebase;
pub mod model;
pub mod signal;
pub mod telemetry;
