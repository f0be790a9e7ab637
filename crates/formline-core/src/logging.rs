//! Logging facilities for Formline.
//!
//! Formline uses the `tracing` crate for instrumentation. To see logs, the
//! application installs a tracing subscriber:
//!
//! ```ignore
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every log line carries a `target:` from [`targets`], so subsystems can
//! be filtered with standard `tracing` directives, e.g.
//! `RUST_LOG=formline::data_source=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "formline_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "formline_core::signal";
    /// Form item target.
    pub const ITEM: &str = "formline::item";
    /// Data source target.
    pub const DATA_SOURCE: &str = "formline::data_source";
}
