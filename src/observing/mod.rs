//! Observing-condition core: interval parsing, series alignment, window
//! scoring, unit formatting, and text rendering.
//!
//! Everything here is pure; the upstream fetches live in [`crate::nws`].

pub mod interval;
pub mod render;
pub mod series;
pub mod units;
pub mod window;

pub use interval::Interval;
pub use series::{ObservingRow, Series, align};
pub use units::format_visibility;
pub use window::{Recommendation, best_window};
