//! Timeline trace decoding.
//!
//! - [`line`] - recognizes and parses individual timeline lines
//! - [`timing`] - decodes per-cycle marker strings into cycle indices

pub mod line;
pub mod timing;

pub use line::{parse_timeline_line, Instruction};
pub use timing::{analyze_pattern, Timing};
