//! Read-after-write dependency resolution.
//!
//! A single left-to-right pass over the trace tracks, per register alias
//! class, which trace position last wrote it. Each instruction's source
//! registers are checked against that map; a hit becomes a RAW edge if the
//! writer was still in flight when the reader dispatched.

mod resolver;

pub use resolver::{
    resolve_dependencies, DependencyEdge, DependencyKind, DependencyRecord,
};
