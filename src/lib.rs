//! mca-hazards library
//!
//! Reconstructs register read-after-write dependencies from the textual
//! per-cycle timeline produced by a machine-code performance estimator
//! (llvm-mca's timeline view). Cycle markers decide which potential hazards
//! were genuine stalls and which were already-resolved register reuse.
//!
//! The entry point is [`analyze`]: a pure function from raw trace text to
//! an [`AnalysisResult`] holding every recognized instruction and its
//! bidirectional dependency edges.
//!
//! ```
//! let trace = "\
//! Timeline view:
//! [0,0]     DeeER.    movq\t%rax, %rbx
//! [0,1]     D==eeER   addq\t%rbx, %rcx
//! ";
//! let result = mca_hazards::analyze(trace);
//! assert_eq!(result.dependencies[1].depends_on[0].register, "rbx");
//! ```

pub mod analysis;
pub mod asm;
pub mod deps;
pub mod report;
pub mod trace;

pub use analysis::{analyze, AnalysisResult};
pub use asm::AsmSyntax;
pub use deps::{DependencyEdge, DependencyKind, DependencyRecord};
pub use trace::{Instruction, Timing};
