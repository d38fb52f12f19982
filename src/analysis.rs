//! Whole-trace analysis.
//!
//! [`analyze`] is the crate's entry point: it takes the raw text of one
//! timeline trace and returns the complete dependency graph. It is a pure
//! function of its input with no retained state, so concurrent calls over
//! different traces need no synchronization.
//!
//! The timeline section is delimited by the trace format's own markers: it
//! begins at the `Timeline view:` header and ends at the first recognized
//! follow-on section header, or at end of input when none appears (trailing
//! sections added by newer tool versions simply are not matched).

use serde::Serialize;

use crate::asm::roles::classify_roles;
use crate::asm::syntax::{detect_syntax, AsmSyntax};
use crate::deps::{resolve_dependencies, DependencyRecord};
use crate::trace::{parse_timeline_line, Instruction};

/// Header opening the timeline section.
const TIMELINE_HEADER: &str = "Timeline view:";

/// Section headers that terminate the timeline section.
const TIMELINE_END_MARKERS: &[&str] = &[
    "Average Wait times",
    "Resources:",
    "Resource pressure",
    "Instruction Info:",
    "Summary",
];

/// Complete result of analyzing one trace.
///
/// Built fresh on every [`analyze`] call. `dependencies` is parallel to
/// `instructions`: the record at position `p` describes the instruction at
/// position `p`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Timeline entries in trace order.
    pub instructions: Vec<Instruction>,
    /// One dependency record per trace position.
    pub dependencies: Vec<DependencyRecord>,
    /// Number of timeline entries recognized.
    pub total_instructions: usize,
    /// Dialect detected for the whole trace.
    pub syntax: AsmSyntax,
}

impl AnalysisResult {
    /// Dependency record for a trace position, if it exists.
    pub fn record(&self, position: usize) -> Option<&DependencyRecord> {
        self.dependencies.get(position)
    }

    /// Iterate `(position, instruction, record)` in trace order.
    pub fn entries(
        &self,
    ) -> impl Iterator<Item = (usize, &Instruction, &DependencyRecord)> {
        self.instructions
            .iter()
            .zip(&self.dependencies)
            .enumerate()
            .map(|(p, (i, d))| (p, i, d))
    }
}

/// Collect the timeline lines of a trace.
///
/// Lines before the timeline header, after a recognized end marker, or not
/// shaped like timeline entries are skipped; skipping is the normal case,
/// not an error.
fn collect_instructions(trace: &str) -> Vec<Instruction> {
    let mut instructions = Vec::new();
    let mut in_timeline = false;

    for line in trace.lines() {
        if !in_timeline {
            if line.contains(TIMELINE_HEADER) {
                log::debug!("timeline section found");
                in_timeline = true;
            }
            continue;
        }

        let trimmed = line.trim_start();
        if TIMELINE_END_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
            log::debug!("timeline section ends at: {trimmed}");
            break;
        }

        if let Some(instr) = parse_timeline_line(line) {
            instructions.push(instr);
        }
    }

    instructions
}

/// Analyze one raw trace.
///
/// Never fails: a trace without a timeline section (or with no
/// recognizable timeline lines) yields an empty, well-formed result.
pub fn analyze(trace: &str) -> AnalysisResult {
    let instructions = collect_instructions(trace);
    let syntax = detect_syntax(&instructions);

    let roles: Vec<_> = instructions
        .iter()
        .map(|i| classify_roles(syntax, &i.text))
        .collect();
    let dependencies = resolve_dependencies(&instructions, &roles);

    log::debug!(
        "analyzed {} instructions ({} syntax), {} dependency edges",
        instructions.len(),
        syntax.name(),
        dependencies.iter().map(|d| d.depends_on.len()).sum::<usize>()
    );

    AnalysisResult {
        total_instructions: instructions.len(),
        dependencies,
        syntax,
        instructions,
    }
}
