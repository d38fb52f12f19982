//! Human-readable analysis report.
//!
//! Minimal textual consumer of [`AnalysisResult`] for the CLI: one line per
//! timeline entry with its cycle summary, followed by its RAW edges. Richer
//! display (highlighting, cursor tracking) belongs to editor integrations,
//! not this crate.

use std::fmt::Write;

use crate::analysis::AnalysisResult;
use crate::trace::Instruction;

/// Format the cycle summary of one instruction.
fn cycle_summary(instr: &Instruction) -> String {
    let span = match (instr.timing.dispatch_cycle, instr.timing.retire_cycle) {
        (Some(d), Some(r)) => format!("cycles {d}..{r}"),
        (Some(d), None) => format!("dispatched at {d}"),
        _ => "no timing".to_string(),
    };
    let stalls = instr.timing.stall_count();
    if stalls > 0 {
        format!("{span}, {stalls} stall cycles")
    } else {
        span
    }
}

/// Render a full report for one analysis result.
pub fn render(result: &AnalysisResult) -> String {
    let mut out = String::new();

    writeln!(out, "Assembly syntax: {}", result.syntax.name()).unwrap();
    writeln!(out, "Instructions:    {}", result.total_instructions).unwrap();

    let edges: usize = result
        .dependencies
        .iter()
        .map(|d| d.depends_on.len())
        .sum();
    writeln!(out, "RAW hazards:     {edges}").unwrap();
    writeln!(out).unwrap();

    for (position, instr, record) in result.entries() {
        writeln!(
            out,
            "#{position:<3} [{},{}] {}  ({})",
            instr.iteration,
            instr.index,
            instr.text,
            cycle_summary(instr)
        )
        .unwrap();
        for edge in &record.depends_on {
            writeln!(out, "      depends on #{} via {}", edge.on, edge.register).unwrap();
        }
    }

    out
}
