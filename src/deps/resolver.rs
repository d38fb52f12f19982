//! The single-pass dependency resolver.
//!
//! For every instruction position `i`, each source register is looked up in
//! a `last_writer` map keyed by register alias class. A recorded writer `w`
//! produces an edge `i -> w` when the timing gate passes:
//!
//! - both `exec_end_cycle(w)` and `dispatch_cycle(i)` known: edge iff
//!   `exec_end_cycle(w) >= dispatch_cycle(i)` (the write had not completed
//!   when the reader dispatched);
//! - either side unknown (truncated trace window): edge recorded anyway.
//!   A false positive is preferable to silently dropping a real hazard.
//!
//! After the sources are processed, every destination register overwrites
//! its alias class entry in `last_writer`. Only the most recent writer is
//! tracked; with two in-flight writers of the same register, earlier ones
//! are invisible to later readers. See DESIGN.md for why this simplification
//! is kept.

use std::collections::HashMap;

use serde::Serialize;

use crate::asm::registers;
use crate::asm::roles::OperandRoles;
use crate::trace::Instruction;

/// Kind of data hazard carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DependencyKind {
    /// Read After Write: the reader needs a value still being produced.
    Raw,
}

/// One dependency edge, stored on the reader's record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    /// Trace position of the writer this instruction depends on.
    pub on: usize,
    /// Hazard kind.
    pub kind: DependencyKind,
    /// Register token that carried the hazard, as read by this instruction.
    pub register: String,
}

/// Dependency edges for one trace position.
///
/// Positions index [`crate::AnalysisResult::instructions`]; the same static
/// instruction appears at a new position for every traced iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyRecord {
    /// Earlier positions this instruction depends on.
    pub depends_on: Vec<DependencyEdge>,
    /// Later positions that depend on this instruction (inverse edges).
    pub dependents: Vec<usize>,
}

/// Whether the writer at `w` was still in flight when `i` dispatched.
fn hazard_is_live(writer: &Instruction, reader: &Instruction) -> bool {
    match (writer.timing.exec_end_cycle, reader.timing.dispatch_cycle) {
        (Some(exec_end), Some(dispatch)) => exec_end >= dispatch,
        // Missing timing on either side: assume the hazard is real.
        _ => true,
    }
}

/// Resolve RAW dependencies over one trace.
///
/// `roles` must be parallel to `instructions` (one entry per position).
/// The result is acyclic by construction: edges only point to strictly
/// earlier positions.
pub fn resolve_dependencies(
    instructions: &[Instruction],
    roles: &[OperandRoles],
) -> Vec<DependencyRecord> {
    debug_assert_eq!(instructions.len(), roles.len());

    let mut records: Vec<DependencyRecord> =
        vec![DependencyRecord::default(); instructions.len()];

    // Alias class -> position of its most recent writer.
    let mut last_writer: HashMap<String, usize> = HashMap::new();

    for (i, role) in roles.iter().enumerate() {
        for source in &role.sources {
            let class = registers::alias_class(source);
            let Some(&w) = last_writer.get(&class) else {
                continue;
            };
            if !hazard_is_live(&instructions[w], &instructions[i]) {
                log::debug!(
                    "position {i}: write of {source} at {w} already complete, no hazard"
                );
                continue;
            }
            records[i].depends_on.push(DependencyEdge {
                on: w,
                kind: DependencyKind::Raw,
                register: source.clone(),
            });
            records[w].dependents.push(i);
        }

        for dest in &role.destinations {
            last_writer.insert(registers::alias_class(dest), i);
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::parse_timeline_line;

    fn parse(lines: &[&str]) -> Vec<Instruction> {
        lines
            .iter()
            .map(|l| parse_timeline_line(l).expect("timeline line"))
            .collect()
    }

    fn roles_of(instructions: &[Instruction]) -> Vec<OperandRoles> {
        use crate::asm::roles::classify_roles;
        use crate::asm::syntax::AsmSyntax;
        instructions
            .iter()
            .map(|i| classify_roles(AsmSyntax::Att, &i.text))
            .collect()
    }

    #[test]
    fn test_raw_edge_when_writer_in_flight() {
        // movq finishes executing at cycle 3; addq dispatches at cycle 0.
        let instrs = parse(&[
            "[0,0]     DeeER.    movq\t%rax, %rbx",
            "[0,1]     D==eeER   addq\t%rbx, %rcx",
        ]);
        let records = resolve_dependencies(&instrs, &roles_of(&instrs));

        assert_eq!(records[1].depends_on.len(), 1);
        let edge = &records[1].depends_on[0];
        assert_eq!(edge.on, 0);
        assert_eq!(edge.kind, DependencyKind::Raw);
        assert_eq!(edge.register, "rbx");
        assert_eq!(records[0].dependents, vec![1]);
    }

    #[test]
    fn test_no_edge_when_write_already_complete() {
        // movq finishes at cycle 2; addq dispatches at cycle 4.
        let instrs = parse(&[
            "[0,0]     DeER .    movq\t%rax, %rbx",
            "[0,1]     .   DeER  addq\t%rbx, %rcx",
        ]);
        let records = resolve_dependencies(&instrs, &roles_of(&instrs));

        assert!(records[1].depends_on.is_empty());
        assert!(records[0].dependents.is_empty());
    }

    #[test]
    fn test_missing_timing_assumes_hazard() {
        // The writer's window is truncated before E: conservative edge.
        let instrs = parse(&[
            "[0,0]     Dee   .   movq\t%rax, %rbx",
            "[0,1]     .   DeER  addq\t%rbx, %rcx",
        ]);
        let records = resolve_dependencies(&instrs, &roles_of(&instrs));

        assert_eq!(records[1].depends_on.len(), 1);
        assert_eq!(records[1].depends_on[0].register, "rbx");
    }

    #[test]
    fn test_aliased_width_write_is_seen() {
        // Writing ebx aliases rbx, so the reader of rbx depends on it.
        let instrs = parse(&[
            "[0,0]     DeeeER    movl\t%eax, %ebx",
            "[0,1]     D=eeER    addq\t%rbx, %rcx",
        ]);
        let records = resolve_dependencies(&instrs, &roles_of(&instrs));

        assert_eq!(records[1].depends_on.len(), 1);
        assert_eq!(records[1].depends_on[0].on, 0);
        assert_eq!(records[1].depends_on[0].register, "rbx");
    }

    #[test]
    fn test_last_writer_wins() {
        // Both moves write rbx; the reader only sees the second.
        let instrs = parse(&[
            "[0,0]     DeeeeeER  movq\t%rax, %rbx",
            "[0,1]     DeeeeeER  movq\t%rdx, %rbx",
            "[0,2]     D=eeER    addq\t%rbx, %rcx",
        ]);
        let records = resolve_dependencies(&instrs, &roles_of(&instrs));

        assert_eq!(records[2].depends_on.len(), 1);
        assert_eq!(records[2].depends_on[0].on, 1);
        assert!(records[0].dependents.is_empty());
    }

    #[test]
    fn test_compare_does_not_become_a_writer() {
        let instrs = parse(&[
            "[0,0]     DeeeeeER  movq\t%rax, %rbx",
            "[0,1]     D=eeeER   cmpq\t%rdx, %rbx",
            "[0,2]     D==eeER   addq\t%rbx, %rcx",
        ]);
        let records = resolve_dependencies(&instrs, &roles_of(&instrs));

        // Both the compare and the add read the move's rbx.
        assert_eq!(records[1].depends_on[0].on, 0);
        assert_eq!(records[2].depends_on[0].on, 0);
        assert_eq!(records[0].dependents, vec![1, 2]);
    }

    #[test]
    fn test_edges_point_strictly_backward() {
        let instrs = parse(&[
            "[0,0]     DeeeeeER  addq\t%rax, %rbx",
            "[0,1]     D==eeER   addq\t%rbx, %rax",
            "[0,2]     D===eeER  addq\t%rax, %rbx",
        ]);
        let records = resolve_dependencies(&instrs, &roles_of(&instrs));

        for (i, record) in records.iter().enumerate() {
            for edge in &record.depends_on {
                assert!(edge.on < i, "edge {} -> {} not backward", i, edge.on);
            }
        }
    }
}
