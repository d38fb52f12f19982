//! Assembly dialect detection.
//!
//! A trace is classified as a whole, by majority vote over its instruction
//! texts, as either AT&T or Intel syntax:
//!
//! - AT&T indicators: `%`-prefixed register tokens, `$` immediate markers,
//!   and width-suffixed mnemonics (`movq`, `addl`, ...).
//! - Intel indicators: instruction text with no `%` prefix anywhere that
//!   still has the bare `mnemonic operand` shape.
//!
//! Mixed-dialect traces are not supported and will be classified by
//! whichever side dominates; this is a documented limitation of the
//! heuristic, not per-line detection.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::trace::Instruction;

/// Compiled dialect-indicator patterns.
struct Patterns {
    /// AT&T register token: `%rax`, `%xmm0`.
    att_register: Regex,
    /// AT&T immediate marker: `$42`, `$-0x10`.
    att_immediate: Regex,
    /// Width-suffixed mnemonic followed by an operand list.
    att_suffixed_mnemonic: Regex,
    /// Bare `mnemonic identifier` shape used by Intel operand order.
    intel_shape: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    att_register: Regex::new(r"%[a-z][a-z0-9]*").unwrap(),
    att_immediate: Regex::new(r"\$-?(0x)?[0-9a-fA-F]+").unwrap(),
    att_suffixed_mnemonic: Regex::new(r"^[a-z]+[bwlq]\s").unwrap(),
    intel_shape: Regex::new(r"^[a-z][a-z0-9]*\s+[a-zA-Z]").unwrap(),
});

/// The two supported assembly dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AsmSyntax {
    /// AT&T/GAS syntax: `%`-prefixed registers, source before destination.
    Att,
    /// Intel syntax: bare register names, destination before source.
    Intel,
}

impl AsmSyntax {
    /// Display name matching the conventional spelling.
    pub fn name(self) -> &'static str {
        match self {
            AsmSyntax::Att => "AT&T",
            AsmSyntax::Intel => "Intel",
        }
    }
}

/// Classify a whole trace's dialect from its parsed instructions.
pub fn detect_syntax(instructions: &[Instruction]) -> AsmSyntax {
    let mut att = 0usize;
    let mut intel = 0usize;

    for instr in instructions {
        let text = instr.text.as_str();

        att += PATTERNS.att_register.find_iter(text).count();
        att += PATTERNS.att_immediate.find_iter(text).count();
        if PATTERNS.att_suffixed_mnemonic.is_match(text) {
            att += 1;
        }

        if !text.contains('%') && PATTERNS.intel_shape.is_match(text) {
            intel += 1;
        }
    }

    log::debug!("syntax vote: att={att} intel={intel}");
    if att > intel {
        AsmSyntax::Att
    } else {
        AsmSyntax::Intel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::parse_timeline_line;

    fn instructions(lines: &[&str]) -> Vec<Instruction> {
        lines
            .iter()
            .filter_map(|l| parse_timeline_line(l))
            .collect()
    }

    #[test]
    fn test_detects_att() {
        let instrs = instructions(&[
            "[0,0]     DeER .   movq\t%rax, %rbx",
            "[0,1]     DeeER    addq\t$8, %rcx",
        ]);
        assert_eq!(detect_syntax(&instrs), AsmSyntax::Att);
    }

    #[test]
    fn test_detects_intel() {
        let instrs = instructions(&[
            "[0,0]     DeER .   mov rbx, rax",
            "[0,1]     DeeER    add rcx, 8",
        ]);
        assert_eq!(detect_syntax(&instrs), AsmSyntax::Intel);
    }

    #[test]
    fn test_empty_trace_defaults_to_intel() {
        assert_eq!(detect_syntax(&[]), AsmSyntax::Intel);
    }

    #[test]
    fn test_majority_wins_on_mixed_input() {
        // Two AT&T lines outvote one Intel-shaped line.
        let instrs = instructions(&[
            "[0,0]     DeER .   movq\t%rax, %rbx",
            "[0,1]     DeeER    addq\t%rbx, %rcx",
            "[0,2]     DeeER    mov rdx, rcx",
        ]);
        assert_eq!(detect_syntax(&instrs), AsmSyntax::Att);
    }
}
