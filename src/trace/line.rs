//! Timeline line parsing.
//!
//! One timeline line looks like:
//!
//! ```text
//! [0,2]     D====eER  .    .    addq	%rbx, %rcx
//! ```
//!
//! `[iteration,index]` identifies which execution of which static
//! instruction this is, the marker string records its per-cycle progress,
//! and the tail is the assembly text. Most lines in a trace are not timeline
//! lines (headers, legends, rulers) and are rejected, which is not an error.

use regex::Regex;
use std::sync::LazyLock;

use super::timing::{self, Timing};

/// Compiled timeline-line patterns.
struct Patterns {
    /// The `[iteration,index]` marker opening a timeline line.
    source_ref: Regex,
    /// First plausible instruction token: a lowercase-led identifier
    /// followed by whitespace and at least one more non-whitespace
    /// character (the operand list).
    instr_start: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    source_ref: Regex::new(r"\[(\d+),(\d+)\]").unwrap(),
    instr_start: Regex::new(r"(?:^|\s)([a-z][a-z0-9]*)\s+\S").unwrap(),
});

/// One decoded timeline entry.
///
/// Immutable after construction; the timing fields are derived from the
/// marker string at parse time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Instruction {
    /// Loop iteration this execution belongs to.
    pub iteration: u32,
    /// Static program-order position (repeats across iterations).
    pub index: u32,
    /// Raw per-cycle marker string, as traced.
    pub timeline: String,
    /// Trimmed assembly text (mnemonic plus operand list).
    pub text: String,
    /// Cycle indices decoded from `timeline`.
    pub timing: Timing,
}

/// Parse one trace line into an [`Instruction`].
///
/// Returns `None` for anything that is not a timeline line: no
/// `[iteration,index]` marker, or no recognizable instruction text after
/// the marker string.
pub fn parse_timeline_line(line: &str) -> Option<Instruction> {
    let caps = PATTERNS.source_ref.captures(line)?;
    let iteration: u32 = caps[1].parse().ok()?;
    let index: u32 = caps[2].parse().ok()?;

    let rest = &line[caps.get(0)?.end()..];

    // The marker string runs from the bracket up to the first token shaped
    // like a mnemonic with operands. Marker characters are single uppercase
    // letters, `=`, `-` and `.`, so a lowercase-led word does not occur
    // inside a well-formed pattern.
    let m = PATTERNS.instr_start.captures(rest)?;
    let text_start = m.get(1)?.start();

    let timeline = rest[..text_start].trim().to_string();
    let text = rest[text_start..].trim().to_string();
    let timing = timing::analyze_pattern(&timeline);

    Some(Instruction {
        iteration,
        index,
        timeline,
        text,
        timing,
    })
}
