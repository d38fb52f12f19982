//! Single-operand parsing.
//!
//! Extracts the register tokens used by one operand and classifies the
//! operand as register, memory, or neither (immediates, symbols). Both
//! addressing grammars are handled:
//!
//! - AT&T: `displacement(base, index, scale)`, e.g. `8(%rax,%rbx,2)`
//! - Intel: `[base + index*scale + displacement]`, e.g. `[rax + rbx*2 + 8]`
//!
//! Memory operands report every register participating in the address
//! computation; the addressed location itself is not modeled.

use regex::Regex;
use smallvec::SmallVec;
use std::sync::LazyLock;

use super::registers;

/// Compiled operand patterns.
struct Patterns {
    /// AT&T addressing component list: `(%rax,%rbx,2)`.
    att_address: Regex,
    /// Identifier tokens inside Intel brackets: `rax`, `rbx`.
    identifier: Regex,
    /// A bare (possibly `%`-prefixed) register operand.
    direct_register: Regex,
}

static PATTERNS: LazyLock<Patterns> = LazyLock::new(|| Patterns {
    att_address: Regex::new(r"\(([^)]*)\)").unwrap(),
    identifier: Regex::new(r"[a-zA-Z_][a-zA-Z0-9_]*").unwrap(),
    direct_register: Regex::new(r"^%?[a-z][a-z0-9]*$").unwrap(),
});

/// Registers and memory classification extracted from one operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedOperand {
    /// Normalized register names, in textual order, deduplicated.
    pub registers: SmallVec<[String; 2]>,
    /// Whether the operand is a memory reference.
    pub is_memory: bool,
    /// Full addressing expression text for memory operands, for diagnostics.
    pub memory_expr: Option<String>,
}

impl ExtractedOperand {
    fn none() -> Self {
        Self {
            registers: SmallVec::new(),
            is_memory: false,
            memory_expr: None,
        }
    }

    fn push_register(&mut self, name: &str) {
        let normalized = registers::normalize(name);
        if !self.registers.contains(&normalized) {
            self.registers.push(normalized);
        }
    }
}

/// True for pure integer literals (decimal or `0x` hex, optional sign).
///
/// These appear as displacement/scale components in addressing expressions
/// and must not be mistaken for registers.
fn is_integer_literal(token: &str) -> bool {
    let t = token.strip_prefix('-').unwrap_or(token);
    if t.is_empty() {
        return false;
    }
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    t.chars().all(|c| c.is_ascii_digit())
}

/// Parse one operand's text.
pub fn extract_operand(text: &str) -> ExtractedOperand {
    let text = text.trim();
    if text.is_empty() {
        return ExtractedOperand::none();
    }

    // AT&T memory operand: components between the parentheses are
    // base/index/scale; anything that is not an integer literal or an
    // immediate marker is a register.
    if let Some(caps) = PATTERNS.att_address.captures(text) {
        let mut op = ExtractedOperand {
            registers: SmallVec::new(),
            is_memory: true,
            memory_expr: Some(text.to_string()),
        };
        for component in caps[1].split(',') {
            let component = component.trim();
            if component.is_empty()
                || component.starts_with('$')
                || is_integer_literal(component)
            {
                continue;
            }
            op.push_register(component);
        }
        return op;
    }

    // Intel memory operand: every identifier token inside the brackets is
    // taken as a register-name candidate (scale and displacement are
    // numeric and never match).
    if let (Some(open), Some(close)) = (text.find('['), text.rfind(']')) {
        if open < close {
            let mut op = ExtractedOperand {
                registers: SmallVec::new(),
                is_memory: true,
                memory_expr: Some(text[open..=close].to_string()),
            };
            for ident in PATTERNS.identifier.find_iter(&text[open + 1..close]) {
                op.push_register(ident.as_str());
            }
            return op;
        }
    }

    // Direct register operand, possibly dialect-prefixed.
    if PATTERNS.direct_register.is_match(text) {
        let mut op = ExtractedOperand::none();
        op.push_register(text);
        return op;
    }

    // Immediates, absolute addresses, symbols: nothing to track.
    ExtractedOperand::none()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_register_att() {
        let op = extract_operand("%rax");
        assert_eq!(op.registers.as_slice(), ["rax"]);
        assert!(!op.is_memory);
        assert!(op.memory_expr.is_none());
    }

    #[test]
    fn test_direct_register_intel() {
        let op = extract_operand("rcx");
        assert_eq!(op.registers.as_slice(), ["rcx"]);
        assert!(!op.is_memory);
    }

    #[test]
    fn test_att_memory_full_form() {
        let op = extract_operand("8(%rax,%rbx,2)");
        assert_eq!(op.registers.as_slice(), ["rax", "rbx"]);
        assert!(op.is_memory);
        assert_eq!(op.memory_expr.as_deref(), Some("8(%rax,%rbx,2)"));
    }

    #[test]
    fn test_att_memory_base_only() {
        let op = extract_operand("(%rdi)");
        assert_eq!(op.registers.as_slice(), ["rdi"]);
        assert!(op.is_memory);
    }

    #[test]
    fn test_att_memory_negative_displacement() {
        let op = extract_operand("-0x10(%rbp)");
        assert_eq!(op.registers.as_slice(), ["rbp"]);
        assert!(op.is_memory);
    }

    #[test]
    fn test_intel_memory() {
        let op = extract_operand("qword ptr [rax + rbx*2 + 8]");
        assert_eq!(op.registers.as_slice(), ["rax", "rbx"]);
        assert!(op.is_memory);
        assert_eq!(op.memory_expr.as_deref(), Some("[rax + rbx*2 + 8]"));
    }

    #[test]
    fn test_intel_memory_base_only() {
        let op = extract_operand("[rsp]");
        assert_eq!(op.registers.as_slice(), ["rsp"]);
        assert!(op.is_memory);
    }

    #[test]
    fn test_immediate_yields_nothing() {
        for imm in ["$42", "$-1", "$0x10", "42", "0x10"] {
            let op = extract_operand(imm);
            assert!(op.registers.is_empty(), "immediate {imm} produced registers");
            assert!(!op.is_memory);
        }
    }

    #[test]
    fn test_duplicate_register_deduplicated() {
        let op = extract_operand("(%rax,%rax,1)");
        assert_eq!(op.registers.as_slice(), ["rax"]);
    }

    #[test]
    fn test_integer_literal_detection() {
        assert!(is_integer_literal("8"));
        assert!(is_integer_literal("-16"));
        assert!(is_integer_literal("0x1F"));
        assert!(!is_integer_literal("rax"));
        assert!(!is_integer_literal("0x"));
        assert!(!is_integer_literal(""));
    }
}
