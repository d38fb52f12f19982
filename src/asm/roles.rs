//! Mnemonic-driven operand role classification.
//!
//! Given the dialect and one instruction's text, decides which registers the
//! instruction reads (sources) and which it writes (destinations). The
//! mnemonic is classified once into a family, then the family drives the
//! role assignment:
//!
//! | Family | Roles |
//! |--------|-------|
//! | `Compare` (`cmp`, `test`, `bt*`) | every operand's registers are sources |
//! | `Push` | operand is a source |
//! | `Pop` | register operand is a destination; memory operand contributes address sources |
//! | `TwoOperandMoveLike` (`mov*`, `lea`) | destination operand is write-only |
//! | `TwoOperandRmw` | destination operand is read and written |
//! | `SingleOperandRmw` | the register is both source and destination |
//!
//! Memory-addressing registers are always sources (the address must be
//! computed to use the operand); the addressed memory location itself is
//! never a dependency target.
//!
//! Operand order is dialect-dependent: AT&T puts the destination last,
//! Intel puts it first.

use super::operand::{extract_operand, ExtractedOperand};
use super::syntax::AsmSyntax;

/// Mnemonic family, computed once per instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicFamily {
    /// Flag-setting comparisons that write no register operand.
    Compare,
    /// Stack push: reads its operand.
    Push,
    /// Stack pop: writes its register operand.
    Pop,
    /// Two operands, destination written without being read (`mov*`, `lea`).
    TwoOperandMoveLike,
    /// Two operands, destination read and written (`add`, `xor`, ...).
    TwoOperandRmw,
    /// One operand, read and written in place (`inc`, `neg`, ...).
    SingleOperandRmw,
    /// No recognizable operand structure; contributes no roles.
    Unclassified,
}

/// Base-name families, before the operand count is considered.
fn base_family(mnemonic: &str) -> Option<MnemonicFamily> {
    match mnemonic {
        "cmp" | "test" | "bt" | "bts" | "btr" | "btc" => Some(MnemonicFamily::Compare),
        "push" => Some(MnemonicFamily::Push),
        "pop" => Some(MnemonicFamily::Pop),
        "lea" => Some(MnemonicFamily::TwoOperandMoveLike),
        m if m.starts_with("mov") => Some(MnemonicFamily::TwoOperandMoveLike),
        _ => None,
    }
}

/// Classify a mnemonic given how many operands it carries.
///
/// AT&T width suffixes (`b`/`w`/`l`/`q`) are stripped when the suffixed
/// spelling is not itself a known base name.
pub fn classify_mnemonic(mnemonic: &str, operand_count: usize) -> MnemonicFamily {
    let family = base_family(mnemonic).or_else(|| {
        let stripped = mnemonic.strip_suffix(['b', 'w', 'l', 'q'])?;
        if stripped.is_empty() {
            return None;
        }
        base_family(stripped)
    });

    match family {
        Some(f) => f,
        None if operand_count >= 2 => MnemonicFamily::TwoOperandRmw,
        None if operand_count == 1 => MnemonicFamily::SingleOperandRmw,
        None => MnemonicFamily::Unclassified,
    }
}

/// Registers an instruction reads and writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperandRoles {
    /// Registers read, in first-seen order.
    pub sources: Vec<String>,
    /// Registers written, in first-seen order.
    pub destinations: Vec<String>,
}

impl OperandRoles {
    fn add_source(&mut self, reg: &str) {
        if !self.sources.iter().any(|s| s == reg) {
            self.sources.push(reg.to_string());
        }
    }

    fn add_destination(&mut self, reg: &str) {
        if !self.destinations.iter().any(|d| d == reg) {
            self.destinations.push(reg.to_string());
        }
    }

    /// All of the operand's registers become sources.
    fn add_operand_sources(&mut self, op: &ExtractedOperand) {
        for reg in &op.registers {
            self.add_source(reg);
        }
    }

    /// Destination-position operand: a direct register is written (and also
    /// read unless `write_only`); a memory operand only contributes its
    /// address registers as sources.
    fn add_destination_operand(&mut self, op: &ExtractedOperand, write_only: bool) {
        if op.is_memory {
            self.add_operand_sources(op);
            return;
        }
        for reg in &op.registers {
            self.add_destination(reg);
            if !write_only {
                self.add_source(reg);
            }
        }
    }
}

/// Split an operand list on top-level commas.
///
/// Commas nested inside addressing expressions (`8(%rax,%rbx,2)`,
/// `[rax+rbx*2]`) do not separate operands, so nesting depth is tracked.
fn split_operands(list: &str) -> Vec<&str> {
    let mut operands = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (i, ch) in list.char_indices() {
        match ch {
            '(' | '[' => depth += 1,
            ')' | ']' => depth -= 1,
            ',' if depth == 0 => {
                operands.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let tail = list[start..].trim();
    if !tail.is_empty() {
        operands.push(tail);
    }
    operands.retain(|op| !op.is_empty());
    operands
}

/// Classify one instruction's register roles.
///
/// Text with no extractable mnemonic or operands yields empty roles, which
/// simply contributes no dependency edges.
pub fn classify_roles(syntax: AsmSyntax, text: &str) -> OperandRoles {
    let mut roles = OperandRoles::default();

    let text = text.trim();
    let Some((mnemonic, operand_list)) = text.split_once(char::is_whitespace) else {
        return roles;
    };

    let operands: Vec<ExtractedOperand> = split_operands(operand_list)
        .into_iter()
        .map(extract_operand)
        .collect();
    if operands.is_empty() {
        return roles;
    }

    let family = classify_mnemonic(mnemonic, operands.len());

    match family {
        MnemonicFamily::Compare => {
            for op in &operands {
                roles.add_operand_sources(op);
            }
        }
        MnemonicFamily::Push => {
            roles.add_operand_sources(&operands[0]);
        }
        MnemonicFamily::Pop => {
            // A direct-register pop only writes; a memory pop reads its
            // address registers.
            let op = &operands[0];
            if op.is_memory {
                roles.add_operand_sources(op);
            } else {
                for reg in &op.registers {
                    roles.add_destination(reg);
                }
            }
        }
        MnemonicFamily::TwoOperandMoveLike | MnemonicFamily::TwoOperandRmw
            if operands.len() >= 2 =>
        {
            let write_only = family == MnemonicFamily::TwoOperandMoveLike;
            let (dest, srcs): (&ExtractedOperand, &[ExtractedOperand]) = match syntax {
                // AT&T: sources first, destination last.
                AsmSyntax::Att => (
                    operands.last().unwrap(),
                    &operands[..operands.len() - 1],
                ),
                // Intel: destination first, sources after.
                AsmSyntax::Intel => (&operands[0], &operands[1..]),
            };
            for op in srcs {
                roles.add_operand_sources(op);
            }
            roles.add_destination_operand(dest, write_only);
        }
        MnemonicFamily::SingleOperandRmw
        | MnemonicFamily::TwoOperandMoveLike
        | MnemonicFamily::TwoOperandRmw => {
            // Single operand (including a degenerate one-operand move):
            // read-modify-write on a register, address-only for memory.
            roles.add_destination_operand(&operands[0], false);
        }
        MnemonicFamily::Unclassified => {}
    }

    roles
}
