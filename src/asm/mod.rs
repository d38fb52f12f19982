//! x86-64 assembly text analysis.
//!
//! Everything needed to turn an instruction's text into register roles:
//!
//! - [`registers`] - register alias classes (width views, vector hierarchy)
//! - [`operand`] - single-operand register extraction
//! - [`syntax`] - whole-trace AT&T/Intel dialect detection
//! - [`roles`] - mnemonic-family-driven source/destination classification

pub mod operand;
pub mod registers;
pub mod roles;
pub mod syntax;

pub use operand::{extract_operand, ExtractedOperand};
pub use roles::{classify_roles, MnemonicFamily, OperandRoles};
pub use syntax::{detect_syntax, AsmSyntax};
