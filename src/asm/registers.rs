//! x86-64 register alias table.
//!
//! Different spellings of the same physical register must be treated as one
//! storage location when tracking hazards: writing `eax` and then reading
//! `rax` is a read-after-write on the same register. This module maps every
//! recognized spelling to a canonical *alias class* name.
//!
//! Covered register files:
//!
//! | File | Spellings |
//! |------|-----------|
//! | Legacy GPR (rax, rbx, rcx, rdx) | 64/32/16-bit, low byte, high byte (`al`, `ah`, ...) |
//! | Pointer/index GPR (rsi, rdi, rbp, rsp) | 64/32/16-bit, low byte (`sil`, ...) |
//! | Extended GPR (r8-r15) | `rN`, `rNd`, `rNw`, `rNb` |
//! | Vector (0-31) | `xmmN` ⊂ `ymmN` ⊂ `zmmN`, one class per index |
//!
//! Partial-width writes are conflated with full-register writes (writing `al`
//! counts as writing all of `rax`). This is a known precision gap in the
//! hazard model, kept intentionally; see DESIGN.md.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Spelling -> canonical alias class name.
///
/// Canonical names are the widest spelling of each class (`rax`, `r8`,
/// `zmm0`, ...).
static ALIAS_TABLE: LazyLock<HashMap<String, String>> = LazyLock::new(|| {
    let mut table = HashMap::new();

    let mut class = |canonical: &str, spellings: &[String]| {
        for s in spellings {
            table.insert(s.clone(), canonical.to_string());
        }
    };

    // Legacy GPRs with high-byte views.
    for (q, d, w, l, h) in [
        ("rax", "eax", "ax", "al", "ah"),
        ("rbx", "ebx", "bx", "bl", "bh"),
        ("rcx", "ecx", "cx", "cl", "ch"),
        ("rdx", "edx", "dx", "dl", "dh"),
    ] {
        class(
            q,
            &[q.into(), d.into(), w.into(), l.into(), h.into()],
        );
    }

    // Pointer/index GPRs (no high-byte view).
    for (q, d, w, l) in [
        ("rsi", "esi", "si", "sil"),
        ("rdi", "edi", "di", "dil"),
        ("rbp", "ebp", "bp", "bpl"),
        ("rsp", "esp", "sp", "spl"),
    ] {
        class(q, &[q.into(), d.into(), w.into(), l.into()]);
    }

    // Extended GPRs r8-r15.
    for n in 8..16u32 {
        let q = format!("r{n}");
        let spellings = [q.clone(), format!("r{n}d"), format!("r{n}w"), format!("r{n}b")];
        class(&q, &spellings);
    }

    // Vector hierarchy: xmmN, ymmN and zmmN share storage per index.
    for n in 0..32u32 {
        let z = format!("zmm{n}");
        let spellings = [format!("xmm{n}"), format!("ymm{n}"), z.clone()];
        class(&z, &spellings);
    }

    table
});

/// Strip a dialect register prefix (`%`) and lowercase the spelling.
pub fn normalize(name: &str) -> String {
    name.trim().trim_start_matches('%').to_ascii_lowercase()
}

/// Canonical alias class for a register spelling.
///
/// Unknown spellings fall back to their own normalized name, so every
/// register token has a class and unrecognized registers never collide with
/// recognized ones.
pub fn alias_class(name: &str) -> String {
    let normalized = normalize(name);
    match ALIAS_TABLE.get(&normalized) {
        Some(canonical) => canonical.clone(),
        None => normalized,
    }
}

/// Check whether two register spellings refer to overlapping storage.
pub fn are_aliased(a: &str, b: &str) -> bool {
    alias_class(a) == alias_class(b)
}

/// Check whether a spelling names a recognized x86-64 register.
pub fn is_known_register(name: &str) -> bool {
    ALIAS_TABLE.contains_key(&normalize(name))
}
