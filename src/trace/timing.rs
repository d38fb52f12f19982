//! Timeline marker decoding.
//!
//! Each instruction in a timeline trace carries a per-cycle marker string,
//! one character per cycle, 0-indexed from the left:
//!
//! | Marker | Meaning | Rule |
//! |--------|---------|------|
//! | `D` | Dispatched | first occurrence |
//! | `e` | Execution started | first occurrence |
//! | `E` | Execution finished | last occurrence |
//! | `R` | Retired | last occurrence |
//! | `=` | Stalled (dispatched, waiting to issue) | every occurrence |
//! | other (`.`, `-`, space) | idle | ignored |
//!
//! `E` and `R` take the last occurrence because an instruction finishing a
//! later execution stage overwrites an earlier write-back marker. Any named
//! cycle can be absent when the trace window is truncated.

use serde::Serialize;

/// Cycle indices decoded from one timeline pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timing {
    /// Cycle the instruction was dispatched (`D`).
    pub dispatch_cycle: Option<u32>,
    /// Cycle execution started (first `e`).
    pub exec_start_cycle: Option<u32>,
    /// Cycle execution finished (last `E`).
    pub exec_end_cycle: Option<u32>,
    /// Cycle the instruction retired (last `R`).
    pub retire_cycle: Option<u32>,
    /// Every cycle spent stalled after dispatch (`=`).
    pub stall_cycles: Vec<u32>,
    /// Length of the traced window in cycles.
    pub total_cycles: usize,
}

impl Timing {
    /// Number of stall cycles observed.
    pub fn stall_count(&self) -> usize {
        self.stall_cycles.len()
    }
}

/// Decode a timeline marker string into cycle indices.
pub fn analyze_pattern(pattern: &str) -> Timing {
    let mut timing = Timing::default();

    for (cycle, ch) in pattern.chars().enumerate() {
        let cycle = cycle as u32;
        match ch {
            'D' => {
                if timing.dispatch_cycle.is_none() {
                    timing.dispatch_cycle = Some(cycle);
                }
            }
            'e' => {
                if timing.exec_start_cycle.is_none() {
                    timing.exec_start_cycle = Some(cycle);
                }
            }
            'E' => timing.exec_end_cycle = Some(cycle),
            'R' => timing.retire_cycle = Some(cycle),
            '=' => timing.stall_cycles.push(cycle),
            _ => {}
        }
    }

    timing.total_cycles = pattern.chars().count();
    timing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_pattern() {
        let t = analyze_pattern("DeeER");
        assert_eq!(t.dispatch_cycle, Some(0));
        assert_eq!(t.exec_start_cycle, Some(1));
        assert_eq!(t.exec_end_cycle, Some(3));
        assert_eq!(t.retire_cycle, Some(4));
        assert!(t.stall_cycles.is_empty());
        assert_eq!(t.total_cycles, 5);
    }

    #[test]
    fn test_stall_cycles_accumulate() {
        let t = analyze_pattern("D==eeeER");
        assert_eq!(t.dispatch_cycle, Some(0));
        assert_eq!(t.stall_cycles, vec![1, 2]);
        assert_eq!(t.exec_start_cycle, Some(3));
        assert_eq!(t.exec_end_cycle, Some(6));
        assert_eq!(t.retire_cycle, Some(7));
        assert_eq!(t.stall_count(), 2);
    }

    #[test]
    fn test_last_execution_end_wins() {
        // Two E markers: a later execution stage overwrites the first.
        let t = analyze_pattern("DeEeE.R");
        assert_eq!(t.exec_start_cycle, Some(1), "first e wins");
        assert_eq!(t.exec_end_cycle, Some(4), "last E wins");
        assert_eq!(t.retire_cycle, Some(6));
    }

    #[test]
    fn test_idle_markers_ignored() {
        let t = analyze_pattern(".   .DeER-- .");
        assert_eq!(t.dispatch_cycle, Some(5));
        assert_eq!(t.retire_cycle, Some(8));
        assert_eq!(t.total_cycles, 13);
    }

    #[test]
    fn test_truncated_window_leaves_fields_absent() {
        let t = analyze_pattern("D=ee");
        assert_eq!(t.dispatch_cycle, Some(0));
        assert_eq!(t.exec_start_cycle, Some(2));
        assert_eq!(t.exec_end_cycle, None);
        assert_eq!(t.retire_cycle, None);
        assert_eq!(t.total_cycles, 4);
    }

    #[test]
    fn test_empty_pattern() {
        let t = analyze_pattern("");
        assert_eq!(t, Timing::default());
    }
}
