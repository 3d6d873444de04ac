//! Plan quality metrics (KPIs).
//!
//! Summarizes a generated or hand-edited plan.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Group count | Groups across all rounds |
//! | Min/Max group size | People per group, host included |
//! | Distinct pairings | Unordered pairs that ever share a group |
//! | Repeated pairings | Σ (occurrences − 1) over pairs |
//! | Like satisfaction | Satisfied like edges / like edges evaluated |
//! | Unplaced | (student, round) combinations with no group |

use std::collections::HashSet;

use crate::models::{Assignment, Student};

use super::fairness::{pairing_counts, repeat_count};

/// Plan performance indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanKpi {
    /// Number of groups in the plan.
    pub group_count: usize,
    /// Smallest group size (host included). 0 for an empty plan.
    pub min_group_size: usize,
    /// Largest group size (host included).
    pub max_group_size: usize,
    /// Unordered pairs that share at least one group.
    pub distinct_pairings: usize,
    /// Repeat count minimized by the fairness pass.
    pub repeated_pairings: usize,
    /// Fraction of like edges honored (0.0..1.0; 1.0 if nobody likes anyone).
    pub like_satisfaction_rate: f64,
    /// Student-round combinations where the student has no group.
    pub unplaced: usize,
}

impl PlanKpi {
    /// Computes KPIs for a plan.
    ///
    /// Like edges are evaluated per round for students placed in that round;
    /// liked students not in the roster are ignored.
    pub fn calculate(assignments: &[Assignment], students: &[Student]) -> Self {
        let sizes: Vec<usize> = assignments
            .iter()
            .flat_map(|a| a.groups.iter().map(|g| g.size()))
            .collect();

        let roster: HashSet<&str> = students.iter().map(|s| s.id.as_str()).collect();
        let mut like_edges = 0usize;
        let mut like_hits = 0usize;
        let mut unplaced = 0usize;

        for assignment in assignments {
            for student in students {
                let Some(g) = assignment.group_index_of(&student.id) else {
                    unplaced += 1;
                    continue;
                };
                let group = &assignment.groups[g];
                for liked in student.like.iter().filter(|id| roster.contains(id.as_str())) {
                    like_edges += 1;
                    if group.contains(liked) {
                        like_hits += 1;
                    }
                }
            }
        }

        let like_satisfaction_rate = if like_edges == 0 {
            1.0
        } else {
            like_hits as f64 / like_edges as f64
        };

        Self {
            group_count: sizes.len(),
            min_group_size: sizes.iter().copied().min().unwrap_or(0),
            max_group_size: sizes.iter().copied().max().unwrap_or(0),
            distinct_pairings: pairing_counts(assignments).len(),
            repeated_pairings: repeat_count(assignments),
            like_satisfaction_rate,
            unplaced,
        }
    }

    /// Whether the plan meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_repeats: usize, min_like_rate: f64) -> bool {
        self.repeated_pairings <= max_repeats && self.like_satisfaction_rate >= min_like_rate
    }

    /// Group size spread (max − min).
    pub fn size_spread(&self) -> usize {
        self.max_group_size - self.min_group_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Group;

    fn sample() -> (Vec<Assignment>, Vec<Student>) {
        let students = vec![
            Student::host("H1", "").with_like("A"),
            Student::host("H2", ""),
            Student::new("A", "").with_like("B"),
            Student::new("B", ""),
            Student::new("C", "").with_like("ghost"),
        ];
        let plan = vec![
            Assignment::new("R1")
                .with_group(Group::new("g1", "R1", "H1").with_member("A").with_member("H2"))
                .with_group(Group::new("g2", "R1", "H2x").with_member("B")),
            Assignment::new("R2").with_group(
                Group::new("g3", "R2", "H2")
                    .with_member("A")
                    .with_member("B")
                    .with_member("H1")
                    .with_member("C"),
            ),
        ];
        (plan, students)
    }

    #[test]
    fn test_kpi_basic() {
        let (plan, students) = sample();
        let kpi = PlanKpi::calculate(&plan, &students);
        assert_eq!(kpi.group_count, 3);
        assert_eq!(kpi.min_group_size, 2);
        assert_eq!(kpi.max_group_size, 5);
        assert_eq!(kpi.size_spread(), 3);
        // C has no group in R1.
        assert_eq!(kpi.unplaced, 1);
    }

    #[test]
    fn test_kpi_likes() {
        let (plan, students) = sample();
        let kpi = PlanKpi::calculate(&plan, &students);
        // R1: H1→A hit, A→B miss. R2: H1→A hit, A→B hit. "ghost" ignored.
        assert!((kpi.like_satisfaction_rate - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_repeats() {
        let (plan, students) = sample();
        let kpi = PlanKpi::calculate(&plan, &students);
        // H1-A, H1-H2, A-H2 in g1 and g3.
        assert_eq!(kpi.repeated_pairings, 3);
        assert!(kpi.meets_thresholds(3, 0.5));
        assert!(!kpi.meets_thresholds(2, 0.5));
        assert!(!kpi.meets_thresholds(3, 0.9));
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = PlanKpi::calculate(&[], &[]);
        assert_eq!(kpi.group_count, 0);
        assert_eq!(kpi.min_group_size, 0);
        assert_eq!(kpi.repeated_pairings, 0);
        assert!((kpi.like_satisfaction_rate - 1.0).abs() < 1e-10);
    }
}
