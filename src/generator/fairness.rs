//! Fairness pass: reducing repeated pairings across rounds.
//!
//! A *repeated pairing* is two students sharing a group (host or guest)
//! in more than one round. The repeat count is
//! `Σ over pairs (occurrences − 1)`.
//!
//! # Algorithm
//!
//! Randomized hill climbing with strict-improvement acceptance:
//!
//! 1. Enumerate every guest seat `(round, group, member)`. Hosts never move.
//! 2. Draw two seats from different rounds; call their students `a` and `b`.
//! 3. Exchange the groups of `a` and `b` within `a`'s round; the other
//!    round is untouched. The round stays a partition of its population.
//!    The move is legal only if both students are guests in different
//!    groups of that round and neither lands next to someone they avoid.
//! 4. Keep the exchange only if the repeat count strictly drops.
//!
//! The pass stops after `max_swap_attempts` draws (capped at twice the
//! seat count) or `max_stale_attempts` consecutive rejected exchanges.
//! If the result would contain a self-hosted group, the input is
//! returned untouched.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{has_self_hosting, Assignment, StudentIndex};

use super::guests::violates_avoid;
use super::rng::SeededRng;

/// Bounds on the fairness search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FairnessConfig {
    /// Maximum number of seat draws.
    pub max_swap_attempts: usize,
    /// Stop after this many consecutive non-improving exchanges.
    pub max_stale_attempts: usize,
}

impl Default for FairnessConfig {
    fn default() -> Self {
        Self {
            max_swap_attempts: 30,
            max_stale_attempts: 10,
        }
    }
}

impl FairnessConfig {
    /// Sets the draw budget.
    pub fn with_max_swap_attempts(mut self, attempts: usize) -> Self {
        self.max_swap_attempts = attempts;
        self
    }

    /// Sets the early-stop patience.
    pub fn with_max_stale_attempts(mut self, attempts: usize) -> Self {
        self.max_stale_attempts = attempts;
        self
    }
}

/// Unordered pair key (lexicographically ordered).
fn pair_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Number of groups each unordered pair shares across the plan.
pub fn pairing_counts(assignments: &[Assignment]) -> HashMap<(&str, &str), usize> {
    let mut counts = HashMap::new();
    for group in assignments.iter().flat_map(|a| a.groups.iter()) {
        let people: Vec<&str> = group.participants().collect();
        for (i, a) in people.iter().enumerate() {
            for b in &people[i + 1..] {
                *counts.entry(pair_key(*a, *b)).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Repeat count: `Σ (occurrences − 1)` over pairs seen more than once.
pub fn repeat_count(assignments: &[Assignment]) -> usize {
    pairing_counts(assignments)
        .values()
        .map(|&n| n.saturating_sub(1))
        .sum()
}

#[derive(Debug, Clone, Copy)]
struct Seat {
    round: usize,
    group: usize,
    member: usize,
}

/// `(group, member)` of a guest within one round; `None` if absent or hosting.
fn guest_position(assignment: &Assignment, student_id: &str) -> Option<(usize, usize)> {
    if assignment.is_host(student_id) {
        return None;
    }
    assignment.groups.iter().enumerate().find_map(|(g, group)| {
        group
            .member_ids
            .iter()
            .position(|m| m == student_id)
            .map(|m| (g, m))
    })
}

/// Whether exchanging the two guests keeps every group avoid-compatible.
fn exchange_is_legal(
    assignment: &Assignment,
    (pos_a, a): ((usize, usize), &str),
    (pos_b, b): ((usize, usize), &str),
    index: &StudentIndex<'_>,
) -> bool {
    if pos_a.0 == pos_b.0 {
        return true;
    }
    let group_a = &assignment.groups[pos_a.0];
    let group_b = &assignment.groups[pos_b.0];
    !violates_avoid(a, group_b.participants().filter(|p| *p != b), index)
        && !violates_avoid(b, group_a.participants().filter(|p| *p != a), index)
}

fn exchange(assignment: &mut Assignment, pos_a: (usize, usize), pos_b: (usize, usize)) {
    if pos_a.0 == pos_b.0 {
        return;
    }
    let a = std::mem::take(&mut assignment.groups[pos_a.0].member_ids[pos_a.1]);
    let b = std::mem::replace(&mut assignment.groups[pos_b.0].member_ids[pos_b.1], a);
    assignment.groups[pos_a.0].member_ids[pos_a.1] = b;
}

/// Reduces repeated pairings with random guest exchanges.
///
/// Never mutates `assignments`; returns an improved copy (or an unchanged
/// copy). The returned repeat count is never higher than the input's.
///
/// # Example
/// ```
/// use u_hosting::generator::{perform_fairness_pass, repeat_count, FairnessConfig, SeededRng};
/// use u_hosting::models::{Assignment, Group, StudentIndex};
///
/// let plan = vec![
///     Assignment::new("R1").with_group(Group::new("g1", "R1", "H1").with_member("A")),
/// ];
/// let index = StudentIndex::new(&[]);
/// let out = perform_fairness_pass(&plan, &index, &mut SeededRng::new(1), &FairnessConfig::default());
/// assert_eq!(out, plan);
/// assert_eq!(repeat_count(&out), 0);
/// ```
pub fn perform_fairness_pass(
    assignments: &[Assignment],
    index: &StudentIndex<'_>,
    rng: &mut SeededRng,
    config: &FairnessConfig,
) -> Vec<Assignment> {
    if assignments.len() <= 1 {
        return assignments.to_vec();
    }

    let mut result = assignments.to_vec();
    let mut best = repeat_count(&result);
    if best == 0 {
        return result;
    }

    let seats: Vec<Seat> = result
        .iter()
        .enumerate()
        .flat_map(|(round, a)| {
            a.groups.iter().enumerate().flat_map(move |(group, g)| {
                (0..g.member_ids.len()).map(move |member| Seat {
                    round,
                    group,
                    member,
                })
            })
        })
        .collect();
    if seats.len() < 2 {
        return result;
    }

    let initial = best;
    let max_attempts = config.max_swap_attempts.min(seats.len() * 2);
    let mut stale = 0;

    for _ in 0..max_attempts {
        if stale >= config.max_stale_attempts {
            break;
        }

        let i1 = rng.next_index(seats.len());
        let mut i2 = rng.next_index(seats.len());
        while i2 == i1 {
            i2 = rng.next_index(seats.len());
        }
        let (s1, s2) = (seats[i1], seats[i2]);
        if s1.round == s2.round {
            continue;
        }

        let a = result[s1.round].groups[s1.group].member_ids[s1.member].clone();
        let b = result[s2.round].groups[s2.group].member_ids[s2.member].clone();
        if a == b {
            continue;
        }

        // Exchange within the first seat's round only.
        let round = &result[s1.round];
        let (Some(pos_a), Some(pos_b)) = (guest_position(round, &a), guest_position(round, &b)) else {
            continue;
        };
        if pos_a.0 == pos_b.0 {
            continue;
        }
        if !exchange_is_legal(round, (pos_a, a.as_str()), (pos_b, b.as_str()), index) {
            continue;
        }

        exchange(&mut result[s1.round], pos_a, pos_b);

        let repeats = repeat_count(&result);
        if repeats < best {
            best = repeats;
            stale = 0;
        } else {
            exchange(&mut result[s1.round], pos_a, pos_b);
            stale += 1;
        }
    }

    if has_self_hosting(&result) {
        warn!("fairness pass produced a self-hosted group; keeping the input plan");
        return assignments.to_vec();
    }

    debug!(initial, remaining = best, "fairness pass finished");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, Student};

    /// Two rounds of two groups each over eight students, with repeats.
    fn repetitive_plan() -> Vec<Assignment> {
        vec![
            Assignment::new("R1")
                .with_group(
                    Group::new("g1", "R1", "H1")
                        .with_member("A")
                        .with_member("B")
                        .with_member("H3"),
                )
                .with_group(
                    Group::new("g2", "R1", "H2")
                        .with_member("C")
                        .with_member("D")
                        .with_member("H4"),
                ),
            Assignment::new("R2")
                .with_group(
                    Group::new("g3", "R2", "H3")
                        .with_member("A")
                        .with_member("B")
                        .with_member("H2"),
                )
                .with_group(
                    Group::new("g4", "R2", "H4")
                        .with_member("C")
                        .with_member("D")
                        .with_member("H1"),
                ),
        ]
    }

    fn roster() -> Vec<Student> {
        ["H1", "H2", "H3", "H4", "A", "B", "C", "D"]
            .iter()
            .map(|id| Student::new(*id, *id))
            .collect()
    }

    #[test]
    fn test_repeat_count() {
        let plan = repetitive_plan();
        // A-B, C-D and A/B-H3 in g1 vs g3, C/D-H4 in g2 vs g4.
        assert_eq!(repeat_count(&plan), 6);
        let counts = pairing_counts(&plan);
        assert_eq!(counts[&("A", "B")], 2);
        assert_eq!(counts[&("A", "H1")], 1);
    }

    #[test]
    fn test_single_round_is_noop() {
        let plan = vec![repetitive_plan().remove(0)];
        let students = roster();
        let index = StudentIndex::new(&students);
        let out = perform_fairness_pass(&plan, &index, &mut SeededRng::new(1), &FairnessConfig::default());
        assert_eq!(out, plan);
    }

    #[test]
    fn test_never_regresses() {
        let plan = repetitive_plan();
        let students = roster();
        let index = StudentIndex::new(&students);
        let before = repeat_count(&plan);

        for seed in 0..25 {
            let out = perform_fairness_pass(
                &plan,
                &index,
                &mut SeededRng::new(seed),
                &FairnessConfig::default(),
            );
            assert!(repeat_count(&out) <= before);
            assert!(!has_self_hosting(&out));
            for (a, b) in plan.iter().zip(&out) {
                assert_eq!(a.placed_count(), b.placed_count());
                for (ga, gb) in a.groups.iter().zip(&b.groups) {
                    assert_eq!(ga.host_id, gb.host_id);
                }
            }
        }
    }

    #[test]
    fn test_round_population_preserved() {
        let plan = repetitive_plan();
        let students = roster();
        let index = StudentIndex::new(&students);
        let out = perform_fairness_pass(&plan, &index, &mut SeededRng::new(11), &FairnessConfig::default());

        for (a, b) in plan.iter().zip(&out) {
            let mut before: Vec<&str> = a.groups.iter().flat_map(|g| g.participants()).collect();
            let mut after: Vec<&str> = b.groups.iter().flat_map(|g| g.participants()).collect();
            before.sort_unstable();
            after.sort_unstable();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn test_avoid_not_introduced() {
        let plan = repetitive_plan();
        let mut students = roster();
        students[4] = Student::new("A", "A").with_avoid("C").with_avoid("D");
        let index = StudentIndex::new(&students);

        for seed in 0..25 {
            let out = perform_fairness_pass(
                &plan,
                &index,
                &mut SeededRng::new(seed),
                &FairnessConfig::default(),
            );
            for group in out.iter().flat_map(|a| a.groups.iter()) {
                assert!(!(group.contains("A") && (group.contains("C") || group.contains("D"))));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let plan = repetitive_plan();
        let students = roster();
        let index = StudentIndex::new(&students);
        let config = FairnessConfig::default();
        let a = perform_fairness_pass(&plan, &index, &mut SeededRng::new(77), &config);
        let b = perform_fairness_pass(&plan, &index, &mut SeededRng::new(77), &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_self_hosted_input_is_returned_unchanged() {
        let mut plan = repetitive_plan();
        plan[0].groups[0].member_ids.push("H1".into());
        let students = roster();
        let index = StudentIndex::new(&students);
        let out = perform_fairness_pass(&plan, &index, &mut SeededRng::new(5), &FairnessConfig::default());
        assert_eq!(out, plan);
    }

    /// Rounds where `A,B` and `C,D` always meet under fresh hosts.
    fn paired_rounds(rounds: usize) -> Vec<Assignment> {
        (1..=rounds)
            .map(|r| {
                let round_id = format!("R{r}");
                Assignment::new(round_id.as_str())
                    .with_group(
                        Group::new(format!("g{r}a"), round_id.as_str(), format!("H{r}a"))
                            .with_member("A")
                            .with_member("B"),
                    )
                    .with_group(
                        Group::new(format!("g{r}b"), round_id.as_str(), format!("H{r}b"))
                            .with_member("C")
                            .with_member("D"),
                    )
            })
            .collect()
    }

    fn improves_for_some_seed(plan: &[Assignment]) -> bool {
        let index = StudentIndex::default();
        let before = repeat_count(plan);
        (0..20).any(|seed| {
            let out = perform_fairness_pass(plan, &index, &mut SeededRng::new(seed), &FairnessConfig::default());
            repeat_count(&out) < before
        })
    }

    #[test]
    fn test_improves_two_rounds() {
        let plan = paired_rounds(2);
        assert_eq!(repeat_count(&plan), 2);
        assert!(improves_for_some_seed(&plan));
        assert!(improves_for_some_seed(&repetitive_plan()));
    }

    #[test]
    fn test_improves_three_rounds() {
        let plan = paired_rounds(3);
        assert_eq!(repeat_count(&plan), 4);
        assert!(improves_for_some_seed(&plan));
    }

    #[test]
    fn test_config_builder() {
        let config = FairnessConfig::default()
            .with_max_swap_attempts(5)
            .with_max_stale_attempts(2);
        assert_eq!(config.max_swap_attempts, 5);
        assert_eq!(config.max_stale_attempts, 2);
    }
}
