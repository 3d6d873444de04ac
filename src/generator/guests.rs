//! Guest placement for a single round.
//!
//! # Algorithm
//!
//! 1. Balanced targets: `base = guests / slots`, the first `guests % slots`
//!    targets get one extra, then the targets are shuffled.
//! 2. Greedy fill: each slot repeatedly takes the remaining guest with the
//!    highest like-score against its current occupants (host included),
//!    skipping avoid conflicts. Ties go to the earliest guest in scan order.
//!    A slot stops early when no compatible guest is left.
//! 3. Leftovers: each remaining guest goes to the compatible slot with room
//!    and the best like-score. If none exists the attempt fails.
//!
//! A failed attempt is not an error; the generator reshuffles and retries.

use crate::models::{Student, StudentIndex};

use super::hosts::HostSlot;
use super::rng::{shuffle_in_place, SeededRng};

/// Whether `guest_id` conflicts with any of the given occupants.
pub fn violates_avoid<'m>(
    guest_id: &str,
    occupants: impl IntoIterator<Item = &'m str>,
    index: &StudentIndex<'_>,
) -> bool {
    occupants
        .into_iter()
        .any(|other| index.conflicts(guest_id, other))
}

/// Sum of like directions between `guest_id` and the occupants.
pub fn like_score<'m>(
    guest_id: &str,
    occupants: impl IntoIterator<Item = &'m str>,
    index: &StudentIndex<'_>,
) -> u32 {
    occupants
        .into_iter()
        .map(|other| index.like_weight(guest_id, other))
        .sum()
}

/// Balanced per-slot targets (sizes differ by at most one), shuffled.
fn balanced_targets(total_guests: usize, slot_count: usize, rng: &mut SeededRng) -> Vec<usize> {
    let base = total_guests / slot_count;
    let extra = total_guests % slot_count;
    let mut targets: Vec<usize> = (0..slot_count).map(|i| base + usize::from(i < extra)).collect();
    shuffle_in_place(&mut targets, rng);
    targets
}

/// Index of the best compatible guest for a slot.
fn best_guest(pool: &[&Student], slot: &HostSlot, index: &StudentIndex<'_>) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, guest) in pool.iter().enumerate() {
        if violates_avoid(&guest.id, slot.occupants(), index) {
            continue;
        }
        let score = like_score(&guest.id, slot.occupants(), index);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the best slot (with room, compatible) for a leftover guest.
fn best_slot(guest: &Student, slots: &[HostSlot], index: &StudentIndex<'_>) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, slot) in slots.iter().enumerate() {
        if !slot.has_room() || violates_avoid(&guest.id, slot.occupants(), index) {
            continue;
        }
        let score = like_score(&guest.id, slot.occupants(), index);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

/// Distributes `guests` over `slots` for one round.
///
/// Appends to each slot's `member_ids` and returns whether every guest was
/// placed. On `false` the slots hold a partial placement. Targets are
/// capped by slot capacity, so capacity holds even on partial results.
pub fn assign_guests_to_slots(
    guests: &[&Student],
    slots: &mut [HostSlot],
    index: &StudentIndex<'_>,
    rng: &mut SeededRng,
) -> bool {
    if slots.is_empty() {
        return guests.is_empty();
    }

    let targets = balanced_targets(guests.len(), slots.len(), rng);
    let mut pool: Vec<&Student> = guests.to_vec();

    for (slot, &target) in slots.iter_mut().zip(&targets) {
        let target = target.min(slot.capacity.saturating_sub(slot.member_ids.len()));
        for _ in 0..target {
            if pool.is_empty() {
                break;
            }
            match best_guest(&pool, slot, index) {
                Some(i) => {
                    let guest = pool.remove(i);
                    slot.member_ids.push(guest.id.clone());
                }
                None => break,
            }
        }
    }

    for guest in pool {
        match best_slot(guest, slots, index) {
            Some(i) => slots[i].member_ids.push(guest.id.clone()),
            None => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guests_of<'a>(students: &'a [Student], ids: &[&str]) -> Vec<&'a Student> {
        ids.iter()
            .filter_map(|id| students.iter().find(|s| s.id == *id))
            .collect()
    }

    #[test]
    fn test_balanced_sizes() {
        let mut students: Vec<Student> = (1..=10).map(|i| Student::new(format!("G{i}"), "")).collect();
        students.extend(["H1", "H2", "H3"].map(|h| Student::host(h, "")));
        let index = StudentIndex::new(&students);
        let guests: Vec<&Student> = students.iter().filter(|s| !s.can_host).collect();
        let mut slots = vec![
            HostSlot::new("H1", 8),
            HostSlot::new("H2", 8),
            HostSlot::new("H3", 8),
        ];

        let ok = assign_guests_to_slots(&guests, &mut slots, &index, &mut SeededRng::new(3));
        assert!(ok);
        let mut sizes: Vec<usize> = slots.iter().map(|s| s.member_ids.len()).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![3, 3, 4]);
    }

    #[test]
    fn test_like_pulls_guest_to_host() {
        let students = vec![
            Student::host("H1", "").with_like("G3"),
            Student::host("H2", ""),
            Student::new("G1", ""),
            Student::new("G2", ""),
            Student::new("G3", ""),
            Student::new("G4", ""),
        ];
        let index = StudentIndex::new(&students);
        let guests = guests_of(&students, &["G1", "G2", "G3", "G4"]);
        let mut slots = vec![HostSlot::new("H1", 4), HostSlot::new("H2", 4)];

        assert!(assign_guests_to_slots(&guests, &mut slots, &index, &mut SeededRng::new(9)));
        assert!(slots[0].member_ids.contains(&"G3".to_string()));
    }

    #[test]
    fn test_avoid_keeps_pair_apart() {
        let students = vec![
            Student::host("H1", ""),
            Student::host("H2", ""),
            Student::new("A", "").with_avoid("B"),
            Student::new("B", ""),
            Student::new("C", ""),
            Student::new("D", ""),
        ];
        let index = StudentIndex::new(&students);
        let guests = guests_of(&students, &["A", "B", "C", "D"]);

        for seed in 0..20 {
            let mut slots = vec![HostSlot::new("H1", 4), HostSlot::new("H2", 4)];
            assert!(assign_guests_to_slots(&guests, &mut slots, &index, &mut SeededRng::new(seed)));
            for slot in &slots {
                let has_a = slot.member_ids.iter().any(|m| m == "A");
                let has_b = slot.member_ids.iter().any(|m| m == "B");
                assert!(!(has_a && has_b), "seed {seed} grouped A with B");
            }
        }
    }

    #[test]
    fn test_avoid_deadlock_fails_attempt() {
        let students = vec![
            Student::host("H1", ""),
            Student::new("A", "").with_avoid("B"),
            Student::new("B", ""),
        ];
        let index = StudentIndex::new(&students);
        let guests = guests_of(&students, &["A", "B"]);
        let mut slots = vec![HostSlot::new("H1", 2)];

        let ok = assign_guests_to_slots(&guests, &mut slots, &index, &mut SeededRng::new(1));
        assert!(!ok);
        assert_eq!(slots[0].member_ids.len(), 1);
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let mut students: Vec<Student> = (1..=6).map(|i| Student::new(format!("G{i}"), "")).collect();
        students.push(Student::host("H1", ""));
        students.push(Student::host("H2", ""));
        let index = StudentIndex::new(&students);
        let guests: Vec<&Student> = students.iter().filter(|s| !s.can_host).collect();
        let mut slots = vec![HostSlot::new("H1", 2), HostSlot::new("H2", 2)];

        let ok = assign_guests_to_slots(&guests, &mut slots, &index, &mut SeededRng::new(5));
        assert!(!ok);
        assert!(slots.iter().all(|s| s.member_ids.len() <= s.capacity));
    }

    #[test]
    fn test_no_slots() {
        let students = vec![Student::new("A", "")];
        let index = StudentIndex::new(&students);
        let guests: Vec<&Student> = students.iter().collect();
        assert!(!assign_guests_to_slots(&guests, &mut [], &index, &mut SeededRng::new(1)));
        assert!(assign_guests_to_slots(&[], &mut [], &index, &mut SeededRng::new(1)));
    }

    #[test]
    fn test_scores() {
        let students = vec![
            Student::new("A", "").with_like("B").with_avoid("C"),
            Student::new("B", "").with_like("A"),
            Student::new("C", ""),
        ];
        let index = StudentIndex::new(&students);
        assert_eq!(like_score("A", ["B", "C"], &index), 2);
        assert!(violates_avoid("C", ["B", "A"], &index));
        assert!(!violates_avoid("B", ["A"], &index));
    }
}
