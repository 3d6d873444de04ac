//! Host selection and slot construction.
//!
//! Hosts are drawn at random from the eligible pool; each chosen host
//! becomes a [`HostSlot`] that guest placement fills up to capacity.
//! Never-reuse across rounds is the generator's job (it filters the pool
//! with its used-hosts set before calling in here).

use crate::models::{ClassSettings, Student, StudentIndex};
use crate::PlanError;

use super::rng::{shuffle_in_place, SeededRng};

/// A host's group under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSlot {
    /// Hosting student.
    pub host_id: String,
    /// Maximum number of guests.
    pub capacity: usize,
    /// Guests placed so far.
    pub member_ids: Vec<String>,
}

impl HostSlot {
    /// Creates an empty slot.
    pub fn new(host_id: impl Into<String>, capacity: usize) -> Self {
        Self {
            host_id: host_id.into(),
            capacity,
            member_ids: Vec::new(),
        }
    }

    /// Whether another guest fits.
    #[inline]
    pub fn has_room(&self) -> bool {
        self.member_ids.len() < self.capacity
    }

    /// Host followed by guests.
    pub fn occupants(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.host_id.as_str()).chain(self.member_ids.iter().map(String::as_str))
    }
}

/// Picks `count` distinct hosts among the host-eligible candidates.
///
/// # Errors
/// [`PlanError::InsufficientHosts`] if fewer than `count` candidates can host.
pub fn pick_unique_hosts(
    candidates: &[&Student],
    count: usize,
    rng: &mut SeededRng,
) -> Result<Vec<String>, PlanError> {
    let mut pool: Vec<&Student> = candidates.iter().copied().filter(|s| s.can_host).collect();
    if pool.len() < count {
        return Err(PlanError::InsufficientHosts {
            needed: count,
            available: pool.len(),
        });
    }
    shuffle_in_place(&mut pool, rng);
    Ok(pool.into_iter().take(count).map(|s| s.id.clone()).collect())
}

/// Builds one empty slot per host, sized by the capacity model.
///
/// Hosts missing from the index get the class default capacity.
pub fn build_host_slots(
    host_ids: &[String],
    index: &StudentIndex<'_>,
    settings: &ClassSettings,
) -> Vec<HostSlot> {
    host_ids
        .iter()
        .map(|host_id| {
            let capacity = index
                .get(host_id)
                .map_or(settings.default_capacity(), |host| settings.capacity_for(host));
            HostSlot::new(host_id.as_str(), capacity)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Student> {
        vec![
            Student::host("H1", "Host 1"),
            Student::host("H2", "Host 2").with_capacity(3),
            Student::new("G1", "Guest 1"),
            Student::host("H3", "Host 3"),
        ]
    }

    #[test]
    fn test_pick_only_eligible() {
        let students = roster();
        let refs: Vec<&Student> = students.iter().collect();
        let mut rng = SeededRng::from_seed_str("hosts");
        let hosts = pick_unique_hosts(&refs, 3, &mut rng).unwrap();
        assert_eq!(hosts.len(), 3);
        assert!(!hosts.contains(&"G1".to_string()));

        let mut sorted = hosts.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn test_pick_insufficient() {
        let students = roster();
        let refs: Vec<&Student> = students.iter().collect();
        let mut rng = SeededRng::new(1);
        let err = pick_unique_hosts(&refs, 4, &mut rng).unwrap_err();
        assert_eq!(
            err,
            PlanError::InsufficientHosts {
                needed: 4,
                available: 3
            }
        );
    }

    #[test]
    fn test_pick_is_deterministic() {
        let students = roster();
        let refs: Vec<&Student> = students.iter().collect();
        let a = pick_unique_hosts(&refs, 2, &mut SeededRng::from_seed_str("x")).unwrap();
        let b = pick_unique_hosts(&refs, 2, &mut SeededRng::from_seed_str("x")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_slot_capacity_model() {
        let students = roster();
        let index = StudentIndex::new(&students);
        let slots = build_host_slots(
            &["H1".to_string(), "H2".to_string()],
            &index,
            &ClassSettings::new(2),
        );
        assert_eq!(slots[0].capacity, 4); // group size 2 + headroom
        assert_eq!(slots[1].capacity, 3); // explicit
        assert!(slots.iter().all(|s| s.member_ids.is_empty()));
    }

    #[test]
    fn test_slot_occupants() {
        let mut slot = HostSlot::new("H", 1);
        assert!(slot.has_room());
        slot.member_ids.push("A".into());
        assert!(!slot.has_room());
        assert_eq!(slot.occupants().collect::<Vec<_>>(), vec!["H", "A"]);
    }
}
