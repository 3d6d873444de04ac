//! Plan (solution) model.
//!
//! A plan is a list of per-round assignments. Each assignment partitions
//! the round's population into host groups.
//!
//! # Invariants
//! - A group's host never appears in its own `member_ids`.
//! - At most one assignment per round.

use serde::{Deserialize, Serialize};

/// One host's group within a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Group identifier (unique within the round).
    pub id: String,
    /// Owning round.
    pub round_id: String,
    /// Hosting student.
    pub host_id: String,
    /// Guests (excludes the host, no duplicates, order irrelevant).
    pub member_ids: Vec<String>,
}

/// The groups of one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Round this assignment covers.
    pub round_id: String,
    /// Host groups.
    pub groups: Vec<Group>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(
        id: impl Into<String>,
        round_id: impl Into<String>,
        host_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            round_id: round_id.into(),
            host_id: host_id.into(),
            member_ids: Vec::new(),
        }
    }

    /// Adds a guest.
    pub fn with_member(mut self, student_id: impl Into<String>) -> Self {
        self.member_ids.push(student_id.into());
        self
    }

    /// Host followed by guests.
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.host_id.as_str()).chain(self.member_ids.iter().map(String::as_str))
    }

    /// Number of people in the group, host included.
    #[inline]
    pub fn size(&self) -> usize {
        self.member_ids.len() + 1
    }

    /// Whether the student is host or guest here.
    pub fn contains(&self, student_id: &str) -> bool {
        self.host_id == student_id || self.has_member(student_id)
    }

    /// Whether the student is a guest here.
    pub fn has_member(&self, student_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == student_id)
    }

    /// Whether the host is listed among its own guests.
    #[inline]
    pub fn is_self_hosted(&self) -> bool {
        self.has_member(&self.host_id)
    }
}

impl Assignment {
    /// Creates an assignment with no groups.
    pub fn new(round_id: impl Into<String>) -> Self {
        Self {
            round_id: round_id.into(),
            groups: Vec::new(),
        }
    }

    /// Adds a group.
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Finds a group by ID.
    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    /// Index of the group where the student is placed (as host or guest).
    pub fn group_index_of(&self, student_id: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(student_id))
    }

    /// Whether the student hosts in this round.
    pub fn is_host(&self, student_id: &str) -> bool {
        self.groups.iter().any(|g| g.host_id == student_id)
    }

    /// Number of people placed in this round, hosts included.
    pub fn placed_count(&self) -> usize {
        self.groups.iter().map(Group::size).sum()
    }
}

/// Finds the assignment for a round.
pub fn assignment_for_round<'a>(assignments: &'a [Assignment], round_id: &str) -> Option<&'a Assignment> {
    assignments.iter().find(|a| a.round_id == round_id)
}

/// Whether any group in the plan lists its host as a guest.
pub fn has_self_hosting(assignments: &[Assignment]) -> bool {
    assignments
        .iter()
        .flat_map(|a| a.groups.iter())
        .any(Group::is_self_hosted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_assignment() -> Assignment {
        Assignment::new("R1")
            .with_group(Group::new("g1", "R1", "H1").with_member("A").with_member("B"))
            .with_group(Group::new("g2", "R1", "H2").with_member("C"))
    }

    #[test]
    fn test_group_participants() {
        let a = sample_assignment();
        let g = a.group("g1").unwrap();
        let people: Vec<&str> = g.participants().collect();
        assert_eq!(people, vec!["H1", "A", "B"]);
        assert_eq!(g.size(), 3);
        assert!(g.contains("H1"));
        assert!(!g.has_member("H1"));
    }

    #[test]
    fn test_assignment_lookups() {
        let a = sample_assignment();
        assert_eq!(a.group_index_of("C"), Some(1));
        assert_eq!(a.group_index_of("H1"), Some(0));
        assert_eq!(a.group_index_of("Z"), None);
        assert!(a.is_host("H2"));
        assert!(!a.is_host("A"));
        assert_eq!(a.placed_count(), 5);
    }

    #[test]
    fn test_self_hosting_detection() {
        let plan = vec![sample_assignment()];
        assert!(!has_self_hosting(&plan));

        let broken = vec![Assignment::new("R1").with_group(Group::new("g", "R1", "H").with_member("H"))];
        assert!(has_self_hosting(&broken));
    }

    #[test]
    fn test_assignment_for_round() {
        let plan = vec![sample_assignment(), Assignment::new("R2")];
        assert!(assignment_for_round(&plan, "R2").unwrap().groups.is_empty());
        assert!(assignment_for_round(&plan, "R9").is_none());
    }
}
