//! Student model.
//!
//! A student is both a potential host and a potential guest. Social
//! preferences are expressed as two ID lists:
//! - **like**: soft preference, maximized during guest placement
//! - **avoid**: hard constraint, a group may never contain both parties
//!
//! `avoid` is symmetric in effect: a conflict exists if either student
//! lists the other.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A student taking part in the hosting rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: String,
    /// Owning class identifier.
    #[serde(default)]
    pub class_id: String,
    /// Display name.
    pub name: String,
    /// Whether this student may host a group.
    #[serde(default)]
    pub can_host: bool,
    /// Explicit hosting capacity (guests). `None` = derived from class settings.
    #[serde(default)]
    pub capacity: Option<usize>,
    /// Students this student prefers to share a group with.
    #[serde(default)]
    pub like: Vec<String>,
    /// Students this student must never share a group with.
    #[serde(default)]
    pub avoid: Vec<String>,
}

impl Student {
    /// Creates a non-hosting student with no preferences.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class_id: String::new(),
            name: name.into(),
            can_host: false,
            capacity: None,
            like: Vec::new(),
            avoid: Vec::new(),
        }
    }

    /// Creates a host-eligible student.
    pub fn host(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id, name).with_can_host(true)
    }

    /// Sets the owning class.
    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        self.class_id = class_id.into();
        self
    }

    /// Sets host eligibility.
    pub fn with_can_host(mut self, can_host: bool) -> Self {
        self.can_host = can_host;
        self
    }

    /// Sets an explicit hosting capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Adds a liked student.
    pub fn with_like(mut self, student_id: impl Into<String>) -> Self {
        self.like.push(student_id.into());
        self
    }

    /// Adds an avoided student.
    pub fn with_avoid(mut self, student_id: impl Into<String>) -> Self {
        self.avoid.push(student_id.into());
        self
    }

    /// Whether this student lists `other` in `like`.
    #[inline]
    pub fn likes(&self, other: &str) -> bool {
        self.like.iter().any(|id| id == other)
    }

    /// Whether this student lists `other` in `avoid`.
    #[inline]
    pub fn avoids(&self, other: &str) -> bool {
        self.avoid.iter().any(|id| id == other)
    }
}

/// Borrowed ID → student lookup.
///
/// Unknown IDs are tolerated everywhere: they never conflict and never
/// score, so a dangling `like`/`avoid` entry degrades to a no-op.
#[derive(Debug, Clone, Default)]
pub struct StudentIndex<'a> {
    by_id: HashMap<&'a str, &'a Student>,
}

impl<'a> StudentIndex<'a> {
    /// Indexes a student slice by ID.
    pub fn new(students: &'a [Student]) -> Self {
        Self {
            by_id: students.iter().map(|s| (s.id.as_str(), s)).collect(),
        }
    }

    /// Looks up a student.
    #[inline]
    pub fn get(&self, id: &str) -> Option<&'a Student> {
        self.by_id.get(id).copied()
    }

    /// Display name for an ID, falling back to the ID itself.
    pub fn name_of<'b>(&self, id: &'b str) -> &'b str
    where
        'a: 'b,
    {
        self.get(id).map(|s| s.name.as_str()).unwrap_or(id)
    }

    /// Whether either student lists the other in `avoid`.
    pub fn conflicts(&self, a: &str, b: &str) -> bool {
        self.get(a).is_some_and(|s| s.avoids(b)) || self.get(b).is_some_and(|s| s.avoids(a))
    }

    /// Number of `like` directions between two students (0, 1 or 2).
    pub fn like_weight(&self, a: &str, b: &str) -> u32 {
        u32::from(self.get(a).is_some_and(|s| s.likes(b)))
            + u32::from(self.get(b).is_some_and(|s| s.likes(a)))
    }

    /// Number of indexed students.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_builder() {
        let s = Student::host("S1", "Dana")
            .with_class("C1")
            .with_capacity(4)
            .with_like("S2")
            .with_avoid("S3");

        assert_eq!(s.id, "S1");
        assert_eq!(s.class_id, "C1");
        assert!(s.can_host);
        assert_eq!(s.capacity, Some(4));
        assert!(s.likes("S2"));
        assert!(!s.likes("S3"));
        assert!(s.avoids("S3"));
    }

    #[test]
    fn test_index_conflicts_are_symmetric() {
        let students = vec![
            Student::new("A", "Avi").with_avoid("B"),
            Student::new("B", "Ben"),
        ];
        let index = StudentIndex::new(&students);
        assert!(index.conflicts("A", "B"));
        assert!(index.conflicts("B", "A"));
        assert!(!index.conflicts("A", "missing"));
    }

    #[test]
    fn test_index_like_weight() {
        let students = vec![
            Student::new("A", "Avi").with_like("B"),
            Student::new("B", "Ben").with_like("A"),
            Student::new("C", "Chen").with_like("A"),
        ];
        let index = StudentIndex::new(&students);
        assert_eq!(index.like_weight("A", "B"), 2);
        assert_eq!(index.like_weight("A", "C"), 1);
        assert_eq!(index.like_weight("B", "C"), 0);
    }

    #[test]
    fn test_name_fallback() {
        let students = vec![Student::new("A", "Avi")];
        let index = StudentIndex::new(&students);
        assert_eq!(index.name_of("A"), "Avi");
        assert_eq!(index.name_of("ghost"), "ghost");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let s: Student = serde_json::from_str(r#"{"id":"S1","name":"Dana"}"#).unwrap();
        assert!(!s.can_host);
        assert_eq!(s.capacity, None);
        assert!(s.like.is_empty());
        assert!(s.avoid.is_empty());
    }
}
