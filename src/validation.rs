//! Plan validation.
//!
//! Checks a plan (generated or hand-edited) against the class roster.
//! Findings are data, not Rust errors: blocking findings make the plan
//! invalid, warnings are informational.
//!
//! Blocking:
//! - Duplicate hosts (a student hosts more than once)
//! - Insufficient hosts (fewer host-eligible students than rounds)
//! - Host listed as a guest of their own group
//! - Capacity exceeded (hosts with an explicit capacity)
//!
//! Warnings:
//! - Avoid pairs sharing a group
//! - Repeated pairings across rounds
//! - Unmet likes
//! - Students without a group in a planned round

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, Round, Student, StudentIndex};

/// Whether a finding blocks the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    /// The plan is invalid.
    Blocking,
    /// Informational.
    Warning,
}

/// Symbolic finding codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationCode {
    /// A student hosts in more than one group.
    DuplicateHosts,
    /// Fewer host-eligible students than rounds.
    InsufficientHosts,
    /// More guests than the host's explicit capacity.
    CapacityExceeded,
    /// A group lists its host among its guests.
    HostInOwnGroup,
    /// Two students who avoid each other share a group.
    AvoidViolated,
    /// A pair shares a group in more than one round.
    RepeatedPairings,
    /// A liked student is in another group.
    UnmetLikes,
    /// A student has no group in a planned round.
    UnplacedStudents,
}

impl ValidationCode {
    /// Kebab-case code string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateHosts => "duplicate-hosts",
            Self::InsufficientHosts => "insufficient-hosts",
            Self::CapacityExceeded => "capacity-exceeded",
            Self::HostInOwnGroup => "host-in-own-group",
            Self::AvoidViolated => "avoid-violated",
            Self::RepeatedPairings => "repeated-pairings",
            Self::UnmetLikes => "unmet-likes",
            Self::UnplacedStudents => "unplaced-students",
        }
    }

    /// Severity attached to this code.
    pub fn severity(self) -> Severity {
        match self {
            Self::DuplicateHosts
            | Self::InsufficientHosts
            | Self::CapacityExceeded
            | Self::HostInOwnGroup => Severity::Blocking,
            Self::AvoidViolated
            | Self::RepeatedPairings
            | Self::UnmetLikes
            | Self::UnplacedStudents => Severity::Warning,
        }
    }
}

/// A validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Blocking or warning.
    #[serde(rename = "type")]
    pub severity: Severity,
    /// Finding category.
    pub code: ValidationCode,
    /// Human-readable summary.
    pub message: String,
    /// Number of offending items, when countable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// One line per offending item (full list; truncation is up to the UI).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl ValidationError {
    fn new(code: ValidationCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            count: None,
            details: Vec::new(),
        }
    }

    fn with_details(mut self, details: Vec<String>) -> Self {
        self.count = Some(details.len());
        self.details = details;
        self
    }

    /// Whether this finding blocks the plan.
    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }
}

/// Outcome of [`validate_plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Blocking findings.
    pub errors: Vec<ValidationError>,
    /// Non-blocking findings.
    pub warnings: Vec<ValidationError>,
    /// `errors.is_empty()`.
    pub is_valid: bool,
}

impl ValidationResult {
    fn from_findings(findings: Vec<ValidationError>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            findings.into_iter().partition(ValidationError::is_blocking);
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Finds a finding (blocking or warning) by code.
    pub fn find(&self, code: ValidationCode) -> Option<&ValidationError> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .find(|e| e.code == code)
    }

    /// Whether a finding with this code exists.
    pub fn has(&self, code: ValidationCode) -> bool {
        self.find(code).is_some()
    }
}

/// Validates a plan against the roster and rounds.
///
/// Every check runs; findings are split by severity.
pub fn validate_plan(
    assignments: &[Assignment],
    students: &[Student],
    rounds: &[Round],
) -> ValidationResult {
    let index = StudentIndex::new(students);
    let round_names: HashMap<&str, &str> = rounds
        .iter()
        .map(|r| (r.id.as_str(), r.name.as_str()))
        .collect();
    let round_name = |id: &str| -> String {
        round_names.get(id).copied().unwrap_or(id).to_string()
    };

    let findings: Vec<ValidationError> = [
        check_duplicate_hosts(assignments, &index),
        check_host_count(students, rounds),
        check_self_hosting(assignments, &index, &round_name),
        check_capacity(assignments, &index, &round_name),
        check_avoid(assignments, &index, &round_name),
        check_repeated_pairings(assignments, &index, &round_name),
        check_unmet_likes(assignments, students, &index, &round_name),
        check_unplaced(assignments, students, &round_name),
    ]
    .into_iter()
    .flatten()
    .collect();

    ValidationResult::from_findings(findings)
}

/// A student hosting more than one group across the plan.
///
/// `count` is the number of extra hostings (a student hosting three
/// times counts 2); `details` has one line per such student.
pub fn check_duplicate_hosts(
    assignments: &[Assignment],
    index: &StudentIndex<'_>,
) -> Option<ValidationError> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for group in assignments.iter().flat_map(|a| a.groups.iter()) {
        *counts.entry(group.host_id.as_str()).or_insert(0) += 1;
    }

    let duplicated: Vec<(&str, usize)> = counts.into_iter().filter(|&(_, n)| n > 1).collect();
    if duplicated.is_empty() {
        return None;
    }
    let extra: usize = duplicated.iter().map(|&(_, n)| n - 1).sum();
    let details = duplicated
        .iter()
        .map(|&(id, n)| format!("{} hosts {n} times", index.name_of(id)))
        .collect();
    let mut err = ValidationError::new(
        ValidationCode::DuplicateHosts,
        format!("{} student(s) host more than once", duplicated.len()),
    )
    .with_details(details);
    err.count = Some(extra);
    Some(err)
}

/// Fewer host-eligible students than rounds.
pub fn check_host_count(students: &[Student], rounds: &[Round]) -> Option<ValidationError> {
    let eligible = students.iter().filter(|s| s.can_host).count();
    if eligible >= rounds.len() {
        return None;
    }
    let missing = rounds.len() - eligible;
    let mut err = ValidationError::new(
        ValidationCode::InsufficientHosts,
        format!(
            "{eligible} host-eligible student(s) for {} round(s); {missing} more needed",
            rounds.len()
        ),
    );
    err.count = Some(missing);
    Some(err)
}

/// Groups listing their host as a guest.
pub fn check_self_hosting(
    assignments: &[Assignment],
    index: &StudentIndex<'_>,
    round_name: &dyn Fn(&str) -> String,
) -> Option<ValidationError> {
    let details: Vec<String> = assignments
        .iter()
        .flat_map(|a| a.groups.iter())
        .filter(|g| g.is_self_hosted())
        .map(|g| format!("{}: {}", round_name(&g.round_id), index.name_of(&g.host_id)))
        .collect();
    if details.is_empty() {
        return None;
    }
    Some(
        ValidationError::new(
            ValidationCode::HostInOwnGroup,
            format!("{} group(s) list their host as a guest", details.len()),
        )
        .with_details(details),
    )
}

/// Groups with more guests than the host's explicit capacity.
pub fn check_capacity(
    assignments: &[Assignment],
    index: &StudentIndex<'_>,
    round_name: &dyn Fn(&str) -> String,
) -> Option<ValidationError> {
    let mut details = Vec::new();
    for group in assignments.iter().flat_map(|a| a.groups.iter()) {
        let Some(capacity) = index.get(&group.host_id).and_then(|h| h.capacity) else {
            continue;
        };
        if group.member_ids.len() > capacity {
            details.push(format!(
                "{}: {} has {} guests (capacity {capacity})",
                round_name(&group.round_id),
                index.name_of(&group.host_id),
                group.member_ids.len()
            ));
        }
    }
    if details.is_empty() {
        return None;
    }
    Some(
        ValidationError::new(
            ValidationCode::CapacityExceeded,
            format!("{} group(s) over capacity", details.len()),
        )
        .with_details(details),
    )
}

/// Avoid pairs sharing a group.
pub fn check_avoid(
    assignments: &[Assignment],
    index: &StudentIndex<'_>,
    round_name: &dyn Fn(&str) -> String,
) -> Option<ValidationError> {
    let mut details = Vec::new();
    for group in assignments.iter().flat_map(|a| a.groups.iter()) {
        let people: Vec<&str> = group.participants().collect();
        for (i, &a) in people.iter().enumerate() {
            for &b in &people[i + 1..] {
                if index.conflicts(a, b) {
                    details.push(format!(
                        "{}: {} / {}",
                        round_name(&group.round_id),
                        index.name_of(a),
                        index.name_of(b)
                    ));
                }
            }
        }
    }
    if details.is_empty() {
        return None;
    }
    Some(
        ValidationError::new(
            ValidationCode::AvoidViolated,
            format!("{} avoid pair(s) share a group", details.len()),
        )
        .with_details(details),
    )
}

/// Pairs sharing a group in more than one round.
///
/// Details list the round names in plan order; pairs are sorted by ID.
pub fn check_repeated_pairings(
    assignments: &[Assignment],
    index: &StudentIndex<'_>,
    round_name: &dyn Fn(&str) -> String,
) -> Option<ValidationError> {
    let mut rounds_by_pair: BTreeMap<(&str, &str), Vec<String>> = BTreeMap::new();
    for group in assignments.iter().flat_map(|a| a.groups.iter()) {
        let people: Vec<&str> = group.participants().collect();
        for (i, &a) in people.iter().enumerate() {
            for &b in &people[i + 1..] {
                let key = if a <= b { (a, b) } else { (b, a) };
                rounds_by_pair
                    .entry(key)
                    .or_default()
                    .push(round_name(&group.round_id));
            }
        }
    }

    let details: Vec<String> = rounds_by_pair
        .into_iter()
        .filter(|(_, rounds)| rounds.len() > 1)
        .map(|((a, b), rounds)| {
            format!(
                "{} & {}: {}",
                index.name_of(a),
                index.name_of(b),
                rounds.join(", ")
            )
        })
        .collect();
    if details.is_empty() {
        return None;
    }
    Some(
        ValidationError::new(
            ValidationCode::RepeatedPairings,
            format!("{} pair(s) meet in more than one round", details.len()),
        )
        .with_details(details),
    )
}

/// Liked students placed in another group, per round and student.
///
/// Likes pointing outside the roster are ignored.
pub fn check_unmet_likes(
    assignments: &[Assignment],
    students: &[Student],
    index: &StudentIndex<'_>,
    round_name: &dyn Fn(&str) -> String,
) -> Option<ValidationError> {
    let mut details = Vec::new();
    for assignment in assignments {
        for student in students {
            let Some(g) = assignment.group_index_of(&student.id) else {
                continue;
            };
            let group = &assignment.groups[g];
            let unmet: Vec<&str> = student
                .like
                .iter()
                .filter(|id| index.get(id).is_some() && !group.contains(id))
                .map(|id| index.name_of(id))
                .collect();
            if !unmet.is_empty() {
                details.push(format!(
                    "{}: {} is apart from {}",
                    round_name(&assignment.round_id),
                    student.name,
                    unmet.join(", ")
                ));
            }
        }
    }
    if details.is_empty() {
        return None;
    }
    Some(
        ValidationError::new(
            ValidationCode::UnmetLikes,
            format!("{} student-round(s) with unmet likes", details.len()),
        )
        .with_details(details),
    )
}

/// Students with no group in a planned round.
pub fn check_unplaced(
    assignments: &[Assignment],
    students: &[Student],
    round_name: &dyn Fn(&str) -> String,
) -> Option<ValidationError> {
    let mut details = Vec::new();
    for assignment in assignments {
        for student in students {
            if assignment.group_index_of(&student.id).is_none() {
                details.push(format!("{}: {}", round_name(&assignment.round_id), student.name));
            }
        }
    }
    if details.is_empty() {
        return None;
    }
    Some(
        ValidationError::new(
            ValidationCode::UnplacedStudents,
            format!("{} student(s) without a group", details.len()),
        )
        .with_details(details),
    )
}
