//! Engine error types.

use thiserror::Error;

/// Hard failure of a plan generation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Fewer eligible, unused hosts than groups required for a round.
    #[error("insufficient hosts: {needed} needed, {available} available")]
    InsufficientHosts {
        /// Hosts required.
        needed: usize,
        /// Hosts that could still be used.
        available: usize,
    },
}

impl PlanError {
    /// Symbolic reason code surfaced to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientHosts { .. } => "insufficient-hosts",
        }
    }

    /// How many more hosts would be needed.
    pub fn missing(&self) -> usize {
        match self {
            Self::InsufficientHosts { needed, available } => needed.saturating_sub(*available),
        }
    }
}

/// Rejection of a manual board move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The moved student is not in the roster.
    #[error("student '{0}' not found")]
    StudentNotFound(String),
    /// No assignment exists for the round.
    #[error("round '{0}' has no assignment")]
    RoundNotFound(String),
    /// No such group in the round.
    #[error("group '{group_id}' not found in round '{round_id}'")]
    GroupNotFound {
        /// Round searched.
        round_id: String,
        /// Missing group.
        group_id: String,
    },
    /// The student is not a guest of the source group.
    #[error("student '{student_id}' is not a guest of group '{group_id}'")]
    NotInSourceGroup {
        /// Student moved.
        student_id: String,
        /// Claimed source group.
        group_id: String,
    },
    /// Hosts stay with their group.
    #[error("student '{0}' is a host and cannot be moved")]
    HostNotMovable(String),
    /// The target group has no spare capacity.
    #[error("group '{group_id}' is full ({capacity} guests)")]
    GroupFull {
        /// Target group.
        group_id: String,
        /// Host capacity.
        capacity: usize,
    },
    /// The student avoids (or is avoided by) a target occupant.
    #[error("student '{student_id}' conflicts with '{member_id}'")]
    AvoidConflict {
        /// Student moved.
        student_id: String,
        /// Conflicting occupant.
        member_id: String,
    },
    /// The student is already placed elsewhere in the target round.
    #[error("student '{student_id}' is already placed in round '{round_id}'")]
    AlreadyInRound {
        /// Student moved.
        student_id: String,
        /// Target round.
        round_id: String,
    },
    /// Undo requested with an empty history.
    #[error("no move to undo")]
    NothingToUndo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_hosts_reporting() {
        let err = PlanError::InsufficientHosts {
            needed: 3,
            available: 1,
        };
        assert_eq!(err.code(), "insufficient-hosts");
        assert_eq!(err.missing(), 2);
        assert_eq!(err.to_string(), "insufficient hosts: 3 needed, 1 available");
    }

    #[test]
    fn test_move_error_display() {
        let err = MoveError::GroupFull {
            group_id: "g1".into(),
            capacity: 4,
        };
        assert_eq!(err.to_string(), "group 'g1' is full (4 guests)");
    }
}
