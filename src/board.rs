//! Manual edits on a generated plan.
//!
//! [`PlanBoard`] owns a plan and applies drag-and-drop style moves of a
//! guest from one group to another (same round or another round), with
//! single-step undo. Every move is checked first; a rejected move leaves
//! the plan untouched.
//!
//! # Example
//!
//! ```
//! use u_hosting::board::{MoveAction, PlanBoard};
//! use u_hosting::models::{Assignment, ClassSettings, Group, Student};
//!
//! let students = vec![
//!     Student::host("H1", "Hila"),
//!     Student::host("H2", "Omer"),
//!     Student::new("A", "Adi"),
//! ];
//! let plan = vec![Assignment::new("R1")
//!     .with_group(Group::new("g1", "R1", "H1").with_member("A"))
//!     .with_group(Group::new("g2", "R1", "H2"))];
//!
//! let mut board = PlanBoard::new(plan, students, ClassSettings::default());
//! board.move_student(MoveAction::within_round("A", "R1", "g1", "g2")).unwrap();
//! assert!(board.assignments()[0].groups[1].has_member("A"));
//!
//! board.undo_last_move().unwrap();
//! assert!(board.assignments()[0].groups[0].has_member("A"));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Assignment, ClassSettings, Student, StudentIndex};
use crate::MoveError;

/// Move of one guest between groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAction {
    /// Student moved.
    pub student_id: String,
    /// Round of the source group.
    pub from_round_id: String,
    /// Source group.
    pub from_group_id: String,
    /// Round of the target group.
    pub to_round_id: String,
    /// Target group.
    pub to_group_id: String,
}

impl MoveAction {
    /// Move between groups of the same round.
    pub fn within_round(
        student_id: impl Into<String>,
        round_id: impl Into<String>,
        from_group_id: impl Into<String>,
        to_group_id: impl Into<String>,
    ) -> Self {
        let round_id = round_id.into();
        Self {
            student_id: student_id.into(),
            from_round_id: round_id.clone(),
            from_group_id: from_group_id.into(),
            to_round_id: round_id,
            to_group_id: to_group_id.into(),
        }
    }

    /// Action that undoes this one.
    pub fn reversed(&self) -> Self {
        Self {
            student_id: self.student_id.clone(),
            from_round_id: self.to_round_id.clone(),
            from_group_id: self.to_group_id.clone(),
            to_round_id: self.from_round_id.clone(),
            to_group_id: self.from_group_id.clone(),
        }
    }
}

/// Editable plan with move history.
#[derive(Debug, Clone)]
pub struct PlanBoard {
    assignments: Vec<Assignment>,
    students: Vec<Student>,
    settings: ClassSettings,
    history: Vec<MoveAction>,
}

impl PlanBoard {
    /// Wraps a plan for editing.
    pub fn new(assignments: Vec<Assignment>, students: Vec<Student>, settings: ClassSettings) -> Self {
        Self {
            assignments,
            students,
            settings,
            history: Vec::new(),
        }
    }

    /// Current plan.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Consumes the board, returning the plan.
    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }

    /// Applied moves, oldest first.
    pub fn history(&self) -> &[MoveAction] {
        &self.history
    }

    /// (assignment index, group index) of a group.
    fn locate(&self, round_id: &str, group_id: &str) -> Result<(usize, usize), MoveError> {
        let r = self
            .assignments
            .iter()
            .position(|a| a.round_id == round_id)
            .ok_or_else(|| MoveError::RoundNotFound(round_id.to_string()))?;
        let g = self.assignments[r]
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or_else(|| MoveError::GroupNotFound {
                round_id: round_id.to_string(),
                group_id: group_id.to_string(),
            })?;
        Ok((r, g))
    }

    /// Checks a move without applying it.
    ///
    /// # Errors
    /// The first rule the move breaks.
    pub fn can_move(&self, action: &MoveAction) -> Result<(), MoveError> {
        let index = StudentIndex::new(&self.students);
        let student_id = action.student_id.as_str();
        if index.get(student_id).is_none() {
            return Err(MoveError::StudentNotFound(action.student_id.clone()));
        }

        let (sr, sg) = self.locate(&action.from_round_id, &action.from_group_id)?;
        let source = &self.assignments[sr].groups[sg];
        if source.host_id == student_id {
            return Err(MoveError::HostNotMovable(action.student_id.clone()));
        }
        if !source.has_member(student_id) {
            return Err(MoveError::NotInSourceGroup {
                student_id: action.student_id.clone(),
                group_id: action.from_group_id.clone(),
            });
        }

        let (tr, tg) = self.locate(&action.to_round_id, &action.to_group_id)?;
        let already_placed = self.assignments[tr]
            .groups
            .iter()
            .enumerate()
            .any(|(i, g)| (tr, i) != (sr, sg) && g.contains(student_id));
        if already_placed || (tr, tg) == (sr, sg) {
            return Err(MoveError::AlreadyInRound {
                student_id: action.student_id.clone(),
                round_id: action.to_round_id.clone(),
            });
        }

        let target = &self.assignments[tr].groups[tg];
        let capacity = index
            .get(&target.host_id)
            .map_or(self.settings.default_capacity(), |host| self.settings.capacity_for(host));
        if target.member_ids.len() >= capacity {
            return Err(MoveError::GroupFull {
                group_id: target.id.clone(),
                capacity,
            });
        }

        if let Some(other) = target.participants().find(|&p| index.conflicts(student_id, p)) {
            return Err(MoveError::AvoidConflict {
                student_id: action.student_id.clone(),
                member_id: other.to_string(),
            });
        }

        Ok(())
    }

    /// Checks and applies a move, recording it for undo.
    ///
    /// # Errors
    /// See [`can_move`](Self::can_move); the plan is unchanged on error.
    pub fn move_student(&mut self, action: MoveAction) -> Result<(), MoveError> {
        self.can_move(&action)?;
        self.apply(&action)?;
        debug!(
            student = %action.student_id,
            from = %action.from_group_id,
            to = %action.to_group_id,
            "student moved"
        );
        self.history.push(action);
        Ok(())
    }

    /// Reverts the most recent move and returns it.
    ///
    /// # Errors
    /// [`MoveError::NothingToUndo`] with an empty history.
    pub fn undo_last_move(&mut self) -> Result<MoveAction, MoveError> {
        let action = self.history.pop().ok_or(MoveError::NothingToUndo)?;
        if let Err(err) = self.apply(&action.reversed()) {
            self.history.push(action);
            return Err(err);
        }
        debug!(student = %action.student_id, "move undone");
        Ok(action)
    }

    fn apply(&mut self, action: &MoveAction) -> Result<(), MoveError> {
        let (sr, sg) = self.locate(&action.from_round_id, &action.from_group_id)?;
        let (tr, tg) = self.locate(&action.to_round_id, &action.to_group_id)?;

        let members = &mut self.assignments[sr].groups[sg].member_ids;
        let pos = members
            .iter()
            .position(|m| *m == action.student_id)
            .ok_or_else(|| MoveError::NotInSourceGroup {
                student_id: action.student_id.clone(),
                group_id: action.from_group_id.clone(),
            })?;
        members.remove(pos);
        self.assignments[tr].groups[tg]
            .member_ids
            .push(action.student_id.clone());
        Ok(())
    }
}
