//! Hosting rotation domain models.
//!
//! Provides the input records (students, rounds, settings) and the
//! solution records (groups, assignments) exchanged with the engine.
//!
//! # Domain Mappings
//!
//! | u-hosting | Classroom | Dinner club | Mentoring |
//! |-----------|-----------|-------------|-----------|
//! | Student | Pupil | Member | Participant |
//! | Round | Visit date | Dinner night | Session |
//! | Group | Host home | Table | Circle |
//! | Assignment | Visit plan | Seating | Session roster |

mod plan;
mod round;
mod settings;
mod student;

pub use plan::{assignment_for_round, has_self_hosting, Assignment, Group};
pub use round::{sorted_rounds, DateWindow, Round};
pub use settings::{ClassSettings, DEFAULT_GROUP_SIZE, HOST_CAPACITY_HEADROOM};
pub use student::{Student, StudentIndex};
