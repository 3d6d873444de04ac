//! Seeded host-guest rotation planning.
//!
//! Splits a class into groups for a series of rounds. Each group meets at
//! one student's home (the host); the others attend as guests. Across a
//! plan every host-eligible student hosts at most once, guests are spread
//! evenly with `like`/`avoid` preferences honored, and a fairness pass
//! reduces how often the same pair meets again.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Student`, `Round`, `Group`, `Assignment`,
//!   `ClassSettings` (capacity model)
//! - **`generator`**: Seeded RNG, host selection, guest placement, fairness
//!   pass, KPIs, retry with a fresh seed
//! - **`validation`**: Blocking errors and warnings for a plan
//! - **`board`**: Manual moves with undo on an existing plan
//!
//! # Determinism
//!
//! All randomness in generation comes from a seed string. The same roster,
//! rounds, group size and seed always give the same plan, so storing the
//! seed next to the plan is enough to reproduce it.
//!
//! # Example
//!
//! ```
//! use u_hosting::generator::{generate_plan, GenerateInput, GenerateOptions};
//! use u_hosting::models::{Round, Student};
//! use u_hosting::validation::validate_plan;
//!
//! let students: Vec<Student> = (1..=9)
//!     .map(|i| Student::host(format!("S{i}"), format!("Student {i}")))
//!     .collect();
//! let rounds = vec![Round::new("R1", "Week 1", 1), Round::new("R2", "Week 2", 2)];
//! let input = GenerateInput::new(students, rounds).with_group_size(3);
//!
//! let plan = generate_plan(&input, &GenerateOptions::new("k3x9q")).unwrap();
//! let report = validate_plan(&plan.assignments, &input.students, &input.rounds);
//! assert!(report.is_valid);
//! ```
//!
//! # References
//!
//! - Knuth (1997), "The Art of Computer Programming", Vol. 2
//! - Hoos & Stützle (2004), "Stochastic Local Search: Foundations and Applications"

pub mod board;
mod error;
pub mod generator;
pub mod models;
pub mod validation;

pub use error::{MoveError, PlanError};
