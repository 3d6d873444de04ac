//! Plan generator (orchestrator).
//!
//! # Algorithm
//!
//! 1. Expand the seed into a [`SeededRng`]; sort rounds by `order`.
//! 2. Groups per round: caller-supplied, else
//!    `min(rounds, students / 3)`.
//! 3. For each round:
//!    - hosts = host-eligible students not yet used as host in this run;
//!      too few is a hard [`PlanError::InsufficientHosts`];
//!    - guests = everyone except this round's hosts (earlier hosts included);
//!    - guest placement is retried with a fresh shuffle up to
//!      `max_placement_attempts` times; if every attempt fails the last
//!      partial placement is committed and reported as a diagnostic.
//! 4. Fairness pass over the whole plan.
//!
//! The run is pure: same input and seed, same plan.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{sorted_rounds, Assignment, ClassSettings, Group, Round, Student, StudentIndex};
use crate::PlanError;

use super::fairness::{perform_fairness_pass, FairnessConfig};
use super::guests::assign_guests_to_slots;
use super::hosts::{build_host_slots, pick_unique_hosts};
use super::kpi::PlanKpi;
use super::rng::{shuffle_in_place, SeededRng};

/// Input records for one generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateInput {
    /// Class roster.
    pub students: Vec<Student>,
    /// Rounds to plan (any order).
    pub rounds: Vec<Round>,
    /// Nominal group size (class setting).
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    /// Groups per round. `None` (or 0) = `min(rounds, students / 3)`.
    #[serde(default)]
    pub num_groups: Option<usize>,
}

fn default_group_size() -> usize {
    ClassSettings::default().group_size
}

impl GenerateInput {
    /// Creates an input with the default group size.
    pub fn new(students: Vec<Student>, rounds: Vec<Round>) -> Self {
        Self {
            students,
            rounds,
            group_size: default_group_size(),
            num_groups: None,
        }
    }

    /// Sets the nominal group size.
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    /// Fixes the number of groups per round.
    pub fn with_num_groups(mut self, num_groups: usize) -> Self {
        self.num_groups = Some(num_groups);
        self
    }

    /// Class settings implied by this input.
    pub fn settings(&self) -> ClassSettings {
        ClassSettings::new(self.group_size)
    }

    /// Effective number of groups per round.
    pub fn group_count(&self) -> usize {
        self.num_groups
            .filter(|&n| n > 0)
            .unwrap_or_else(|| self.rounds.len().min(self.students.len() / 3))
    }
}

/// Per-run options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Seed string; store it with the plan to reproduce it.
    pub seed: String,
}

impl GenerateOptions {
    /// Creates options with the given seed.
    pub fn new(seed: impl Into<String>) -> Self {
        Self { seed: seed.into() }
    }
}

/// A round committed without placing every guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDiagnostic {
    /// Affected round.
    pub round_id: String,
    /// Placement attempts spent.
    pub attempts: usize,
    /// Guests left without a group.
    pub unplaced: Vec<String>,
}

/// Output of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResult {
    /// One assignment per round, in round order.
    pub assignments: Vec<Assignment>,
    /// Seed the plan was generated from.
    pub seed: String,
    /// Under-filled rounds.
    pub diagnostics: Vec<RoundDiagnostic>,
}

/// Generator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Guest placement attempts per round.
    pub max_placement_attempts: usize,
    /// Fairness pass bounds.
    pub fairness: FairnessConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_placement_attempts: 100,
            fairness: FairnessConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the per-round placement attempt cap.
    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Self {
        self.max_placement_attempts = attempts;
        self
    }

    /// Sets the fairness pass bounds.
    pub fn with_fairness(mut self, fairness: FairnessConfig) -> Self {
        self.fairness = fairness;
        self
    }
}

/// Seeded host-guest plan generator.
///
/// # Example
///
/// ```
/// use u_hosting::generator::{GenerateInput, GenerateOptions, PlanGenerator};
/// use u_hosting::models::{Round, Student};
///
/// let students: Vec<Student> = (1..=6)
///     .map(|i| Student::host(format!("S{i}"), format!("Student {i}")))
///     .collect();
/// let rounds = vec![Round::new("R1", "First", 1), Round::new("R2", "Second", 2)];
/// let input = GenerateInput::new(students, rounds).with_group_size(2);
///
/// let result = PlanGenerator::new()
///     .generate(&input, &GenerateOptions::new("abc"))
///     .unwrap();
/// assert_eq!(result.assignments.len(), 2);
/// assert_eq!(result.seed, "abc");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlanGenerator {
    config: GeneratorConfig,
}

impl PlanGenerator {
    /// Creates a generator with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tuning.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Current tuning.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a full plan.
    ///
    /// # Errors
    /// [`PlanError::InsufficientHosts`] when a round cannot get enough
    /// unused hosts. No partial plan is returned.
    pub fn generate(
        &self,
        input: &GenerateInput,
        options: &GenerateOptions,
    ) -> Result<GenerateResult, PlanError> {
        let mut rng = SeededRng::from_seed_str(&options.seed);
        let index = StudentIndex::new(&input.students);
        let settings = input.settings();
        let num_groups = input.group_count();

        let mut used_hosts: HashSet<&str> = HashSet::new();
        let mut assignments = Vec::with_capacity(input.rounds.len());
        let mut diagnostics = Vec::new();

        for round in sorted_rounds(&input.rounds) {
            let available: Vec<&Student> = input
                .students
                .iter()
                .filter(|s| s.can_host && !used_hosts.contains(s.id.as_str()))
                .collect();
            if available.len() < num_groups {
                warn!(
                    round = %round.id,
                    needed = num_groups,
                    available = available.len(),
                    "not enough unused hosts"
                );
                return Err(PlanError::InsufficientHosts {
                    needed: num_groups,
                    available: available.len(),
                });
            }

            let host_ids = pick_unique_hosts(&available, num_groups, &mut rng)?;
            for host in available.iter().filter(|s| host_ids.contains(&s.id)) {
                used_hosts.insert(host.id.as_str());
            }
            let mut slots = build_host_slots(&host_ids, &index, &settings);

            let non_hosts: Vec<&Student> = input
                .students
                .iter()
                .filter(|s| !host_ids.contains(&s.id))
                .collect();
            let mut guests = non_hosts.clone();
            shuffle_in_place(&mut guests, &mut rng);

            let mut attempts = 0;
            let mut placed = false;
            while attempts < self.config.max_placement_attempts {
                attempts += 1;
                for slot in &mut slots {
                    slot.member_ids.clear();
                }
                if assign_guests_to_slots(&guests, &mut slots, &index, &mut rng) {
                    placed = true;
                    break;
                }
                guests.clone_from(&non_hosts);
                shuffle_in_place(&mut guests, &mut rng);
            }

            if placed {
                debug!(round = %round.id, hosts = ?host_ids, attempts, "round placed");
            } else {
                let unplaced: Vec<String> = non_hosts
                    .iter()
                    .filter(|s| !slots.iter().any(|slot| slot.member_ids.contains(&s.id)))
                    .map(|s| s.id.clone())
                    .collect();
                warn!(
                    round = %round.id,
                    attempts,
                    unplaced = unplaced.len(),
                    "committing under-filled round"
                );
                diagnostics.push(RoundDiagnostic {
                    round_id: round.id.clone(),
                    attempts,
                    unplaced,
                });
            }

            let groups = slots
                .into_iter()
                .enumerate()
                .map(|(i, slot)| Group {
                    id: format!("group_{}_{}_{}", round.id, slot.host_id, i),
                    round_id: round.id.clone(),
                    host_id: slot.host_id,
                    member_ids: slot.member_ids,
                })
                .collect();
            assignments.push(Assignment {
                round_id: round.id.clone(),
                groups,
            });
        }

        let assignments =
            perform_fairness_pass(&assignments, &index, &mut rng, &self.config.fairness);

        let kpi = PlanKpi::calculate(&assignments, &input.students);
        info!(
            seed = %options.seed,
            rounds = assignments.len(),
            groups = kpi.group_count,
            repeated_pairings = kpi.repeated_pairings,
            like_rate = kpi.like_satisfaction_rate,
            "plan generated"
        );

        Ok(GenerateResult {
            assignments,
            seed: options.seed.clone(),
            diagnostics,
        })
    }
}

/// Generates a plan with default tuning.
///
/// # Errors
/// See [`PlanGenerator::generate`].
pub fn generate_plan(
    input: &GenerateInput,
    options: &GenerateOptions,
) -> Result<GenerateResult, PlanError> {
    PlanGenerator::new().generate(input, options)
}
