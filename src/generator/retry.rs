//! Retry with a fresh seed.
//!
//! A retry throws the previous plan away and generates from scratch with
//! a newly drawn seed. If generation fails, the caller gets the previous
//! plan back (paired with the new seed) so there is always something to
//! render; re-running validation shows whether the problem persists.

use rand::Rng;
use tracing::{info, warn};

use crate::models::Assignment;
use crate::PlanError;

use super::plan::{GenerateInput, GenerateOptions, PlanGenerator};

/// Length of generated seeds.
pub const SEED_LEN: usize = 11;

const SEED_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Outcome of a retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryResult {
    /// New plan, or the previous one if regeneration failed.
    pub assignments: Vec<Assignment>,
    /// Seed drawn for this retry.
    pub seed: String,
    /// Whether `assignments` is a fresh plan.
    pub regenerated: bool,
    /// Generation failure, if any.
    pub error: Option<PlanError>,
}

/// Draws a random base-36 seed.
pub fn fresh_seed<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SEED_LEN)
        .map(|_| char::from(SEED_ALPHABET[rng.random_range(0..SEED_ALPHABET.len())]))
        .collect()
}

impl PlanGenerator {
    /// Regenerates the plan with a seed drawn from `rng`.
    ///
    /// The new seed never equals `prior_seed`.
    pub fn retry_with<R: Rng + ?Sized>(
        &self,
        assignments: &[Assignment],
        input: &GenerateInput,
        prior_seed: &str,
        rng: &mut R,
    ) -> RetryResult {
        let mut seed = fresh_seed(rng);
        while seed == prior_seed {
            seed = fresh_seed(rng);
        }

        match self.generate(input, &GenerateOptions::new(seed.as_str())) {
            Ok(result) => {
                info!(prior_seed, seed = %seed, "plan regenerated");
                RetryResult {
                    assignments: result.assignments,
                    seed,
                    regenerated: true,
                    error: None,
                }
            }
            Err(err) => {
                warn!(prior_seed, seed = %seed, error = %err, "retry failed, keeping previous plan");
                RetryResult {
                    assignments: assignments.to_vec(),
                    seed,
                    regenerated: false,
                    error: Some(err),
                }
            }
        }
    }
}

/// Regenerates the plan with a seed from the thread-local RNG.
pub fn retry_round_placement(
    assignments: &[Assignment],
    input: &GenerateInput,
    prior_seed: &str,
) -> RetryResult {
    retry_round_placement_with(assignments, input, prior_seed, &mut rand::rng())
}

/// Regenerates the plan with a seed drawn from `rng`.
pub fn retry_round_placement_with<R: Rng + ?Sized>(
    assignments: &[Assignment],
    input: &GenerateInput,
    prior_seed: &str,
    rng: &mut R,
) -> RetryResult {
    PlanGenerator::new().retry_with(assignments, input, prior_seed, rng)
}
