//! Plan generation: seeded RNG, host selection, guest placement,
//! fairness pass, KPIs and retry.
//!
//! # Algorithm
//!
//! `PlanGenerator` walks the rounds in order. Each round draws fresh hosts
//! (never reused within a run), then fills their groups with a greedy,
//! like-aware, avoid-respecting placement that is retried with a new
//! shuffle until it succeeds or the attempt cap is hit. A randomized
//! local search then exchanges guests between rounds to cut repeated
//! pairings, accepting only strict improvements.
//!
//! Every random decision comes from one [`SeededRng`], so a plan is fully
//! reproducible from its seed string.
//!
//! # KPI
//!
//! `PlanKpi` reports group sizes, repeated pairings, like satisfaction
//! and unplaced students.
//!
//! # References
//!
//! - Knuth (1997), "The Art of Computer Programming", Vol. 2, §3.4.2 (shuffling)
//! - Hoos & Stützle (2004), "Stochastic Local Search: Foundations and Applications"

mod fairness;
mod guests;
mod hosts;
mod kpi;
mod plan;
mod retry;
mod rng;

pub use fairness::{pairing_counts, perform_fairness_pass, repeat_count, FairnessConfig};
pub use guests::{assign_guests_to_slots, like_score, violates_avoid};
pub use hosts::{build_host_slots, pick_unique_hosts, HostSlot};
pub use kpi::PlanKpi;
pub use plan::{
    generate_plan, GenerateInput, GenerateOptions, GenerateResult, GeneratorConfig, PlanGenerator,
    RoundDiagnostic,
};
pub use retry::{fresh_seed, retry_round_placement, retry_round_placement_with, RetryResult, SEED_LEN};
pub use rng::{hash_seed, shuffle_in_place, SeededRng};
