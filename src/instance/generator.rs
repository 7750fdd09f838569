//! Seeded synthetic instances for benchmarks and tests.

use super::types::{Ballot, Instance, InstanceBuilder, Item};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates random instances.
///
/// Costs are drawn uniformly from `[min_cost, max_cost)`, each voter approves
/// each item independently with `approval_probability`, and the cap is
/// `cap_fraction` times the total item cost.
///
/// # Examples
///
/// ```
/// use u_budgeting::instance::InstanceGenerator;
///
/// let instance = InstanceGenerator::default()
///     .with_items(8)
///     .with_voters(50)
///     .with_seed(7)
///     .generate()
///     .unwrap();
///
/// assert_eq!(instance.item_count(), 8);
/// assert_eq!(instance.voter_count(), 50);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceGenerator {
    /// Number of items.
    pub items: usize,

    /// Number of voters.
    pub voters: usize,

    /// Lower bound of the cost range. Must be positive.
    pub min_cost: f64,

    /// Upper bound (exclusive) of the cost range.
    pub max_cost: f64,

    /// Probability that a voter approves a given item, in `[0, 1]`.
    pub approval_probability: f64,

    /// Cap as a fraction of the total item cost, in `[0, 1]`.
    pub cap_fraction: f64,

    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for InstanceGenerator {
    fn default() -> Self {
        Self {
            items: 10,
            voters: 100,
            min_cost: 1.0,
            max_cost: 100.0,
            approval_probability: 0.3,
            cap_fraction: 0.4,
            seed: 42,
        }
    }
}

impl InstanceGenerator {
    pub fn with_items(mut self, n: usize) -> Self {
        self.items = n;
        self
    }

    pub fn with_voters(mut self, n: usize) -> Self {
        self.voters = n;
        self
    }

    pub fn with_cost_range(mut self, min: f64, max: f64) -> Self {
        self.min_cost = min;
        self.max_cost = max;
        self
    }

    pub fn with_approval_probability(mut self, p: f64) -> Self {
        self.approval_probability = p;
        self
    }

    pub fn with_cap_fraction(mut self, f: f64) -> Self {
        self.cap_fraction = f;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.min_cost.is_nan() || self.min_cost <= 0.0 {
            return Err("min_cost must be positive".into());
        }
        if !self.max_cost.is_finite() || self.max_cost <= self.min_cost {
            return Err("max_cost must be finite and greater than min_cost".into());
        }
        if !(0.0..=1.0).contains(&self.approval_probability) {
            return Err(format!(
                "approval_probability must be in [0, 1], got {}",
                self.approval_probability
            ));
        }
        if !(0.0..=1.0).contains(&self.cap_fraction) {
            return Err(format!(
                "cap_fraction must be in [0, 1], got {}",
                self.cap_fraction
            ));
        }
        Ok(())
    }

    /// Draws an instance.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`validate`](Self::validate)
    /// first to get a descriptive error).
    pub fn generate(&self) -> Result<Instance> {
        self.validate().expect("invalid InstanceGenerator");

        let mut rng = StdRng::seed_from_u64(self.seed);

        let items: Vec<Item> = (0..self.items)
            .map(|i| Item::new(format!("p{i}"), rng.random_range(self.min_cost..self.max_cost)))
            .collect();
        let total: f64 = items.iter().map(|it| it.cost).sum();

        let mut builder = InstanceBuilder::new(total * self.cap_fraction);
        for v in 0..self.voters {
            let approvals: Vec<&str> = items
                .iter()
                .filter(|_| rng.random_bool(self.approval_probability))
                .map(|it| it.id.as_str())
                .collect();
            builder.add_ballot(Ballot::new(format!("v{v}"), approvals));
        }
        for item in items {
            builder.add_item(item);
        }
        builder.build()
    }
}
