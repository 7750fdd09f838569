//! Budget selection rules.
//!
//! Each rule takes an [`Instance`] and a satisfaction metric and returns a
//! [`SelectionResult`] whose budget never exceeds the cap:
//!
//! - [`ExactRule`]: exhaustive search for the maximum aggregate score.
//!   Exponential in the number of items.
//! - [`GreedyRule`]: adds the item giving the highest aggregate score until
//!   nothing fits.
//! - [`ProportionalGreedyRule`]: adds the item with the highest marginal score
//!   per unit cost until nothing fits.
//!
//! All rules scan items in instance order, which makes tie-breaking
//! deterministic. The greedy rules may return a strictly worse budget than
//! the exact rule.
//!
//! # Examples
//!
//! ```
//! use u_budgeting::instance::{Ballot, InstanceBuilder, Item};
//! use u_budgeting::rules::{RuleKind, SelectionConfig};
//! use u_budgeting::satisfaction::SatisfactionMetric;
//!
//! let instance = InstanceBuilder::new(25.0)
//!     .with_item(Item::new("A", 10.0))
//!     .with_item(Item::new("B", 15.0))
//!     .with_item(Item::new("C", 20.0))
//!     .with_ballot(Ballot::new("V1", ["A", "B"]))
//!     .with_ballot(Ballot::new("V2", ["C"]))
//!     .build()
//!     .unwrap();
//!
//! let config = SelectionConfig::default();
//! let exact = RuleKind::Exact
//!     .run(&instance, &SatisfactionMetric::Numeric, &config)
//!     .unwrap();
//! let greedy = RuleKind::Greedy
//!     .run(&instance, &SatisfactionMetric::Numeric, &config)
//!     .unwrap();
//!
//! assert_eq!(exact.ids(&instance), vec!["A", "B"]);
//! assert_eq!(greedy.ids(&instance), vec!["C"]);
//! ```

mod config;
mod exact;
mod greedy;
mod proportional;
mod types;

pub use config::SelectionConfig;
pub use exact::ExactRule;
pub use greedy::GreedyRule;
pub use proportional::ProportionalGreedyRule;
pub use types::{RuleKind, SelectionResult};

use config::EXACT_WARN_ITEMS;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::satisfaction::Satisfaction;

impl RuleKind {
    /// Runs this rule under the caller-side policy in `config`.
    ///
    /// # Errors
    ///
    /// - [`Error::TooManyItems`] if this is the exact rule and the instance
    ///   has more items than `config.exact_item_limit`.
    /// - [`Error::ZeroCostItem`] from the proportional greedy rule.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`SelectionConfig::validate`]
    /// first to get a descriptive error).
    pub fn run<S: Satisfaction + ?Sized>(
        &self,
        instance: &Instance,
        metric: &S,
        config: &SelectionConfig,
    ) -> Result<SelectionResult> {
        config.validate().expect("invalid SelectionConfig");

        match self {
            RuleKind::Exact => {
                let items = instance.item_count();
                match config.exact_item_limit {
                    Some(limit) if items > limit => {
                        return Err(Error::TooManyItems { items, limit });
                    }
                    None if items > EXACT_WARN_ITEMS => {
                        tracing::warn!(items, "running the exact rule without an item limit");
                    }
                    _ => {}
                }
                Ok(ExactRule::run(instance, metric))
            }
            RuleKind::Greedy => Ok(GreedyRule::run(instance, metric)),
            RuleKind::ProportionalGreedy => ProportionalGreedyRule::run(instance, metric),
        }
    }
}
