//! Error types shared by the instance model, the rules and the evaluation
//! metrics.

use thiserror::Error;

/// Errors raised by the core.
///
/// Every degenerate input that would otherwise divide by zero has its own
/// variant, so callers can tell a missing value apart from a real zero.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// A voter approves an item that is not part of the instance.
    #[error("voter `{voter}` approves unknown item `{item}`")]
    UnknownItem { voter: String, item: String },

    /// Two items share the same identifier.
    #[error("duplicate item `{item}`")]
    DuplicateItem { item: String },

    /// An item cost is negative, NaN or infinite.
    #[error("item `{item}` has invalid cost {cost}")]
    InvalidCost { item: String, cost: f64 },

    /// The budget cap is negative, NaN or infinite.
    #[error("invalid budget cap {0}")]
    InvalidCap(f64),

    /// The anger ratio was requested for an instance without voters.
    #[error("anger ratio is undefined without voters")]
    NoVoters,

    /// The average cost was requested for an empty budget.
    #[error("average cost is undefined for an empty budget")]
    EmptyBudget,

    /// Proportional greedy reached an eligible item of cost zero.
    #[error("item `{item}` has zero cost; cost-normalized score is undefined")]
    ZeroCostItem { item: String },

    /// The exact rule was requested on more items than the configured limit.
    #[error("exact rule limited to {limit} items, instance has {items}")]
    TooManyItems { items: usize, limit: usize },
}

/// Result alias for the core.
pub type Result<T> = std::result::Result<T, Error>;
