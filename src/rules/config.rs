//! Configuration for running rules through [`RuleKind::run`](super::RuleKind::run).

/// Item count above which an unbounded exact run is logged as a warning.
pub(crate) const EXACT_WARN_ITEMS: usize = 25;

/// Caller-side policy for running selection rules.
///
/// # Examples
///
/// ```
/// use u_budgeting::rules::SelectionConfig;
///
/// let config = SelectionConfig::default().with_exact_item_limit(18);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionConfig {
    /// Largest item count the exact rule is allowed to run on.
    ///
    /// The exact rule enumerates up to `2^n` subsets. `None` disables the
    /// check.
    pub exact_item_limit: Option<usize>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            exact_item_limit: Some(EXACT_WARN_ITEMS),
        }
    }
}

impl SelectionConfig {
    pub fn with_exact_item_limit(mut self, n: usize) -> Self {
        self.exact_item_limit = Some(n);
        self
    }

    /// Lets the exact rule run on any number of items.
    pub fn without_exact_item_limit(mut self) -> Self {
        self.exact_item_limit = None;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.exact_item_limit == Some(0) {
            return Err("exact_item_limit must be positive".into());
        }
        Ok(())
    }
}
