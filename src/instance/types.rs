//! Items, voters and the immutable instance they form.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A fundable project with a non-negative cost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Unique identifier.
    pub id: String,
    /// Cost of funding the item.
    pub cost: f64,
    /// Opaque per-item columns carried along from the input.
    pub metadata: BTreeMap<String, String>,
}

impl Item {
    /// Creates an item without metadata.
    pub fn new(id: impl Into<String>, cost: f64) -> Self {
        Self {
            id: id.into(),
            cost,
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches an opaque metadata column.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A voter and the items they approve.
///
/// Approvals are stored as sorted, de-duplicated item positions within the
/// owning [`Instance`], so a `Voter` is only meaningful next to it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Voter {
    /// Voter identifier.
    pub id: String,
    approvals: Vec<usize>,
    /// Opaque per-voter columns carried along from the input.
    pub metadata: BTreeMap<String, String>,
}

impl Voter {
    /// Positions of the approved items, ascending.
    pub fn approvals(&self) -> &[usize] {
        &self.approvals
    }

    /// Whether the voter approves the item at `index`.
    pub fn approves(&self, index: usize) -> bool {
        self.approvals.binary_search(&index).is_ok()
    }
}

/// A voter as supplied to [`InstanceBuilder`], approvals given by item id.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ballot {
    /// Voter identifier.
    pub id: String,
    /// Approved item ids. Order and duplicates are irrelevant.
    pub approvals: BTreeSet<String>,
    /// Opaque per-voter columns.
    pub metadata: BTreeMap<String, String>,
}

impl Ballot {
    /// Creates a ballot approving the given items.
    pub fn new<I, S>(id: impl Into<String>, approvals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            approvals: approvals.into_iter().map(Into::into).collect(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches an opaque metadata column.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A participatory budgeting instance.
///
/// The item order is part of the contract: every rule scans items in this
/// order and breaks ties by it. Instances are immutable once built.
///
/// With the `serde` feature, instances serialize with approvals by item id
/// and deserialize through [`InstanceBuilder::build`], so a decoded instance
/// passes the same checks as a built one.
///
/// # Examples
///
/// ```
/// use u_budgeting::instance::{Ballot, InstanceBuilder, Item};
///
/// let instance = InstanceBuilder::new(25.0)
///     .with_item(Item::new("A", 10.0))
///     .with_item(Item::new("B", 15.0))
///     .with_ballot(Ballot::new("v1", ["A", "B"]))
///     .build()
///     .unwrap();
///
/// assert_eq!(instance.item_count(), 2);
/// assert_eq!(instance.index_of("B"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "InstanceData", into = "InstanceData")
)]
pub struct Instance {
    items: Vec<Item>,
    index: HashMap<String, usize>,
    voters: Vec<Voter>,
    cap: f64,
    meta: BTreeMap<String, String>,
}

impl Instance {
    /// Items in their fixed order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Voters in input order.
    pub fn voters(&self) -> &[Voter] {
        &self.voters
    }

    /// The budget cap.
    pub fn cap(&self) -> f64 {
        self.cap
    }

    /// Opaque instance-level key/value pairs.
    pub fn meta(&self) -> &BTreeMap<String, String> {
        &self.meta
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of voters.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Cost of the item at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn cost(&self, index: usize) -> f64 {
        self.items[index].cost
    }

    /// Position of the item with the given id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Identifier of the item at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn item_id(&self, index: usize) -> &str {
        &self.items[index].id
    }

    /// Sum of all item costs.
    pub fn total_item_cost(&self) -> f64 {
        self.items.iter().map(|it| it.cost).sum()
    }
}

/// Serialized form of an [`Instance`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct InstanceData {
    cap: f64,
    items: Vec<Item>,
    voters: Vec<Ballot>,
    #[serde(default)]
    meta: BTreeMap<String, String>,
}

#[cfg(feature = "serde")]
impl From<Instance> for InstanceData {
    fn from(instance: Instance) -> Self {
        let voters = instance
            .voters
            .iter()
            .map(|v| Ballot {
                id: v.id.clone(),
                approvals: v
                    .approvals
                    .iter()
                    .map(|&i| instance.items[i].id.clone())
                    .collect(),
                metadata: v.metadata.clone(),
            })
            .collect();
        Self {
            cap: instance.cap,
            items: instance.items,
            voters,
            meta: instance.meta,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<InstanceData> for Instance {
    type Error = Error;

    fn try_from(data: InstanceData) -> Result<Self> {
        let mut builder = InstanceBuilder::new(data.cap);
        builder.items = data.items;
        builder.ballots = data.voters;
        builder.meta = data.meta;
        builder.build()
    }
}

/// Builds an [`Instance`], checking that it is well formed.
#[derive(Debug, Clone, Default)]
pub struct InstanceBuilder {
    cap: f64,
    items: Vec<Item>,
    ballots: Vec<Ballot>,
    meta: BTreeMap<String, String>,
}

impl InstanceBuilder {
    /// Starts an instance with the given cap.
    pub fn new(cap: f64) -> Self {
        Self {
            cap,
            ..Self::default()
        }
    }

    /// Appends an item. Items keep the order in which they are added.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Appends a voter.
    pub fn with_ballot(mut self, ballot: Ballot) -> Self {
        self.ballots.push(ballot);
        self
    }

    /// Adds an instance-level key/value pair.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Appends an item in place.
    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Appends a voter in place.
    pub fn add_ballot(&mut self, ballot: Ballot) {
        self.ballots.push(ballot);
    }

    /// Adds an instance-level key/value pair in place.
    pub fn add_meta(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.meta.insert(key.into(), value.into());
    }

    /// Validates and freezes the instance.
    ///
    /// Fails on an invalid cap, an invalid or duplicate item, or a ballot
    /// approving an item that does not exist.
    pub fn build(self) -> Result<Instance> {
        if !self.cap.is_finite() || self.cap < 0.0 {
            return Err(Error::InvalidCap(self.cap));
        }

        let mut index = HashMap::with_capacity(self.items.len());
        for (pos, item) in self.items.iter().enumerate() {
            if !item.cost.is_finite() || item.cost < 0.0 {
                return Err(Error::InvalidCost {
                    item: item.id.clone(),
                    cost: item.cost,
                });
            }
            if index.insert(item.id.clone(), pos).is_some() {
                return Err(Error::DuplicateItem {
                    item: item.id.clone(),
                });
            }
        }

        let mut voters = Vec::with_capacity(self.ballots.len());
        for ballot in self.ballots {
            let mut approvals = Vec::with_capacity(ballot.approvals.len());
            for id in &ballot.approvals {
                match index.get(id) {
                    Some(&pos) => approvals.push(pos),
                    None => {
                        return Err(Error::UnknownItem {
                            voter: ballot.id,
                            item: id.clone(),
                        })
                    }
                }
            }
            approvals.sort_unstable();
            approvals.dedup();
            voters.push(Voter {
                id: ballot.id,
                approvals,
                metadata: ballot.metadata,
            });
        }

        tracing::debug!(
            items = self.items.len(),
            voters = voters.len(),
            cap = self.cap,
            "instance built"
        );

        Ok(Instance {
            items: self.items,
            index,
            voters,
            cap: self.cap,
            meta: self.meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> InstanceBuilder {
        InstanceBuilder::new(25.0)
            .with_item(Item::new("A", 10.0))
            .with_item(Item::new("B", 15.0))
            .with_item(Item::new("C", 20.0))
    }

    #[test]
    fn test_build_preserves_item_order() {
        let instance = abc().build().unwrap();
        let ids: Vec<&str> = instance.items().iter().map(|it| it.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(instance.index_of("C"), Some(2));
        assert_eq!(instance.index_of("D"), None);
        assert!((instance.total_item_cost() - 45.0).abs() < 1e-10);
    }

    #[test]
    fn test_approvals_resolved_and_deduplicated() {
        let instance = abc()
            .with_ballot(Ballot::new("v1", ["C", "A", "C"]))
            .build()
            .unwrap();
        let voter = &instance.voters()[0];
        assert_eq!(voter.approvals(), &[0, 2]);
        assert!(voter.approves(0));
        assert!(!voter.approves(1));
    }

    #[test]
    fn test_unknown_item_rejected() {
        let err = abc()
            .with_ballot(Ballot::new("v1", ["A", "Z"]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            Error::UnknownItem {
                voter: "v1".into(),
                item: "Z".into()
            }
        );
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let err = abc().with_item(Item::new("A", 1.0)).build().unwrap_err();
        assert_eq!(err, Error::DuplicateItem { item: "A".into() });
    }

    #[test]
    fn test_negative_cost_rejected() {
        let err = InstanceBuilder::new(10.0)
            .with_item(Item::new("A", -1.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCost { .. }));
    }

    #[test]
    fn test_invalid_cap_rejected() {
        assert!(matches!(
            InstanceBuilder::new(f64::NAN).build(),
            Err(Error::InvalidCap(_))
        ));
        assert!(matches!(
            InstanceBuilder::new(-5.0).build(),
            Err(Error::InvalidCap(_))
        ));
    }

    #[test]
    fn test_voter_may_approve_nothing() {
        let instance = abc()
            .with_ballot(Ballot::new("v1", Vec::<String>::new()))
            .build()
            .unwrap();
        assert!(instance.voters()[0].approvals().is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip_keeps_approvals_by_id() {
        let instance = abc()
            .with_meta("city", "Warsaw")
            .with_ballot(Ballot::new("v1", ["C", "A"]))
            .build()
            .unwrap();
        let json = serde_json::to_string(&instance).unwrap();
        assert!(json.contains(r#""approvals":["A","C"]"#));
        let back: Instance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instance);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_runs_build_checks() {
        let unknown = r#"{"cap":10.0,"items":[{"id":"A","cost":1.0,"metadata":{}}],
            "voters":[{"id":"v1","approvals":["Z"],"metadata":{}}]}"#;
        let err = serde_json::from_str::<Instance>(unknown).unwrap_err();
        assert!(err.to_string().contains("unknown item `Z`"));

        let negative = r#"{"cap":10.0,"items":[{"id":"A","cost":-1.0,"metadata":{}}],
            "voters":[]}"#;
        assert!(serde_json::from_str::<Instance>(negative).is_err());

        let duplicate = r#"{"cap":10.0,"items":[
            {"id":"A","cost":1.0,"metadata":{}},{"id":"A","cost":2.0,"metadata":{}}],
            "voters":[]}"#;
        let err = serde_json::from_str::<Instance>(duplicate).unwrap_err();
        assert!(err.to_string().contains("duplicate item `A`"));
    }

    #[test]
    fn test_metadata_kept() {
        let instance = InstanceBuilder::new(1.0)
            .with_meta("country", "Poland")
            .with_item(Item::new("A", 1.0).with_metadata("name", "Park"))
            .with_ballot(Ballot::new("v1", ["A"]).with_metadata("age", "30"))
            .build()
            .unwrap();
        assert_eq!(instance.meta().get("country").map(String::as_str), Some("Poland"));
        assert_eq!(instance.items()[0].metadata["name"], "Park");
        assert_eq!(instance.voters()[0].metadata["age"], "30");
    }
}
