//! The instance model: items, voters, the budget cap and candidate budgets.
//!
//! An [`Instance`] is built once through [`InstanceBuilder`] (or read with
//! [`loader`]) and never mutated. Item order is an explicit part of the
//! model because every selection rule scans items in that order and breaks
//! ties by it.

mod budget;
mod generator;
pub mod loader;
mod types;

pub use budget::Budget;
pub use generator::InstanceGenerator;
pub use loader::LoadError;
pub use types::{Ballot, Instance, InstanceBuilder, Item, Voter};
