//! Greedy rule on absolute aggregate score.

use super::types::{RuleKind, SelectionResult};
use crate::evaluation::total_cost;
use crate::instance::{Budget, Instance};
use crate::satisfaction::{aggregate_score, Satisfaction};

/// Grows a budget one item at a time, always adding the item whose addition
/// gives the highest aggregate score.
///
/// While the running cost is below the cap, every item that is not yet
/// selected and still fits is scored as `current ∪ {item}`. Fitting is judged
/// on the item-order cost sum of `current ∪ {item}`, the same sum
/// [`total_cost`] reports. Candidates are
/// compared with `>=`, so among tied items the last one in item order wins.
/// The run ends when the cap is reached or no remaining item fits.
pub struct GreedyRule;

impl GreedyRule {
    /// Runs the greedy rule.
    pub fn run<S: Satisfaction + ?Sized>(instance: &Instance, metric: &S) -> SelectionResult {
        let cap = instance.cap();
        let mut current = Budget::empty_for(instance);
        let mut cur_cost = 0.0;
        let mut cur_score = aggregate_score(instance, &current, metric);
        let mut evaluations = 1usize;
        let mut rounds = 0usize;

        while cur_cost < cap {
            let mut best_item = None;
            let mut best_score = 0.0;

            for i in 0..instance.item_count() {
                if current.contains(i) {
                    continue;
                }
                current.insert(i);
                if total_cost(instance, &current) > cap {
                    current.remove(i);
                    continue;
                }
                let score = aggregate_score(instance, &current, metric);
                current.remove(i);
                evaluations += 1;

                if score >= best_score {
                    best_score = score;
                    best_item = Some(i);
                }
            }

            let Some(item) = best_item else {
                break;
            };
            current.insert(item);
            cur_cost = total_cost(instance, &current);
            cur_score = best_score;
            rounds += 1;

            tracing::trace!(
                rule = RuleKind::Greedy.name(),
                item = instance.item_id(item),
                score = cur_score,
                cost = cur_cost,
                "item committed"
            );
        }

        tracing::debug!(
            rule = RuleKind::Greedy.name(),
            metric = metric.name(),
            selected = current.len(),
            score = cur_score,
            cost = cur_cost,
            evaluations,
            "rule finished"
        );

        SelectionResult {
            rule: RuleKind::Greedy,
            metric: metric.name().to_string(),
            budget: current,
            score: cur_score,
            evaluations,
            rounds,
            discarded: 0,
        }
    }
}
