use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Integer test budget the solver was run for.
pub type Budget = i64;

/// Most budgets one solve may span; the explorer walks every one of them.
pub const MAX_BUDGET_SPAN: Budget = 10_000;

/// People and groups chosen for one budget.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Vec<String>, Vec<String>)", into = "(Vec<String>, Vec<String>)")]
pub struct Selection {
    pub people: Vec<String>,
    pub groups: Vec<String>,
}

impl From<(Vec<String>, Vec<String>)> for Selection {
    fn from((people, groups): (Vec<String>, Vec<String>)) -> Self {
        Self { people, groups }
    }
}

impl From<Selection> for (Vec<String>, Vec<String>) {
    fn from(selection: Selection) -> Self {
        (selection.people, selection.groups)
    }
}

/// Inclusive budget range a solve was requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BudgetRange {
    min: Budget,
    max: Budget,
}

impl BudgetRange {
    pub fn new(min: Budget, max: Budget) -> Result<Self, ValidationError> {
        if min < 0 || max < 0 {
            return Err(ValidationError::NegativeBudget { min, max });
        }
        if min > max {
            return Err(ValidationError::BudgetOrder { min, max });
        }
        if max - min >= MAX_BUDGET_SPAN {
            return Err(ValidationError::BudgetSpan {
                min,
                max,
                limit: MAX_BUDGET_SPAN,
            });
        }
        Ok(Self { min, max })
    }

    /// Parse the two solver form fields.
    pub fn parse(min: &str, max: &str) -> Result<Self, ValidationError> {
        let parse = |value: &str| {
            value
                .trim()
                .parse::<Budget>()
                .map_err(|_| ValidationError::InvalidBudget {
                    value: value.to_string(),
                })
        };
        Self::new(parse(min)?, parse(max)?)
    }

    pub fn min(&self) -> Budget {
        self.min
    }

    pub fn max(&self) -> Budget {
        self.max
    }

    /// Midpoint, rounded down; where the explorer starts.
    pub fn initial(&self) -> Budget {
        self.min + (self.max - self.min) / 2
    }

    pub fn len(&self) -> usize {
        (self.max - self.min + 1) as usize
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, budget: Budget) -> bool {
        (self.min..=self.max).contains(&budget)
    }

    pub fn clamp(&self, budget: Budget) -> Budget {
        budget.clamp(self.min, self.max)
    }

    pub fn iter(&self) -> RangeInclusive<Budget> {
        self.min..=self.max
    }
}

/// Budget → selection mapping returned by a successful solve.
///
/// JSON object keys arrive as strings and are parsed into integers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solution {
    entries: BTreeMap<Budget, Selection>,
}

impl Solution {
    pub fn get(&self, budget: Budget) -> Option<&Selection> {
        self.entries.get(&budget)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn budgets(&self) -> impl Iterator<Item = Budget> + '_ {
        self.entries.keys().copied()
    }

    /// Budgets in `range` that the backend did not return a selection for.
    pub fn missing_budgets(&self, range: &BudgetRange) -> Vec<Budget> {
        let present = self.entries.range(range.iter()).count();
        if present == range.len() {
            return Vec::new();
        }
        range
            .iter()
            .filter(|budget| !self.entries.contains_key(budget))
            .collect()
    }
}

impl FromIterator<(Budget, Selection)> for Solution {
    fn from_iter<T: IntoIterator<Item = (Budget, Selection)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(people: &[&str], groups: &[&str]) -> Selection {
        Selection {
            people: people.iter().map(|s| s.to_string()).collect(),
            groups: groups.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn parses_string_keyed_pairs() {
        let json = r#"{"3": [["p_a_1"], ["g1"]], "2": [[], []]}"#;
        let solution: Solution = serde_json::from_str(json).unwrap();
        assert_eq!(solution.len(), 2);
        assert_eq!(solution.get(3), Some(&selection(&["p_a_1"], &["g1"])));
        assert_eq!(solution.budgets().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn reports_missing_budgets_in_range() {
        let solution: Solution = [(10, Selection::default()), (12, Selection::default())]
            .into_iter()
            .collect();
        let range = BudgetRange::new(10, 13).unwrap();
        assert_eq!(solution.missing_budgets(&range), vec![11, 13]);
        let covered = BudgetRange::new(10, 10).unwrap();
        assert!(solution.missing_budgets(&covered).is_empty());
    }

    #[test]
    fn budget_range_validates_order_and_sign() {
        assert_eq!(
            BudgetRange::new(5, 4),
            Err(ValidationError::BudgetOrder { min: 5, max: 4 })
        );
        assert!(matches!(
            BudgetRange::new(-1, 4),
            Err(ValidationError::NegativeBudget { .. })
        ));
        assert_eq!(
            BudgetRange::new(0, 9_999_999_999),
            Err(ValidationError::BudgetSpan {
                min: 0,
                max: 9_999_999_999,
                limit: MAX_BUDGET_SPAN,
            })
        );
        assert_eq!(BudgetRange::new(5, 5 + MAX_BUDGET_SPAN - 1).unwrap().len(), 10_000);
        assert!(matches!(
            BudgetRange::parse("2.5", "4"),
            Err(ValidationError::InvalidBudget { .. })
        ));
    }

    #[test]
    fn initial_budget_is_floored_midpoint() {
        assert_eq!(BudgetRange::new(10, 20).unwrap().initial(), 15);
        assert_eq!(BudgetRange::new(2, 5).unwrap().initial(), 3);
        assert_eq!(BudgetRange::new(7, 7).unwrap().initial(), 7);
        assert_eq!(BudgetRange::new(10, 20).unwrap().len(), 11);
    }
}
