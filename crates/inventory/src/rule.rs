//! Declarative rule vocabulary: per-field constraints gating per-field actions.

use serde::{Deserialize, Serialize};

use gildedrose_core::{DomainError, DomainResult, ValueObject};

use crate::item::{Item, ItemField};

/// Comparison applied between an item field and a threshold.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    LessThan,
    GreaterThan,
}

impl Comparator {
    pub fn holds(self, value: i64, threshold: i64) -> bool {
        match self {
            Comparator::LessThan => value < threshold,
            Comparator::GreaterThan => value > threshold,
        }
    }
}

/// One `(field, comparator, threshold)` triple of a condition set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    pub field: ItemField,
    pub comparator: Comparator,
    pub threshold: i64,
}

impl ValueObject for Constraint {}

impl Constraint {
    pub fn lt(field: ItemField, threshold: i64) -> Self {
        Self {
            field,
            comparator: Comparator::LessThan,
            threshold,
        }
    }

    pub fn gt(field: ItemField, threshold: i64) -> Self {
        Self {
            field,
            comparator: Comparator::GreaterThan,
            threshold,
        }
    }

    /// Evaluates against the item's current value of `field`.
    pub fn is_satisfied_by(&self, item: &Item) -> bool {
        self.comparator.holds(item.get(self.field), self.threshold)
    }
}

/// Arithmetic or assignment applied to a single field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Increment(i64),
    Decrement(i64),
    Set(i64),
}

impl Operation {
    /// Saturates at the `i64` range instead of overflowing.
    pub fn apply(self, current: i64) -> i64 {
        match self {
            Operation::Increment(by) => current.saturating_add(by),
            Operation::Decrement(by) => current.saturating_sub(by),
            Operation::Set(value) => value,
        }
    }
}

/// One `(field, operation)` pair of an action set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub field: ItemField,
    pub operation: Operation,
}

impl ValueObject for Action {}

impl Action {
    pub fn increment(field: ItemField, by: i64) -> Self {
        Self {
            field,
            operation: Operation::Increment(by),
        }
    }

    pub fn decrement(field: ItemField, by: i64) -> Self {
        Self {
            field,
            operation: Operation::Decrement(by),
        }
    }

    pub fn set(field: ItemField, value: i64) -> Self {
        Self {
            field,
            operation: Operation::Set(value),
        }
    }

    pub fn apply_to(&self, item: &mut Item) {
        let slot = item.get_mut(self.field);
        *slot = self.operation.apply(*slot);
    }
}

/// A single entry of a category's ordered rule sequence.
///
/// An empty condition set means the rule always fires. Otherwise every
/// constraint must hold (logical AND). The action set is mandatory and holds at
/// most one action per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleDefinition")]
pub struct Rule {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    conditions: Vec<Constraint>,
    actions: Vec<Action>,
}

impl ValueObject for Rule {}

impl Rule {
    /// Unconditional rule.
    pub fn always(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            conditions: Vec::new(),
            actions: actions.into_iter().collect(),
        }
    }

    /// Rule gated by `conditions`.
    pub fn when(
        conditions: impl IntoIterator<Item = Constraint>,
        actions: impl IntoIterator<Item = Action>,
    ) -> Self {
        Self {
            conditions: conditions.into_iter().collect(),
            actions: actions.into_iter().collect(),
        }
    }

    pub fn conditions(&self) -> &[Constraint] {
        &self.conditions
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn is_unconditional(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Rejects rule data that cannot be evaluated unambiguously.
    pub fn validate(&self) -> DomainResult<()> {
        if self.actions.is_empty() {
            return Err(DomainError::validation("rule action set cannot be empty"));
        }

        for (i, action) in self.actions.iter().enumerate() {
            if self.actions[..i].iter().any(|a| a.field == action.field) {
                return Err(DomainError::conflict(format!(
                    "rule has more than one action on {}",
                    action.field
                )));
            }
        }

        for (i, c) in self.conditions.iter().enumerate() {
            if self.conditions[..i]
                .iter()
                .any(|prev| prev.field == c.field && prev.comparator == c.comparator)
            {
                return Err(DomainError::conflict(format!(
                    "rule repeats the {:?} constraint on {}",
                    c.comparator, c.field
                )));
            }
        }

        Ok(())
    }

    /// True when every constraint holds for the item's current field values.
    pub fn fires_for(&self, item: &Item) -> bool {
        self.conditions.iter().all(|c| c.is_satisfied_by(item))
    }

    /// Applies every action in order. Does not check conditions.
    pub fn apply_actions(&self, item: &mut Item) {
        for action in &self.actions {
            action.apply_to(item);
        }
    }
}

/// Unvalidated wire shape of a [`Rule`].
#[derive(Debug, Clone, Deserialize)]
struct RuleDefinition {
    #[serde(default)]
    conditions: Vec<Constraint>,
    actions: Vec<Action>,
}

impl TryFrom<RuleDefinition> for Rule {
    type Error = DomainError;

    fn try_from(def: RuleDefinition) -> Result<Self, Self::Error> {
        let rule = Rule::when(def.conditions, def.actions);
        rule.validate()?;
        Ok(rule)
    }
}
