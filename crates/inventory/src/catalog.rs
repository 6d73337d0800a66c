//! Rule catalog: category keys mapped to ordered rule sequences.

use gildedrose_core::{DomainError, DomainResult};

use crate::item::{ItemField, MAX_QUALITY, MIN_QUALITY};
use crate::rule::{Action, Constraint, Rule};

/// Appreciating item: gains quality with age.
pub const AGED_BRIE: &str = "Aged Brie";
/// Event ticket: gains quality towards the event, worthless after it.
pub const BACKSTAGE_PASSES: &str = "Backstage passes";
/// Legendary item: never sold, never changes.
pub const SULFURAS: &str = "Sulfuras";
/// Fast-decaying item: loses quality twice as fast as an ordinary item.
pub const CONJURED: &str = "Conjured";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Category {
    key: String,
    folded: String,
    rules: Vec<Rule>,
}

/// Outcome of matching an item name against the catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Resolution<'a> {
    /// Matched category key, `None` when the fallback sequence applies.
    pub category: Option<&'a str>,
    pub rules: &'a [Rule],
}

/// Immutable mapping from category key to its ordered rule sequence, plus the
/// fallback sequence for names no key matches.
///
/// Matching is case-insensitive and total:
/// 1. a key equal to the whole name wins;
/// 2. otherwise the first key (registration order) contained in the name;
/// 3. otherwise the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCatalog {
    categories: Vec<Category>,
    fallback: Vec<Rule>,
}

impl RuleCatalog {
    pub fn builder() -> RuleCatalogBuilder {
        RuleCatalogBuilder::default()
    }

    /// The shop's catalog: ordinary items as fallback plus the four special
    /// categories, registered in the order they are declared above.
    pub fn standard() -> Self {
        RuleCatalog::builder()
            .category(AGED_BRIE, aged_brie_rules())
            .category(BACKSTAGE_PASSES, backstage_pass_rules())
            .category(SULFURAS, Vec::new())
            .category(CONJURED, conjured_rules())
            .fallback(ordinary_rules())
            .build()
            .expect("standard rule catalog is well-formed")
    }

    pub fn resolve(&self, name: &str) -> Resolution<'_> {
        let folded = name.to_lowercase();

        let matched = self
            .categories
            .iter()
            .find(|c| c.folded == folded)
            .or_else(|| self.categories.iter().find(|c| folded.contains(&c.folded)));

        match matched {
            Some(c) => Resolution {
                category: Some(&c.key),
                rules: &c.rules,
            },
            None => Resolution {
                category: None,
                rules: &self.fallback,
            },
        }
    }

    /// Rules registered under exactly `key` (case-insensitive), without
    /// substring matching.
    pub fn rules_for(&self, key: &str) -> Option<&[Rule]> {
        let folded = key.to_lowercase();
        self.categories
            .iter()
            .find(|c| c.folded == folded)
            .map(|c| c.rules.as_slice())
    }

    pub fn fallback(&self) -> &[Rule] {
        &self.fallback
    }

    /// Category keys in match order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.key.as_str())
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Collects categories in registration order and validates them on `build`.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalogBuilder {
    categories: Vec<(String, Vec<Rule>)>,
    fallback: Vec<Rule>,
}

impl RuleCatalogBuilder {
    pub fn category(mut self, key: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.categories.push((key.into(), rules));
        self
    }

    /// Sequence for unmatched names. Defaults to empty (no change).
    pub fn fallback(mut self, rules: Vec<Rule>) -> Self {
        self.fallback = rules;
        self
    }

    pub fn build(self) -> DomainResult<RuleCatalog> {
        let mut categories: Vec<Category> = Vec::with_capacity(self.categories.len());

        for (key, rules) in self.categories {
            if key.trim().is_empty() {
                return Err(DomainError::validation("category key cannot be empty"));
            }
            let folded = key.to_lowercase();
            if categories.iter().any(|c| c.folded == folded) {
                return Err(DomainError::conflict(format!(
                    "category '{key}' is registered more than once"
                )));
            }
            validate_sequence(&key, &rules)?;
            categories.push(Category { key, folded, rules });
        }

        validate_sequence("fallback", &self.fallback)?;

        Ok(RuleCatalog {
            categories,
            fallback: self.fallback,
        })
    }
}

fn validate_sequence(name: &str, rules: &[Rule]) -> DomainResult<()> {
    for (index, rule) in rules.iter().enumerate() {
        rule.validate().map_err(|e| {
            DomainError::validation(format!("category '{name}', rule {index}: {e}"))
        })?;
    }
    Ok(())
}

fn raise_quality() -> Rule {
    Rule::when(
        [Constraint::lt(ItemField::Quality, MAX_QUALITY)],
        [Action::increment(ItemField::Quality, 1)],
    )
}

fn raise_quality_if(condition: Constraint) -> Rule {
    Rule::when(
        [condition, Constraint::lt(ItemField::Quality, MAX_QUALITY)],
        [Action::increment(ItemField::Quality, 1)],
    )
}

fn lower_quality() -> Rule {
    Rule::when(
        [Constraint::gt(ItemField::Quality, MIN_QUALITY)],
        [Action::decrement(ItemField::Quality, 1)],
    )
}

fn lower_quality_if(condition: Constraint) -> Rule {
    Rule::when(
        [condition, Constraint::gt(ItemField::Quality, MIN_QUALITY)],
        [Action::decrement(ItemField::Quality, 1)],
    )
}

fn age_one_day() -> Rule {
    Rule::always([Action::decrement(ItemField::SellIn, 1)])
}

fn expired() -> Constraint {
    Constraint::lt(ItemField::SellIn, 0)
}

fn ordinary_rules() -> Vec<Rule> {
    vec![lower_quality(), age_one_day(), lower_quality_if(expired())]
}

fn aged_brie_rules() -> Vec<Rule> {
    vec![raise_quality(), age_one_day(), raise_quality_if(expired())]
}

fn backstage_pass_rules() -> Vec<Rule> {
    vec![
        raise_quality(),
        raise_quality_if(Constraint::lt(ItemField::SellIn, 11)),
        raise_quality_if(Constraint::lt(ItemField::SellIn, 6)),
        age_one_day(),
        Rule::when([expired()], [Action::set(ItemField::Quality, MIN_QUALITY)]),
    ]
}

fn conjured_rules() -> Vec<Rule> {
    vec![
        lower_quality(),
        lower_quality(),
        age_one_day(),
        lower_quality_if(expired()),
        lower_quality_if(expired()),
    ]
}
