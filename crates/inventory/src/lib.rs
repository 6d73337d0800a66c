//! Inventory ageing domain module.
//!
//! Items are advanced one simulated day at a time by a declarative rule engine:
//! each category owns an ordered sequence of condition/action rules, evaluated
//! against the item's current state (no IO, no storage).

pub mod catalog;
pub mod engine;
pub mod item;
pub mod rule;

pub use catalog::{
    AGED_BRIE, BACKSTAGE_PASSES, CONJURED, Resolution, RuleCatalog, RuleCatalogBuilder, SULFURAS,
};
pub use engine::{GildedRose, RuleEngine};
pub use item::{Item, ItemField, MAX_QUALITY, MIN_QUALITY};
pub use rule::{Action, Comparator, Constraint, Operation, Rule};
