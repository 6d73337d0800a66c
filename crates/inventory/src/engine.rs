//! Rule engine: advances items one simulated day.

use crate::catalog::RuleCatalog;
use crate::item::Item;

/// Evaluates catalog rules against items.
///
/// Rules in a sequence run in order against the item's *current* state: a rule
/// observes every mutation made by the rules before it in the same pass. The
/// sequence is resolved once per item per pass.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    catalog: RuleCatalog,
}

impl RuleEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// One update pass: every item advances one day.
    pub fn advance_day(&self, items: &mut [Item]) {
        tracing::debug!(items = items.len(), "advancing inventory one day");
        for item in items.iter_mut() {
            self.apply_rules(item);
        }
    }

    pub fn advance_days(&self, items: &mut [Item], days: u32) {
        for _ in 0..days {
            self.advance_day(items);
        }
    }

    /// Runs the item's resolved rule sequence once.
    pub fn apply_rules(&self, item: &mut Item) {
        let resolution = self.catalog.resolve(&item.name);
        tracing::trace!(
            item = %item.name,
            category = resolution.category.unwrap_or("fallback"),
            rules = resolution.rules.len(),
            "resolved rule sequence"
        );

        for (index, rule) in resolution.rules.iter().enumerate() {
            if !rule.fires_for(item) {
                continue;
            }
            rule.apply_actions(item);
            tracing::trace!(
                item = %item.name,
                rule = index,
                sell_in = item.sell_in,
                quality = item.quality,
                "rule fired"
            );
        }
    }
}

/// The shop's inventory together with the engine that ages it.
#[derive(Debug, Clone, Default)]
pub struct GildedRose {
    items: Vec<Item>,
    engine: RuleEngine,
}

impl GildedRose {
    /// Inventory governed by the standard catalog.
    pub fn new(items: Vec<Item>) -> Self {
        Self::with_engine(items, RuleEngine::default())
    }

    pub fn with_engine(items: Vec<Item>, engine: RuleEngine) -> Self {
        Self { items, engine }
    }

    /// Advances every item one day and returns the updated inventory.
    pub fn update_quality(&mut self) -> &[Item] {
        self.engine.advance_day(&mut self.items);
        &self.items
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<Item> {
        &mut self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AGED_BRIE, CONJURED};
    use crate::item::{ItemField, MAX_QUALITY, MIN_QUALITY};
    use crate::rule::{Action, Constraint, Rule};
    use proptest::prelude::*;

    fn advance(name: &str, sell_in: i64, quality: i64) -> (i64, i64) {
        let mut item = Item::new(name, sell_in, quality);
        RuleEngine::default().apply_rules(&mut item);
        (item.sell_in, item.quality)
    }

    #[test]
    fn ordinary_item_loses_one_before_expiry() {
        assert_eq!(advance("+5 Dexterity Vest", 10, 20), (9, 19));
    }

    #[test]
    fn ordinary_item_loses_two_on_expiry_day() {
        // sell_in 0 decrements to -1, so the post-decrement rule fires too.
        assert_eq!(advance("+5 Dexterity Vest", 0, 10), (-1, 8));
    }

    #[test]
    fn ordinary_item_never_drops_below_zero() {
        assert_eq!(advance("Elixir of the Mongoose", -3, 1), (-4, 0));
        assert_eq!(advance("Elixir of the Mongoose", -3, 0), (-4, 0));
    }

    #[test]
    fn aged_brie_gains_two_after_expiry_up_to_cap() {
        assert_eq!(advance("Aged Brie", 0, 10), (-1, 12));
        assert_eq!(advance("Aged Brie", 0, 49), (-1, 50));
        assert_eq!(advance("Aged Brie", 5, 50), (4, 50));
    }

    #[test]
    fn backstage_pass_thresholds_read_pre_decrement_sell_in() {
        let name = "Backstage passes to a TAFKAL80ETC concert";
        assert_eq!(advance(name, 11, 20), (10, 21));
        assert_eq!(advance(name, 10, 20), (9, 22));
        assert_eq!(advance(name, 6, 20), (5, 22));
        assert_eq!(advance(name, 5, 20), (4, 23));
        assert_eq!(advance(name, 1, 20), (0, 23));
        assert_eq!(advance(name, 0, 20), (-1, 0));
        assert_eq!(advance(name, 3, 49), (2, 50));
    }

    #[test]
    fn legendary_item_is_untouched() {
        assert_eq!(advance("Sulfuras, Hand of Ragnaros", 0, 80), (0, 80));
        assert_eq!(advance("Sulfuras, Hand of Ragnaros", -1, 80), (-1, 80));
    }

    #[test]
    fn conjured_item_decays_twice_as_fast() {
        assert_eq!(advance("Conjured Mana Cake", 3, 6), (2, 4));
        assert_eq!(advance("Conjured Mana Cake", 0, 6), (-1, 2));
        assert_eq!(advance("Conjured Mana Cake", 0, 3), (-1, 0));
        assert_eq!(advance("Conjured Mana Cake", 5, 1), (4, 0));
    }

    #[test]
    fn later_rules_observe_earlier_mutations() {
        let catalog = RuleCatalog::builder()
            .category(
                "Ladder",
                vec![
                    Rule::always([Action::set(ItemField::Quality, 1)]),
                    Rule::when(
                        [Constraint::lt(ItemField::Quality, 2)],
                        [Action::increment(ItemField::Quality, 10)],
                    ),
                    Rule::when(
                        [Constraint::gt(ItemField::Quality, 10)],
                        [Action::decrement(ItemField::SellIn, 5)],
                    ),
                ],
            )
            .build()
            .unwrap();

        let mut item = Item::new("Ladder", 0, 40);
        RuleEngine::new(catalog).apply_rules(&mut item);
        assert_eq!((item.sell_in, item.quality), (-5, 11));
    }

    #[test]
    fn advance_day_updates_every_item_in_place() {
        let mut items = vec![
            Item::new("+5 Dexterity Vest", 10, 20),
            Item::new("Aged Brie", 2, 0),
            Item::new("Sulfuras, Hand of Ragnaros", 0, 80),
        ];
        RuleEngine::default().advance_day(&mut items);
        assert_eq!(
            items,
            vec![
                Item::new("+5 Dexterity Vest", 9, 19),
                Item::new("Aged Brie", 1, 1),
                Item::new("Sulfuras, Hand of Ragnaros", 0, 80),
            ]
        );
    }

    #[test]
    fn advance_days_matches_repeated_single_days() {
        let engine = RuleEngine::default();
        let mut stepped = vec![Item::new(CONJURED, 4, 30), Item::new(AGED_BRIE, 1, 45)];
        let mut batched = stepped.clone();

        for _ in 0..7 {
            engine.advance_day(&mut stepped);
        }
        engine.advance_days(&mut batched, 7);

        assert_eq!(stepped, batched);
    }

    #[test]
    fn update_quality_returns_the_shop_items() {
        let mut shop = GildedRose::new(vec![Item::new("foo", 0, 0)]);
        let items = shop.update_quality();
        assert_eq!(items, &[Item::new("foo", -1, 0)]);
        assert_eq!(shop.into_items(), vec![Item::new("foo", -1, 0)]);
    }

    #[test]
    fn items_added_later_are_aged_too() {
        let mut shop = GildedRose::default();
        shop.items_mut().push(Item::new("Aged Brie", 3, 7));
        shop.update_quality();
        assert_eq!(shop.items(), &[Item::new("Aged Brie", 2, 8)]);
    }

    fn category_name() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("+5 Dexterity Vest"),
            Just("Elixir of the Mongoose"),
            Just("Aged Brie"),
            Just("Backstage passes to a TAFKAL80ETC concert"),
            Just("Conjured Mana Cake"),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: quality that starts within bounds stays within bounds.
        #[test]
        fn quality_stays_within_bounds(
            name in category_name(),
            sell_in in -20i64..30,
            quality in MIN_QUALITY..=MAX_QUALITY,
            days in 1u32..60,
        ) {
            let engine = RuleEngine::default();
            let mut items = vec![Item::new(name, sell_in, quality)];
            for _ in 0..days {
                engine.advance_day(&mut items);
                prop_assert!((MIN_QUALITY..=MAX_QUALITY).contains(&items[0].quality));
            }
            prop_assert_eq!(items[0].sell_in, sell_in - i64::from(days));
        }

        /// Property: the legendary item never changes, whatever its fields.
        #[test]
        fn legendary_item_never_changes(
            sell_in in any::<i64>(),
            quality in any::<i64>(),
            days in 1u32..100,
        ) {
            let mut items = vec![Item::new("Sulfuras, Hand of Ragnaros", sell_in, quality)];
            RuleEngine::default().advance_days(&mut items, days);
            prop_assert_eq!(&items[0], &Item::new("Sulfuras, Hand of Ragnaros", sell_in, quality));
        }

        /// Property: same input + same day count = same output.
        #[test]
        fn update_is_deterministic(
            name in category_name(),
            sell_in in -50i64..50,
            quality in -10i64..80,
            days in 0u32..40,
        ) {
            let engine = RuleEngine::default();
            let frozen = engine.catalog().clone();

            let mut first = vec![Item::new(name, sell_in, quality)];
            let mut second = first.clone();
            engine.advance_days(&mut first, days);
            RuleEngine::new(frozen).advance_days(&mut second, days);

            prop_assert_eq!(first, second);
        }
    }
}
