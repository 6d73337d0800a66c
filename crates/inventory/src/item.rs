use serde::{Deserialize, Serialize};

use gildedrose_core::ValueObject;

/// Lowest quality any decaying item can reach.
pub const MIN_QUALITY: i64 = 0;

/// Highest quality any appreciating item can reach.
pub const MAX_QUALITY: i64 = 50;

/// Mutable numeric field of an [`Item`] that rules can read and write.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    /// Days remaining before the item expires. May go negative.
    SellIn,
    /// Value of the item.
    Quality,
}

impl ItemField {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemField::SellIn => "sell_in",
            ItemField::Quality => "quality",
        }
    }
}

impl core::fmt::Display for ItemField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inventory item: a name plus the two fields advanced once per day.
///
/// Items carry no identity beyond their fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub sell_in: i64,
    pub quality: i64,
}

impl ValueObject for Item {}

impl Item {
    pub fn new(name: impl Into<String>, sell_in: i64, quality: i64) -> Self {
        Self {
            name: name.into(),
            sell_in,
            quality,
        }
    }

    pub fn get(&self, field: ItemField) -> i64 {
        match field {
            ItemField::SellIn => self.sell_in,
            ItemField::Quality => self.quality,
        }
    }

    pub(crate) fn get_mut(&mut self, field: ItemField) -> &mut i64 {
        match field {
            ItemField::SellIn => &mut self.sell_in,
            ItemField::Quality => &mut self.quality,
        }
    }
}

impl core::fmt::Display for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, {}, {}", self.name, self.sell_in, self.quality)
    }
}
