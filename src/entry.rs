// src/entry.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A sellable product and its current shelf price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub item_id: String,
    pub price: Decimal,
}

impl Item {
    pub fn new(item_id: impl Into<String>, price: Decimal) -> Self {
        Item {
            item_id: item_id.into(),
            price,
        }
    }

    /// One purchased unit of this item, priced as of now.
    pub fn line_item(&self) -> LineItem {
        LineItem {
            item_id: self.item_id.clone(),
            price: self.price,
        }
    }
}

/// One unit of an item as it was rung up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineItem {
    pub item_id: String,
    pub price: Decimal,
}

impl LineItem {
    pub fn validate(&self) -> Result<(), String> {
        if self.price < Decimal::ZERO {
            return Err(format!(
                "price for item '{}' must be >= 0, got {}",
                self.item_id, self.price
            ));
        }
        Ok(())
    }
}

/// A single customer interaction from the day's log.
///
/// Every field may be missing in the source log. `None` for `items` marks the
/// entry as malformed; the other two have fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEntry {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub points_used: Option<u32>,
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
}

impl LogEntry {
    pub fn new(
        customer_id: Option<&str>,
        points_used: Option<u32>,
        items: Option<Vec<LineItem>>,
    ) -> Self {
        LogEntry {
            customer_id: customer_id.map(str::to_string),
            points_used,
            items,
        }
    }

    pub fn is_malformed(&self) -> bool {
        self.items.is_none()
    }

    pub fn points_used(&self) -> u32 {
        self.points_used.unwrap_or(0)
    }

    /// Sum of the unit prices on this entry, `None` if it overflows.
    /// Malformed entries spend nothing.
    pub fn total_spent(&self) -> Option<Decimal> {
        self.items
            .iter()
            .flatten()
            .try_fold(Decimal::ZERO, |acc, li| acc.checked_add(li.price))
    }

    /// Shape checks that cannot be absorbed as a malformed entry.
    pub fn validate(&self) -> Result<(), String> {
        for li in self.items.iter().flatten() {
            li.validate()?;
        }
        Ok(())
    }
}
