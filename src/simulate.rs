// src/simulate.rs
use crate::entry::{Item, LogEntry};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;

fn catalog() -> Vec<Item> {
    vec![
        Item::new("banana", Decimal::from(50)),
        Item::new("apple", Decimal::from(100)),
        Item::new("bread", Decimal::new(450, 2)),
        Item::new("coffee", Decimal::new(1299, 2)),
        Item::new("cheese", Decimal::new(2375, 2)),
    ]
}

/// The two-customer Banana/Apple day used throughout the docs and tests.
pub fn worked_example() -> Vec<LogEntry> {
    let banana = Item::new("banana", Decimal::from(50));
    let apple = Item::new("apple", Decimal::from(100));
    vec![
        LogEntry::new(
            Some("cust1"),
            Some(100),
            Some(vec![banana.line_item(), banana.line_item(), apple.line_item()]),
        ),
        LogEntry::new(
            Some("cust2"),
            Some(0),
            Some(vec![banana.line_item(), apple.line_item()]),
        ),
        LogEntry::new(Some("cust1"), Some(0), Some(vec![banana.line_item()])),
    ]
}

/// Deterministic synthetic day of `n` log entries.
///
/// Roughly one entry in ten has no items, one in eight has no customer and
/// one in four omits `points_used`.
pub fn generate_day(seed: u64, n: usize) -> Vec<LogEntry> {
    let mut rng = StdRng::seed_from_u64(seed);
    let items = catalog();
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let customer_id = if rng.gen_ratio(1, 8) {
            None
        } else {
            Some(format!("c{}", rng.gen_range(1..=6)))
        };
        let points_used = if rng.gen_ratio(1, 4) {
            None
        } else {
            Some(rng.gen_range(0..=30))
        };
        let basket = if rng.gen_ratio(1, 10) {
            None
        } else {
            let units = rng.gen_range(0..=6);
            Some(
                (0..units)
                    .map(|_| items[rng.gen_range(0..items.len())].line_item())
                    .collect(),
            )
        };
        out.push(LogEntry {
            customer_id,
            points_used,
            items: basket,
        });
    }
    out
}

pub fn generate_days(seed: u64, days: usize, n: usize) -> Vec<Vec<LogEntry>> {
    (0..days as u64)
        .map(|d| generate_day(seed.wrapping_add(d), n))
        .collect()
}
