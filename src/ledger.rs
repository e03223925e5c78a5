// src/ledger.rs
use crate::entry::LogEntry;
use crate::policy::RewardsPolicy;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::io::Write;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
    #[error("daily spend or points for '{customer_id}' overflow (spent so far: {spent})")]
    Overflow { customer_id: String, spent: Decimal },
}

/// Points granted to one customer at the end of a day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Award {
    pub customer_id: String,
    pub spent: Decimal,
    pub rate: u32,
    pub earned: i64,
}

/// What a single `process_day` call did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub entries: usize,
    pub processed: usize,
    pub malformed: usize,
    pub anonymous: usize,
    pub awards: Vec<Award>,
    pub processed_at: DateTime<Utc>,
}

/// Serializable view of the ledger, keys in sorted order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub balances: BTreeMap<String, i64>,
    pub item_counts: BTreeMap<String, u64>,
    pub errors: Vec<LogEntry>,
}

/// Running point balances and item purchase counts across processed days.
#[derive(Debug, Clone, Default)]
pub struct RewardsLedger {
    balances: BTreeMap<String, i64>,
    item_counts: BTreeMap<String, u64>,
    errors: Vec<LogEntry>,
    policy: RewardsPolicy,
}

impl RewardsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: RewardsPolicy) -> Self {
        RewardsLedger {
            policy,
            ..Default::default()
        }
    }

    /// Apply one business day of log entries.
    ///
    /// Redemptions and item counts are applied entry by entry in input order.
    /// Earned points are granted once, after the whole day has been seen,
    /// using the tier selected by each customer's total spend for the day.
    /// Entries without an items list are appended to the error log and
    /// otherwise ignored.
    ///
    /// A batch containing a negative price is rejected as a whole and the
    /// ledger is left untouched.
    pub fn process_day(&mut self, entries: &[LogEntry]) -> Result<DaySummary, LedgerError> {
        for (index, e) in entries.iter().enumerate() {
            e.validate()
                .map_err(|reason| LedgerError::InvalidEntry { index, reason })?;
        }
        // computed up front so an overflow in spend or points fails before anything is mutated
        let awards = self.tally_awards(entries)?;

        let mut summary = DaySummary {
            entries: entries.len(),
            processed: 0,
            malformed: 0,
            anonymous: 0,
            awards: Vec::new(),
            processed_at: Utc::now(),
        };

        for (index, e) in entries.iter().enumerate() {
            let Some(items) = &e.items else {
                warn!(
                    index,
                    customer_id = e.customer_id.as_deref().unwrap_or("-"),
                    "log entry has no items, moved to error log"
                );
                self.errors.push(e.clone());
                summary.malformed += 1;
                continue;
            };

            for li in items {
                *self.item_counts.entry(li.item_id.clone()).or_insert(0) += 1;
            }
            summary.processed += 1;

            match e.customer_id.as_deref() {
                Some(customer_id) => {
                    let balance = self.balances.entry(customer_id.to_string()).or_insert(0);
                    *balance = balance.saturating_sub(i64::from(e.points_used()));
                    debug!(
                        index,
                        customer_id,
                        points_used = e.points_used(),
                        spent = ?e.total_spent(),
                        balance = *balance,
                        "entry applied"
                    );
                }
                None => {
                    summary.anonymous += 1;
                    debug!(index, items = items.len(), "anonymous entry, counting items only");
                }
            }
        }

        for a in &awards {
            let balance = self.balances.entry(a.customer_id.clone()).or_insert(0);
            *balance = balance.saturating_add(a.earned);
        }
        summary.awards = awards;

        info!(
            entries = summary.entries,
            processed = summary.processed,
            malformed = summary.malformed,
            awarded = summary.awards.len(),
            "day processed"
        );
        Ok(summary)
    }

    // Per-customer spend lives only for the duration of one day.
    fn tally_awards(&self, entries: &[LogEntry]) -> Result<Vec<Award>, LedgerError> {
        let mut daily_spend: BTreeMap<&str, Decimal> = BTreeMap::new();
        for e in entries.iter().filter(|e| !e.is_malformed()) {
            if let Some(customer_id) = e.customer_id.as_deref() {
                let spent = daily_spend.entry(customer_id).or_insert(Decimal::ZERO);
                let total = e
                    .total_spent()
                    .and_then(|t| spent.checked_add(t))
                    .ok_or_else(|| LedgerError::Overflow {
                        customer_id: customer_id.to_string(),
                        spent: *spent,
                    })?;
                *spent = total;
            }
        }

        daily_spend
            .into_iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(customer_id, amount)| -> Result<Award, LedgerError> {
                let earned = self
                    .policy
                    .points_for(amount)
                    .to_i64()
                    .ok_or_else(|| LedgerError::Overflow {
                        customer_id: customer_id.to_string(),
                        spent: amount,
                    })?;
                Ok(Award {
                    customer_id: customer_id.to_string(),
                    spent: amount,
                    rate: self.policy.rate_for(amount),
                    earned,
                })
            })
            .collect()
    }

    pub fn get_item_count(&self, item_id: &str) -> u64 {
        self.item_counts.get(item_id).copied().unwrap_or(0)
    }

    pub fn get_balance(&self, customer_id: &str) -> i64 {
        self.balances.get(customer_id).copied().unwrap_or(0)
    }

    pub fn get_errors(&self) -> &[LogEntry] {
        &self.errors
    }

    pub fn policy(&self) -> &RewardsPolicy {
        &self.policy
    }

    pub fn balances(&self) -> impl Iterator<Item = (&str, i64)> {
        self.balances.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn item_counts(&self) -> impl Iterator<Item = (&str, u64)> {
        self.item_counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            balances: self.balances.clone(),
            item_counts: self.item_counts.clone(),
            errors: self.errors.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }

    pub fn to_file<P: AsRef<Path>>(&self, p: P) -> Result<(), io::Error> {
        let json = self
            .to_json()
            .map_err(|e| io::Error::other(e.to_string()))?;
        let mut f = File::create(p)?;
        f.write_all(json.as_bytes())?;
        Ok(())
    }
}
