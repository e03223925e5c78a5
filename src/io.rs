// src/io.rs
use crate::entry::LogEntry;
use crate::policy::{PolicyError, RewardsPolicy};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<PolicyError> for LoadError {
    fn from(e: PolicyError) -> Self {
        LoadError::Parse(e.to_string())
    }
}

/// A log file holds either a single day or a list of days.
#[derive(Deserialize)]
#[serde(untagged)]
enum DayFile {
    Days(Vec<Vec<LogEntry>>),
    Day(Vec<LogEntry>),
}

fn read_json<P: AsRef<Path>>(path: P) -> Result<String, LoadError> {
    let p = path.as_ref();
    let ext = p
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext != "json" {
        return Err(LoadError::Parse(format!("unsupported extension: {}", ext)));
    }
    Ok(fs::read_to_string(p)?)
}

/// Load one or more days of log entries, in file order.
pub fn load_days<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<LogEntry>>, LoadError> {
    let content = read_json(path)?;
    parse_days(&content)
}

pub fn parse_days(content: &str) -> Result<Vec<Vec<LogEntry>>, LoadError> {
    match serde_json::from_str(content)? {
        DayFile::Days(days) => Ok(days),
        DayFile::Day(day) => Ok(vec![day]),
    }
}

pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<RewardsPolicy, LoadError> {
    let content = read_json(path)?;
    let policy: RewardsPolicy = serde_json::from_str(&content)?;
    policy.validate()?;
    Ok(policy)
}
