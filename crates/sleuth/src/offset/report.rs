use serde::Serialize;

use super::Resolution;
use crate::error::{Error, Result};
use crate::schema::literal::format_hex;

/// Per-name outcome of resolving a whole profile, in profile order.
#[derive(Debug, Default)]
pub struct ResolutionReport {
    entries: Vec<(String, Result<Resolution>)>,
}

/// Flat, serialisable view of one report entry.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub offset: Option<String>,
    pub size: Option<u64>,
    pub source: Option<String>,
    pub error: Option<String>,
}

impl ResolutionReport {
    pub(crate) fn push(&mut self, name: &str, outcome: Result<Resolution>) {
        self.entries.push((name.to_string(), outcome));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Result<Resolution>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| outcome)
    }

    pub fn offset_of(&self, name: &str) -> Option<u64> {
        match self.get(name) {
            Some(Ok(resolution)) => Some(resolution.offset),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<Resolution>)> {
        self.entries.iter().map(|(n, outcome)| (n.as_str(), outcome))
    }

    pub fn successes(&self) -> impl Iterator<Item = (&str, &Resolution)> {
        self.iter()
            .filter_map(|(n, outcome)| outcome.as_ref().ok().map(|r| (n, r)))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &Error)> {
        self.iter()
            .filter_map(|(n, outcome)| outcome.as_ref().err().map(|e| (n, e)))
    }

    /// Whether every structure resolved.
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        self.iter()
            .map(|(name, outcome)| match outcome {
                Ok(r) => ReportRow {
                    name: name.to_string(),
                    offset: Some(format_hex(r.offset)),
                    size: r.size,
                    source: Some(r.source.to_string()),
                    error: None,
                },
                Err(e) => ReportRow {
                    name: name.to_string(),
                    offset: None,
                    size: None,
                    source: None,
                    error: Some(e.to_string()),
                },
            })
            .collect()
    }
}
