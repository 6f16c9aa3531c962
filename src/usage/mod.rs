mod format;
mod size;

pub use format::format_value;
pub use size::file_size;

use std::collections::HashMap;

use clap::ValueEnum;
use serde::Serialize;

use crate::store::{normalize_domain, SiteDataStore};

/// What the per-domain metric counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    /// Number of cookies per domain
    #[default]
    Cookies,
    /// Bytes of local-storage files per domain
    #[value(name = "storage", alias = "local-storage")]
    LocalStorage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageEntry {
    pub key: String,
    pub value: u64,
}

impl UsageEntry {
    pub fn new(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Scan `store` once and sum the metric for `mode` per domain, largest first.
///
/// Ties come out in no particular order.
pub fn aggregate<S: SiteDataStore + ?Sized>(mode: DisplayMode, store: &S) -> Vec<UsageEntry> {
    let mut totals: HashMap<String, u64> = HashMap::new();

    match mode {
        DisplayMode::Cookies => {
            for cookie in store.cookies() {
                let domain = normalize_domain(&cookie.domain);
                *totals.entry(domain.to_string()).or_insert(0) += 1;
            }
        }
        DisplayMode::LocalStorage => {
            for item in store.local_storage_files() {
                let size = file_size(&item.path).unwrap_or(0);
                let total = totals.entry(item.domain).or_insert(0);
                *total = total.saturating_add(size);
            }
        }
    }

    let mut entries: Vec<UsageEntry> = totals
        .into_iter()
        .map(|(key, value)| UsageEntry::new(key, value))
        .collect();
    entries.sort_by(|a, b| b.value.cmp(&a.value));

    tracing::debug!(?mode, domains = entries.len(), "aggregated site data");
    entries
}
