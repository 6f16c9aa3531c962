use anyhow::Result;
use serde::Serialize;

use crate::cli::Args;
use crate::i18n::Catalog;
use crate::screen::UsageScreen;
use crate::store::ProfileStore;
use crate::usage::{format_value, DisplayMode};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput {
    version: u8,
    mode: DisplayMode,
    title: String,
    total: u64,
    total_display: String,
    entries: Vec<JsonEntry>,
    meta: JsonMeta,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry {
    domain: String,
    value: u64,
    display: String,
    allowlisted: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonMeta {
    profile: String,
    entries_count: usize,
    filtered: bool,
    removed_all: bool,
    dry_run: bool,
}

pub fn run(args: &Args, catalog: &Catalog) -> Result<()> {
    let profile = args.effective_profile();
    let store = ProfileStore::open(&profile, &args.effective_allowlist(), args.dry_run);
    let mut screen = UsageScreen::new(args.mode, store);
    screen.load();

    if args.remove_all {
        screen.remove_all();
    }
    if let Some(search) = &args.search {
        screen.set_search(search);
    }

    let output = build_output(&screen, catalog, args.remove_all, args.dry_run);
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn build_output(
    screen: &UsageScreen<ProfileStore>,
    catalog: &Catalog,
    removed_all: bool,
    dry_run: bool,
) -> JsonOutput {
    let mode = screen.mode();
    let store = screen.store();

    let entries: Vec<JsonEntry> = screen
        .section_entries()
        .iter()
        .map(|entry| JsonEntry {
            domain: entry.key.clone(),
            value: entry.value,
            display: format_value(mode, entry.value),
            allowlisted: store.is_allowlisted(&entry.key),
        })
        .collect();

    let total = screen.total();
    JsonOutput {
        version: 1,
        mode,
        title: screen.title(catalog),
        total,
        total_display: format_value(mode, total),
        meta: JsonMeta {
            profile: store.root().to_string_lossy().to_string(),
            entries_count: entries.len(),
            filtered: screen.is_filtering(),
            removed_all,
            dry_run,
        },
        entries,
    }
}
