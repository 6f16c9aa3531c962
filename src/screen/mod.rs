//! Per-domain usage list: the loaded list, the search filter, the "show all"
//! expansion, and the delete / remove-all commands that write through to the
//! store.

use crate::i18n::{Catalog, Label};
use crate::store::SiteDataStore;
use crate::usage::{aggregate, format_value, DisplayMode, UsageEntry};

/// Rows shown while collapsed: the top entries plus the "show all" row.
pub const SHORTLIST_ROWS: usize = 11;
const SHORTLIST_ENTRIES: usize = SHORTLIST_ROWS - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Domain rows, possibly followed by the "show all" row
    Data,
    /// The single "remove all" row
    Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row<'a> {
    Entry(&'a UsageEntry),
    ShowAll,
    RemoveAll,
}

/// What selecting a row did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Expanded,
    RemovedAll,
    Ignored,
}

pub struct UsageScreen<S> {
    mode: DisplayMode,
    store: S,
    data: Option<Vec<UsageEntry>>,
    filtered: Vec<UsageEntry>,
    search: String,
    show_shortlist: bool,
}

impl<S: SiteDataStore> UsageScreen<S> {
    pub const fn new(mode: DisplayMode, store: S) -> Self {
        Self {
            mode,
            store,
            data: None,
            filtered: Vec::new(),
            search: String::new(),
            show_shortlist: true,
        }
    }

    pub const fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Read the store once. Later calls are no-ops: after loading, the list
    /// only changes through `delete` and `remove_all`.
    pub fn load(&mut self) {
        if !self.is_loaded() {
            let entries = aggregate(self.mode, &self.store);
            tracing::info!(mode = ?self.mode, domains = entries.len(), "loaded usage list");
            self.data = Some(entries);
        }
    }

    pub const fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// Full sorted list (empty until loaded).
    pub fn entries(&self) -> &[UsageEntry] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_filtering(&self) -> bool {
        !self.search.is_empty()
    }

    /// Replace the search text and recompute the filtered list from scratch.
    pub fn set_search(&mut self, text: &str) {
        self.load();
        text.clone_into(&mut self.search);

        if self.search.is_empty() {
            self.filtered.clear();
        } else {
            let needle = self.search.to_lowercase();
            self.filtered = self
                .entries()
                .iter()
                .filter(|e| e.key.to_lowercase().contains(&needle))
                .cloned()
                .collect();
        }

        tracing::trace!(search = %self.search, matches = self.filtered.len(), "search updated");
    }

    /// The list backing the data section: the filtered list while a search
    /// is active, the full list otherwise. Never truncated.
    pub fn section_entries(&self) -> &[UsageEntry] {
        if self.is_filtering() {
            &self.filtered
        } else {
            self.entries()
        }
    }

    fn is_truncated(&self) -> bool {
        !self.is_filtering() && self.show_shortlist && self.entries().len() > SHORTLIST_ROWS
    }

    pub fn row_count(&self, section: Section) -> usize {
        match section {
            Section::Data if self.is_truncated() => SHORTLIST_ROWS,
            Section::Data => self.section_entries().len(),
            Section::Action => 1,
        }
    }

    pub fn row(&self, section: Section, index: usize) -> Option<Row<'_>> {
        match section {
            Section::Action => (index == 0).then_some(Row::RemoveAll),
            Section::Data if self.is_truncated() && index == SHORTLIST_ENTRIES => {
                Some(Row::ShowAll)
            }
            Section::Data if index >= self.row_count(Section::Data) => None,
            Section::Data => self.section_entries().get(index).map(Row::Entry),
        }
    }

    /// Sum of the list backing the data section.
    pub fn total(&self) -> u64 {
        self.section_entries()
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.value))
    }

    pub fn title(&self, catalog: &Catalog) -> String {
        catalog.text(Label::title(self.mode)).to_string()
    }

    /// Data section header: uppercased title and formatted total.
    pub fn header(&self, catalog: &Catalog) -> (String, String) {
        (
            self.title(catalog).to_uppercase(),
            format_value(self.mode, self.total()),
        )
    }

    /// Primary and secondary label for a row.
    pub fn row_labels(&self, row: Row<'_>, catalog: &Catalog) -> (String, Option<String>) {
        match row {
            Row::Entry(entry) => (entry.key.clone(), Some(format_value(self.mode, entry.value))),
            Row::ShowAll => (catalog.text(Label::ShowAllSites).to_string(), None),
            Row::RemoveAll => (catalog.text(Label::remove_all(self.mode)).to_string(), None),
        }
    }

    pub fn can_delete(&self, section: Section, index: usize) -> bool {
        matches!(self.row(section, index), Some(Row::Entry(_)))
    }

    /// Purge the domain on an entry row and drop it from the local lists.
    /// Returns the removed entry, or `None` if the row is not deletable.
    pub fn delete(&mut self, section: Section, index: usize) -> Option<UsageEntry> {
        if !self.can_delete(section, index) {
            return None;
        }
        let key = self.section_entries()[index].key.clone();

        self.store.purge_domain(&key);

        let removed = if self.is_filtering() {
            let removed = self.filtered.remove(index);
            if let Some(data) = self.data.as_mut() {
                data.retain(|e| e.key != key);
            }
            removed
        } else {
            self.data.as_mut()?.remove(index)
        };

        tracing::info!(domain = %removed.key, value = removed.value, "deleted site data");
        Some(removed)
    }

    pub fn show_all(&mut self) {
        self.show_shortlist = false;
    }

    /// Purge everything the store does not protect and empty the list.
    ///
    /// The filtered list is left as is; a search active at this point keeps
    /// showing its matches until the search text changes.
    pub fn remove_all(&mut self) {
        self.store.purge_all_except_allowlisted();
        let removed = self.data.as_ref().map_or(0, Vec::len);
        self.data = Some(Vec::new());
        tracing::info!(domains = removed, "removed all site data");
    }

    pub fn select(&mut self, section: Section, index: usize) -> Selection {
        match self.row(section, index) {
            Some(Row::ShowAll) => {
                self.show_all();
                Selection::Expanded
            }
            Some(Row::RemoveAll) => {
                self.remove_all();
                Selection::RemovedAll
            }
            Some(Row::Entry(_)) | None => Selection::Ignored,
        }
    }
}
