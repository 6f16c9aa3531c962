use crate::i18n::Catalog;
use crate::screen::{Row, Section, Selection, UsageScreen};
use crate::store::SiteDataStore;
use crate::usage::format_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
}

/// Ticks a status message stays on screen (~3s at 100ms per tick).
const STATUS_TICKS: usize = 30;

pub struct App<S> {
    pub screen: UsageScreen<S>,
    pub catalog: Catalog,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub mode: Mode,
    pub visible_height: usize,
    pub status: Option<String>,
    status_ttl: usize,
}

impl<S: SiteDataStore> App<S> {
    pub fn new(mut screen: UsageScreen<S>, catalog: Catalog) -> Self {
        screen.load();
        Self {
            screen,
            catalog,
            cursor: 0,
            scroll_offset: 0,
            mode: Mode::Normal,
            visible_height: 20,
            status: None,
            status_ttl: 0,
        }
    }

    /// Data rows followed by the action row.
    pub fn row_count(&self) -> usize {
        self.screen.row_count(Section::Data) + self.screen.row_count(Section::Action)
    }

    /// Section and in-section index of a flat row position.
    pub fn locate(&self, position: usize) -> (Section, usize) {
        let data_rows = self.screen.row_count(Section::Data);
        if position < data_rows {
            (Section::Data, position)
        } else {
            (Section::Action, position - data_rows)
        }
    }

    pub fn row_at(&self, position: usize) -> Option<Row<'_>> {
        let (section, index) = self.locate(position);
        self.screen.row(section, index)
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let max_pos = self.row_count().saturating_sub(1);
        self.cursor = if delta >= 0 {
            #[allow(clippy::cast_sign_loss)] // Checked: delta >= 0
            self.cursor.saturating_add(delta as usize).min(max_pos)
        } else {
            self.cursor.saturating_sub(delta.unsigned_abs())
        };
        self.adjust_scroll();
    }

    /// Move cursor by a full page (up or down).
    pub fn move_cursor_by_page(&mut self, down: bool) {
        let max_pos = self.row_count().saturating_sub(1);
        self.cursor = if down {
            self.cursor.saturating_add(self.visible_height).min(max_pos)
        } else {
            self.cursor.saturating_sub(self.visible_height)
        };
        self.adjust_scroll();
    }

    pub fn cursor_to_top(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn cursor_to_bottom(&mut self) {
        self.cursor = self.row_count().saturating_sub(1);
        self.adjust_scroll();
    }

    /// Rows that fit in the list. One line is held back for the blank
    /// separator above the action row whenever there are data rows.
    pub fn rows_in_view(&self) -> usize {
        if self.screen.row_count(Section::Data) > 0 {
            self.visible_height.saturating_sub(1)
        } else {
            self.visible_height
        }
    }

    fn adjust_scroll(&mut self) {
        let view = self.rows_in_view();
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if view > 0 && self.cursor >= self.scroll_offset + view {
            self.scroll_offset = self.cursor + 1 - view;
        }
    }

    /// Keep the cursor on a real row after the row count changed.
    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.row_count().saturating_sub(1));
        self.adjust_scroll();
    }

    pub fn select_current(&mut self) -> Selection {
        let (section, index) = self.locate(self.cursor);
        let selection = self.screen.select(section, index);
        if selection == Selection::RemovedAll {
            self.set_status("Removed all site data".to_string());
            self.clamp_cursor();
        }
        selection
    }

    pub fn delete_current(&mut self) -> bool {
        let (section, index) = self.locate(self.cursor);
        match self.screen.delete(section, index) {
            Some(entry) => {
                let freed = format_value(self.screen.mode(), entry.value);
                self.set_status(format!("Removed {} ({freed})", entry.key));
                self.clamp_cursor();
                true
            }
            None => false,
        }
    }

    pub fn enter_search(&mut self) {
        self.mode = Mode::Search;
        self.update_search("");
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut text = self.screen.search().to_string();
        text.push(c);
        self.update_search(&text);
    }

    pub fn pop_search_char(&mut self) {
        let mut text = self.screen.search().to_string();
        text.pop();
        self.update_search(&text);
    }

    pub fn cancel_search(&mut self) {
        self.mode = Mode::Normal;
        self.update_search("");
    }

    pub fn confirm_search(&mut self) {
        self.mode = Mode::Normal;
    }

    fn update_search(&mut self, text: &str) {
        self.screen.set_search(text);
        self.cursor_to_top();
    }

    fn set_status(&mut self, message: String) {
        self.status = Some(message);
        self.status_ttl = STATUS_TICKS;
    }

    pub fn on_tick(&mut self) {
        if self.status_ttl > 0 {
            self.status_ttl -= 1;
            if self.status_ttl == 0 {
                self.status = None;
            }
        }
    }
}
