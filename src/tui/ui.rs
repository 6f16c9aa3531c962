use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use super::app::{App, Mode};
use crate::screen::{Row, Section};
use crate::store::SiteDataStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Entry,
    ShowAll,
    RemoveAll,
}

impl From<Row<'_>> for RowKind {
    fn from(row: Row<'_>) -> Self {
        match row {
            Row::Entry(_) => Self::Entry,
            Row::ShowAll => Self::ShowAll,
            Row::RemoveAll => Self::RemoveAll,
        }
    }
}

/// Determines the style for a row based on its kind and the cursor.
fn row_style(is_cursor: bool, kind: RowKind) -> Style {
    if is_cursor {
        let bg = match kind {
            RowKind::RemoveAll => Color::Red,
            RowKind::Entry | RowKind::ShowAll => Color::Blue,
        };
        Style::default()
            .bg(bg)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        match kind {
            RowKind::Entry => Style::default(),
            RowKind::ShowAll => Style::default().fg(Color::LightBlue),
            RowKind::RemoveAll => Style::default().fg(Color::Red),
        }
    }
}

pub fn draw<S: SiteDataStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Rows
            Constraint::Length(3), // Footer/Status
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_rows(frame, app, chunks[1]);
    draw_footer(frame, app, chunks[2]);
}

fn draw_header<S: SiteDataStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let screen = &app.screen;
    let (_, total) = screen.header(&app.catalog);

    let prefix = format!(
        " site-sweep | {} | {} sites | {} total",
        screen.title(&app.catalog),
        screen.entries().len(),
        total,
    );

    let base_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = vec![Span::styled(prefix, base_style)];

    if screen.is_filtering() {
        spans.push(Span::styled(
            format!(" | filter: {} ", screen.search()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn draw_rows<S: SiteDataStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    // Split area: section header row + list
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title + section header
            Constraint::Min(1),    // Rows
        ])
        .split(area);

    let title = match app.mode {
        Mode::Search => format!(" Sites (search: {}_) ", app.screen.search()),
        Mode::Normal => " Sites - ENTER to select, SPACE to delete ".to_string(),
    };

    let inner_width = area.width.saturating_sub(2) as usize; // -2 for borders
    let value_width = 12;
    let label_width = inner_width.saturating_sub(value_width + 1);

    let (section_title, total) = app.screen.header(&app.catalog);
    let header_line = format!("{section_title:<label_width$} {total:>value_width$}");

    let header = Paragraph::new(Line::from(vec![Span::styled(
        header_line,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )]))
    .block(
        Block::default()
            .title(title)
            .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(header, chunks[0]);

    let items = build_list_items(app, label_width, value_width);
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::BOTTOM | Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(list, chunks[1]);
}

/// Visible slice of data rows and the action row, separated by a blank line.
fn build_list_items<S: SiteDataStore>(
    app: &App<S>,
    label_width: usize,
    value_width: usize,
) -> Vec<ListItem<'static>> {
    let data_rows = app.screen.row_count(Section::Data);

    (app.scroll_offset..app.row_count())
        .take(app.rows_in_view())
        .filter_map(|position| app.row_at(position).map(|row| (position, row)))
        .flat_map(|(position, row)| {
            let mut items = Vec::with_capacity(2);
            if position == data_rows && data_rows > 0 {
                items.push(ListItem::new(Line::from("")));
            }
            items.push(build_row_item(
                app,
                row,
                position == app.cursor,
                label_width,
                value_width,
            ));
            items
        })
        .collect()
}

fn build_row_item<S: SiteDataStore>(
    app: &App<S>,
    row: Row<'_>,
    is_cursor: bool,
    label_width: usize,
    value_width: usize,
) -> ListItem<'static> {
    let kind = RowKind::from(row);
    let (label, value) = app.screen.row_labels(row, &app.catalog);

    let line_content = match value {
        Some(value) => format!("{label:<label_width$} {value:>value_width$}"),
        None if kind == RowKind::RemoveAll => {
            let width = label_width + value_width + 1;
            format!("{label:^width$}")
        }
        None => label,
    };

    ListItem::new(Line::from(Span::styled(
        line_content,
        row_style(is_cursor, kind),
    )))
}

fn draw_footer<S: SiteDataStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let help_text = match (&app.status, app.mode) {
        (Some(status), _) => status.clone(),
        (None, Mode::Normal) => {
            "↑/↓:nav | ENTER:select | SPACE:delete | /:search | q:quit".to_string()
        }
        (None, Mode::Search) => "Type to filter | Enter:confirm | Esc:clear".to_string(),
    };

    let style = if app.status.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let footer = Paragraph::new(help_text)
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::screen::UsageScreen;
    use crate::store::memory::MemoryStore;
    use crate::usage::DisplayMode;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App<MemoryStore>) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app(domains: &[&str]) -> App<MemoryStore> {
        App::new(
            UsageScreen::new(DisplayMode::Cookies, MemoryStore::with_cookies(domains)),
            Catalog::default(),
        )
    }

    #[test]
    fn test_cursor_on_entry() {
        let style = row_style(true, RowKind::Entry);
        assert_eq!(style.bg, Some(Color::Blue));
        assert_eq!(style.fg, Some(Color::White));
    }

    #[test]
    fn test_cursor_on_remove_all_is_red() {
        let style = row_style(true, RowKind::RemoveAll);
        assert_eq!(style.bg, Some(Color::Red));
    }

    #[test]
    fn test_show_all_without_cursor() {
        let style = row_style(false, RowKind::ShowAll);
        assert_eq!(style.bg, None);
        assert_eq!(style.fg, Some(Color::LightBlue));
    }

    #[test]
    fn test_entry_without_cursor_is_plain() {
        assert_eq!(row_style(false, RowKind::Entry), Style::default());
    }

    #[test]
    fn test_render_shows_header_rows_and_action() {
        let app = app(&["a.com", "a.com", "b.com"]);
        let text = render(&app);

        assert!(text.contains("COOKIES"));
        assert!(text.contains("a.com"));
        assert!(text.contains("b.com"));
        assert!(text.contains("Remove All Cookies"));
    }

    #[test]
    fn test_render_shows_show_all_row_when_truncated() {
        let names: Vec<String> = (1..=14).map(|i| format!("s{i}.com")).collect();
        let domains: Vec<&str> = names.iter().map(String::as_str).collect();
        let text = render(&app(&domains));

        assert!(text.contains("Show All Sites"));
    }

    #[test]
    fn test_render_search_title() {
        let mut app = app(&["a.com"]);
        app.enter_search();
        app.push_search_char('a');
        let text = render(&app);

        assert!(text.contains("search: a_"));
        assert!(text.contains("filter: a"));
    }

    #[test]
    fn test_render_keeps_action_row_in_short_list_area() {
        let names: Vec<String> = (1..=10).map(|i| format!("s{i}.com")).collect();
        let domains: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut app = app(&domains);
        // 14 lines leaves 5 for list rows
        app.visible_height = 5;
        app.cursor_to_bottom();

        let backend = TestBackend::new(80, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|pos| buffer[pos].symbol().to_string())
            .collect();
        assert!(text.contains("Remove All Cookies"));
    }
}
