use bytesize::ByteSize;

use super::DisplayMode;

/// Plain integer, no grouping separators.
pub fn format_count(count: u64) -> String {
    count.to_string()
}

pub fn format_bytes(bytes: u64) -> String {
    ByteSize::b(bytes).to_string()
}

/// Format a row value or section total the way `mode` displays it.
pub fn format_value(mode: DisplayMode, value: u64) -> String {
    match mode {
        DisplayMode::Cookies => format_count(value),
        DisplayMode::LocalStorage => format_bytes(value),
    }
}
