//! # Rendering Module
//!
//! Terminal output through minijinja templates and the `style` filter.
//!
//! Layout math (cell widths, label fitting, overlay rows) stays in Rust
//! because it needs Unicode-aware width handling. Templates only pick styles
//! from the semantic flags prepared here.

use super::styles::{names, Theme, DATEPICK_THEME};
use super::templates::{CALENDAR_TEMPLATE, CONFIG_TEMPLATE, MESSAGES_TEMPLATE};
use datepick::api::{CmdMessage, MessageLevel};
use datepick::view::{CalendarView, DayCell};
use minijinja::{Environment, Error, Value};
use serde::Serialize;
use unicode_width::UnicodeWidthChar;

/// Columns per grid cell, brackets included.
const CELL_WIDTH: usize = 4;
const OVERLAY_COLUMNS: usize = 4;

#[derive(Serialize)]
struct CellData {
    text: String,
    style: &'static str,
}

#[derive(Serialize)]
struct OverlayData {
    input: String,
    submit_enabled: bool,
    rows: Vec<Vec<CellData>>,
}

#[derive(Serialize)]
struct CalendarData {
    title: String,
    role: Option<String>,
    hidden: bool,
    weekdays: Vec<String>,
    weeks: Vec<Vec<CellData>>,
    overlay: Option<OverlayData>,
    selected: Option<String>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: String,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

/// Renders `template` with a `style` filter bound to `theme`.
fn render_with_color<T: Serialize>(
    template: &str,
    data: &T,
    theme: &Theme,
    use_color: bool,
) -> Result<String, Error> {
    let mut env = Environment::new();
    let theme = theme.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });
    env.add_template("_inline", template)?;
    env.get_template("_inline")?.render(data)
}

/// Truncates or pads `text` to exactly `width` terminal columns.
fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

fn day_cell(cell: &DayCell) -> CellData {
    let (open, close, style) = if cell.is_selected {
        ('[', ']', names::SELECTED)
    } else if cell.is_disabled {
        (' ', '-', names::DISABLED)
    } else if cell.is_today {
        ('(', ')', names::TODAY)
    } else if cell.is_weekend {
        (' ', ' ', names::WEEKEND)
    } else {
        (' ', ' ', names::DAY)
    };
    CellData {
        text: format!("{}{:>2}{}", open, cell.day, close),
        style,
    }
}

fn blank_cell() -> CellData {
    CellData {
        text: " ".repeat(CELL_WIDTH),
        style: names::DAY,
    }
}

fn overlay_cell(index: usize, name: &str, current_month: u32) -> CellData {
    CellData {
        text: format!(" {}", fit_width(name, CELL_WIDTH - 1)),
        style: if index as u32 == current_month {
            names::CURRENT_MONTH
        } else {
            names::OVERLAY
        },
    }
}

fn calendar_data(view: &CalendarView, label: Option<&str>, selected: Option<String>) -> CalendarData {
    let role = match (label, view.pair_role) {
        (Some(label), Some(role)) => Some(format!("{}, {}", label, role)),
        (Some(label), None) => Some(label.to_string()),
        (None, Some(role)) => Some(role.to_string()),
        (None, None) => None,
    };

    let weeks = view
        .weeks()
        .into_iter()
        .map(|week| {
            week.into_iter()
                .map(|slot| slot.map_or_else(blank_cell, day_cell))
                .collect()
        })
        .collect();

    let overlay = view.overlay.is_showing.then(|| OverlayData {
        input: view.overlay.input.clone(),
        submit_enabled: view.overlay.is_submit_enabled,
        rows: view
            .overlay
            .months
            .chunks(OVERLAY_COLUMNS)
            .enumerate()
            .map(|(row, chunk)| {
                chunk
                    .iter()
                    .enumerate()
                    .map(|(col, name)| {
                        overlay_cell(row * OVERLAY_COLUMNS + col, name, view.overlay.current_month)
                    })
                    .collect()
            })
            .collect(),
    });

    CalendarData {
        title: format!("{} {}", view.month_name, view.year),
        role,
        hidden: !view.is_calendar_showing,
        weekdays: view
            .weekdays
            .iter()
            .map(|d| format!(" {}", fit_width(d, CELL_WIDTH - 1)))
            .collect(),
        weeks,
        overlay,
        selected,
    }
}

/// Renders one calendar. `selected` is the already formatted selection.
pub fn render_calendar(
    view: &CalendarView,
    label: Option<&str>,
    selected: Option<String>,
    use_color: bool,
) -> String {
    let data = calendar_data(view, label, selected);
    render_with_color(CALENDAR_TEMPLATE, &data, &DATEPICK_THEME, use_color).unwrap_or_else(|e| {
        format!("{} {} (render failed: {})\n", view.month_name, view.year, e)
    })
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let data = MessagesData {
        messages: messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };

    render_with_color(MESSAGES_TEMPLATE, &data, &DATEPICK_THEME, use_color).unwrap_or_else(|_| {
        messages
            .iter()
            .map(|m| format!("{}\n", m.content))
            .collect()
    })
}

pub fn print_messages(messages: &[CmdMessage], use_color: bool) {
    let output = render_messages(messages, use_color);
    if !output.is_empty() {
        println!("{}", output.trim_end());
    }
}

pub fn render_config(entries: &[(String, String)], use_color: bool) -> String {
    let data = ConfigData {
        entries: entries
            .iter()
            .map(|(key, value)| ConfigEntry {
                key: key.clone(),
                value: value.clone(),
            })
            .collect(),
    };
    render_with_color(CONFIG_TEMPLATE, &data, &DATEPICK_THEME, use_color).unwrap_or_else(|_| {
        entries
            .iter()
            .map(|(k, v)| format!("{} = {}\n", k, v))
            .collect()
    })
}
