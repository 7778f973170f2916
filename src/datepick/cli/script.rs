//! Line-oriented picker scripts for `datepick run`.
//!
//! Each non-empty line names an optional target picker (`a` or `b`, default
//! `a`) followed by an operation:
//!
//! ```text
//! # comments and blank lines are ignored
//! navigate 2023-05
//! b select 2023-06-14 change-calendar
//! min 2023-05-10
//! max none
//! click 12
//! focus
//! overlay
//! year 1987
//! submit
//! ```

use datepick::api::{Arrow, CmdMessage, DatepickApi, OverlayKey, Picker};
use datepick::commands::bounds::BoundOptions;
use datepick::commands::intents::Intent;
use datepick::commands::select::SelectOptions;
use datepick::commands::CmdResult;
use datepick::dates::parse_date;
use datepick::error::{DatepickError, Result};
use datepick::model::PickerId;
use datepick::render::Renderer;
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Navigate(NaiveDate),
    Select {
        date: NaiveDate,
        change_calendar: bool,
    },
    Deselect,
    SetMin(Option<NaiveDate>),
    SetMax(Option<NaiveDate>),
    Show,
    Hide,
    Toggle,
    ToggleOverlay,
    Intent(Intent),
    ClickOutside,
    Remove,
    RemovePair,
    Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub line: usize,
    pub target: usize,
    pub op: Op,
}

pub const PICKER_NAMES: [&str; 2] = ["a", "b"];

fn script_error(line: usize, message: impl Into<String>) -> DatepickError {
    DatepickError::Script {
        line,
        message: message.into(),
    }
}

fn date_arg(line: usize, arg: Option<&str>) -> Result<NaiveDate> {
    let raw = arg.ok_or_else(|| script_error(line, "missing date argument"))?;
    parse_date(raw).map_err(|e| script_error(line, e.to_string()))
}

fn bound_arg(line: usize, arg: Option<&str>) -> Result<Option<NaiveDate>> {
    match arg {
        Some("none") => Ok(None),
        other => date_arg(line, other).map(Some),
    }
}

fn number_arg(line: usize, arg: Option<&str>) -> Result<u32> {
    let raw = arg.ok_or_else(|| script_error(line, "missing number argument"))?;
    raw.parse()
        .map_err(|_| script_error(line, format!("expected a number, got \"{}\"", raw)))
}

/// Parses one line. `Ok(None)` for blanks and comments.
pub fn parse_line(line: usize, text: &str) -> Result<Option<Step>> {
    let text = text.split('#').next().unwrap_or_default().trim();
    let mut words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }

    let target = match PICKER_NAMES.iter().position(|name| *name == words[0]) {
        Some(index) => {
            words.remove(0);
            index
        }
        None => 0,
    };
    let (name, args) = words
        .split_first()
        .ok_or_else(|| script_error(line, "missing operation"))?;
    let arg = args.first().copied();

    let op = match *name {
        "navigate" | "nav" => Op::Navigate(date_arg(line, arg)?),
        "select" => Op::Select {
            date: date_arg(line, arg)?,
            change_calendar: args.get(1) == Some(&"change-calendar"),
        },
        "deselect" => Op::Deselect,
        "min" => Op::SetMin(bound_arg(line, arg)?),
        "max" => Op::SetMax(bound_arg(line, arg)?),
        "show" => Op::Show,
        "hide" => Op::Hide,
        "toggle" => Op::Toggle,
        "overlay" => Op::ToggleOverlay,
        "prev" => Op::Intent(Intent::Arrow(Arrow::Prev)),
        "next" => Op::Intent(Intent::Arrow(Arrow::Next)),
        "click" => Op::Intent(Intent::DayClick(number_arg(line, arg)?)),
        "month-year" => Op::Intent(Intent::MonthYearClick),
        "month" => {
            let month = number_arg(line, arg)?;
            if !(1..=12).contains(&month) {
                return Err(script_error(line, "month must be between 1 and 12"));
            }
            Op::Intent(Intent::OverlayMonthClick(month - 1))
        }
        "close" => Op::Intent(Intent::OverlayClose),
        "year" => Op::Intent(Intent::OverlayInput(args.join(""))),
        "submit" => Op::Intent(Intent::OverlaySubmit),
        "enter" => Op::Intent(Intent::OverlayKey(OverlayKey::Enter)),
        "escape" => Op::Intent(Intent::OverlayKey(OverlayKey::Escape)),
        "focus" => Op::Intent(Intent::HostFocus),
        "click-outside" => Op::ClickOutside,
        "remove" => Op::Remove,
        "remove-pair" => Op::RemovePair,
        "range" => Op::Range,
        other => return Err(script_error(line, format!("unknown operation \"{}\"", other))),
    };

    Ok(Some(Step { line, target, op }))
}

/// Parses a whole script, failing on the first bad line.
pub fn parse_script(source: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for (index, text) in source.lines().enumerate() {
        if let Some(step) = parse_line(index + 1, text)? {
            steps.push(step);
        }
    }
    Ok(steps)
}

fn apply<R: Renderer>(api: &mut DatepickApi<R>, id: PickerId, op: &Op) -> Result<CmdResult> {
    match op {
        Op::ClickOutside => api.document_click(None),
        op => apply_to_picker(api.picker(id), op),
    }
}

fn apply_to_picker<R: Renderer>(mut picker: Picker<'_, R>, op: &Op) -> Result<CmdResult> {
    match op {
        Op::Navigate(date) => picker.navigate(*date),
        Op::Select {
            date,
            change_calendar,
        } => {
            let mut opts = SelectOptions::date(*date).notify_select();
            if *change_calendar {
                opts = opts.change_calendar().notify_month_change();
            }
            picker.select_date(opts)
        }
        Op::Deselect => picker.select_date(SelectOptions::clear().notify_select()),
        Op::SetMin(date) => picker.set_min(BoundOptions {
            date: *date,
            trigger_on_select: true,
        }),
        Op::SetMax(date) => picker.set_max(BoundOptions {
            date: *date,
            trigger_on_select: true,
        }),
        Op::Show => picker.show(),
        Op::Hide => picker.hide(),
        Op::Toggle => picker.toggle_calendar(),
        Op::ToggleOverlay => picker.toggle_overlay(),
        Op::Intent(intent) => picker.dispatch(intent.clone()),
        Op::ClickOutside => Ok(CmdResult::default()),
        Op::Remove => picker.remove(),
        Op::RemovePair => picker.remove_pair(),
        Op::Range => {
            let message = match picker.selected_range()? {
                Some(range) => format!(
                    "range: {} .. {}",
                    range.start.map_or("-".to_string(), |d| d.to_string()),
                    range.end.map_or("-".to_string(), |d| d.to_string())
                ),
                None => "range: not a linked pair".to_string(),
            };
            Ok(CmdResult::default().with_message(CmdMessage::info(message)))
        }
    }
}

/// Replays `steps` against `pickers` (indexed by target).
///
/// Operation failures are reported as error messages and do not stop the
/// replay, so a script can show what happens after a removal.
pub fn replay<R: Renderer>(
    api: &mut DatepickApi<R>,
    pickers: &[PickerId],
    steps: &[Step],
) -> Result<Vec<CmdMessage>> {
    let mut messages = Vec::new();
    for step in steps {
        let id = *pickers.get(step.target).ok_or_else(|| {
            script_error(
                step.line,
                format!(
                    "picker \"{}\" does not exist (use --range for two pickers)",
                    PICKER_NAMES[step.target]
                ),
            )
        })?;
        debug!(line = step.line, op = ?step.op, "replay");
        match apply(api, id, &step.op) {
            Ok(result) => messages.extend(result.messages),
            Err(e) => messages.push(CmdMessage::error(format!("line {}: {}", step.line, e))),
        }
    }
    Ok(messages)
}
