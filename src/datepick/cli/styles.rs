//! Named terminal styles used by the `style` template filter.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub mod names {
    pub const HEADER: &str = "header";
    pub const WEEKDAY: &str = "weekday";
    pub const DAY: &str = "day";
    pub const WEEKEND: &str = "weekend";
    pub const SELECTED: &str = "selected";
    pub const TODAY: &str = "today";
    pub const DISABLED: &str = "disabled";
    pub const OVERLAY: &str = "overlay";
    pub const CURRENT_MONTH: &str = "current_month";
    pub const INFO: &str = "info";
    pub const SUCCESS: &str = "success";
    pub const WARNING: &str = "warning";
    pub const ERROR: &str = "error";
}

/// Style registry. Unknown names render with a visible marker so template
/// typos show up in output.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

const MISSING_STYLE: &str = "(!?)";

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE, text),
        }
    }
}

pub static DATEPICK_THEME: Lazy<Theme> = Lazy::new(|| {
    Theme::new()
        .add(names::HEADER, Style::new().bold())
        .add(names::WEEKDAY, Style::new().dim())
        .add(names::DAY, Style::new())
        .add(names::WEEKEND, Style::new().cyan())
        .add(names::SELECTED, Style::new().black().on_yellow().bold())
        .add(names::TODAY, Style::new().underlined())
        .add(names::DISABLED, Style::new().color256(245).strikethrough())
        .add(names::OVERLAY, Style::new().magenta())
        .add(names::CURRENT_MONTH, Style::new().magenta().bold())
        .add(names::INFO, Style::new().blue())
        .add(names::SUCCESS, Style::new().green())
        .add(names::WARNING, Style::new().yellow())
        .add(names::ERROR, Style::new().red())
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mode_strips_styling() {
        assert_eq!(DATEPICK_THEME.apply(names::SELECTED, "5", false), "5");
    }

    #[test]
    fn color_mode_emits_ansi() {
        let styled = DATEPICK_THEME.apply(names::ERROR, "boom", true);
        assert!(styled.contains("\u{1b}["));
        assert!(styled.contains("boom"));
    }

    #[test]
    fn unknown_style_is_flagged() {
        assert_eq!(DATEPICK_THEME.apply("typo", "x", false), "(!?) x");
    }
}
