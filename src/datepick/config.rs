use crate::dates::{ensure_representable, DEFAULT_DAYS, DEFAULT_MONTHS, MAX_SIBLING_OFFSET};
use crate::error::{DatepickError, Result};
use crate::model::DefaultView;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DATE_FORMAT: &str = "%a %b %d %Y";
pub const DEFAULT_SIBLING_OFFSET: u32 = 1;

/// Per-picker options, as accepted by `create`.
///
/// Deserializes from camelCase JSON so option objects can be stored alongside
/// the host page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerOptions {
    pub start_date: Option<NaiveDate>,
    pub selected_date: Option<NaiveDate>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub disabled_dates: Vec<NaiveDate>,
    pub no_weekends: bool,
    /// Signed so out-of-range input can be reported instead of wrapping.
    pub start_day: i32,
    pub always_show: bool,
    pub default_view: DefaultView,
    /// Pair identifier. Presence makes the picker half of a range pair.
    pub id: Option<String>,
    pub custom_days: Option<Vec<String>>,
    pub custom_months: Option<Vec<String>>,
    pub custom_overlay_months: Option<Vec<String>>,
    pub date_format: Option<String>,
    pub sibling_offset_months: u32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            start_date: None,
            selected_date: None,
            min_date: None,
            max_date: None,
            disabled_dates: Vec::new(),
            no_weekends: false,
            start_day: 0,
            always_show: false,
            default_view: DefaultView::Calendar,
            id: None,
            custom_days: None,
            custom_months: None,
            custom_overlay_months: None,
            date_format: None,
            sibling_offset_months: DEFAULT_SIBLING_OFFSET,
        }
    }
}

impl PickerOptions {
    pub fn with_pair_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Rejects option sets that cannot produce a picker.
    pub fn validate(&self) -> Result<()> {
        if !(0..=6).contains(&self.start_day) {
            return Err(DatepickError::Validation(
                "`options.startDay` must be a number between 0 and 6.".to_string(),
            ));
        }

        if let Some(id) = &self.id {
            if id.trim().is_empty() {
                return Err(DatepickError::InvalidConfiguration(
                    "range pickers need a non-empty `id` shared by both halves".to_string(),
                ));
            }
        }

        check_labels("customDays", self.custom_days.as_deref(), 7)?;
        check_labels("customMonths", self.custom_months.as_deref(), 12)?;
        check_labels(
            "customOverlayMonths",
            self.custom_overlay_months.as_deref(),
            12,
        )?;

        if let Some(format) = &self.date_format {
            validate_date_format(format)?;
        }
        validate_sibling_offset(self.sibling_offset_months)?;

        let dates = [
            self.start_date,
            self.selected_date,
            self.min_date,
            self.max_date,
        ];
        for date in dates.iter().flatten().chain(self.disabled_dates.iter()) {
            ensure_representable(*date)?;
        }

        Ok(())
    }

    pub fn start_day(&self) -> u8 {
        self.start_day.clamp(0, 6) as u8
    }

    pub fn days(&self) -> Vec<String> {
        self.custom_days
            .clone()
            .unwrap_or_else(|| DEFAULT_DAYS.iter().map(|d| d.to_string()).collect())
    }

    pub fn months(&self) -> Vec<String> {
        self.custom_months
            .clone()
            .unwrap_or_else(|| DEFAULT_MONTHS.iter().map(|m| m.to_string()).collect())
    }

    pub fn overlay_months(&self) -> Vec<String> {
        self.custom_overlay_months.clone().unwrap_or_else(|| {
            self.months()
                .iter()
                .map(|m| m.chars().take(3).collect())
                .collect()
        })
    }

    pub fn date_format(&self) -> &str {
        self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }
}

fn check_labels(name: &str, labels: Option<&[String]>, expected: usize) -> Result<()> {
    match labels {
        Some(labels) if labels.len() != expected => Err(DatepickError::Validation(format!(
            "`options.{}` must contain exactly {} labels, got {}",
            name,
            expected,
            labels.len()
        ))),
        _ => Ok(()),
    }
}

/// Ensures a strftime pattern can format a plain date.
///
/// Unknown specifiers and time or offset fields (`%H`, `%z`, ...) fail here
/// instead of panicking the first time a selection is written out.
pub fn validate_date_format(format: &str) -> Result<()> {
    let mut sample = String::new();
    write!(sample, "{}", NaiveDate::default().format(format)).map_err(|_| {
        DatepickError::Validation(format!(
            "Invalid date format: {} (only date fields are supported)",
            format
        ))
    })
}

pub fn validate_sibling_offset(months: u32) -> Result<()> {
    if months > MAX_SIBLING_OFFSET {
        return Err(DatepickError::Validation(format!(
            "`options.siblingOffsetMonths` must be at most {}, got {}",
            MAX_SIBLING_OFFSET, months
        )));
    }
    Ok(())
}

/// CLI defaults, stored in `<config dir>/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatepickConfig {
    #[serde(default)]
    pub start_day: u8,

    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default = "default_sibling_offset")]
    pub sibling_offset_months: u32,

    #[serde(default)]
    pub default_view: DefaultView,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_sibling_offset() -> u32 {
    DEFAULT_SIBLING_OFFSET
}

impl Default for DatepickConfig {
    fn default() -> Self {
        Self {
            start_day: 0,
            date_format: default_date_format(),
            sibling_offset_months: DEFAULT_SIBLING_OFFSET,
            default_view: DefaultView::Calendar,
        }
    }
}

pub const CONFIG_KEYS: [&str; 4] = ["start-day", "date-format", "sibling-offset", "default-view"];

impl DatepickConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: DatepickConfig = serde_json::from_str(&content)?;
        config.validate().map_err(|e| {
            DatepickError::InvalidConfiguration(format!("{}: {}", config_path.display(), e))
        })?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Checks values that may have been edited by hand.
    pub fn validate(&self) -> Result<()> {
        if self.start_day > 6 {
            return Err(DatepickError::Validation(
                "start-day must be a number between 0 and 6".to_string(),
            ));
        }
        validate_date_format(&self.date_format)?;
        validate_sibling_offset(self.sibling_offset_months)
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "start-day" => Ok(self.start_day.to_string()),
            "date-format" => Ok(self.date_format.clone()),
            "sibling-offset" => Ok(self.sibling_offset_months.to_string()),
            "default-view" => Ok(self.default_view.as_str().to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "start-day" => {
                let day: u8 = value
                    .parse()
                    .ok()
                    .filter(|d| *d <= 6)
                    .ok_or_else(|| {
                        DatepickError::Validation(
                            "start-day must be a number between 0 and 6".to_string(),
                        )
                    })?;
                self.start_day = day;
            }
            "date-format" => {
                validate_date_format(value)?;
                self.date_format = value.to_string();
            }
            "sibling-offset" => {
                let months = value.parse().map_err(|_| {
                    DatepickError::Validation(format!(
                        "sibling-offset must be a whole number of months, got {}",
                        value
                    ))
                })?;
                validate_sibling_offset(months)?;
                self.sibling_offset_months = months;
            }
            "default-view" => {
                self.default_view = value.parse()?;
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// Option template seeded from these defaults.
    pub fn base_options(&self) -> PickerOptions {
        PickerOptions {
            start_day: self.start_day as i32,
            default_view: self.default_view,
            date_format: Some(self.date_format.clone()),
            sibling_offset_months: self.sibling_offset_months,
            ..Default::default()
        }
    }
}

fn unknown_key(key: &str) -> DatepickError {
    DatepickError::Validation(format!(
        "Unknown config key: {} (expected one of {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
