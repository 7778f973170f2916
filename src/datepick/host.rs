//! # Host Document
//!
//! Pickers attach to host elements. The engine never touches a real UI tree;
//! instead it works against this in-memory stand-in, which models the only
//! element properties the engine reads or writes:
//!
//! - the element kind (an `input` gets its value bound to the selection),
//! - the positioning style the calendar is placed against,
//! - the input value.

use crate::error::{DatepickError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const POSITIONED: [&str; 4] = ["relative", "absolute", "fixed", "sticky"];
const ATTACH_POSITION: &str = "relative";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HostId(String);

impl HostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<&str> for HostId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostKind {
    Input,
    Container,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostElement {
    pub id: HostId,
    pub kind: HostKind,
    pub position: Option<String>,
    pub value: String,
}

impl HostElement {
    pub fn new(id: impl Into<String>, kind: HostKind) -> Self {
        Self {
            id: HostId::new(id),
            kind,
            position: None,
            value: String::new(),
        }
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: BTreeMap<HostId, HostElement>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, element: HostElement) -> HostId {
        let id = element.id.clone();
        self.elements.insert(id.clone(), element);
        id
    }

    pub fn add_input(&mut self, id: &str) -> HostId {
        self.add_element(HostElement::new(id, HostKind::Input))
    }

    pub fn add_container(&mut self, id: &str) -> HostId {
        self.add_element(HostElement::new(id, HostKind::Container))
    }

    pub fn get(&self, id: &HostId) -> Option<&HostElement> {
        self.elements.get(id)
    }

    /// Resolves `#id` (or a bare id) to a host element.
    pub fn resolve(&self, selector: &str) -> Result<HostId> {
        let trimmed = selector.trim();
        let id = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if id.is_empty() {
            return Err(DatepickError::Validation(format!(
                "The selector provided is not a valid element: \"{}\"",
                selector
            )));
        }

        let host = HostId::new(id);
        if self.elements.contains_key(&host) {
            Ok(host)
        } else {
            Err(DatepickError::Validation(format!(
                "No element found for selector \"{}\".",
                selector
            )))
        }
    }

    /// Makes the host a positioning context, returning the style it had before.
    pub fn attach_positioning(&mut self, id: &HostId) -> Option<String> {
        let element = self.elements.get_mut(id)?;
        let original = element.position.clone();
        let positioned = original
            .as_deref()
            .map_or(false, |p| POSITIONED.contains(&p));
        if !positioned {
            element.position = Some(ATTACH_POSITION.to_string());
        }
        original
    }

    /// Puts back the style recorded at attach, or clears it.
    pub fn restore_positioning(&mut self, id: &HostId, original: Option<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.position = original;
        }
    }

    pub fn set_value(&mut self, id: &HostId, value: String) {
        if let Some(element) = self.elements.get_mut(id) {
            if element.kind == HostKind::Input {
                element.value = value;
            }
        }
    }
}
