//! Headless input widget: one label slot, one input slot, one inline error slot.
//!
//! The widget reports its trimmed text. A date written `DD/MM/YYYY`, as the epoch label
//! advertises, is reported in the ISO order `YYYY-MM-DD`. No calendar or clock check is made
//! here: `2027-02-30` and `25:00` are reported as typed and left to the simulation service.
use crate::{
    constants::ERROR_TEXT_PREFIX,
    parameters::{FieldDescriptor, InputKind},
};

#[derive(Debug, Clone, PartialEq)]
pub struct FieldWidget {
    pub label: &'static str,
    pub kind: InputKind,
    /// Text currently held by the input slot
    pub value: String,
    /// Inline error slot, empty when the last change was accepted
    pub error: String,
}

impl FieldWidget {
    /// Instantiate the widget of a descriptor, showing its default value.
    pub fn new(desc: &FieldDescriptor) -> Self {
        FieldWidget {
            label: desc.label,
            kind: desc.kind,
            value: desc.default.to_string(),
            error: String::new(),
        }
    }

    /// Replace the input text and return the value reported by the widget.
    pub fn input(&mut self, raw: &str) -> String {
        self.value = raw.to_string();
        self.read()
    }

    /// Value reported by the widget for its current text.
    pub fn read(&self) -> String {
        let raw = self.value.trim();
        match self.kind {
            InputKind::Number | InputKind::Time => raw.to_string(),
            InputKind::Date => day_first_to_iso(raw).unwrap_or_else(|| raw.to_string()),
        }
    }

    pub fn set_error(&mut self, message: impl std::fmt::Display) {
        self.error = format!("{ERROR_TEXT_PREFIX}{message}");
    }

    pub fn clear_error(&mut self) {
        self.error.clear();
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// Reorder `DD/MM/YYYY` into `YYYY-MM-DD`, padding day and month to two digits.
///
/// Only the digit layout is checked, so `31/02/2026` becomes `2026-02-31`.
fn day_first_to_iso(raw: &str) -> Option<String> {
    let mut parts = raw.split('/');
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let digits = |part: &str, len: std::ops::RangeInclusive<usize>| {
        len.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };
    if !(digits(day, 1..=2) && digits(month, 1..=2) && digits(year, 4..=usize::MAX)) {
        return None;
    }
    Some(format!("{year}-{month:0>2}-{day:0>2}"))
}
