use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::{validate, widget::FieldWidget, ValidationError};
use crate::{
    maser_errors::MaserError,
    parameters::{FieldDescriptor, ParamGroup},
    state::{AppState, PendingSubmission},
};

/// Result of one change event.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeOutcome {
    /// The input was rejected; nothing was written and nothing will be sent
    Rejected(ValidationError),
    /// The value was stored; the submission must be dispatched by the caller
    Submit(PendingSubmission),
}

/// Controller of one input widget.
///
/// It owns the widget and a handle on the shared [`AppState`]; it is the only writer of the
/// parameter store.
#[derive(Debug)]
pub struct FieldController {
    group: ParamGroup,
    desc: &'static FieldDescriptor,
    widget: Mutex<FieldWidget>,
    state: Arc<AppState>,
}

impl FieldController {
    pub fn new(group: ParamGroup, desc: &'static FieldDescriptor, state: Arc<AppState>) -> Self {
        FieldController {
            group,
            desc,
            widget: Mutex::new(FieldWidget::new(desc)),
            state,
        }
    }

    pub fn group(&self) -> ParamGroup {
        self.group
    }

    pub fn descriptor(&self) -> &'static FieldDescriptor {
        self.desc
    }

    pub fn key(&self) -> &'static str {
        self.desc.key
    }

    /// Copy of the widget (label, current text, inline error).
    pub fn widget(&self) -> FieldWidget {
        self.widget
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Handle one change event of the input.
    ///
    /// Arguments
    /// ---------
    /// * `raw`: the text typed into the input slot
    ///
    /// Return
    /// ------
    /// * [`ChangeOutcome::Rejected`] when a validation rule fired: the inline error is set and
    ///   the shared display is suspended
    /// * [`ChangeOutcome::Submit`] when the value was accepted: the inline error is cleared,
    ///   exactly one store entry is written and exactly one submission is issued, even if the
    ///   value did not change
    /// * `MaserError::UnknownParameter` if the store has no entry for this field
    pub fn on_change(&self, raw: &str) -> Result<ChangeOutcome, MaserError> {
        let mut widget = self.widget.lock().unwrap_or_else(PoisonError::into_inner);
        let reported = widget.input(raw);

        match validate(self.desc, &reported) {
            Err(err) => {
                debug!(group = %self.group, key = self.desc.key, %err, "input rejected");
                widget.set_error(&err);
                drop(widget);
                self.state.suspend_display();
                Ok(ChangeOutcome::Rejected(err))
            }
            Ok(value) => {
                widget.clear_error();
                drop(widget);
                debug!(group = %self.group, key = self.desc.key, %value, "input accepted");
                let pending = self.state.write_and_issue(self.group, self.desc.key, value)?;
                Ok(ChangeOutcome::Submit(pending))
            }
        }
    }
}
