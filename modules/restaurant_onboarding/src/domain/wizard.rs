//! Wizard state machine
//!
//! Owns the current step, the set of completed steps and the draft. Forward
//! transitions are gated by the step validators; backward transitions are not.
//! Reaching past the last step hands the draft to the submission pipeline,
//! which runs outside the wizard and reports back through `finish_submit`.

use super::draft::{Draft, Section};
use super::validation::{is_step_valid, step_title, WizardStep, LAST_STEP};
use std::collections::BTreeSet;

/// Rejected wizard transition. The wizard state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("step {step} ({title}) is incomplete")]
    Incomplete { step: usize, title: &'static str },
    #[error("a submission is in progress")]
    Busy,
}

/// Result of a successful `next`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Moved forward to the given step
    Advanced(usize),
    /// The last step was confirmed. The wizard is now submitting; the caller
    /// must run the pipeline on this snapshot and then call `finish_submit`.
    Submit(Draft),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wizard {
    current: usize,
    completed: BTreeSet<usize>,
    draft: Draft,
    submitting: bool,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn completed(&self) -> &BTreeSet<usize> {
        &self.completed
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    fn current_gates(&self) -> bool {
        WizardStep::from_index(self.current).map_or(true, |s| s.gates_progress())
    }

    /// Whether Next/Submit may be activated right now
    pub fn can_advance(&self) -> bool {
        !self.submitting && (!self.current_gates() || is_step_valid(self.current, &self.draft))
    }

    /// Validate the current step and move forward, or hand off for submission
    /// when the last step is confirmed.
    pub fn next(&mut self) -> Result<NextStep, WizardError> {
        if self.submitting {
            return Err(WizardError::Busy);
        }
        if self.current_gates() && !is_step_valid(self.current, &self.draft) {
            return Err(WizardError::Incomplete {
                step: self.current,
                title: step_title(self.current),
            });
        }

        self.completed.insert(self.current);

        if self.current < LAST_STEP {
            self.current += 1;
            Ok(NextStep::Advanced(self.current))
        } else {
            self.submitting = true;
            Ok(NextStep::Submit(self.draft.clone()))
        }
    }

    /// Move back one step. The completed set is left as is.
    pub fn back(&mut self) -> Result<usize, WizardError> {
        if self.submitting {
            return Err(WizardError::Busy);
        }
        if self.current > 0 {
            self.current -= 1;
        }
        Ok(self.current)
    }

    /// Replace one top-level section of the draft
    pub fn update_field(&mut self, section: Section) -> Result<(), WizardError> {
        if self.submitting {
            return Err(WizardError::Busy);
        }
        self.draft.replace(section);
        Ok(())
    }

    /// Clear the submitting flag. On success the wizard returns to its
    /// initial state; on failure the draft is kept for resubmission.
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.submitting = false;
        if succeeded {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
