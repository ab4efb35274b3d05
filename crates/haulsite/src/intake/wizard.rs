//! Linear multi-step form controller.
//!
//! The controller tracks which step is current and whether the form is submitting or
//! done. It never looks at field values: callers decide per step whether the user may
//! continue and hand that decision to [`StepForm::next`].

use std::future::Future;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormStep {
    pub name: String,
    pub description: String,
}

impl FormStep {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "step", rename_all = "snake_case")]
pub enum WizardState {
    Step(usize),
    Submitting,
    Success,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    /// The request was not allowed; state is unchanged.
    Blocked,
    /// Back was pressed on the first step and the cancel callback ran.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("a step form needs at least one step")]
    NoSteps,
    #[error("submit is only allowed from the final step (state {state:?})")]
    NotOnFinalStep { state: WizardState },
    #[error("a submission is already in progress")]
    SubmitInProgress,
    #[error("no submission in progress (state {state:?})")]
    NotSubmitting { state: WizardState },
}

/// Failure of [`StepForm::submit`]: either the wizard refused or the sink did.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError<E> {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error("submission failed: {0}")]
    Failed(#[source] E),
}

/// First step whose gate refused to let a replayed draft through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepBlocked {
    pub index: usize,
    pub name: String,
}

/// State machine over `N` ordered steps with step-local draft data `D`.
#[derive(Debug, Clone)]
pub struct StepForm<D> {
    steps: Vec<FormStep>,
    state: WizardState,
    draft: D,
}

impl<D: Default> StepForm<D> {
    pub fn new(steps: Vec<FormStep>) -> Result<Self, WizardError> {
        Self::with_draft(steps, D::default())
    }

    /// Returns to the first step and clears all step-local data.
    pub fn reset(&mut self) {
        self.state = WizardState::Step(0);
        self.draft = D::default();
    }
}

impl<D> StepForm<D> {
    pub fn with_draft(steps: Vec<FormStep>, draft: D) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }
        Ok(Self {
            steps,
            state: WizardState::Step(0),
            draft,
        })
    }

    /// Drives a fresh wizard over `draft`, asking `gate` at every step.
    ///
    /// On success the wizard sits on the final step, ready to submit.
    pub fn replay<G>(steps: Vec<FormStep>, draft: D, mut gate: G) -> Result<Self, ReplayError>
    where
        G: FnMut(usize, &D) -> bool,
    {
        let mut form = Self::with_draft(steps, draft).map_err(ReplayError::Wizard)?;
        loop {
            let index = form.current_index().unwrap_or(0);
            let ready = gate(index, &form.draft);
            if form.is_final_step() {
                if ready {
                    return Ok(form);
                }
                return Err(ReplayError::Blocked(form.blocked_at(index)));
            }
            if form.next(ready) == Transition::Blocked {
                return Err(ReplayError::Blocked(form.blocked_at(index)));
            }
        }
    }

    fn blocked_at(&self, index: usize) -> StepBlocked {
        StepBlocked {
            index,
            name: self.steps[index].name.clone(),
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn steps(&self) -> &[FormStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            WizardState::Step(index) => Some(index),
            WizardState::Submitting | WizardState::Success => None,
        }
    }

    pub fn current_step(&self) -> Option<&FormStep> {
        self.current_index().map(|index| &self.steps[index])
    }

    pub fn is_final_step(&self) -> bool {
        self.current_index() == Some(self.steps.len() - 1)
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Advances one step when not on the final step and `can_continue` is true.
    pub fn next(&mut self, can_continue: bool) -> Transition {
        match self.state {
            WizardState::Step(index) if can_continue && index + 1 < self.steps.len() => {
                self.state = WizardState::Step(index + 1);
                Transition::Moved {
                    from: index,
                    to: index + 1,
                }
            }
            _ => Transition::Blocked,
        }
    }

    /// Goes back one step, or runs `on_cancel` when already on the first step.
    pub fn previous<F: FnOnce()>(&mut self, on_cancel: F) -> Transition {
        match self.state {
            WizardState::Step(0) => {
                on_cancel();
                Transition::Cancelled
            }
            WizardState::Step(index) => {
                self.state = WizardState::Step(index - 1);
                Transition::Moved {
                    from: index,
                    to: index - 1,
                }
            }
            WizardState::Submitting | WizardState::Success => Transition::Blocked,
        }
    }

    pub fn begin_submit(&mut self) -> Result<(), WizardError> {
        match self.state {
            WizardState::Submitting => Err(WizardError::SubmitInProgress),
            WizardState::Step(index) if index + 1 == self.steps.len() => {
                self.state = WizardState::Submitting;
                Ok(())
            }
            state => Err(WizardError::NotOnFinalStep { state }),
        }
    }

    /// Settles a submission started with [`begin_submit`](Self::begin_submit).
    ///
    /// Success moves to [`WizardState::Success`]; failure returns to the final step and
    /// hands the error back. Nothing is retried.
    pub fn finish_submit<T, E>(&mut self, result: Result<T, E>) -> Result<T, SubmitError<E>> {
        if self.state != WizardState::Submitting {
            return Err(SubmitError::Wizard(WizardError::NotSubmitting { state: self.state }));
        }
        match result {
            Ok(value) => {
                self.state = WizardState::Success;
                Ok(value)
            }
            Err(err) => {
                self.state = WizardState::Step(self.steps.len() - 1);
                Err(SubmitError::Failed(err))
            }
        }
    }

    pub async fn submit<F, Fut, T, E>(&mut self, op: F) -> Result<T, SubmitError<E>>
    where
        D: Clone,
        F: FnOnce(D) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        self.begin_submit()?;
        let result = op(self.draft.clone()).await;
        self.finish_submit(result)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    Wizard(WizardError),
    #[error("step {} ({}) is incomplete", .0.index + 1, .0.name)]
    Blocked(StepBlocked),
}
