use thiserror::Error;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::flows::states::{
    TransitionOutcome, WizardAction, WizardContext, WizardEvent, WizardState,
};

pub trait WizardDefinition {
    fn initial_state(&self) -> WizardState;
    fn transition(
        &self,
        current: &WizardState,
        event: &WizardEvent,
        context: &WizardContext,
    ) -> Result<TransitionOutcome, WizardTransitionError>;
}

/// Cart -> Anamnesis -> Recommendation -> Summary, with back/cancel from anywhere.
#[derive(Clone, Debug, Default)]
pub struct QuoteRequestWizard;

impl WizardDefinition for QuoteRequestWizard {
    fn initial_state(&self) -> WizardState {
        WizardState::Closed
    }

    fn transition(
        &self,
        current: &WizardState,
        event: &WizardEvent,
        context: &WizardContext,
    ) -> Result<TransitionOutcome, WizardTransitionError> {
        transition_quote_request(current, event, context)
    }
}

#[derive(Clone, Debug)]
pub struct WizardEngine<W> {
    wizard: W,
}

impl<W> WizardEngine<W>
where
    W: WizardDefinition,
{
    pub fn new(wizard: W) -> Self {
        Self { wizard }
    }

    pub fn initial_state(&self) -> WizardState {
        self.wizard.initial_state()
    }

    pub fn apply(
        &self,
        current: &WizardState,
        event: &WizardEvent,
        context: &WizardContext,
    ) -> Result<TransitionOutcome, WizardTransitionError> {
        self.wizard.transition(current, event, context)
    }

    pub fn apply_with_audit<S>(
        &self,
        current: &WizardState,
        event: &WizardEvent,
        context: &WizardContext,
        sink: &S,
        audit: &AuditContext,
    ) -> Result<TransitionOutcome, WizardTransitionError>
    where
        S: AuditSink,
    {
        let result = self.apply(current, event, context);
        match &result {
            Ok(outcome) => {
                sink.emit(
                    AuditEvent::new(
                        None,
                        audit,
                        "wizard.transition_applied",
                        AuditCategory::Wizard,
                        AuditOutcome::Success,
                    )
                    .with_metadata("from", format!("{:?}", outcome.from))
                    .with_metadata("to", format!("{:?}", outcome.to))
                    .with_metadata("event", format!("{:?}", outcome.event)),
                );
            }
            Err(error) => {
                sink.emit(
                    AuditEvent::new(
                        None,
                        audit,
                        "wizard.transition_rejected",
                        AuditCategory::Wizard,
                        AuditOutcome::Rejected,
                    )
                    .with_metadata("error", error.to_string()),
                );
            }
        }
        result
    }
}

impl Default for WizardEngine<QuoteRequestWizard> {
    fn default() -> Self {
        Self::new(QuoteRequestWizard)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WizardTransitionError {
    #[error("cannot leave {state:?} with an empty selection")]
    EmptySelection { state: WizardState },
    #[error("missing answers before transition from {state:?}: {missing_fields:?}")]
    MissingAnswers { state: WizardState, missing_fields: Vec<String> },
    #[error("no lens selected before transition from {state:?}")]
    NoLensSelected { state: WizardState },
    #[error("invalid transition from {state:?} using event {event:?}")]
    InvalidTransition { state: WizardState, event: WizardEvent },
    #[error("anamnesis answers can only change in Anamnesis, not {state:?}")]
    AnswersLocked { state: WizardState },
    #[error("the budget can only change while browsing or in Cart, not {state:?}")]
    BudgetLocked { state: WizardState },
}

fn transition_quote_request(
    current: &WizardState,
    event: &WizardEvent,
    context: &WizardContext,
) -> Result<TransitionOutcome, WizardTransitionError> {
    use WizardAction::{
        ClearBudget, ClearLensSelection, ComposeSummary, ComputeShortlist, HandOffQuoteRequest,
        ResetTransientState,
    };
    use WizardEvent::{
        BackToAnamnesis, BackToCart, BeginAnamnesis, Close, ConfirmLens, Finalize, Open,
        RequestRecommendations,
    };
    use WizardState::{Anamnesis, Cart, Closed, Recommendation, Summary};

    let (to, actions) = match (current, event) {
        (Closed, Open) => (Cart, Vec::new()),
        (Cart, BeginAnamnesis) => {
            if context.budget_items == 0 {
                return Err(WizardTransitionError::EmptySelection { state: *current });
            }
            (Anamnesis, Vec::new())
        }
        (Anamnesis, RequestRecommendations) => {
            if !context.missing_answers.is_empty() {
                return Err(WizardTransitionError::MissingAnswers {
                    state: *current,
                    missing_fields: context.missing_answers.clone(),
                });
            }
            (Recommendation, vec![ComputeShortlist])
        }
        (Recommendation, BackToAnamnesis) => (Anamnesis, vec![ClearLensSelection]),
        (Recommendation, ConfirmLens) => {
            if !context.lens_selected {
                return Err(WizardTransitionError::NoLensSelected { state: *current });
            }
            (Summary, vec![ComposeSummary])
        }
        (Summary, Finalize) => (Closed, vec![HandOffQuoteRequest, ClearBudget, ResetTransientState]),
        (_, BackToCart) => (Cart, vec![ResetTransientState]),
        (_, Close) => (Closed, vec![ResetTransientState]),
        _ => {
            return Err(WizardTransitionError::InvalidTransition {
                state: *current,
                event: *event,
            });
        }
    };

    Ok(TransitionOutcome { from: *current, to, event: *event, actions })
}
