use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardState {
    Closed,
    Cart,
    Anamnesis,
    Recommendation,
    Summary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardEvent {
    Open,
    BeginAnamnesis,
    RequestRecommendations,
    BackToAnamnesis,
    ConfirmLens,
    BackToCart,
    Close,
    Finalize,
}

/// Facts about the host's transient state that guard transitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct WizardContext {
    pub budget_items: usize,
    pub missing_answers: Vec<String>,
    pub lens_selected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardAction {
    /// Forget answers, shortlist and chosen lens so the next pass starts clean.
    ResetTransientState,
    /// Forget the shortlist and chosen lens but keep the answers.
    ClearLensSelection,
    ComputeShortlist,
    ComposeSummary,
    HandOffQuoteRequest,
    ClearBudget,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub from: WizardState,
    pub to: WizardState,
    pub event: WizardEvent,
    pub actions: Vec<WizardAction>,
}
