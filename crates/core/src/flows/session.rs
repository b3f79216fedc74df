use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::budget::{Budget, BudgetItem};
use crate::catalog::CatalogStore;
use crate::domain::anamnesis::{AnamnesisAnswers, DegreeBand, Lifestyle, Purpose};
use crate::domain::product::{Product, ProductId};
use crate::flows::engine::{QuoteRequestWizard, WizardEngine, WizardTransitionError};
use crate::flows::states::{TransitionOutcome, WizardAction, WizardContext, WizardEvent, WizardState};
use crate::recommendation::{LensRecommender, RuleBasedRecommender};

/// What the quote hand-off receives once the customer reaches the summary step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub items: Vec<BudgetItem>,
    pub lens: Option<Product>,
    pub answers: AnamnesisAnswers,
    pub estimated_total: Decimal,
}

/// One customer's pass through the quote wizard. Holds the transient state the
/// storefront owns (budget, answers, shortlist, chosen lens) and only moves
/// between steps through [`WizardEngine`].
#[derive(Clone, Debug)]
pub struct QuoteWizard<R = RuleBasedRecommender> {
    engine: WizardEngine<QuoteRequestWizard>,
    recommender: R,
    state: WizardState,
    budget: Budget,
    answers: AnamnesisAnswers,
    shortlist: Vec<Product>,
    selected_lens: Option<Product>,
}

impl Default for QuoteWizard<RuleBasedRecommender> {
    fn default() -> Self {
        Self::new(RuleBasedRecommender::default())
    }
}

impl<R> QuoteWizard<R>
where
    R: LensRecommender,
{
    pub fn new(recommender: R) -> Self {
        let engine = WizardEngine::default();
        let state = engine.initial_state();
        Self {
            engine,
            recommender,
            state,
            budget: Budget::new(),
            answers: AnamnesisAnswers::default(),
            shortlist: Vec::new(),
            selected_lens: None,
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn answers(&self) -> &AnamnesisAnswers {
        &self.answers
    }

    pub fn selected_lens(&self) -> Option<&Product> {
        self.selected_lens.as_ref()
    }

    /// Adds a budget line. Only allowed before the anamnesis starts, so a
    /// shortlist or summary never describes a budget it was not computed for.
    pub fn add_item(
        &mut self,
        product: &Product,
        quantity: u32,
    ) -> Result<(), WizardTransitionError> {
        self.ensure_budget_editable()?;
        self.budget.add(product, quantity);
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<usize, WizardTransitionError> {
        self.ensure_budget_editable()?;
        Ok(self.budget.remove(product_id))
    }

    pub fn set_purpose(&mut self, purpose: Purpose) -> Result<(), WizardTransitionError> {
        self.ensure_answers_editable()?;
        self.answers.purpose = Some(purpose);
        Ok(())
    }

    pub fn set_lifestyle(&mut self, lifestyle: Lifestyle) -> Result<(), WizardTransitionError> {
        self.ensure_answers_editable()?;
        self.answers.lifestyle = Some(lifestyle);
        Ok(())
    }

    pub fn set_degree_band(
        &mut self,
        degree_band: DegreeBand,
    ) -> Result<(), WizardTransitionError> {
        self.ensure_answers_editable()?;
        self.answers.degree_band = Some(degree_band);
        Ok(())
    }

    pub fn open(&mut self) -> Result<WizardState, WizardTransitionError> {
        self.step(WizardEvent::Open, None)
    }

    pub fn begin_anamnesis(&mut self) -> Result<WizardState, WizardTransitionError> {
        self.step(WizardEvent::BeginAnamnesis, None)
    }

    /// Moves to the recommendation step and computes the shortlist from the
    /// lens family of `catalog`.
    pub fn request_recommendations(
        &mut self,
        catalog: &CatalogStore,
    ) -> Result<&[Product], WizardTransitionError> {
        self.step(WizardEvent::RequestRecommendations, Some(catalog))?;
        Ok(&self.shortlist)
    }

    /// The current shortlist; empty outside the recommendation step.
    pub fn shortlist(&self) -> &[Product] {
        if self.state == WizardState::Recommendation {
            &self.shortlist
        } else {
            &[]
        }
    }

    /// Chooses a lens from the current shortlist. Ids outside it are ignored.
    pub fn select_lens(&mut self, product_id: &ProductId) -> bool {
        let chosen = self.shortlist().iter().find(|lens| &lens.id == product_id).cloned();
        match chosen {
            Some(lens) => {
                self.selected_lens = Some(lens);
                true
            }
            None => false,
        }
    }

    pub fn confirm_lens(&mut self) -> Result<WizardState, WizardTransitionError> {
        self.step(WizardEvent::ConfirmLens, None)
    }

    pub fn back_to_anamnesis(&mut self) -> Result<WizardState, WizardTransitionError> {
        self.step(WizardEvent::BackToAnamnesis, None)
    }

    pub fn back_to_cart(&mut self) -> Result<WizardState, WizardTransitionError> {
        self.step(WizardEvent::BackToCart, None)
    }

    pub fn close(&mut self) -> Result<WizardState, WizardTransitionError> {
        self.step(WizardEvent::Close, None)
    }

    pub fn summary(&self) -> Option<QuoteSummary> {
        (self.state == WizardState::Summary).then(|| self.compose_summary())
    }

    /// Hands the summary over and leaves the wizard closed with an empty budget.
    pub fn finalize(&mut self) -> Result<QuoteSummary, WizardTransitionError> {
        let summary = self.compose_summary();
        self.step(WizardEvent::Finalize, None)?;
        Ok(summary)
    }

    // Answers feed the shortlist; changing them later requires going back to
    // Anamnesis, which clears the shortlist and the selected lens.
    fn ensure_answers_editable(&self) -> Result<(), WizardTransitionError> {
        if self.state == WizardState::Anamnesis {
            Ok(())
        } else {
            Err(self.reject_edit(WizardTransitionError::AnswersLocked { state: self.state }))
        }
    }

    fn ensure_budget_editable(&self) -> Result<(), WizardTransitionError> {
        if matches!(self.state, WizardState::Closed | WizardState::Cart) {
            Ok(())
        } else {
            Err(self.reject_edit(WizardTransitionError::BudgetLocked { state: self.state }))
        }
    }

    fn reject_edit(&self, error: WizardTransitionError) -> WizardTransitionError {
        warn!(
            event_name = "wizard.edit_rejected",
            state = ?self.state,
            error = %error,
            "quote wizard edit rejected"
        );
        error
    }

    fn compose_summary(&self) -> QuoteSummary {
        QuoteSummary {
            items: self.budget.items().to_vec(),
            lens: self.selected_lens.clone(),
            answers: self.answers,
            estimated_total: self.budget.estimated_total(self.selected_lens.as_ref()),
        }
    }

    fn context(&self) -> WizardContext {
        WizardContext {
            budget_items: self.budget.len(),
            missing_answers: self.answers.missing_fields(),
            lens_selected: self.selected_lens.is_some(),
        }
    }

    fn step(
        &mut self,
        event: WizardEvent,
        catalog: Option<&CatalogStore>,
    ) -> Result<WizardState, WizardTransitionError> {
        let outcome = match self.engine.apply(&self.state, &event, &self.context()) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(
                    event_name = "wizard.transition_rejected",
                    state = ?self.state,
                    event = ?event,
                    error = %error,
                    "quote wizard transition rejected"
                );
                return Err(error);
            }
        };

        self.run_actions(&outcome, catalog);
        self.state = outcome.to;
        info!(
            event_name = "wizard.transition_applied",
            from = ?outcome.from,
            to = ?outcome.to,
            event = ?outcome.event,
            shortlist_len = self.shortlist.len(),
            "quote wizard transition applied"
        );
        Ok(self.state)
    }

    fn run_actions(&mut self, outcome: &TransitionOutcome, catalog: Option<&CatalogStore>) {
        for action in &outcome.actions {
            match action {
                WizardAction::ResetTransientState => {
                    self.answers = AnamnesisAnswers::default();
                    self.shortlist.clear();
                    self.selected_lens = None;
                }
                WizardAction::ClearLensSelection => {
                    self.shortlist.clear();
                    self.selected_lens = None;
                }
                WizardAction::ComputeShortlist => {
                    let lenses = catalog.map(CatalogStore::lenses).unwrap_or_default();
                    self.shortlist = self
                        .recommender
                        .recommend(&lenses, &self.answers)
                        .into_iter()
                        .cloned()
                        .collect();
                    self.selected_lens = None;
                }
                WizardAction::ClearBudget => self.budget.clear(),
                WizardAction::ComposeSummary | WizardAction::HandOffQuoteRequest => {}
            }
        }
    }
}
