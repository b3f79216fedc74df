pub mod engine;
pub mod session;
pub mod states;

pub use engine::{QuoteRequestWizard, WizardDefinition, WizardEngine, WizardTransitionError};
pub use session::{QuoteSummary, QuoteWizard};
pub use states::{TransitionOutcome, WizardAction, WizardContext, WizardEvent, WizardState};
