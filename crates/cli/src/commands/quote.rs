use optica_core::{
    AnamnesisAnswers, DomainError, ProductId, QuoteWizard, RuleBasedRecommender, WizardTransitionError,
};

use crate::commands::recommend::parse_answers;
use crate::commands::{invalid_argument, load_context, to_data, CommandResult};

pub struct QuoteArgs<'a> {
    pub items: &'a [String],
    pub purpose: Option<&'a str>,
    pub lifestyle: Option<&'a str>,
    pub degree: Option<&'a str>,
    pub lens: Option<&'a str>,
}

/// Walks one quote wizard pass end to end and prints the resulting summary.
pub fn run(args: QuoteArgs<'_>) -> CommandResult {
    let answers = match parse_answers(args.purpose, args.lifestyle, args.degree) {
        Ok(answers) => answers,
        Err(message) => return invalid_argument("quote", message),
    };

    let context = match load_context("quote") {
        Ok(context) => context,
        Err(failure) => return failure,
    };

    let mut wizard = QuoteWizard::new(RuleBasedRecommender::new(context.config.recommendation));
    if let Err(error) = wizard.open() {
        return wizard_failure(error);
    }

    for item in args.items {
        let Some(product) = context.catalog.find(&ProductId(item.clone())) else {
            return invalid_argument("quote", format!("unknown product id `{item}`"));
        };
        if let Err(error) = wizard.add_item(product, 1) {
            return wizard_failure(error);
        }
    }
    if let Err(error) = wizard.begin_anamnesis() {
        return wizard_failure(error);
    }

    if let Err(error) = answer_anamnesis(&mut wizard, &answers) {
        return wizard_failure(error);
    }

    let shortlist_ids = match wizard.request_recommendations(&context.catalog) {
        Ok(shortlist) => shortlist.iter().map(|lens| lens.id.to_string()).collect::<Vec<_>>(),
        Err(error) => return wizard_failure(error),
    };

    let Some(lens) = args.lens else {
        return CommandResult::failure(
            "quote",
            "lens_not_selected",
            format!("choose a lens with --lens; shortlist: [{}]", shortlist_ids.join(", ")),
            5,
        );
    };
    if !wizard.select_lens(&ProductId(lens.to_owned())) {
        return invalid_argument(
            "quote",
            format!("lens `{lens}` is not in the shortlist [{}]", shortlist_ids.join(", ")),
        );
    }

    if let Err(error) = wizard.confirm_lens() {
        return wizard_failure(error);
    }
    let summary = match wizard.finalize() {
        Ok(summary) => summary,
        Err(error) => return wizard_failure(error),
    };

    match to_data("quote", &summary) {
        Ok(data) => CommandResult::success_with_data(
            "quote",
            format!("quote request ready, estimated total {}", summary.estimated_total),
            Some(data),
        ),
        Err(failure) => failure,
    }
}

fn answer_anamnesis(
    wizard: &mut QuoteWizard,
    answers: &AnamnesisAnswers,
) -> Result<(), WizardTransitionError> {
    if let Some(purpose) = answers.purpose {
        wizard.set_purpose(purpose)?;
    }
    if let Some(lifestyle) = answers.lifestyle {
        wizard.set_lifestyle(lifestyle)?;
    }
    if let Some(degree_band) = answers.degree_band {
        wizard.set_degree_band(degree_band)?;
    }
    Ok(())
}

fn wizard_failure(error: WizardTransitionError) -> CommandResult {
    CommandResult::from_application_error("quote", DomainError::from(error).into())
}
