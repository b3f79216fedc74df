use optica_core::{AnamnesisAnswers, LensRecommender, RuleBasedRecommender};

use crate::commands::{invalid_argument, load_context, to_data, CommandResult};

pub fn run(purpose: Option<&str>, lifestyle: Option<&str>, degree: Option<&str>) -> CommandResult {
    let answers = match parse_answers(purpose, lifestyle, degree) {
        Ok(answers) => answers,
        Err(message) => return invalid_argument("recommend", message),
    };

    let context = match load_context("recommend") {
        Ok(context) => context,
        Err(failure) => return failure,
    };

    let lenses = context.catalog.lenses();
    let recommender = RuleBasedRecommender::new(context.config.recommendation);
    let shortlist = recommender.recommend(&lenses, &answers);

    let message = if answers.is_complete() {
        format!("{} lenses shortlisted", shortlist.len())
    } else {
        format!("shortlist is empty until answered: {}", answers.missing_fields().join(", "))
    };

    match to_data("recommend", &shortlist) {
        Ok(data) => CommandResult::success_with_data("recommend", message, Some(data)),
        Err(failure) => failure,
    }
}

pub fn parse_answers(
    purpose: Option<&str>,
    lifestyle: Option<&str>,
    degree: Option<&str>,
) -> Result<AnamnesisAnswers, String> {
    Ok(AnamnesisAnswers {
        purpose: purpose.map(str::parse).transpose()?,
        lifestyle: lifestyle.map(str::parse).transpose()?,
        degree_band: degree.map(str::parse).transpose()?,
    })
}
