use optica_core::{Category, FacetTable};

use crate::commands::{invalid_argument, to_data, CommandResult};

pub fn run(category: &str) -> CommandResult {
    let category = match category.parse::<Category>() {
        Ok(category) => category,
        Err(message) => return invalid_argument("facets", message),
    };

    let table = FacetTable::default();
    let sections = table.sections_for(category);
    let data = match to_data("facets", &sections) {
        Ok(data) => data,
        Err(failure) => return failure,
    };

    CommandResult::success_with_data(
        "facets",
        format!("{} facet sections for {}", sections.len(), category.as_str()),
        Some(data),
    )
}
