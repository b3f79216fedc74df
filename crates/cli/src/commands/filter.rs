use optica_core::{filter_products, CategoryScope, SelectedFilters};

use crate::commands::{invalid_argument, load_context, to_data, CommandResult};

pub fn run(category: &str, search: &str, facets: &[String]) -> CommandResult {
    let scope = match category.parse::<CategoryScope>() {
        Ok(scope) => scope,
        Err(message) => return invalid_argument("filter", message),
    };
    let selected = match parse_facets(facets) {
        Ok(selected) => selected,
        Err(message) => return invalid_argument("filter", message),
    };

    let context = match load_context("filter") {
        Ok(context) => context,
        Err(failure) => return failure,
    };

    let matches = filter_products(context.catalog.products(), scope, search, &selected);
    let data = match to_data("filter", &matches) {
        Ok(data) => data,
        Err(failure) => return failure,
    };

    CommandResult::success_with_data(
        "filter",
        format!("{} of {} products match", matches.len(), context.catalog.len()),
        Some(data),
    )
}

/// Parses repeated `Section=Option` arguments into a selection.
pub fn parse_facets(facets: &[String]) -> Result<SelectedFilters, String> {
    let mut selected = SelectedFilters::new();
    for facet in facets {
        let Some((section, option)) = facet.split_once('=') else {
            return Err(format!("facet `{facet}` must look like `Section=Option`"));
        };
        let (section, option) = (section.trim(), option.trim());
        if section.is_empty() {
            return Err(format!("facet `{facet}` is missing a section title"));
        }
        selected.select(section, option);
    }
    Ok(selected)
}
