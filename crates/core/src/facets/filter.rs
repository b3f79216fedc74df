use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::product::{Category, Gender, Product};
use crate::facets::table::{FacetKind, FacetSection, FacetTable};

/// The storefront page being browsed: everything, or one category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryScope {
    #[default]
    All,
    Only(Category),
}

impl CategoryScope {
    pub fn admits(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(active) => active == category,
        }
    }
}

impl std::str::FromStr for CategoryScope {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse::<Category>().map(Self::Only)
    }
}

/// Section title -> selected options. An absent section and an empty option set
/// both mean "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFilters {
    sections: BTreeMap<String, BTreeSet<String>>,
}

impl SelectedFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, section: &str, option: &str) -> Self {
        self.select(section, option);
        self
    }

    pub fn select(&mut self, section: &str, option: &str) {
        self.sections.entry(section.to_owned()).or_default().insert(option.to_owned());
    }

    /// Adds the option when absent, removes it when present.
    pub fn toggle(&mut self, section: &str, option: &str) {
        let options = self.sections.entry(section.to_owned()).or_default();
        if !options.remove(option) {
            options.insert(option.to_owned());
        }
    }

    pub fn is_selected(&self, section: &str, option: &str) -> bool {
        self.sections.get(section).is_some_and(|options| options.contains(option))
    }

    pub fn options(&self, section: &str) -> Option<&BTreeSet<String>> {
        self.sections.get(section)
    }

    /// True when no section carries a selected option.
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(BTreeSet::is_empty)
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn active_sections(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.sections
            .iter()
            .filter(|(_, options)| !options.is_empty())
            .map(|(title, options)| (title.as_str(), options))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub scope: CategoryScope,
    pub search_term: String,
    pub selected: SelectedFilters,
}

pub trait ProductFilter {
    fn filter<'a>(&self, catalog: &'a [Product], query: &FilterQuery) -> Vec<&'a Product>;
}

#[derive(Clone, Debug, Default)]
pub struct FacetFilter {
    table: FacetTable,
}

impl FacetFilter {
    pub fn new(table: FacetTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &FacetTable {
        &self.table
    }

    pub fn matches(&self, product: &Product, query: &FilterQuery) -> bool {
        query.scope.admits(product.category)
            && matches_search(product, &query.search_term)
            && query.selected.active_sections().all(|(title, options)| {
                section_matches(self.table.kind_of(title), product, options)
            })
    }
}

impl ProductFilter for FacetFilter {
    fn filter<'a>(&self, catalog: &'a [Product], query: &FilterQuery) -> Vec<&'a Product> {
        catalog.iter().filter(|product| self.matches(product, query)).collect()
    }
}

/// Narrows `catalog` to the products visible under `scope`, `search_term` and
/// `selected`, keeping catalog order. Uses the built-in facet table.
pub fn filter_products<'a>(
    catalog: &'a [Product],
    scope: CategoryScope,
    search_term: &str,
    selected: &SelectedFilters,
) -> Vec<&'a Product> {
    let query = FilterQuery {
        scope,
        search_term: search_term.to_owned(),
        selected: selected.clone(),
    };
    FacetFilter::default().filter(catalog, &query)
}

fn matches_search(product: &Product, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    let needle = search_term.to_lowercase();
    product.name.to_lowercase().contains(&needle) || product.brand.to_lowercase().contains(&needle)
}

fn section_matches(kind: FacetKind, product: &Product, options: &BTreeSet<String>) -> bool {
    match kind {
        FacetKind::Gender => options.iter().any(|option| gender_matches(option, product.gender)),
        FacetKind::FrameColor => exact_member(product.frame_color.as_deref(), options),
        FacetKind::Material => exact_member(product.material.as_deref(), options),
        FacetKind::Generic => options.iter().any(|option| generic_matches(option, product)),
    }
}

// A Unisex product satisfies either gendered option; a literal "Unisex" option
// only ever matches by equality.
fn gender_matches(option: &str, gender: Option<Gender>) -> bool {
    match option {
        "Male" => matches!(gender, Some(Gender::Male | Gender::Unisex)),
        "Female" => matches!(gender, Some(Gender::Female | Gender::Unisex)),
        other => gender.is_some_and(|gender| gender.label() == other),
    }
}

fn exact_member(attribute: Option<&str>, options: &BTreeSet<String>) -> bool {
    attribute.is_some_and(|value| !value.is_empty() && options.contains(value))
}

fn generic_matches(option: &str, product: &Product) -> bool {
    let needle = option.to_lowercase();
    product.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        || product.brand.to_lowercase().contains(&needle)
}

/// Host-side browse state. Switching category drops every selected facet, since
/// a selection made on one page means nothing on another.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrowseState {
    query: FilterQuery,
}

impl BrowseState {
    pub fn new(scope: CategoryScope) -> Self {
        Self { query: FilterQuery { scope, ..FilterQuery::default() } }
    }

    pub fn scope(&self) -> CategoryScope {
        self.query.scope
    }

    pub fn search_term(&self) -> &str {
        &self.query.search_term
    }

    pub fn selected(&self) -> &SelectedFilters {
        &self.query.selected
    }

    pub fn query(&self) -> &FilterQuery {
        &self.query
    }

    pub fn set_scope(&mut self, scope: CategoryScope) {
        if self.query.scope != scope {
            self.query.scope = scope;
            self.query.selected.clear();
        }
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        self.query.search_term = search_term.into();
    }

    pub fn toggle_option(&mut self, section: &str, option: &str) {
        self.query.selected.toggle(section, option);
    }

    pub fn clear_filters(&mut self) {
        self.query.selected.clear();
    }

    pub fn sections<'t>(&self, table: &'t FacetTable) -> &'t [FacetSection] {
        match self.query.scope {
            CategoryScope::All => &[],
            CategoryScope::Only(category) => table.sections_for(category),
        }
    }

    pub fn results<'a, F>(&self, filter: &F, catalog: &'a [Product]) -> Vec<&'a Product>
    where
        F: ProductFilter,
    {
        filter.filter(catalog, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{filter_products, BrowseState, CategoryScope, FacetFilter, SelectedFilters};
    use crate::domain::product::{Category, Gender, Price, Product};
    use crate::facets::table::{
        BRAND_SECTION, FRAME_COLOR_SECTION, GENDER_SECTION, MATERIAL_SECTION, SHAPE_SECTION,
        TREATMENTS_SECTION,
    };

    fn price(cents: i64) -> Price {
        Price::Amount(Decimal::new(cents, 2))
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("f1", "Aviator Classic", Category::Frame, "Ray-Ban", price(89_900))
                .with_gender(Gender::Male)
                .with_frame_color("Gold")
                .with_material("Metal")
                .with_tags(["Aviator"]),
            Product::new("f2", "Cat Eye Bloom", Category::Frame, "Vogue", price(54_900))
                .with_gender(Gender::Female)
                .with_frame_color("Tortoise")
                .with_material("Acetate")
                .with_tags(["Cat-eye"]),
            Product::new("f3", "Round Studio", Category::Frame, "Oakley", price(61_000))
                .with_gender(Gender::Unisex)
                .with_frame_color("Black")
                .with_material("Acetate")
                .with_tags(["Round"]),
            Product::new("f4", "Junior Flex", Category::Frame, "Nano", price(29_900))
                .with_gender(Gender::Child)
                .with_frame_color("")
                .with_tags(["Square"]),
            Product::new("l1", "Varilux Comfort Max", Category::Lens, "Essilor", Price::OnRequest)
                .with_tags(["Progressive", "Varilux"]),
            Product::new("l2", "Hoya Blue Control", Category::Lens, "Hoya", price(45_000))
                .with_tags(["Monofocal", "Blue-light filter"]),
            Product::new("a1", "Ray-Ban Hard Case", Category::Accessory, "Ray-Ban", price(9_900)),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|product| product.id.0.clone()).collect()
    }

    #[test]
    fn empty_query_returns_category_subset_in_catalog_order() {
        let catalog = catalog();
        let none = SelectedFilters::new();

        let frames = filter_products(&catalog, CategoryScope::Only(Category::Frame), "", &none);
        assert_eq!(ids(&frames), vec!["f1", "f2", "f3", "f4"]);

        let accessories =
            filter_products(&catalog, CategoryScope::Only(Category::Accessory), "", &none);
        assert_eq!(ids(&accessories), vec!["a1"]);

        let all = filter_products(&catalog, CategoryScope::All, "", &none);
        assert_eq!(all.len(), catalog.len());
    }

    #[test]
    fn filtering_twice_is_order_stable() {
        let catalog = catalog();
        let selected = SelectedFilters::new().with_option(MATERIAL_SECTION, "Acetate");

        let first = filter_products(&catalog, CategoryScope::All, "o", &selected);
        let second = filter_products(&catalog, CategoryScope::All, "o", &selected);
        assert_eq!(first, second);
    }

    #[test]
    fn search_matches_name_or_brand_case_insensitively() {
        let catalog = catalog();
        let none = SelectedFilters::new();

        let by_brand = filter_products(&catalog, CategoryScope::All, "RAY-BAN", &none);
        assert_eq!(ids(&by_brand), vec!["f1", "a1"]);

        let by_name = filter_products(&catalog, CategoryScope::All, "bloom", &none);
        assert_eq!(ids(&by_name), vec!["f2"]);

        let nothing = filter_products(&catalog, CategoryScope::All, "monocle", &none);
        assert!(nothing.is_empty());
    }

    #[test]
    fn unisex_frames_satisfy_either_gendered_option() {
        let catalog = catalog();
        let frames = CategoryScope::Only(Category::Frame);

        let male = SelectedFilters::new().with_option(GENDER_SECTION, "Male");
        assert_eq!(ids(&filter_products(&catalog, frames, "", &male)), vec!["f1", "f3"]);

        let female = SelectedFilters::new().with_option(GENDER_SECTION, "Female");
        assert_eq!(ids(&filter_products(&catalog, frames, "", &female)), vec!["f2", "f3"]);
    }

    #[test]
    fn literal_gender_options_match_by_equality_only() {
        let catalog = catalog();
        let frames = CategoryScope::Only(Category::Frame);

        // Asymmetric on purpose: "Unisex" does not pull in Male or Female frames.
        let unisex = SelectedFilters::new().with_option(GENDER_SECTION, "Unisex");
        assert_eq!(ids(&filter_products(&catalog, frames, "", &unisex)), vec!["f3"]);

        let child = SelectedFilters::new().with_option(GENDER_SECTION, "Child");
        assert_eq!(ids(&filter_products(&catalog, frames, "", &child)), vec!["f4"]);
    }

    #[test]
    fn options_within_a_section_are_ored_and_sections_are_anded() {
        let catalog = catalog();
        let frames = CategoryScope::Only(Category::Frame);

        let colors = SelectedFilters::new()
            .with_option(FRAME_COLOR_SECTION, "Gold")
            .with_option(FRAME_COLOR_SECTION, "Black");
        assert_eq!(ids(&filter_products(&catalog, frames, "", &colors)), vec!["f1", "f3"]);

        let narrowed = colors.with_option(MATERIAL_SECTION, "Acetate");
        assert_eq!(ids(&filter_products(&catalog, frames, "", &narrowed)), vec!["f3"]);
    }

    #[test]
    fn empty_frame_color_never_matches() {
        let catalog = catalog();
        let selected = SelectedFilters::new().with_option(FRAME_COLOR_SECTION, "");

        let results =
            filter_products(&catalog, CategoryScope::Only(Category::Frame), "", &selected);
        assert!(results.is_empty());
    }

    #[test]
    fn generic_sections_match_tags_or_brand() {
        let catalog = catalog();
        let lenses = CategoryScope::Only(Category::Lens);

        let varilux = SelectedFilters::new().with_option(BRAND_SECTION, "Varilux");
        assert_eq!(ids(&filter_products(&catalog, lenses, "", &varilux)), vec!["l1"]);

        let hoya = SelectedFilters::new().with_option(BRAND_SECTION, "hoya");
        assert_eq!(ids(&filter_products(&catalog, lenses, "", &hoya)), vec!["l2"]);

        let blue = SelectedFilters::new().with_option(TREATMENTS_SECTION, "blue-light");
        assert_eq!(ids(&filter_products(&catalog, lenses, "", &blue)), vec!["l2"]);

        let shape = SelectedFilters::new().with_option(SHAPE_SECTION, "Round");
        assert_eq!(
            ids(&filter_products(&catalog, CategoryScope::Only(Category::Frame), "", &shape)),
            vec!["f3"]
        );
    }

    #[test]
    fn unknown_sections_use_the_generic_rule() {
        let catalog = catalog();
        let selected = SelectedFilters::new().with_option("Collection", "cat-eye");

        let results = filter_products(&catalog, CategoryScope::All, "", &selected);
        assert_eq!(ids(&results), vec!["f2"]);
    }

    #[test]
    fn toggling_an_option_off_clears_the_constraint() {
        let catalog = catalog();
        let mut selected = SelectedFilters::new();
        selected.toggle(MATERIAL_SECTION, "Metal");
        assert!(selected.is_selected(MATERIAL_SECTION, "Metal"));
        selected.toggle(MATERIAL_SECTION, "Metal");

        assert!(selected.is_empty());
        let results =
            filter_products(&catalog, CategoryScope::Only(Category::Frame), "", &selected);
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn changing_category_resets_selected_filters() {
        let mut browse = BrowseState::new(CategoryScope::Only(Category::Frame));
        browse.toggle_option(GENDER_SECTION, "Male");
        browse.set_search_term("classic");

        browse.set_scope(CategoryScope::Only(Category::Frame));
        assert!(!browse.selected().is_empty(), "same page keeps its selection");

        browse.set_scope(CategoryScope::Only(Category::Lens));
        assert!(browse.selected().is_empty());
        assert_eq!(browse.search_term(), "classic");
    }

    #[test]
    fn browse_state_drives_the_filter_engine() {
        let catalog = catalog();
        let filter = FacetFilter::default();
        let mut browse = BrowseState::new(CategoryScope::Only(Category::Lens));

        assert_eq!(browse.sections(filter.table()).len(), 3);
        browse.toggle_option(BRAND_SECTION, "Varilux");
        assert_eq!(ids(&browse.results(&filter, &catalog)), vec!["l1"]);

        browse.clear_filters();
        assert_eq!(ids(&browse.results(&filter, &catalog)), vec!["l1", "l2"]);

        browse.set_scope(CategoryScope::All);
        assert!(browse.sections(filter.table()).is_empty());
    }

    #[test]
    fn scope_parses_all_and_category_names() {
        assert_eq!("all".parse::<CategoryScope>(), Ok(CategoryScope::All));
        assert_eq!("frames".parse::<CategoryScope>(), Ok(CategoryScope::Only(Category::Frame)));
        assert!("home".parse::<CategoryScope>().is_err());
    }
}
