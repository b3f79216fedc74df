pub mod filter;
pub mod table;

pub use filter::{
    filter_products, BrowseState, CategoryScope, FacetFilter, FilterQuery, ProductFilter,
    SelectedFilters,
};
pub use table::{FacetKind, FacetSection, FacetTable};
