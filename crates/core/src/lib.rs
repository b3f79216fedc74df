pub mod audit;
pub mod budget;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod facets;
pub mod fixtures;
pub mod flows;
pub mod recommendation;

pub use audit::{AuditContext, AuditEvent, AuditSink, InMemoryAuditSink};
pub use budget::{Budget, BudgetItem};
pub use catalog::CatalogStore;
pub use domain::anamnesis::{AnamnesisAnswers, DegreeBand, Lifestyle, Purpose};
pub use domain::product::{Category, Gender, Price, Product, ProductId};
pub use errors::{ApplicationError, DomainError, ErrorClass, InterfaceError};
pub use facets::{
    filter_products, BrowseState, CategoryScope, FacetFilter, FacetKind, FacetSection,
    FacetTable, SelectedFilters,
};
pub use flows::{QuoteSummary, QuoteWizard, WizardState, WizardTransitionError};
pub use recommendation::{
    recommend_lenses, LensRecommender, RecommendationSettings, RuleBasedRecommender,
};
