use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::debug;

use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::domain::product::{Category, Product, ProductId};
use crate::errors::{ApplicationError, DomainError};

/// Owned in-memory catalog. Reads go through shared borrows; the only writes are
/// the like counter and the rating, applied through `&mut self`.
///
/// Construction rejects duplicate ids and negative prices.
///
/// `version` starts at zero and moves forward once per effective mutation, so a
/// host can tell whether results it computed earlier are stale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogStore {
    products: Vec<Product>,
    version: u64,
}

impl CatalogStore {
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(DomainError::DuplicateProductId(product.id.clone()));
            }
            let mut amounts = product.price.amount().into_iter().chain(product.original_price);
            if amounts.any(|amount| amount < Decimal::ZERO) {
                return Err(DomainError::InvariantViolation(format!(
                    "product `{}` has a negative price",
                    product.id
                )));
            }
        }
        Ok(Self { products, version: 0 })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ApplicationError> {
        let products: Vec<Product> = serde_json::from_str(raw)
            .map_err(|error| ApplicationError::Catalog(format!("invalid catalog json: {error}")))?;
        Ok(Self::new(products)?)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    /// The lens family in catalog order, as the recommendation engine expects it.
    pub fn lenses(&self) -> Vec<Product> {
        self.products.iter().filter(|product| product.category == Category::Lens).cloned().collect()
    }

    /// Adds exactly one like. Unknown ids change nothing and return `None`.
    pub fn increment_likes(&mut self, product_id: &ProductId) -> Option<u32> {
        let product = self.products.iter_mut().find(|product| &product.id == product_id)?;
        product.likes = product.likes.saturating_add(1);
        let likes = product.likes;
        self.version += 1;
        debug!(
            event_name = "catalog.likes_incremented",
            product_id = %product_id,
            likes,
            catalog_version = self.version,
            "product like recorded"
        );
        Some(likes)
    }

    /// Overwrites the rating unconditionally; range checks belong to the caller.
    /// Returns `false` when the id is unknown.
    pub fn set_rating(&mut self, product_id: &ProductId, value: f32) -> bool {
        let Some(product) = self.products.iter_mut().find(|product| &product.id == product_id)
        else {
            return false;
        };
        product.rating = Some(value);
        self.version += 1;
        debug!(
            event_name = "catalog.rating_set",
            product_id = %product_id,
            rating = value,
            catalog_version = self.version,
            "product rating overwritten"
        );
        true
    }

    pub fn increment_likes_with_audit<S>(
        &mut self,
        product_id: &ProductId,
        sink: &S,
        audit: &AuditContext,
    ) -> Option<u32>
    where
        S: AuditSink,
    {
        let result = self.increment_likes(product_id);
        let event = match result {
            Some(likes) => self
                .mutation_event(product_id, audit, "catalog.likes_incremented", AuditOutcome::Success)
                .with_metadata("likes", likes.to_string()),
            None => self.mutation_event(
                product_id,
                audit,
                "catalog.likes_incremented",
                AuditOutcome::Ignored,
            ),
        };
        sink.emit(event);
        result
    }

    pub fn set_rating_with_audit<S>(
        &mut self,
        product_id: &ProductId,
        value: f32,
        sink: &S,
        audit: &AuditContext,
    ) -> bool
    where
        S: AuditSink,
    {
        let applied = self.set_rating(product_id, value);
        let outcome = if applied { AuditOutcome::Success } else { AuditOutcome::Ignored };
        sink.emit(
            self.mutation_event(product_id, audit, "catalog.rating_set", outcome)
                .with_metadata("rating", value.to_string()),
        );
        applied
    }

    fn mutation_event(
        &self,
        product_id: &ProductId,
        audit: &AuditContext,
        event_type: &str,
        outcome: AuditOutcome,
    ) -> AuditEvent {
        AuditEvent::new(Some(product_id.clone()), audit, event_type, AuditCategory::Catalog, outcome)
            .with_metadata("catalog_version", self.version.to_string())
    }
}
