use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Price, Product, ProductId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Price,
    pub quantity: u32,
}

impl BudgetItem {
    /// Quote-on-request lines contribute nothing to the estimate.
    pub fn line_total(&self) -> Decimal {
        self.price.amount().map(|amount| amount * Decimal::from(self.quantity)).unwrap_or_default()
    }
}

/// The in-progress selection a customer builds before asking for a quote.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    items: Vec<BudgetItem>,
}

impl Budget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line; adding the same product again creates a second line.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        self.items.push(BudgetItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price.clone(),
            quantity: quantity.max(1),
        });
    }

    /// Removes every line for `product_id`; returns how many were dropped.
    pub fn remove(&mut self, product_id: &ProductId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| &item.product_id != product_id);
        before - self.items.len()
    }

    pub fn items(&self) -> &[BudgetItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(BudgetItem::line_total).sum()
    }

    pub fn estimated_total(&self, lens: Option<&Product>) -> Decimal {
        let lens_price = lens.and_then(|lens| lens.price.amount()).unwrap_or_default();
        self.subtotal() + lens_price
    }
}
