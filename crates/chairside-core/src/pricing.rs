//! # Pricing Engine
//!
//! Maps resolved selections through the catalog to line items and a
//! subtotal.
//!
//! ```text
//! [hair, beard] ──► catalog ──► [LineItem $35.00, LineItem $15.00] ──► subtotal $50.00
//! ```
//!
//! An empty selection prices to an empty list and a zero subtotal. That is
//! a "no services selected" state, not a free booking; checkout refuses
//! to confirm it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{ServiceCatalog, ServiceDefinition};
use crate::money::Money;
use crate::types::SelectedService;

/// One priced service on the booking. Quantity is always 1; repeated
/// selections produce repeated line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub service: ServiceDefinition,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(service: ServiceDefinition) -> Self {
        LineItem {
            service,
            quantity: 1,
        }
    }

    pub fn line_total(&self) -> Money {
        Money::from_cents(
            self.service
                .base_price
                .cents()
                .saturating_mul(i64::from(self.quantity)),
        )
    }
}

/// Line items plus their subtotal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricedSelection {
    pub line_items: Vec<LineItem>,
    pub subtotal: Money,
}

impl PricedSelection {
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Prices the selections in order. Never fails.
///
/// ```rust
/// use chairside_core::catalog::ServiceCatalog;
/// use chairside_core::pricing::price;
///
/// let priced = price(&[], &ServiceCatalog::standard());
/// assert!(priced.line_items.is_empty());
/// assert!(priced.subtotal.is_zero());
/// ```
pub fn price(selected: &[SelectedService], catalog: &ServiceCatalog) -> PricedSelection {
    let line_items: Vec<LineItem> = selected
        .iter()
        .map(|s| LineItem::new(catalog.resolve(s)))
        .collect();

    let subtotal = line_items.iter().map(LineItem::line_total).sum();

    PricedSelection {
        line_items,
        subtotal,
    }
}
