//! # Service Catalog
//!
//! The single lookup table from service key to display name, duration,
//! base price and description.
//!
//! ## Lookup Contract
//! ```text
//! SelectedService { key: "beard", label: "Beard Trim" }
//!      │
//!      ▼
//! catalog.lookup("beard") ──► Some(ServiceDefinition { $15.00, 20 min })
//!
//! SelectedService { key: "lineup", label: "Line-Up" }
//!      │
//!      ▼
//! catalog.lookup("lineup") ──► None
//!      │
//!      ▼
//! ServiceDefinition::fallback ──► { "Line-Up", 45 min, $30.00, is_fallback }
//! ```
//!
//! The fallback keeps pricing total: a key that has not been cataloged yet
//! still prices, it never errors.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::SelectedService;
use crate::validation::{
    validate_display_name, validate_price, validate_service_key, ValidationResult,
};

/// Duration label given to services missing from the catalog.
pub const FALLBACK_DURATION: &str = "45 min";

/// Base price given to services missing from the catalog.
pub const FALLBACK_PRICE: Money = Money::from_dollars(30);

// =============================================================================
// Service Definition
// =============================================================================

/// A bookable service. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    pub key: String,
    pub name: String,
    /// Display label, e.g. "45 min".
    pub duration: String,
    pub base_price: Money,
    pub description: String,
    /// True when synthesized for a key the catalog does not know.
    #[serde(default)]
    pub is_fallback: bool,
}

impl ServiceDefinition {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        duration: impl Into<String>,
        base_price: Money,
        description: impl Into<String>,
    ) -> Self {
        ServiceDefinition {
            key: key.into(),
            name: name.into(),
            duration: duration.into(),
            base_price,
            description: description.into(),
            is_fallback: false,
        }
    }

    /// Synthesizes a definition for an uncataloged selection.
    ///
    /// The label becomes the name; a blank label falls back to the key.
    pub fn fallback(selected: &SelectedService) -> Self {
        let name = if selected.label.trim().is_empty() {
            selected.key.clone()
        } else {
            selected.label.clone()
        };

        ServiceDefinition {
            key: selected.key.clone(),
            name,
            duration: FALLBACK_DURATION.to_string(),
            base_price: FALLBACK_PRICE,
            description: String::new(),
            is_fallback: true,
        }
    }

    /// Checks key, name and price.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_service_key(&self.key)?;
        validate_display_name(&self.name)?;
        validate_price("base_price", self.base_price)?;
        Ok(())
    }
}

// =============================================================================
// Service Catalog
// =============================================================================

/// Read-only catalog of services, in declaration order.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    services: Vec<ServiceDefinition>,
    index: HashMap<String, usize>,
}

impl ServiceCatalog {
    /// Builds a catalog from definitions, rejecting invalid or duplicate ones.
    pub fn from_definitions(definitions: Vec<ServiceDefinition>) -> ValidationResult<Self> {
        let mut index = HashMap::with_capacity(definitions.len());

        for (position, definition) in definitions.iter().enumerate() {
            definition.validate()?;

            if index.insert(definition.key.clone(), position).is_some() {
                return Err(ValidationError::Duplicate {
                    field: "service key".to_string(),
                    value: definition.key.clone(),
                });
            }
        }

        Ok(ServiceCatalog {
            services: definitions,
            index,
        })
    }

    /// The built-in barbershop menu.
    pub fn standard() -> Self {
        let services = standard_services();
        let index = services
            .iter()
            .enumerate()
            .map(|(position, s)| (s.key.clone(), position))
            .collect();
        ServiceCatalog { services, index }
    }

    /// Looks up a service by key.
    pub fn lookup(&self, key: &str) -> Option<&ServiceDefinition> {
        self.index
            .get(key)
            .and_then(|&position| self.services.get(position))
    }

    /// Returns the catalog definition, or a synthesized fallback.
    pub fn resolve(&self, selected: &SelectedService) -> ServiceDefinition {
        match self.lookup(&selected.key) {
            Some(definition) => definition.clone(),
            None => {
                debug!(
                    key = %selected.key,
                    label = %selected.label,
                    "Service not cataloged, using fallback"
                );
                ServiceDefinition::fallback(selected)
            }
        }
    }

    /// Base price for a key, using the fallback price when uncataloged.
    pub fn price_of(&self, key: &str) -> Money {
        self.lookup(key)
            .map(|s| s.base_price)
            .unwrap_or(FALLBACK_PRICE)
    }

    /// All cataloged services in declaration order.
    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        ServiceCatalog::standard()
    }
}

fn standard_services() -> Vec<ServiceDefinition> {
    vec![
        ServiceDefinition::new(
            "hair",
            "Haircut & Styling",
            "45 min",
            Money::from_dollars(35),
            "Precision cut with wash and a styled finish",
        ),
        ServiceDefinition::new(
            "beard",
            "Beard Trim",
            "20 min",
            Money::from_dollars(15),
            "Shape-up and line work with a hot towel finish",
        ),
        ServiceDefinition::new(
            "shave",
            "Hot Towel Shave",
            "30 min",
            Money::from_dollars(25),
            "Straight razor shave with hot towels and balm",
        ),
        ServiceDefinition::new(
            "color",
            "Hair Coloring",
            "90 min",
            Money::from_dollars(60),
            "Full color or highlights, consultation included",
        ),
        ServiceDefinition::new(
            "kids",
            "Kids Cut",
            "30 min",
            Money::from_dollars(20),
            "Haircut for children under 12",
        ),
        ServiceDefinition::new(
            "facial",
            "Express Facial",
            "30 min",
            Money::from_dollars(40),
            "Cleanse, exfoliate and hydrate",
        ),
        ServiceDefinition::new(
            "treatment",
            "Scalp Treatment",
            "30 min",
            Money::from_dollars(30),
            "Deep-conditioning scalp massage and treatment",
        ),
        ServiceDefinition::new(
            "wash",
            "Wash & Blow-Dry",
            "25 min",
            Money::from_dollars(20),
            "Shampoo, condition and blow-dry",
        ),
    ]
}
