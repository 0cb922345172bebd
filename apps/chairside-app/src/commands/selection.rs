//! # Selection Commands
//!
//! The service menu and the in-app multi-select.
//!
//! ## Selection Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Selected │────►│ Confirm  │────►│ Receipt  │       │
//! │  │          │     │          │     │  screen  │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                  │             │
//! │                  toggle_service                    confirm_booking      │
//! │                        │                          (checkout.rs)         │
//! │                        ▼                                  │             │
//! │                  clear_selection ◄────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chairside_core::{SelectedService, ServiceDefinition};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{CatalogState, SelectionState, ServiceSelection};

/// Selection with its running subtotal, for the sticky footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub items: Vec<SelectedService>,
    pub subtotal_cents: i64,
}

impl SelectionResponse {
    fn build(selection: &ServiceSelection, catalog: &CatalogState) -> Self {
        let priced = chairside_core::pricing::price(&selection.items, &catalog.services);
        SelectionResponse {
            items: selection.items.clone(),
            subtotal_cents: priced.subtotal.cents(),
        }
    }
}

/// Lists the service menu in display order.
pub fn list_services(catalog: &CatalogState) -> Vec<ServiceDefinition> {
    debug!("list_services command");
    catalog.services.services().to_vec()
}

/// Adds or removes a service from the multi-select.
///
/// The label is taken from the catalog so the selection always carries
/// the display name the menu showed.
///
/// ## Errors
/// - `NOT_FOUND` when the key is not on the menu
/// - `VALIDATION_ERROR` when the booking already holds the maximum
pub fn toggle_service(
    catalog: &CatalogState,
    selection: &SelectionState,
    service_key: &str,
) -> Result<SelectionResponse, ApiError> {
    debug!(service_key, "toggle_service command");

    let definition = catalog
        .services
        .lookup(service_key)
        .ok_or_else(|| ApiError::not_found("Service", service_key))?;
    let service = SelectedService::new(definition.key.clone(), definition.name.clone());

    selection.with_selection_mut(|s| -> Result<SelectionResponse, ApiError> {
        s.toggle(service)?;
        Ok(SelectionResponse::build(s, catalog))
    })?
}

pub fn get_selection(
    catalog: &CatalogState,
    selection: &SelectionState,
) -> Result<SelectionResponse, ApiError> {
    debug!("get_selection command");
    selection.with_selection(|s| SelectionResponse::build(s, catalog))
}

pub fn clear_selection(selection: &SelectionState) -> Result<(), ApiError> {
    debug!("clear_selection command");
    selection.with_selection_mut(|s| s.clear())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_toggle_service_uses_menu_label() {
        let catalog = CatalogState::standard();
        let selection = SelectionState::new();

        let response = toggle_service(&catalog, &selection, "beard").unwrap();
        assert_eq!(response.items, vec![SelectedService::new("beard", "Beard Trim")]);
        assert_eq!(response.subtotal_cents, 1500);

        let response = toggle_service(&catalog, &selection, "hair").unwrap();
        assert_eq!(response.subtotal_cents, 5000);
    }

    #[test]
    fn test_toggle_unknown_service_is_not_found() {
        let catalog = CatalogState::standard();
        let selection = SelectionState::new();

        let err = toggle_service(&catalog, &selection, "massage").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(selection.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_clear_selection() {
        let catalog = CatalogState::standard();
        let selection = SelectionState::new();
        toggle_service(&catalog, &selection, "shave").unwrap();

        clear_selection(&selection).unwrap();
        assert_eq!(get_selection(&catalog, &selection).unwrap().subtotal_cents, 0);
    }
}
