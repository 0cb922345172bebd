//! # Selection Resolver
//!
//! Turns the three raw selection sources into one ordered service list.
//!
//! ## Precedence (first non-empty wins, sources are never merged)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. context_selections     in-app multi-select, most recent intent     │
//! │        │ empty                                                          │
//! │        ▼                                                                │
//! │  2. serialized_selections  JSON from navigation params                 │
//! │        │ absent / malformed / empty list                                │
//! │        ▼                                                                │
//! │  3. legacy_single          oldest single-service interface              │
//! │        │ absent / blank key                                             │
//! │        ▼                                                                │
//! │  4. default_selection()    product default, never empty                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Duplicate keys inside the winning source are passed through as-is.
//! Pricing charges each occurrence.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::types::SelectedService;

/// Service shown when the user reaches checkout without choosing anything.
///
/// Product decision: a plain haircut is the most booked service, so the
/// confirmation screen opens on it rather than on an empty receipt.
pub const DEFAULT_SERVICE_KEY: &str = "hair";
pub const DEFAULT_SERVICE_LABEL: &str = "Haircut & Styling";

/// The fallback list used when every source is empty.
pub fn default_selection() -> Vec<SelectedService> {
    vec![SelectedService::new(DEFAULT_SERVICE_KEY, DEFAULT_SERVICE_LABEL)]
}

// =============================================================================
// Input Bundle
// =============================================================================

/// Every raw selection source available at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInputBundle {
    /// Insertion order is meaningful: first chosen, first listed.
    #[serde(default)]
    pub context_selections: Vec<SelectedService>,
    /// JSON list of `{key, label}`; may be malformed.
    #[serde(default)]
    pub serialized_selections: Option<String>,
    #[serde(default)]
    pub legacy_single: Option<SelectedService>,
}

// =============================================================================
// Resolved Source
// =============================================================================

/// Which source won, together with its services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "source", content = "services", rename_all = "snake_case")]
pub enum SelectionSource {
    Context(Vec<SelectedService>),
    Serialized(Vec<SelectedService>),
    Legacy(Vec<SelectedService>),
    Default(Vec<SelectedService>),
}

/// Tag-only view of [`SelectionSource`], carried on receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSourceKind {
    Context,
    Serialized,
    Legacy,
    Default,
}

impl SelectionSource {
    pub fn kind(&self) -> SelectionSourceKind {
        match self {
            SelectionSource::Context(_) => SelectionSourceKind::Context,
            SelectionSource::Serialized(_) => SelectionSourceKind::Serialized,
            SelectionSource::Legacy(_) => SelectionSourceKind::Legacy,
            SelectionSource::Default(_) => SelectionSourceKind::Default,
        }
    }

    pub fn services(&self) -> &[SelectedService] {
        match self {
            SelectionSource::Context(s)
            | SelectionSource::Serialized(s)
            | SelectionSource::Legacy(s)
            | SelectionSource::Default(s) => s,
        }
    }

    pub fn into_services(self) -> Vec<SelectedService> {
        match self {
            SelectionSource::Context(s)
            | SelectionSource::Serialized(s)
            | SelectionSource::Legacy(s)
            | SelectionSource::Default(s) => s,
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the bundle using [`default_selection`] as the last resort.
///
/// ```rust
/// use chairside_core::selection::{resolve, SelectionInputBundle, SelectionSourceKind};
///
/// let bundle = SelectionInputBundle {
///     serialized_selections: Some(r#"[{"key":"beard","label":"Beard Trim"}]"#.to_string()),
///     ..Default::default()
/// };
/// let resolved = resolve(&bundle);
/// assert_eq!(resolved.kind(), SelectionSourceKind::Serialized);
/// assert_eq!(resolved.services()[0].key, "beard");
/// ```
pub fn resolve(bundle: &SelectionInputBundle) -> SelectionSource {
    resolve_with_default(bundle, default_selection())
}

/// Resolves the bundle with a caller-supplied default list.
pub fn resolve_with_default(
    bundle: &SelectionInputBundle,
    default: Vec<SelectedService>,
) -> SelectionSource {
    if !bundle.context_selections.is_empty() {
        debug!(count = bundle.context_selections.len(), "Using in-app selections");
        return SelectionSource::Context(bundle.context_selections.clone());
    }

    if let Some(parsed) = bundle
        .serialized_selections
        .as_deref()
        .and_then(parse_serialized)
    {
        debug!(count = parsed.len(), "Using serialized selections");
        return SelectionSource::Serialized(parsed);
    }

    if let Some(single) = bundle
        .legacy_single
        .as_ref()
        .filter(|s| !s.key.trim().is_empty())
    {
        debug!(key = %single.key, "Using legacy single selection");
        return SelectionSource::Legacy(vec![single.clone()]);
    }

    debug!("No selection source present, using default services");
    SelectionSource::Default(default)
}

/// Parses a serialized selection list.
///
/// Returns `None` for blank input, malformed JSON, or an empty list. A
/// malformed payload is logged and swallowed.
pub fn parse_serialized(raw: &str) -> Option<Vec<SelectedService>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match serde_json::from_str::<Vec<SelectedService>>(raw) {
        Ok(services) if services.is_empty() => None,
        Ok(services) => Some(services),
        Err(e) => {
            warn!(error = %e, "Malformed serialized selections, falling through");
            None
        }
    }
}
