//! # Preference Repository
//!
//! Lightweight per-form preferences, currently just the pricing mode.
//! Lives in its own key namespace: clearing a draft must not reset the
//! form's tax-in/tax-out toggle.

use tracing::warn;

use kakeibo_core::PricingMode;

use crate::backend::StorageBackend;
use crate::error::{StoreError, StoreResult};

const PREF_PREFIX: &str = "pref:pricing-mode:";

/// Repository for form preferences.
pub struct PreferenceRepository<'a, B: StorageBackend> {
    backend: &'a B,
}

impl<'a, B: StorageBackend> PreferenceRepository<'a, B> {
    pub(crate) fn new(backend: &'a B) -> Self {
        PreferenceRepository { backend }
    }

    fn storage_key(form_key: &str) -> String {
        format!("{}{}", PREF_PREFIX, form_key)
    }

    /// Returns the stored pricing mode for a form, defaulting to
    /// tax-inclusive when absent or unreadable.
    pub fn pricing_mode(&self, form_key: &str) -> PricingMode {
        let raw = match self.backend.get(&Self::storage_key(form_key)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return PricingMode::default(),
            Err(e) => {
                warn!(form_key = %form_key, error = %e, "pricing mode read failed, using default");
                return PricingMode::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(form_key = %form_key, error = %e, "stored pricing mode malformed, using default");
            PricingMode::default()
        })
    }

    /// Persists the pricing mode for a form.
    pub fn set_pricing_mode(&self, form_key: &str, mode: PricingMode) -> StoreResult<()> {
        let json = serde_json::to_string(&mode).map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.backend.set(&Self::storage_key(form_key), &json)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
