//! Serializable per-file override set.
//!
//! An [`OverrideSet`] holds the edits that are applied on top of a loaded
//! document at preview and export time: recolors, hidden layers and a
//! speed multiplier. It serializes to JSON so it can be saved next to an
//! animation and applied again later.
//!
//! # Example
//!
//! ```
//! use lottie_retouch::OverrideSet;
//!
//! let overrides = OverrideSet::new()
//!     .with_color_override("#ff0000".parse().unwrap(), "#0000ff".parse().unwrap())
//!     .with_hidden_layer(2);
//!
//! let json = overrides.to_json().unwrap();
//! let restored = OverrideSet::from_json(&json).unwrap();
//! assert_eq!(restored, overrides);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::edit::speed::validate_multiplier;
use crate::error::RetouchResult;

// ============================================================================
// OverrideSet
// ============================================================================

/// Pending edits for one loaded file.
///
/// Two normalizations always hold: a color is never mapped to itself, and
/// a speed multiplier of exactly 1 is stored as no multiplier.
///
/// # JSON Format
///
/// ```json
/// {
///   "colorOverrides": { "#ff0000": "#0000ff" },
///   "hiddenLayers": [2],
///   "speedMultiplier": 2.0
/// }
/// ```
///
/// Every field is optional; empty fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideSet {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    color_overrides: BTreeMap<HexColor, HexColor>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    hidden_layers: BTreeSet<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed_multiplier: Option<f64>,
}

impl OverrideSet {
    /// Creates an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_overrides(&self) -> &BTreeMap<HexColor, HexColor> {
        &self.color_overrides
    }

    pub fn hidden_layers(&self) -> &BTreeSet<usize> {
        &self.hidden_layers
    }

    pub fn speed_multiplier(&self) -> Option<f64> {
        self.speed_multiplier
    }

    /// The current replacement for `original`, if overridden.
    pub fn color_override(&self, original: HexColor) -> Option<HexColor> {
        self.color_overrides.get(&original).copied()
    }

    /// Maps `original` to `replacement`.
    ///
    /// Setting a color back to itself removes the override.
    pub fn set_color_override(&mut self, original: HexColor, replacement: HexColor) {
        if original == replacement {
            self.color_overrides.remove(&original);
        } else {
            self.color_overrides.insert(original, replacement);
        }
    }

    /// Drops every color override.
    pub fn reset_colors(&mut self) {
        self.color_overrides.clear();
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden_layers.contains(&index)
    }

    /// Hides a visible layer or shows a hidden one.
    ///
    /// Returns `true` if the layer is hidden afterwards.
    pub fn toggle_layer(&mut self, index: usize) -> bool {
        if self.hidden_layers.remove(&index) {
            false
        } else {
            self.hidden_layers.insert(index);
            true
        }
    }

    /// Sets the speed multiplier; `1.0` clears it.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) -> RetouchResult<()> {
        validate_multiplier(multiplier)?;
        self.speed_multiplier = (multiplier != 1.0).then_some(multiplier);
        Ok(())
    }

    /// Returns true if no override is active.
    pub fn is_empty(&self) -> bool {
        self.color_overrides.is_empty()
            && self.hidden_layers.is_empty()
            && self.speed_multiplier.is_none()
    }

    /// Discards every override.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Sets a color override.
    pub fn with_color_override(mut self, original: HexColor, replacement: HexColor) -> Self {
        self.set_color_override(original, replacement);
        self
    }

    /// Hides a layer.
    pub fn with_hidden_layer(mut self, index: usize) -> Self {
        self.hidden_layers.insert(index);
        self
    }

    /// Sets the speed multiplier.
    pub fn with_speed_multiplier(mut self, multiplier: f64) -> RetouchResult<Self> {
        self.set_speed_multiplier(multiplier)?;
        Ok(self)
    }

    /// Layers every override of `other` on top of this set.
    pub fn merge(&mut self, other: &OverrideSet) {
        for (&original, &replacement) in &other.color_overrides {
            self.set_color_override(original, replacement);
        }
        self.hidden_layers.extend(other.hidden_layers.iter().copied());
        if other.speed_multiplier.is_some() {
            self.speed_multiplier = other.speed_multiplier;
        }
    }

    /// Serializes the set to a JSON string.
    pub fn to_json(&self) -> RetouchResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the set to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> RetouchResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a set from a JSON string.
    ///
    /// Color values must be `#rgb` or `#rrggbb`. Identity mappings and a
    /// unit speed multiplier are normalized away.
    pub fn from_json(json: &str) -> RetouchResult<Self> {
        let raw: Self = serde_json::from_str(json)?;
        let mut set = Self {
            hidden_layers: raw.hidden_layers,
            ..Self::default()
        };
        for (original, replacement) in raw.color_overrides {
            set.set_color_override(original, replacement);
        }
        if let Some(multiplier) = raw.speed_multiplier {
            set.set_speed_multiplier(multiplier)?;
        }
        Ok(set)
    }
}

// ============================================================================
// Tests
// ============================================================================
