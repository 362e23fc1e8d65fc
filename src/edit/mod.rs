//! Document mutation as a pipeline of independent edit steps.
//!
//! [`apply_modifications`] clones the input and runs each configured step
//! on the copy. Steps with nothing to do are skipped entirely, so an
//! empty recolor map never costs a tree walk.
//!
//! # Step Order
//!
//! ```text
//! input (never modified)
//!     │ clone
//!     ▼
//! ┌──────────┐
//! │ Recolor  │ ◄── independent of layer indices
//! └────┬─────┘
//!      ▼
//! ┌──────────┐
//! │  Rename  │ ◄── original layer indices
//! └────┬─────┘
//!      ▼
//! ┌──────────┐
//! │   Hide   │ ◄── original layer indices, removes entries
//! └────┬─────┘
//!      ▼
//! ┌──────────┐
//! │  Speed   │ ◄── scales `fr`
//! └──────────┘
//! ```
//!
//! Renames and hides both address layers by their position in the input,
//! which is why removal runs after renaming.

pub mod hide;
pub mod recolor;
pub mod rename;
pub mod speed;

pub use hide::HideLayers;
pub use recolor::Recolor;
pub use rename::{LayerRename, RenameLayers};
pub use speed::SpeedScale;

use tracing::debug;

use crate::color::HexColor;
use crate::document::Animation;
use crate::error::RetouchResult;
use crate::overrides::OverrideSet;

// ============================================================================
// EditStep Trait
// ============================================================================

/// A single self-contained document edit.
pub trait EditStep {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Returns true when the step would leave every document unchanged.
    fn is_noop(&self) -> bool;

    /// Applies the step to a working copy.
    fn apply(&self, animation: &mut Animation) -> RetouchResult<()>;
}

fn run_step(step: &impl EditStep, animation: &mut Animation) -> RetouchResult<()> {
    if step.is_noop() {
        return Ok(());
    }
    debug!(step = step.name(), "applying edit step");
    step.apply(animation)
}

// ============================================================================
// Modifications
// ============================================================================

/// Everything to change in one [`apply_modifications`] call.
///
/// ```
/// use lottie_retouch::{apply_modifications, Animation, Modifications};
///
/// let anim = Animation::from_slice(
///     "a.json",
///     br##"{"fr": 30, "layers": [{"ty": 1, "sc": "#ff0000"}, {"ty": 3}]}"##,
/// )
/// .unwrap();
///
/// let edits = Modifications::new()
///     .with_color_override("#ff0000".parse().unwrap(), "#00f".parse().unwrap())
///     .with_hidden_layer(1)
///     .with_speed(2.0)
///     .unwrap();
///
/// let edited = apply_modifications(&anim, &edits).unwrap();
/// assert_eq!(edited.layer_count(), 1);
/// assert_eq!(edited.frame_rate(), Some(60.0));
/// assert_eq!(anim.layer_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Modifications {
    pub recolor: Recolor,
    pub rename: RenameLayers,
    pub hide: HideLayers,
    pub speed: SpeedScale,
}

impl Modifications {
    /// Creates an empty set of modifications.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the overlay edits held in an override set.
    pub fn from_overrides(overrides: &OverrideSet) -> Self {
        Self {
            recolor: Recolor::new(overrides.color_overrides().clone()),
            rename: RenameLayers::default(),
            hide: HideLayers::new(overrides.hidden_layers().iter().copied()),
            speed: overrides
                .speed_multiplier()
                .map(SpeedScale::unchecked)
                .unwrap_or_default(),
        }
    }

    /// Replaces `from` with `to` wherever `from` appears as a static color.
    pub fn with_color_override(mut self, from: HexColor, to: HexColor) -> Self {
        self.recolor.insert(from, to);
        self
    }

    /// Removes the top-level layer at `index`.
    pub fn with_hidden_layer(mut self, index: usize) -> Self {
        self.hide.insert(index);
        self
    }

    /// Renames the top-level layer at `index`.
    pub fn with_rename(mut self, index: usize, name: impl Into<String>) -> Self {
        self.rename.push(LayerRename::new(index, name));
        self
    }

    /// Scales the frame rate. Fails unless `multiplier` is finite and positive.
    pub fn with_speed(mut self, multiplier: f64) -> RetouchResult<Self> {
        self.speed = SpeedScale::new(multiplier)?;
        Ok(self)
    }

    /// Returns true if applying these modifications changes nothing.
    pub fn is_empty(&self) -> bool {
        self.recolor.is_noop() && self.rename.is_noop() && self.hide.is_noop() && self.speed.is_noop()
    }
}

/// Produces an edited copy of `animation`.
///
/// The input is never modified. The only error is a rename that targets a
/// layer index the input does not have.
pub fn apply_modifications(
    animation: &Animation,
    modifications: &Modifications,
) -> RetouchResult<Animation> {
    let mut edited = animation.clone();

    run_step(&modifications.recolor, &mut edited)?;
    run_step(&modifications.rename, &mut edited)?;
    run_step(&modifications.hide, &mut edited)?;
    run_step(&modifications.speed, &mut edited)?;

    Ok(edited)
}

// ============================================================================
// Tests
// ============================================================================
