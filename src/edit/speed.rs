//! Playback speed via frame rate scaling.
//!
//! Multiplying `fr` changes how fast a player steps through the frames
//! without touching any frame-indexed data. It is an approximation of
//! retiming, not time remapping.

use serde_json::Value;
use tracing::warn;

use super::EditStep;
use crate::document::Animation;
use crate::error::{RetouchError, RetouchResult};

/// Multiplies the document frame rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpeedScale {
    multiplier: Option<f64>,
}

impl SpeedScale {
    /// Fails unless `multiplier` is finite and greater than zero.
    pub fn new(multiplier: f64) -> RetouchResult<Self> {
        validate_multiplier(multiplier)?;
        Ok(Self::unchecked(multiplier))
    }

    pub(crate) fn unchecked(multiplier: f64) -> Self {
        Self {
            multiplier: Some(multiplier),
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier.unwrap_or(1.0)
    }
}

/// Checks that a speed multiplier is usable.
pub fn validate_multiplier(multiplier: f64) -> RetouchResult<()> {
    if multiplier.is_finite() && multiplier > 0.0 {
        Ok(())
    } else {
        Err(RetouchError::InvalidSpeed(multiplier))
    }
}

impl EditStep for SpeedScale {
    fn name(&self) -> &'static str {
        "speed"
    }

    fn is_noop(&self) -> bool {
        self.multiplier.is_none_or(|m| m == 1.0)
    }

    fn apply(&self, animation: &mut Animation) -> RetouchResult<()> {
        let Some(fr) = animation.frame_rate() else {
            warn!("document has no numeric frame rate, speed change skipped");
            return Ok(());
        };
        animation
            .root_mut()
            .insert("fr".to_owned(), Value::from(fr * self.multiplier()));
        Ok(())
    }
}
