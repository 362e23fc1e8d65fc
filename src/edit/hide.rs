//! Layer removal by position.

use std::collections::BTreeSet;

use tracing::debug;

use super::EditStep;
use crate::document::Animation;
use crate::error::RetouchResult;

/// Drops top-level layers by their original index.
///
/// Indices past the end never match and are ignored. Nested precomp layers
/// are not touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HideLayers {
    indices: BTreeSet<usize>,
}

impl HideLayers {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, index: usize) {
        self.indices.insert(index);
    }
}

impl EditStep for HideLayers {
    fn name(&self) -> &'static str {
        "hide"
    }

    fn is_noop(&self) -> bool {
        self.indices.is_empty()
    }

    fn apply(&self, animation: &mut Animation) -> RetouchResult<()> {
        let Some(layers) = animation.layer_values_mut() else {
            return Ok(());
        };

        let before = layers.len();
        let mut index = 0;
        layers.retain(|_| {
            let keep = !self.indices.contains(&index);
            index += 1;
            keep
        });

        debug!(removed = before - layers.len(), "removed hidden layers");
        Ok(())
    }
}
