//! Layer renaming by position.

use serde_json::Value;
use tracing::warn;

use super::EditStep;
use crate::document::Animation;
use crate::error::{RetouchError, RetouchResult};

/// Sets `nm` on one top-level layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRename {
    pub index: usize,
    pub name: String,
}

impl LayerRename {
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

/// Applies a list of renames in order.
///
/// Unlike hiding, renaming a layer that does not exist is a caller bug and
/// fails with [`RetouchError::LayerOutOfRange`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameLayers {
    renames: Vec<LayerRename>,
}

impl RenameLayers {
    pub fn new(renames: impl IntoIterator<Item = LayerRename>) -> Self {
        Self {
            renames: renames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, rename: LayerRename) {
        self.renames.push(rename);
    }
}

impl EditStep for RenameLayers {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn is_noop(&self) -> bool {
        self.renames.is_empty()
    }

    fn apply(&self, animation: &mut Animation) -> RetouchResult<()> {
        let len = animation.layer_count();
        if let Some(bad) = self.renames.iter().find(|r| r.index >= len) {
            return Err(RetouchError::LayerOutOfRange {
                index: bad.index,
                len,
            });
        }

        let Some(layers) = animation.layer_values_mut() else {
            return Ok(());
        };
        for rename in &self.renames {
            match layers[rename.index].as_object_mut() {
                Some(layer) => {
                    layer.insert("nm".to_owned(), Value::String(rename.name.clone()));
                }
                None => warn!(index = rename.index, "layer is not a record, rename skipped"),
            }
        }
        Ok(())
    }
}
