//! Static color replacement.

use std::collections::BTreeMap;

use tracing::debug;

use super::EditStep;
use crate::color::HexColor;
use crate::document::Animation;
use crate::error::RetouchResult;
use crate::shape;

/// Replaces static colors according to an original → replacement map.
///
/// Matching uses the same shape rules as extraction, so any color returned
/// by [`extract_colors`](crate::extract_colors) can be a key. Each node is
/// rewritten at most once; chains such as `a → b`, `b → c` do not cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recolor {
    overrides: BTreeMap<HexColor, HexColor>,
}

impl Recolor {
    pub fn new(overrides: BTreeMap<HexColor, HexColor>) -> Self {
        Self { overrides }
    }

    pub fn insert(&mut self, from: HexColor, to: HexColor) {
        self.overrides.insert(from, to);
    }
}

impl EditStep for Recolor {
    fn name(&self) -> &'static str {
        "recolor"
    }

    fn is_noop(&self) -> bool {
        self.overrides.is_empty()
    }

    fn apply(&self, animation: &mut Animation) -> RetouchResult<()> {
        let mut rewritten = 0usize;

        shape::visit_record_tree_mut(animation.root_mut(), &mut |record| {
            if let Some(to) = shape::static_color(record).and_then(|c| self.overrides.get(&c)) {
                if shape::set_static_color(record, *to) {
                    rewritten += 1;
                }
            }
            if let Some(to) = shape::solid_color(record).and_then(|c| self.overrides.get(&c)) {
                if shape::set_solid_color(record, *to) {
                    rewritten += 1;
                }
            }
        });

        debug!(rewritten, "recolored static colors");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hex(s: &str) -> HexColor {
        s.parse().unwrap()
    }

    #[test]
    fn solid_colors_are_rewritten_lowercase() {
        let mut anim = Animation::from_value(
            "solid.json",
            json!({"layers": [{"ty": 1, "sc": "#FF0000", "sw": 100}]}),
        )
        .unwrap();
        Recolor::new(BTreeMap::from([(hex("#ff0000"), hex("#ABCDEF"))]))
            .apply(&mut anim)
            .unwrap();
        assert_eq!(anim.layer_values()[0]["sc"], json!("#abcdef"));
        assert_eq!(anim.layer_values()[0]["sw"], json!(100));
    }

    #[test]
    fn unmatched_colors_are_left_alone() {
        let doc = json!({"layers": [{"shapes": [
            {"ty": "st", "c": {"a": 0, "k": [0.1, 0.2, 0.3, 1]}, "w": {"a": 0, "k": 2}}
        ]}]});
        let mut anim = Animation::from_value("stroke.json", doc.clone()).unwrap();
        Recolor::new(BTreeMap::from([(hex("#ffffff"), hex("#000000"))]))
            .apply(&mut anim)
            .unwrap();
        assert_eq!(anim.into_value(), doc);
    }

    #[test]
    fn replacements_do_not_cascade() {
        let mut anim = Animation::from_value(
            "chain.json",
            json!({"layers": [{"ty": 1, "sc": "#ff0000"}, {"ty": 1, "sc": "#00ff00"}]}),
        )
        .unwrap();
        Recolor::new(BTreeMap::from([
            (hex("#ff0000"), hex("#00ff00")),
            (hex("#00ff00"), hex("#0000ff")),
        ]))
        .apply(&mut anim)
        .unwrap();
        assert_eq!(anim.layer_values()[0]["sc"], json!("#00ff00"));
        assert_eq!(anim.layer_values()[1]["sc"], json!("#0000ff"));
    }

    #[test]
    fn near_colors_quantizing_to_a_key_are_rewritten() {
        let mut anim = Animation::from_value(
            "near.json",
            json!({"layers": [{"shapes": [{"c": {"a": 0, "k": [0.999, 0.001, 0.0]}}]}]}),
        )
        .unwrap();
        Recolor::new(BTreeMap::from([(hex("#ff0000"), hex("#336699"))]))
            .apply(&mut anim)
            .unwrap();
        let fill = anim.layer_values()[0]["shapes"][0].as_object().unwrap();
        assert_eq!(shape::static_color(fill), Some(hex("#336699")));
        assert_eq!(anim.layer_values()[0]["shapes"][0]["c"]["k"].as_array().unwrap().len(), 3);
    }
}
