//! lottie-retouch: Static color and layer editing for Lottie animations
//!
//! This crate inspects animation documents, lists their static colors and
//! layers, and produces edited copies with colors replaced, layers hidden
//! or renamed, and playback speed scaled. Documents are kept as opaque JSON
//! trees, so every field the crate does not edit passes through unchanged.
//!
//! # Example
//!
//! ```
//! use lottie_retouch::{apply_modifications, extract_colors, Animation, Modifications};
//!
//! let anim = Animation::from_slice(
//!     "logo.json",
//!     br##"{
//!         "fr": 30, "ip": 0, "op": 60,
//!         "layers": [
//!             {"ty": 4, "nm": "Mark", "shapes": [{"ty": "fl", "c": {"a": 0, "k": [1, 0, 0, 1]}}]},
//!             {"ty": 1, "nm": "Backdrop", "sc": "#00ff00"}
//!         ]
//!     }"##,
//! )
//! .unwrap();
//!
//! let colors: Vec<String> = extract_colors(&anim).iter().map(|c| c.to_string()).collect();
//! assert_eq!(colors, ["#ff0000", "#00ff00"]);
//!
//! let edits = Modifications::new()
//!     .with_color_override("#ff0000".parse().unwrap(), "#0000ff".parse().unwrap())
//!     .with_hidden_layer(1);
//! let edited = apply_modifications(&anim, &edits).unwrap();
//! assert_eq!(edited.layer_count(), 1);
//! ```
//!
//! # Sessions
//!
//! For interactive tools, [`Session`] keeps loaded files, their pending
//! [`OverrideSet`]s and the playback settings in one place:
//!
//! ```
//! use lottie_retouch::{IncomingFile, Session};
//!
//! let mut session = Session::new();
//! let report = session.add_files([IncomingFile::new("a.json", r#"{"fr": 24, "layers": []}"#)]);
//! let id = report.added[0];
//!
//! session.set_speed_multiplier(id, 2.0).unwrap();
//! let export = session.export(id).unwrap();
//! assert_eq!(export.file_name, "a-modified.json");
//! ```

mod color;
mod document;
mod edit;
mod error;
mod extract;
mod overrides;
mod session;
pub mod shape;
pub mod svg;

pub use color::HexColor;
pub use document::{Animation, AnimationMeta, LayerInfo, LayerKind, DEFAULT_FRAME_RATE};
pub use edit::{
    apply_modifications, EditStep, HideLayers, LayerRename, Modifications, Recolor, RenameLayers,
    SpeedScale,
};
pub use error::{RetouchError, RetouchResult};
pub use extract::extract_colors;
pub use overrides::OverrideSet;
pub use session::{
    Configurable, Direction, ExportedFile, FileId, GridSize, IncomingFile, IngestFailure,
    IngestReport, LoadedFile, PlaybackParams, Session, MAX_ZOOM, MIN_ZOOM,
};
pub use shape::{ColorNode, MAX_DEPTH};
