//! Viewer session state.
//!
//! A [`Session`] owns every loaded file together with its pending
//! [`OverrideSet`], the current selection and the playback settings handed
//! to a renderer. All changes go through methods on the session; there is
//! no shared or global state.

use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::color::HexColor;
use crate::document::{Animation, AnimationMeta, LayerInfo};
use crate::edit::speed::validate_multiplier;
use crate::edit::{apply_modifications, Modifications};
use crate::error::{RetouchError, RetouchResult};
use crate::extract::extract_colors;
use crate::overrides::OverrideSet;

/// Zoom limits for the preview canvas.
pub const MIN_ZOOM: f64 = 0.25;
pub const MAX_ZOOM: f64 = 4.0;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Types whose pending edits can be loaded from and saved to an [`OverrideSet`].
pub trait Configurable {
    /// Layers `overrides` on top of the current settings.
    fn apply_overrides(&mut self, overrides: &OverrideSet);

    /// Exports the current settings.
    fn export_overrides(&self) -> OverrideSet;
}

// ============================================================================
// Loaded Files
// ============================================================================

/// Session-unique handle for a loaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u64);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw file contents handed over by whatever reads files from disk or a drop zone.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// A file that could not be loaded.
#[derive(Debug)]
pub struct IngestFailure {
    pub name: String,
    pub error: RetouchError,
}

/// Outcome of loading a batch of files.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub added: Vec<FileId>,
    pub failed: Vec<IngestFailure>,
}

/// A loaded animation and its pending edits.
///
/// `base` is the document as loaded and is never changed. Renames are
/// baked into `working`, a separate copy, so they can be reverted;
/// colors, hidden layers and speed stay in the override set until preview
/// or export.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    id: FileId,
    name: String,
    size: usize,
    added_at: SystemTime,
    meta: AnimationMeta,
    base: Animation,
    working: Animation,
    overrides: OverrideSet,
}

impl LoadedFile {
    fn new(id: FileId, name: String, size: usize, animation: Animation) -> Self {
        Self {
            id,
            name,
            size,
            added_at: SystemTime::now(),
            meta: animation.meta(),
            working: animation.clone(),
            base: animation,
            overrides: OverrideSet::new(),
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of the loaded file in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn added_at(&self) -> SystemTime {
        self.added_at
    }

    /// Metadata of the document as loaded.
    pub fn meta(&self) -> &AnimationMeta {
        &self.meta
    }

    /// The document as loaded.
    pub fn base(&self) -> &Animation {
        &self.base
    }

    /// The document with renames applied.
    pub fn document(&self) -> &Animation {
        &self.working
    }

    pub fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    /// Static colors of the working document.
    pub fn colors(&self) -> Vec<HexColor> {
        extract_colors(&self.working)
    }

    /// Layers of the working document, before hiding.
    pub fn layers(&self) -> Vec<LayerInfo> {
        self.working.layers()
    }

    /// Returns true if any override or rename is active.
    pub fn has_modifications(&self) -> bool {
        !self.overrides.is_empty() || self.working != self.base
    }

    /// The document as a preview should show it: recolored, without hidden
    /// layers. Speed is not baked in; see [`Session::playback`].
    pub fn preview(&self) -> RetouchResult<Animation> {
        let mut modifications = Modifications::from_overrides(&self.overrides);
        modifications.speed = Default::default();
        apply_modifications(&self.working, &modifications)
    }

    /// The document with every pending edit baked in, as indented JSON.
    pub fn export(&self) -> RetouchResult<ExportedFile> {
        let edited = apply_modifications(&self.working, &Modifications::from_overrides(&self.overrides))?;
        Ok(ExportedFile {
            file_name: self.export_file_name(),
            contents: edited.to_json_pretty()?,
        })
    }

    /// Download name: the original stem, `-modified` when edited, `.json`.
    pub fn export_file_name(&self) -> String {
        let stem = self.name.strip_suffix(".json").unwrap_or(&self.name);
        let suffix = if self.has_modifications() { "-modified" } else { "" };
        format!("{stem}{suffix}.json")
    }

    /// Renames a layer of the working document.
    pub fn rename_layer(&mut self, index: usize, name: impl Into<String>) -> RetouchResult<()> {
        self.working = apply_modifications(&self.working, &Modifications::new().with_rename(index, name))?;
        Ok(())
    }

    /// Drops every override and rename.
    pub fn reset_all(&mut self) {
        self.overrides.clear();
        self.working = self.base.clone();
    }
}

impl Configurable for LoadedFile {
    fn apply_overrides(&mut self, overrides: &OverrideSet) {
        self.overrides.merge(overrides);
    }

    fn export_overrides(&self) -> OverrideSet {
        self.overrides.clone()
    }
}

/// An exported document ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub contents: String,
}

// ============================================================================
// Playback
// ============================================================================

/// Playback direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    /// `1` forward, `-1` reverse.
    pub fn sign(self) -> i8 {
        match self {
            Self::Forward => 1,
            Self::Reverse => -1,
        }
    }

    fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Preview card size in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridSize {
    Small,
    #[default]
    Medium,
    Large,
    #[serde(rename = "xlarge")]
    XLarge,
}

/// What a renderer needs to play one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackParams {
    pub playing: bool,
    pub speed: f64,
    pub looping: bool,
    pub direction: Direction,
}

// ============================================================================
// Session
// ============================================================================

/// All state of one viewer session.
///
/// # Example
///
/// ```
/// use lottie_retouch::{IncomingFile, Session};
///
/// let mut session = Session::new();
/// let report = session.add_files([
///     IncomingFile::new("ok.json", r##"{"fr": 30, "layers": [{"ty": 1, "sc": "#ff0000"}]}"##),
///     IncomingFile::new("broken.json", "{"),
/// ]);
/// assert_eq!(report.added.len(), 1);
/// assert_eq!(report.failed[0].name, "broken.json");
///
/// let id = report.added[0];
/// session
///     .set_color_override(id, "#ff0000".parse().unwrap(), "#00ff00".parse().unwrap())
///     .unwrap();
/// let export = session.export(id).unwrap();
/// assert_eq!(export.file_name, "ok-modified.json");
/// assert!(export.contents.contains("#00ff00"));
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    files: Vec<LoadedFile>,
    selected: Option<FileId>,
    next_id: u64,
    is_playing: bool,
    speed: f64,
    looping: bool,
    direction: Direction,
    show_grid: bool,
    zoom: f64,
    bg_color: String,
    grid_size: GridSize,
    card_playing: HashMap<FileId, bool>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            selected: None,
            next_id: 0,
            is_playing: false,
            speed: 1.0,
            looping: true,
            direction: Direction::Forward,
            show_grid: true,
            zoom: 1.0,
            bg_color: "transparent".to_owned(),
            grid_size: GridSize::Medium,
            card_playing: HashMap::new(),
        }
    }
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------------

    /// Parses and adds a batch of files.
    ///
    /// A file that fails to parse is reported in the result and does not
    /// stop the rest of the batch. If nothing was selected, the first
    /// added file becomes selected.
    pub fn add_files(&mut self, batch: impl IntoIterator<Item = IncomingFile>) -> IngestReport {
        let mut report = IngestReport::default();

        for incoming in batch {
            match Animation::from_slice(&incoming.name, &incoming.bytes) {
                Ok(animation) => {
                    let id = self.insert(incoming.name, incoming.bytes.len(), animation);
                    report.added.push(id);
                }
                Err(error) => {
                    warn!(name = %incoming.name, %error, "skipping file");
                    report.failed.push(IngestFailure {
                        name: incoming.name,
                        error,
                    });
                }
            }
        }

        if self.selected.is_none() {
            self.selected = report.added.first().copied();
        }
        debug!(added = report.added.len(), failed = report.failed.len(), "ingested batch");
        report
    }

    fn insert(&mut self, name: String, size: usize, animation: Animation) -> FileId {
        let id = FileId(self.next_id);
        self.next_id += 1;
        self.files.push(LoadedFile::new(id, name, size, animation));
        id
    }

    pub fn files(&self) -> &[LoadedFile] {
        &self.files
    }

    pub fn file(&self, id: FileId) -> RetouchResult<&LoadedFile> {
        self.files
            .iter()
            .find(|f| f.id == id)
            .ok_or(RetouchError::UnknownFile(id))
    }

    fn file_mut(&mut self, id: FileId) -> RetouchResult<&mut LoadedFile> {
        self.files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(RetouchError::UnknownFile(id))
    }

    /// Removes a file and its overrides.
    ///
    /// If it was selected, the first remaining file becomes selected.
    pub fn remove_file(&mut self, id: FileId) -> RetouchResult<()> {
        let position = self
            .files
            .iter()
            .position(|f| f.id == id)
            .ok_or(RetouchError::UnknownFile(id))?;
        self.files.remove(position);
        self.card_playing.remove(&id);

        if self.selected == Some(id) {
            self.selected = self.files.first().map(|f| f.id);
        }
        Ok(())
    }

    /// Removes every file and resets selection and playback.
    pub fn remove_all_files(&mut self) {
        self.files.clear();
        self.selected = None;
        self.is_playing = false;
        self.card_playing.clear();
    }

    pub fn select_file(&mut self, id: FileId) -> RetouchResult<()> {
        self.file(id)?;
        self.selected = Some(id);
        Ok(())
    }

    pub fn selected_file(&self) -> Option<&LoadedFile> {
        self.selected.and_then(|id| self.file(id).ok())
    }

    // ------------------------------------------------------------------------
    // Per-file edits
    // ------------------------------------------------------------------------

    /// Maps one of the file's colors to a replacement; mapping it back to
    /// itself clears the override.
    pub fn set_color_override(
        &mut self,
        id: FileId,
        original: HexColor,
        replacement: HexColor,
    ) -> RetouchResult<()> {
        self.file_mut(id)?
            .overrides
            .set_color_override(original, replacement);
        Ok(())
    }

    pub fn reset_colors(&mut self, id: FileId) -> RetouchResult<()> {
        self.file_mut(id)?.overrides.reset_colors();
        Ok(())
    }

    /// Hides or shows a layer. Returns `true` if the layer is now hidden.
    pub fn toggle_layer_visibility(&mut self, id: FileId, index: usize) -> RetouchResult<bool> {
        Ok(self.file_mut(id)?.overrides.toggle_layer(index))
    }

    pub fn set_speed_multiplier(&mut self, id: FileId, multiplier: f64) -> RetouchResult<()> {
        self.file_mut(id)?.overrides.set_speed_multiplier(multiplier)
    }

    pub fn rename_layer(
        &mut self,
        id: FileId,
        index: usize,
        name: impl Into<String>,
    ) -> RetouchResult<()> {
        self.file_mut(id)?.rename_layer(index, name)
    }

    /// Layers an override set on top of the file's current overrides.
    pub fn apply_overrides(&mut self, id: FileId, overrides: &OverrideSet) -> RetouchResult<()> {
        self.file_mut(id)?.apply_overrides(overrides);
        Ok(())
    }

    /// Drops every override and rename of a file.
    pub fn reset_all(&mut self, id: FileId) -> RetouchResult<()> {
        self.file_mut(id)?.reset_all();
        Ok(())
    }

    pub fn preview(&self, id: FileId) -> RetouchResult<Animation> {
        self.file(id)?.preview()
    }

    pub fn export(&self, id: FileId) -> RetouchResult<ExportedFile> {
        self.file(id)?.export()
    }

    // ------------------------------------------------------------------------
    // Playback and view
    // ------------------------------------------------------------------------

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Starts or stops global playback. Starting clears per-card state.
    pub fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
        if playing {
            self.card_playing.clear();
        }
    }

    /// Toggles playback of a single card.
    ///
    /// While global playback is on, this turns it off and leaves every
    /// other card playing.
    pub fn toggle_card_playing(&mut self, id: FileId) {
        if self.is_playing {
            self.is_playing = false;
            self.card_playing = self.files.iter().map(|f| (f.id, f.id != id)).collect();
        } else {
            let entry = self.card_playing.entry(id).or_insert(false);
            *entry = !*entry;
        }
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Sets the global playback speed.
    pub fn set_speed(&mut self, speed: f64) -> RetouchResult<()> {
        validate_multiplier(speed)?;
        self.speed = speed;
        Ok(())
    }

    pub fn set_loop(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.flipped();
    }

    /// Playback settings for one card.
    ///
    /// The speed is the session speed times the file's own multiplier,
    /// since previews leave `fr` as loaded.
    pub fn playback(&self, id: FileId) -> PlaybackParams {
        let multiplier = self
            .file(id)
            .ok()
            .and_then(|f| f.overrides.speed_multiplier())
            .unwrap_or(1.0);
        PlaybackParams {
            playing: self.is_playing || self.card_playing.get(&id).copied().unwrap_or(false),
            speed: self.speed * multiplier,
            looping: self.looping,
            direction: self.direction,
        }
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn bg_color(&self) -> &str {
        &self.bg_color
    }

    pub fn set_bg_color(&mut self, color: impl Into<String>) {
        self.bg_color = color.into();
    }

    pub fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    pub fn set_grid_size(&mut self, size: GridSize) {
        self.grid_size = size;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn hex(s: &str) -> HexColor {
        s.parse().unwrap()
    }

    fn doc_bytes() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "v": "5.9.0",
            "fr": 30,
            "ip": 0,
            "op": 60,
            "w": 100,
            "h": 100,
            "layers": [
                {"ty": 4, "nm": "Shape", "shapes": [{"ty": "fl", "c": {"a": 0, "k": [1, 0, 0, 1]}}]},
                {"ty": 1, "nm": "Solid", "sc": "#00ff00"},
                {"ty": 3}
            ]
        }))
        .unwrap()
    }

    fn session_with(names: &[&str]) -> (Session, Vec<FileId>) {
        let mut session = Session::new();
        let report = session.add_files(names.iter().map(|n| IncomingFile::new(*n, doc_bytes())));
        (session, report.added)
    }

    #[test]
    fn ingest_continues_past_bad_files() {
        let mut session = Session::new();
        let report = session.add_files([
            IncomingFile::new("a.json", doc_bytes()),
            IncomingFile::new("bad.json", "not json"),
            IncomingFile::new("list.json", "[]"),
            IncomingFile::new("b.json", doc_bytes()),
        ]);

        assert_eq!(report.added.len(), 2);
        let failed: Vec<_> = report.failed.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(failed, ["bad.json", "list.json"]);
        assert!(matches!(report.failed[0].error, RetouchError::Parse { .. }));
        assert!(matches!(report.failed[1].error, RetouchError::NotAnAnimation { .. }));

        let file = session.file(report.added[0]).unwrap();
        assert_eq!(file.size(), doc_bytes().len());
        assert_eq!(file.meta().duration, 2.0);
        assert_eq!(session.selected_file().unwrap().id(), report.added[0]);
    }

    #[test]
    fn selection_survives_removal() {
        let (mut session, ids) = session_with(&["a.json", "b.json", "c.json"]);
        session.select_file(ids[1]).unwrap();
        session.remove_file(ids[0]).unwrap();
        assert_eq!(session.selected_file().unwrap().id(), ids[1]);

        session.remove_file(ids[1]).unwrap();
        assert_eq!(session.selected_file().unwrap().id(), ids[2]);

        assert!(matches!(
            session.remove_file(ids[1]),
            Err(RetouchError::UnknownFile(_))
        ));
    }

    #[test]
    fn remove_all_clears_everything() {
        let (mut session, ids) = session_with(&["a.json"]);
        session.set_playing(true);
        session.set_color_override(ids[0], hex("#ff0000"), hex("#000000")).unwrap();
        session.remove_all_files();

        assert!(session.files().is_empty());
        assert!(session.selected_file().is_none());
        assert!(!session.is_playing());
    }

    #[test]
    fn colors_and_layers_come_from_working_document() {
        let (session, ids) = session_with(&["a.json"]);
        let file = session.file(ids[0]).unwrap();
        assert_eq!(file.colors(), [hex("#ff0000"), hex("#00ff00")]);
        let names: Vec<_> = file.layers().iter().map(|l| l.display_name()).collect();
        assert_eq!(names, ["Shape", "Solid", "Layer 3"]);
    }

    #[test]
    fn preview_applies_colors_and_visibility_but_not_speed() {
        let (mut session, ids) = session_with(&["a.json"]);
        let id = ids[0];
        session.set_color_override(id, hex("#00ff00"), hex("#0000ff")).unwrap();
        assert!(session.toggle_layer_visibility(id, 0).unwrap());
        session.set_speed_multiplier(id, 2.0).unwrap();

        let preview = session.preview(id).unwrap();
        assert_eq!(preview.layer_count(), 2);
        assert_eq!(preview.layer_values()[0]["sc"], json!("#0000ff"));
        assert_eq!(preview.frame_rate(), Some(30.0));

        // The stored document is untouched.
        assert_eq!(session.file(id).unwrap().document().layer_count(), 3);
    }

    #[test]
    fn file_speed_reaches_preview_playback() {
        let (mut session, ids) = session_with(&["fast.json", "plain.json"]);
        session.set_speed_multiplier(ids[0], 2.0).unwrap();

        assert_eq!(session.preview(ids[0]).unwrap().frame_rate(), Some(30.0));
        assert_eq!(session.playback(ids[0]).speed, 2.0);
        assert_eq!(session.playback(ids[1]).speed, 1.0);

        session.set_speed(0.5).unwrap();
        assert_eq!(session.playback(ids[0]).speed, 1.0);
        assert_eq!(session.playback(ids[1]).speed, 0.5);

        session.set_speed_multiplier(ids[0], 1.0).unwrap();
        assert_eq!(session.playback(ids[0]).speed, 0.5);
    }

    #[test]
    fn export_bakes_every_override() {
        let (mut session, ids) = session_with(&["walk.json"]);
        let id = ids[0];
        session.set_speed_multiplier(id, 2.0).unwrap();
        session.toggle_layer_visibility(id, 2).unwrap();

        let export = session.export(id).unwrap();
        assert_eq!(export.file_name, "walk-modified.json");
        let exported: Value = serde_json::from_str(&export.contents).unwrap();
        assert_eq!(exported["fr"], json!(60.0));
        assert_eq!(exported["layers"].as_array().unwrap().len(), 2);
        assert!(export.contents.contains("\n  \"v\""));
    }

    #[test]
    fn unmodified_export_keeps_name() {
        let (session, ids) = session_with(&["idle.json"]);
        assert_eq!(session.export(ids[0]).unwrap().file_name, "idle.json");

        let (session, ids) = session_with(&["idle.lottie"]);
        assert_eq!(session.export(ids[0]).unwrap().file_name, "idle.lottie.json");
    }

    #[test]
    fn rename_mutates_working_copy_and_reset_reverts() {
        let (mut session, ids) = session_with(&["a.json"]);
        let id = ids[0];
        session.rename_layer(id, 2, "Controller").unwrap();

        let file = session.file(id).unwrap();
        assert_eq!(file.layers()[2].display_name(), "Controller");
        assert_eq!(file.base().layers()[2].display_name(), "Layer 3");
        assert!(file.has_modifications());
        assert!(file.overrides().is_empty());

        assert!(matches!(
            session.rename_layer(id, 3, "Nope"),
            Err(RetouchError::LayerOutOfRange { index: 3, len: 3 })
        ));

        session.reset_all(id).unwrap();
        let file = session.file(id).unwrap();
        assert_eq!(file.layers()[2].display_name(), "Layer 3");
        assert!(!file.has_modifications());
    }

    #[test]
    fn renames_survive_hiding_earlier_layers() {
        let (mut session, ids) = session_with(&["a.json"]);
        let id = ids[0];
        session.rename_layer(id, 1, "Backdrop").unwrap();
        session.toggle_layer_visibility(id, 0).unwrap();

        let preview = session.preview(id).unwrap();
        assert_eq!(preview.layers()[0].display_name(), "Backdrop");
    }

    #[test]
    fn overrides_round_trip_through_configurable() {
        let (mut session, ids) = session_with(&["a.json", "b.json"]);
        session.set_color_override(ids[0], hex("#ff0000"), hex("#101010")).unwrap();
        session.toggle_layer_visibility(ids[0], 1).unwrap();

        let exported = session.file(ids[0]).unwrap().export_overrides();
        session.apply_overrides(ids[1], &exported).unwrap();

        assert_eq!(session.file(ids[1]).unwrap().overrides(), &exported);
        assert_eq!(
            session.export(ids[0]).unwrap().contents,
            session.export(ids[1]).unwrap().contents
        );
    }

    #[test]
    fn card_toggle_while_global_playing() {
        let (mut session, ids) = session_with(&["a.json", "b.json", "c.json"]);
        session.set_playing(true);
        session.toggle_card_playing(ids[1]);

        assert!(!session.is_playing());
        assert!(session.playback(ids[0]).playing);
        assert!(!session.playback(ids[1]).playing);
        assert!(session.playback(ids[2]).playing);

        session.toggle_card_playing(ids[1]);
        assert!(session.playback(ids[1]).playing);

        session.set_playing(true);
        session.set_playing(false);
        assert!(!session.playback(ids[0]).playing);
    }

    #[test]
    fn view_settings() {
        let mut session = Session::new();
        session.set_zoom(10.0);
        assert_eq!(session.zoom(), MAX_ZOOM);
        session.set_zoom(0.01);
        assert_eq!(session.zoom(), MIN_ZOOM);

        session.toggle_direction();
        assert_eq!(session.playback(FileId(0)).direction.sign(), -1);
        assert!(session.set_speed(0.0).is_err());
        session.set_speed(0.5).unwrap();
        session.set_loop(false);

        let params = session.playback(FileId(0));
        assert_eq!(params.speed, 0.5);
        assert!(!params.looping);

        session.set_grid_size(GridSize::XLarge);
        assert_eq!(serde_json::to_string(&session.grid_size()).unwrap(), "\"xlarge\"");
        session.set_bg_color("#202020");
        assert_eq!(session.bg_color(), "#202020");
        session.set_show_grid(false);
        assert!(!session.show_grid());
    }
}
