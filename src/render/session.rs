//! The resizer's state: one source, one spec, one output surface.
//!
//! A host UI drives a [`Session`] with plain calls: load an image, feed
//! [`SpecEdit`]s from its form controls, resize, export. Actions that need an
//! image are no-ops until one is ready.

use std::path::Path;

use image::RgbaImage;

use crate::dimension::{Size, SpecEdit, TargetSpec};
use crate::plan::{FillMode, plan_with_background};
use crate::render::encode::{Export, OutputFormat, export};
use crate::render::surface::{draw, draw_preview};
use crate::render::{ImageSource, MAX_SIZE_LIMIT, RenderError, ResizeConfig};

/// Where the session is in loading its source image.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState {
    /// Nothing loaded yet.
    #[default]
    Empty,
    /// A decode is in flight. Resize and export are disabled.
    Loading,
    /// A source image is available.
    Ready(ImageSource),
    /// The last load failed; the message is for display.
    Failed(String),
}

impl LoadState {
    pub fn source(&self) -> Option<&ImageSource> {
        match self {
            Self::Ready(source) => Some(source),
            _ => None,
        }
    }
}

/// A single-image resize session.
///
/// ```
/// use canvasfit::render::{OutputFormat, ResizeConfig, Session};
/// use canvasfit::{FillMode, Size, SpecEdit};
/// use image::{DynamicImage, RgbaImage, Rgba};
///
/// let mut session = Session::new(ResizeConfig::default());
/// let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(400, 200, Rgba([255, 0, 0, 255])));
/// session.set_source(canvasfit::render::ImageSource::from_image(img).unwrap());
///
/// session.set_fill_mode(FillMode::Fit);
/// session.edit(SpecEdit::Width(Some(100)));
/// session.edit(SpecEdit::Height(Some(100)));
/// assert_eq!(session.resize(), Some(Size::new(100, 100)));
///
/// session.set_output_format(OutputFormat::Jpeg);
/// let file = session.export().unwrap().unwrap();
/// assert_eq!(file.file_name, "resized-image.jpg");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: ResizeConfig,
    load: LoadState,
    spec: TargetSpec,
    fill_mode: FillMode,
    format: OutputFormat,
    surface: Option<RgbaImage>,
    preview: Option<RgbaImage>,
}

impl Session {
    pub fn new(config: ResizeConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn source(&self) -> Option<&ImageSource> {
        self.load.source()
    }

    pub fn spec(&self) -> &TargetSpec {
        &self.spec
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    /// The last resized surface.
    pub fn surface(&self) -> Option<&RgbaImage> {
        self.surface.as_ref()
    }

    /// The original-image preview surface.
    pub fn preview(&self) -> Option<&RgbaImage> {
        self.preview.as_ref()
    }

    /// Whether resize and export can run.
    pub fn is_ready(&self) -> bool {
        matches!(self.load, LoadState::Ready(_))
    }

    /// Mark a decode as started. The previous surface and preview are
    /// dropped; resize and export are disabled until
    /// [`complete_load`](Self::complete_load).
    pub fn begin_load(&mut self) {
        self.load = LoadState::Loading;
        self.surface = None;
        self.preview = None;
    }

    /// Finish a load started with [`begin_load`](Self::begin_load).
    ///
    /// On success the new source replaces the old one along with its
    /// surface and the spec takes (and returns) the source size. On failure
    /// the error is recorded as [`LoadState::Failed`] and returned.
    pub fn complete_load(
        &mut self,
        result: Result<ImageSource, RenderError>,
    ) -> Result<Size, RenderError> {
        match result {
            Ok(source) => Ok(self.set_source(source)),
            Err(err) => {
                log::warn!("image load failed: {err}");
                self.load = LoadState::Failed(err.to_string());
                self.surface = None;
                self.preview = None;
                Err(err)
            }
        }
    }

    /// Decode `bytes` and make them the source.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Size, RenderError> {
        self.begin_load();
        let decoded = ImageSource::decode(bytes, &self.config);
        self.complete_load(decoded)
    }

    /// Read and decode a file and make it the source.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Size, RenderError> {
        self.begin_load();
        let decoded = ImageSource::open(path, &self.config);
        self.complete_load(decoded)
    }

    /// Replace the source with an already-decoded image. Returns its size.
    pub fn set_source(&mut self, source: ImageSource) -> Size {
        let size = source.size();
        self.spec = self.spec.apply(SpecEdit::SourceLoaded(size));
        self.preview = Some(draw_preview(
            &source,
            self.config.preview_min_edge,
            self.config.filter,
        ));
        self.surface = None;
        self.load = LoadState::Ready(source);
        size
    }

    /// Apply a form edit to the target spec.
    pub fn edit(&mut self, edit: SpecEdit) -> &TargetSpec {
        self.spec = self.spec.apply(edit);
        &self.spec
    }

    pub fn set_fill_mode(&mut self, mode: FillMode) {
        self.fill_mode = mode;
    }

    /// Set the fill mode by name (`stretch`, `fit`, `crop`).
    pub fn set_fill_mode_name(&mut self, name: &str) -> Result<FillMode, RenderError> {
        let mode =
            FillMode::from_name(name).ok_or_else(|| RenderError::UnknownFillMode(name.to_string()))?;
        self.fill_mode = mode;
        Ok(mode)
    }

    pub fn set_output_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    /// Set the output format by name (`png`, `jpg`, `webp`).
    pub fn set_output_format_name(&mut self, name: &str) -> Result<OutputFormat, RenderError> {
        let format = OutputFormat::from_name(name)
            .ok_or_else(|| RenderError::UnknownFormat(name.to_string()))?;
        self.format = format;
        Ok(format)
    }

    /// Render the source at the resolved target size.
    ///
    /// Returns the rendered size, or `None` (leaving the previous surface)
    /// when no source is ready or the spec resolves to an empty size.
    pub fn resize(&mut self) -> Option<Size> {
        let source = self.load.source()?;
        let max = self.config.max_size.min(MAX_SIZE_LIMIT);
        let target = self.spec.resolve(Some(source.aspect()), max);
        if target.is_empty() {
            log::debug!("resize skipped: {:?} resolves to {target:?}", self.spec);
            return None;
        }

        let plan = plan_with_background(
            source.width(),
            source.height(),
            target.width,
            target.height,
            self.fill_mode,
            self.config.background,
        );
        log::debug!(
            "{} {}x{} onto {}x{}: {plan:?}",
            self.fill_mode,
            source.width(),
            source.height(),
            target.width,
            target.height
        );

        self.surface = Some(draw(source, &plan, target, self.config.filter));
        self.spec = self.spec.apply(SpecEdit::Resolved(target));
        Some(target)
    }

    /// Encode the current surface in the selected format.
    ///
    /// `Ok(None)` when nothing has been resized yet or a load is in flight.
    pub fn export(&self) -> Result<Option<Export>, RenderError> {
        if !self.is_ready() {
            return Ok(None);
        }
        match &self.surface {
            Some(surface) => export(surface, self.format, self.config.jpeg_quality).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba};

    fn source(w: u32, h: u32) -> ImageSource {
        let img = RgbaImage::from_pixel(w, h, Rgba([0, 128, 0, 255]));
        ImageSource::from_image(DynamicImage::ImageRgba8(img)).unwrap()
    }

    fn png(w: u32, h: u32) -> Vec<u8> {
        crate::render::encode(
            &RgbaImage::from_pixel(w, h, Rgba([9, 9, 9, 255])),
            OutputFormat::Png,
            95,
        )
        .unwrap()
    }

    #[test]
    fn empty_session_is_noop() {
        let mut s = Session::new(ResizeConfig::default());
        assert!(!s.is_ready());
        assert_eq!(s.resize(), None);
        assert!(s.export().unwrap().is_none());
    }

    #[test]
    fn load_fills_spec_and_preview() {
        let mut s = Session::new(ResizeConfig::default());
        s.load_bytes(&png(320, 100)).unwrap();
        assert!(s.is_ready());
        assert_eq!(s.spec().width, Some(320));
        assert_eq!(s.spec().height, Some(100));
        assert_eq!(s.preview().unwrap().dimensions(), (320, 200));
        assert!(s.surface().is_none());
    }

    #[test]
    fn load_failure_is_reported() {
        let mut s = Session::new(ResizeConfig::default());
        s.set_source(source(10, 10));
        assert!(s.load_bytes(b"nope").is_err());
        assert!(matches!(s.load_state(), LoadState::Failed(_)));
        assert!(!s.is_ready());
        assert_eq!(s.resize(), None);
    }

    #[test]
    fn loading_disables_actions() {
        let mut s = Session::new(ResizeConfig::default());
        s.set_source(source(10, 10));
        assert!(s.resize().is_some());
        s.begin_load();
        assert_eq!(s.resize(), None);
        assert!(s.export().unwrap().is_none());
    }

    #[test]
    fn loading_drops_previous_surfaces() {
        let mut s = Session::new(ResizeConfig::default());
        s.set_source(source(10, 10));
        s.resize().unwrap();
        assert!(s.surface().is_some() && s.preview().is_some());
        s.begin_load();
        assert!(s.surface().is_none());
        assert!(s.preview().is_none());
    }

    #[test]
    fn locked_resize_derives_and_writes_back() {
        let mut s = Session::new(ResizeConfig::default());
        s.set_source(source(1600, 900));
        s.edit(SpecEdit::LockAspect(true));
        s.edit(SpecEdit::Width(Some(800)));
        assert_eq!(s.resize(), Some(Size::new(800, 450)));
        assert_eq!(s.spec().height, Some(450));
        assert_eq!(s.surface().unwrap().dimensions(), (800, 450));
    }

    #[test]
    fn resize_clamps_to_config_max() {
        let mut s = Session::new(ResizeConfig::default().max_size(64));
        s.set_source(source(10, 10));
        s.edit(SpecEdit::Width(Some(6000)));
        assert_eq!(s.resize(), Some(Size::new(64, 10)));
        assert_eq!(s.spec().width, Some(64));
    }

    #[test]
    fn resize_never_exceeds_size_limit() {
        let mut config = ResizeConfig::default();
        config.max_size = u32::MAX;
        let mut s = Session::new(config);
        s.set_source(source(10, 10));
        s.edit(SpecEdit::Width(Some(u32::MAX)));
        s.edit(SpecEdit::Height(Some(1)));
        assert_eq!(s.resize(), Some(Size::new(MAX_SIZE_LIMIT, 1)));
        assert_eq!(s.surface().unwrap().dimensions(), (MAX_SIZE_LIMIT, 1));
    }

    #[test]
    fn empty_resolution_keeps_previous_surface() {
        let mut s = Session::new(ResizeConfig::default());
        s.set_source(source(10, 10));
        s.resize().unwrap();
        s.edit(SpecEdit::Width(None));
        assert_eq!(s.resize(), None);
        assert_eq!(s.surface().unwrap().dimensions(), (10, 10));
    }

    #[test]
    fn new_source_discards_surface() {
        let mut s = Session::new(ResizeConfig::default());
        s.set_source(source(10, 10));
        s.resize().unwrap();
        s.set_source(source(20, 5));
        assert!(s.surface().is_none());
        assert_eq!(s.spec(), &TargetSpec::new(20, 5));
    }

    #[test]
    fn fit_uses_configured_background() {
        let config = ResizeConfig::default().background_color("#000").unwrap();
        let mut s = Session::new(config);
        s.set_source(source(20, 10));
        s.set_fill_mode(FillMode::Fit);
        s.edit(SpecEdit::Height(Some(20)));
        s.resize().unwrap();
        assert_eq!(*s.surface().unwrap().get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn names_are_validated() {
        let mut s = Session::new(ResizeConfig::default());
        assert_eq!(s.set_fill_mode_name("crop").unwrap(), FillMode::Crop);
        assert!(matches!(
            s.set_fill_mode_name("zoom"),
            Err(RenderError::UnknownFillMode(_))
        ));
        assert_eq!(s.fill_mode(), FillMode::Crop);
        assert_eq!(s.set_output_format_name("jpg").unwrap(), OutputFormat::Jpeg);
        assert!(matches!(
            s.set_output_format_name("bmp"),
            Err(RenderError::UnknownFormat(_))
        ));
    }

    #[test]
    fn export_uses_selected_format() {
        let mut s = Session::new(ResizeConfig::default());
        s.set_source(source(30, 30));
        s.edit(SpecEdit::Width(Some(12)));
        s.edit(SpecEdit::Height(Some(8)));
        s.resize().unwrap();
        s.set_output_format(OutputFormat::WebP);
        let file = s.export().unwrap().unwrap();
        assert_eq!(file.file_name, "resized-image.webp");
        let back = image::load_from_memory(&file.bytes).unwrap();
        assert_eq!((back.width(), back.height()), (12, 8));
    }
}
