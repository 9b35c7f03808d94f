//! The viewport controller: owns the session, the view state and the loaded
//! source, and turns user events into state changes plus [`Effect`]s for the
//! UI to carry out.

use crate::config::Settings;
use crate::error::{Result, TrimError};
use crate::export;
use crate::geometry::DisplayGeometry;
use crate::imaging;
use crate::session::{Advance, Session};
use crate::viewport::{ViewEvent, ViewState};
use eframe::egui::{Pos2, Rect, Vec2, vec2};
use image::DynamicImage;
use std::path::PathBuf;

/// Message shown once the last image of a batch has been handled.
pub const DONE_MESSAGE: &str = "All images have been processed.";

/// Everything the user can do, in the order the UI loop delivers it.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Result of the image picker; empty when cancelled.
    SelectImages(Vec<PathBuf>),
    /// Result of the folder picker; `None` when cancelled.
    SelectOutputFolder(Option<PathBuf>),
    StartTrimming,
    /// The area the image is drawn in, in display coordinates.
    ViewportChanged(Rect),
    View(ViewEvent),
    /// Save the crop and move to the next image.
    PrimaryClick,
    /// Save the crop and stay on this image.
    ModifiedClick,
    Minimize,
}

/// Work the UI has to do in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Non-blocking confirmation.
    Info(String),
    /// Blocking error dialog.
    Error { title: String, message: String },
    /// Blocking notice that the batch is complete.
    Done(String),
    /// The displayed source changed (or went away); textures must be rebuilt.
    ImageChanged,
    Saved(PathBuf),
    Minimize,
}

impl From<TrimError> for Effect {
    fn from(err: TrimError) -> Self {
        Effect::Error {
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }
}

pub struct Controller {
    settings: Settings,
    session: Session,
    view: ViewState,
    source: Option<DynamicImage>,
    viewport: Rect,
}

impl Controller {
    pub fn new(settings: Settings, session: Session) -> Self {
        let view = ViewState::new(&settings);
        Self {
            settings,
            session,
            view,
            source: None,
            viewport: Rect::from_min_size(Pos2::ZERO, vec2(1280.0, 720.0)),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The source currently being trimmed, after any minimum-size upscale.
    pub fn source(&self) -> Option<&DynamicImage> {
        self.source.as_ref()
    }

    pub fn is_trimming(&self) -> bool {
        self.source.is_some()
    }

    fn source_size(&self) -> Option<Vec2> {
        self.source
            .as_ref()
            .map(|image| vec2(image.width() as f32, image.height() as f32))
    }

    /// Layout of the current image and frame, if an image is shown.
    pub fn geometry(&self) -> Option<DisplayGeometry> {
        let source_size = self.source_size()?;
        Some(self.view.geometry(&self.settings, self.viewport, source_size))
    }

    /// Applies one event and returns what the UI must do about it.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::SelectImages(paths) => {
                let count = paths.len();
                if self.session.select_images(paths) {
                    log::info!("Selected {count} image(s)");
                    if self.source.take().is_some() {
                        effects.push(Effect::ImageChanged);
                    }
                    effects.push(Effect::Info(format!("{count} image(s) selected.")));
                }
            }
            Event::SelectOutputFolder(dir) => {
                if self.session.select_output_folder(dir)
                    && let Some(dir) = self.session.output_dir()
                {
                    log::info!("Output folder: {}", dir.display());
                    effects.push(Effect::Info(format!("Selected folder: {}", dir.display())));
                }
            }
            Event::StartTrimming => match self.session.start() {
                Ok(()) => {
                    log::info!("Trimming {} image(s)", self.session.len());
                    self.show_current(&mut effects);
                }
                Err(err) => effects.push(err.into()),
            },
            Event::ViewportChanged(rect) => {
                self.viewport = rect;
            }
            Event::View(view_event) => {
                let source_size = self.source_size().unwrap_or(Vec2::ZERO);
                self.view = self.view.reduce(view_event, &self.settings, source_size);
            }
            Event::PrimaryClick => {
                if !self.is_trimming() {
                    return effects;
                }
                match self.save_crop() {
                    Ok(path) => {
                        effects.push(Effect::Saved(path));
                        match self.session.advance() {
                            Advance::Next => self.show_current(&mut effects),
                            Advance::Finished => self.finish(&mut effects),
                        }
                    }
                    Err(err) => effects.push(err.into()),
                }
            }
            Event::ModifiedClick => {
                if !self.is_trimming() {
                    return effects;
                }
                match self.save_crop() {
                    Ok(path) => effects.push(Effect::Saved(path)),
                    Err(err) => effects.push(err.into()),
                }
            }
            Event::Minimize => effects.push(Effect::Minimize),
        }
        effects
    }

    /// Loads the image at the session index. Unreadable files are reported
    /// and skipped.
    fn show_current(&mut self, effects: &mut Vec<Effect>) {
        while let Some(path) = self.session.current().map(|path| path.to_path_buf()) {
            match imaging::open_source(&path, self.settings.min_source_dimension) {
                Ok(image) => {
                    log::info!(
                        "Showing {} ({}x{})",
                        path.display(),
                        image.width(),
                        image.height()
                    );
                    let source_size = vec2(image.width() as f32, image.height() as f32);
                    self.source = Some(image);
                    self.view = self
                        .view
                        .reduce(ViewEvent::Reset, &self.settings, source_size);
                    effects.push(Effect::ImageChanged);
                    return;
                }
                Err(err) => {
                    log::warn!("{err}");
                    effects.push(Effect::Error {
                        title: err.title().to_string(),
                        message: format!("{err}\nThe image will be skipped."),
                    });
                    if self.session.advance() == Advance::Finished {
                        break;
                    }
                }
            }
        }
        self.finish(effects);
    }

    fn finish(&mut self, effects: &mut Vec<Effect>) {
        log::info!("{DONE_MESSAGE}");
        self.session.clear();
        self.source = None;
        effects.push(Effect::ImageChanged);
        effects.push(Effect::Done(DONE_MESSAGE.to_string()));
    }

    /// Crops the frame out of the unzoomed source, resizes it to the frame
    /// size and writes it to the output folder.
    fn save_crop(&self) -> Result<PathBuf> {
        let dir = self.session.output_dir().ok_or(TrimError::NoOutputFolder)?;
        let source = self.source.as_ref().ok_or(TrimError::NoImageShown)?;
        let geometry = self.geometry().ok_or(TrimError::NoImageShown)?;

        let (width, height) = self.view.frame_shape.pixel_size(&self.settings);
        let crop = geometry.crop_rect();
        log::debug!("Cropping {crop:?} at zoom {:.3}", geometry.zoom);
        let trimmed = imaging::crop_and_resize(source, crop, width, height);

        export::export_crop(
            &trimmed,
            dir,
            &self.settings.output_prefix,
            self.session.position(),
            export::unix_timestamp(),
        )
        .inspect_err(|err| log::warn!("{err}"))
    }
}
