#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod colors;
mod constants;
mod dialogs;
mod ui;

use clap::Parser;
use constants::{ERROR_TOAST_SECONDS, INFO_TOAST_SECONDS};
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::path::PathBuf;
use trimmr::imaging::{self, DecodedImage};
use trimmr::{Controller, Effect, Event, Session, Settings};

/// Crop a batch of images to a fixed size by hand.
#[derive(Parser, Debug)]
#[command(name = "trimmr", version)]
struct Cli {
    /// Images to trim (PNG or JPEG)
    images: Vec<PathBuf>,

    /// Folder the trimmed images are written to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Settings file [default: <config dir>/trimmr/settings.ron]
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Main application state for the Trimmr window.
pub struct TrimmrApp {
    controller: Controller,
    texture: Option<TextureHandle>,
    toasts: Toasts,
    /// Shift state last frame, to toggle the frame once per press.
    shift_down: bool,
}

impl TrimmrApp {
    fn new(controller: Controller, startup_warnings: Vec<String>) -> Self {
        let mut toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 10.0))
            .direction(egui::Direction::TopDown);

        for warning in startup_warnings {
            toasts.add(Toast {
                kind: ToastKind::Warning,
                text: warning.into(),
                options: ToastOptions::default()
                    .duration_in_seconds(ERROR_TOAST_SECONDS)
                    .show_icon(true),
                ..Default::default()
            });
        }

        Self {
            controller,
            texture: None,
            toasts,
            shift_down: false,
        }
    }

    /// Runs one event through the controller and carries out the effects.
    pub fn dispatch(&mut self, ctx: &egui::Context, event: Event) {
        for effect in self.controller.handle(event) {
            self.apply_effect(ctx, effect);
        }
    }

    fn apply_effect(&mut self, ctx: &egui::Context, effect: Effect) {
        match effect {
            Effect::Info(text) => self.info_toast(text),
            Effect::Saved(path) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.info_toast(format!("Saved {name}"));
            }
            Effect::Error { title, message } => dialogs::show_error(&title, &message),
            Effect::Done(message) => dialogs::show_info("Done", &message),
            Effect::ImageChanged => self.refresh_texture(ctx),
            Effect::Minimize => ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true)),
        }
    }

    fn info_toast(&mut self, text: String) {
        self.toasts.add(Toast {
            kind: ToastKind::Info,
            text: text.into(),
            options: ToastOptions::default()
                .duration_in_seconds(INFO_TOAST_SECONDS)
                .show_icon(true),
            ..Default::default()
        });
    }

    /// Uploads the current source as a texture, or drops it when there is none.
    ///
    /// Sources larger than the GPU allows are downsampled for display only;
    /// crops are always taken from the full-size source.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let Some(source) = self.controller.source() else {
            self.texture = None;
            return;
        };

        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        let decoded = if source.width() > max_side || source.height() > max_side {
            DecodedImage::from(&source.thumbnail(max_side, max_side))
        } else {
            DecodedImage::from(source)
        };

        let image = ColorImage::from_rgba_unmultiplied(
            [decoded.width as usize, decoded.height as usize],
            &decoded.pixels,
        );
        self.texture = Some(ctx.load_texture("source", image, TextureOptions::LINEAR));
    }
}

impl eframe::App for TrimmrApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard_input(ctx);

        self.show_status_bar(ctx);
        self.show_sidebar(ctx);
        self.show_central_panel(ctx);

        self.toasts.show(ctx);
    }
}

/// Reads the settings file, falling back to defaults with a warning.
fn load_settings(path: Option<PathBuf>) -> (Settings, Option<String>) {
    let Some(path) = path.or_else(Settings::default_path) else {
        log::info!("No config directory available - using default settings");
        return (Settings::default(), None);
    };

    match Settings::load(&path) {
        Ok(settings) => (settings, None),
        Err(err) => {
            log::warn!("{err}");
            (
                Settings::default(),
                Some(format!("{err}\nUsing default settings.")),
            )
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let mut warnings = Vec::new();
    let (settings, settings_warning) = load_settings(cli.config);
    warnings.extend(settings_warning);

    let (images, skipped): (Vec<_>, Vec<_>) = cli
        .images
        .into_iter()
        .partition(|path| imaging::is_supported(path));
    for path in &skipped {
        log::warn!("Ignoring unsupported file: {}", path.display());
        warnings.push(format!("Ignoring unsupported file: {}", path.display()));
    }

    let controller = Controller::new(settings, Session::new(images, cli.output));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Trimmr")
            .with_inner_size([1280.0, 720.0])
            .with_maximized(true),
        ..Default::default()
    };

    eframe::run_native(
        "Trimmr",
        options,
        Box::new(move |_cc| Ok(Box::new(TrimmrApp::new(controller, warnings)))),
    )
}
