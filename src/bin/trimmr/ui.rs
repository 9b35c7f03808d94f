//! UI rendering and input mapping for the Trimmr window.

use crate::TrimmrApp;
use crate::colors;
use crate::constants::{CONTROLS_HELP, COUNTER_FONT_SIZE, FRAME_STROKE_WIDTH, SIDEBAR_WIDTH};
use crate::dialogs;
use eframe::egui;
use trimmr::{Event, ScrollDirection, ViewEvent};

impl TrimmrApp {
    /// Handles window-wide keys: Escape minimizes, Shift toggles the frame.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        let (escape, shift) = ctx.input(|i| (i.key_pressed(egui::Key::Escape), i.modifiers.shift));

        if escape {
            self.dispatch(ctx, Event::Minimize);
        }
        if shift && !self.shift_down {
            self.dispatch(ctx, Event::View(ViewEvent::ToggleFrameShape));
        }
        self.shift_down = shift;
    }

    /// Renders the bottom status bar with zoom and frame info.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        let settings = self.controller.settings();
        let view = self.controller.view();
        let (frame_w, frame_h) = view.frame_shape.pixel_size(settings);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "Zoom: {:.0}% | Step: {:.2}x | Frame: {} {frame_w}x{frame_h}",
                    view.zoom * 100.0,
                    view.zoom_step,
                    view.frame_shape.label(),
                ));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match self.controller.session().output_dir() {
                        Some(dir) => ui.label(format!("Output: {}", dir.display())),
                        None => ui.label("No output folder"),
                    };
                });
            });
        });
    }

    /// Renders the left sidebar panel.
    pub fn show_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .exact_width(SIDEBAR_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                self.show_sidebar_content(ctx, ui);
            });
    }

    /// Renders the action buttons, controls help and image counter.
    fn show_sidebar_content(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.add_space(10.0);

        let button_size = egui::vec2(ui.available_width(), 28.0);
        ui.vertical_centered(|ui| {
            if ui
                .add_sized(button_size, egui::Button::new("Select Images"))
                .clicked()
            {
                let paths = dialogs::pick_images();
                self.dispatch(ctx, Event::SelectImages(paths));
            }
            ui.add_space(6.0);
            if ui.add_sized(button_size, egui::Button::new("Trim")).clicked() {
                self.dispatch(ctx, Event::StartTrimming);
            }
            ui.add_space(6.0);
            if ui
                .add_sized(button_size, egui::Button::new("Select Output Folder"))
                .clicked()
            {
                let dir = dialogs::pick_output_folder();
                self.dispatch(ctx, Event::SelectOutputFolder(dir));
            }
        });

        ui.add_space(16.0);

        ui.strong("Controls");
        ui.separator();
        ui.label(CONTROLS_HELP);

        ui.add_space(12.0);
        let shape = self.controller.view().frame_shape;
        if ui
            .button(format!("Frame: {}", shape.label()))
            .on_hover_text("Toggle frame shape (Shift)")
            .clicked()
        {
            self.dispatch(ctx, Event::View(ViewEvent::ToggleFrameShape));
        }

        let counter = self.controller.session().counter_label().unwrap_or_default();
        ui.with_layout(egui::Layout::bottom_up(egui::Align::Center), |ui| {
            ui.add_space(20.0);
            ui.label(egui::RichText::new(counter).size(COUNTER_FONT_SIZE).strong());
        });
    }

    /// Renders the canvas with the current image and frame overlay.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(colors::CANVAS_BACKGROUND))
            .show(ctx, |ui| {
                let (viewport_rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click());
                self.dispatch(ctx, Event::ViewportChanged(viewport_rect));

                if !self.controller.is_trimming() {
                    ui.painter().text(
                        viewport_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "Select images and an output folder, then press Trim.",
                        egui::FontId::proportional(18.0),
                        colors::CANVAS_HINT_TEXT,
                    );
                    return;
                }

                self.handle_canvas_input(ctx, ui, viewport_rect, &response);
                self.paint_canvas(ui, viewport_rect);
            });
    }

    /// Maps pointer movement, wheel and clicks over the canvas to events.
    fn handle_canvas_input(
        &mut self,
        ctx: &egui::Context,
        ui: &egui::Ui,
        viewport_rect: egui::Rect,
        response: &egui::Response,
    ) {
        let hover_pos = ui
            .input(|i| i.pointer.hover_pos())
            .filter(|pos| viewport_rect.contains(*pos));
        let Some(pointer) = hover_pos else {
            return;
        };

        if self.controller.view().pointer != Some(pointer) {
            self.dispatch(ctx, Event::View(ViewEvent::PointerMoved(pointer)));
        }

        // Read raw wheel events: egui folds Ctrl+wheel into its own zoom delta.
        let wheel: Vec<(f32, bool)> = ui.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::MouseWheel {
                        delta, modifiers, ..
                    } => Some((delta.y, modifiers.ctrl || modifiers.command)),
                    _ => None,
                })
                .collect()
        });
        for (delta, accelerated) in wheel {
            let Some(direction) = ScrollDirection::from_delta(delta) else {
                continue;
            };
            let event = if accelerated {
                ViewEvent::AcceleratedScroll(direction)
            } else {
                ViewEvent::Scroll(direction)
            };
            self.dispatch(ctx, Event::View(event));
        }

        if response.clicked() {
            let modified = ui.input(|i| i.modifiers.ctrl || i.modifiers.command);
            let event = if modified {
                Event::ModifiedClick
            } else {
                Event::PrimaryClick
            };
            self.dispatch(ctx, event);
        }
    }

    /// Draws the scaled image and the frame outline.
    fn paint_canvas(&self, ui: &egui::Ui, viewport_rect: egui::Rect) {
        let (Some(texture), Some(geometry)) = (&self.texture, self.controller.geometry()) else {
            return;
        };

        let painter = ui.painter_at(viewport_rect);
        painter.image(
            texture.id(),
            geometry.image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        painter.rect_stroke(
            geometry.frame_rect,
            0.0,
            egui::Stroke::new(FRAME_STROKE_WIDTH, colors::FRAME_STROKE),
            egui::StrokeKind::Outside,
        );
    }
}
