//! UI rendering methods for the physics viewer.

use crate::ViewerApp;
use crate::colors;
use crate::constants::{SIDEBAR_WIDTH, ZOOM_MAX, ZOOM_MIN};
use crate::painter::EguiRenderer;
use eframe::egui;
use egui_toast::ToastKind;
use phys_viewer::{ButtonState, DVec2, InputEvent, Key, PointerButton};

impl ViewerApp {
    /// Renders the bottom status bar with controls hint and playback info.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    "Scroll: Zoom | Right-drag: Pan | \u{2190}/\u{2192}: Frame | R: Restart | Space: Pause | Home: Reset view",
                );

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let camera = self.scene.camera();
                    ui.label(format!("{:.1} px/m", camera.scale()));
                    if self.scene.is_paused() {
                        ui.label("Paused");
                    }
                    if let Some(frame) = self.scene.frames().current() {
                        ui.label(format!(
                            "Frame {}/{}: {}",
                            self.scene.frames().cursor() + 1,
                            self.scene.frames().len(),
                            frame.name()
                        ));
                    }
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
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.show_sidebar_content(ui);
                });
            });
    }

    /// Renders the sidebar content: frame list, playback and layer toggles.
    fn show_sidebar_content(&mut self, ui: &mut egui::Ui) {
        ui.add_space(4.0);

        ui.strong("Frames");
        ui.separator();

        if self.scene.frames().is_empty() {
            ui.label("No frames loaded");
        } else {
            let cursor = self.scene.frames().cursor();
            let mut picked = None;
            for (idx, frame) in self.scene.frames().iter().enumerate() {
                if ui.selectable_label(cursor == idx, frame.name()).clicked() {
                    picked = Some(idx);
                }
            }
            if let Some(idx) = picked {
                self.select_frame(idx);
            }
        }

        ui.add_space(12.0);

        ui.strong("Playback");
        ui.separator();

        ui.horizontal(|ui| {
            let pause_label = if self.scene.is_paused() {
                "Resume"
            } else {
                "Pause"
            };
            if ui.button(pause_label).clicked() {
                let paused = !self.scene.is_paused();
                self.scene.set_paused(paused);
            }
            let step = ui
                .add_enabled(self.scene.is_paused(), egui::Button::new("Step"))
                .on_hover_text("Advance one physics step");
            if step.clicked() {
                self.scene.step_once();
            }
        });
        ui.horizontal(|ui| {
            for (label, delta) in [("Prev", -1), ("Restart", 0), ("Next", 1)] {
                if ui.button(label).clicked()
                    && !self.scene.frames().is_empty()
                    && let Err(err) = self.scene.change_frame(delta)
                {
                    self.notify(ToastKind::Error, err.to_string());
                }
            }
        });

        ui.add_space(12.0);

        ui.strong("Layers");
        ui.separator();

        let layers = self.scene.camera_mut().layers_mut();
        Self::layer_toggle(ui, &mut layers.bodies, "Bodies", colors::BODY_FILL);
        Self::layer_toggle(ui, &mut layers.joints, "Joints", colors::JOINT);
        Self::layer_toggle(ui, &mut layers.axis, "Axis", colors::AXIS);
        Self::layer_toggle(ui, &mut layers.grid, "Grid", colors::GRID);
        Self::layer_toggle(ui, &mut layers.aabbs, "Bounding boxes", colors::AABB);
        Self::layer_toggle(ui, &mut layers.centers, "Centers", colors::CENTER);
        Self::layer_toggle(ui, &mut layers.contacts, "Contacts", colors::CONTACT);
    }

    /// Renders a layer toggle with a color swatch.
    fn layer_toggle(ui: &mut egui::Ui, value: &mut bool, label: &str, color: egui::Color32) {
        ui.horizontal(|ui| {
            ui.checkbox(value, "");
            let (rect, icon_response) =
                ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::click());
            ui.painter().rect_filled(rect, 2.0, color);
            ui.painter().rect_stroke(
                rect,
                2.0,
                egui::Stroke::new(1.0, colors::LAYER_SWATCH_STROKE),
                egui::StrokeKind::Inside,
            );
            let label_response = ui
                .label(label)
                .interact(egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if icon_response.clicked() || label_response.clicked() {
                *value = !*value;
            }
        });
    }

    /// Renders the central panel containing the scene.
    pub fn show_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(ctx.style().visuals.extreme_bg_color))
            .show(ctx, |ui| {
                let panel_rect = ui.max_rect();
                self.show_scene(ui, ctx);
                self.show_zoom_controls(ctx, panel_rect);
            });
    }

    /// Renders the floating zoom controls panel.
    fn show_zoom_controls(&mut self, ctx: &egui::Context, panel_rect: egui::Rect) {
        let margin = 12.0;
        let panel_width = 180.0;
        let panel_height = 36.0;

        let anchor_pos = egui::pos2(
            panel_rect.right() - panel_width - margin,
            panel_rect.bottom() - panel_height - margin,
        );

        egui::Area::new(egui::Id::new("zoom_controls"))
            .fixed_pos(anchor_pos)
            .interactable(true)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(ui.style().visuals.window_fill.gamma_multiply(0.95))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            let mut target = self.scene.camera().target_scale();
                            let slider = ui.add(
                                egui::Slider::new(&mut target, ZOOM_MIN..=ZOOM_MAX)
                                    .logarithmic(true)
                                    .show_value(false),
                            );
                            if slider.changed() {
                                self.scene.request_zoom(target);
                            }
                            if ui.button("Reset").on_hover_text("Reset view (Home)").clicked() {
                                self.scene.camera_mut().reset_view();
                            }
                        });
                    });
            });
    }

    /// Feeds this frame's input into the scene and runs one tick.
    fn show_scene(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (rect, _response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        if rect.size() != self.scene_size {
            match self
                .scene
                .resize(f64::from(rect.width()), f64::from(rect.height()))
            {
                Ok(()) => self.scene_size = rect.size(),
                // Collapsed panel; keep the last valid viewport.
                Err(err) => log::debug!("Skipping resize: {err}"),
            }
        }

        let events = collect_events(ctx, rect);
        let mut renderer = EguiRenderer::new(ui.painter_at(rect), rect);

        match self.scene.tick(events, &mut renderer) {
            Ok(report) => {
                if report.quit_requested {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
            Err(err) => {
                log::warn!("Tick failed: {err}");
                self.notify(ToastKind::Error, err.to_string());
            }
        }

        if let Some(click) = self.scene.input().last_click() {
            ui.painter_at(rect).text(
                rect.left_top() + egui::vec2(8.0, 8.0),
                egui::Align2::LEFT_TOP,
                format!("({:.2}, {:.2})", click.x, click.y),
                egui::FontId::monospace(12.0),
                ui.style().visuals.weak_text_color(),
            );
        }

        // The simulation runs continuously.
        ctx.request_repaint();
    }
}

/// Translates egui events into scene input, relative to the scene rect.
fn collect_events(ctx: &egui::Context, rect: egui::Rect) -> Vec<InputEvent> {
    let to_local = |pos: egui::Pos2| {
        let local = pos - rect.min;
        DVec2::new(f64::from(local.x), f64::from(local.y))
    };
    let keyboard_free = ctx.memory(|m| m.focused().is_none());

    ctx.input(|i| {
        let hovered = i.pointer.hover_pos().is_some_and(|p| rect.contains(p));
        let mut events = Vec::new();

        for event in &i.events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    events.push(InputEvent::PointerMoved { pos: to_local(*pos) });
                }
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed,
                    ..
                } => {
                    let button = match button {
                        egui::PointerButton::Primary => PointerButton::Primary,
                        egui::PointerButton::Secondary => PointerButton::Secondary,
                        _ => continue,
                    };
                    // Presses must start inside the scene; releases always count
                    // so a drag can end outside it.
                    if *pressed && !rect.contains(*pos) {
                        continue;
                    }
                    let state = if *pressed {
                        ButtonState::Pressed
                    } else {
                        ButtonState::Released
                    };
                    events.push(InputEvent::Button {
                        button,
                        state,
                        pos: to_local(*pos),
                    });
                }
                egui::Event::Key {
                    key,
                    pressed,
                    repeat: false,
                    ..
                } if keyboard_free => {
                    let Some(key) = map_key(*key) else {
                        continue;
                    };
                    let state = if *pressed {
                        ButtonState::Pressed
                    } else {
                        ButtonState::Released
                    };
                    events.push(InputEvent::Key { key, state });
                }
                _ => {}
            }
        }

        let scroll = i.raw_scroll_delta.y;
        if hovered && scroll != 0.0 {
            events.push(InputEvent::Wheel {
                delta: f64::from(scroll),
            });
        }

        events
    })
}

fn map_key(key: egui::Key) -> Option<Key> {
    Some(match key {
        egui::Key::ArrowLeft => Key::Left,
        egui::Key::ArrowRight => Key::Right,
        egui::Key::Space => Key::Space,
        egui::Key::Home => Key::Home,
        egui::Key::R => Key::R,
        egui::Key::Escape => Key::Escape,
        _ => return None,
    })
}
