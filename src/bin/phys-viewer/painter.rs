//! Draws a [`DemoWorld`] through the camera onto an egui painter.

use crate::colors;
use crate::constants::{GRID_MIN_SPACING, MARKER_RADIUS, TICK_HALF_LENGTH};
use eframe::egui::{self, Pos2, Stroke};
use phys_viewer::{Body, Camera, DVec2, DemoWorld, SceneRenderer, Shape};

pub struct EguiRenderer {
    painter: egui::Painter,
    /// Top-left corner of the scene rect; camera coordinates are relative to it.
    offset: egui::Vec2,
}

impl EguiRenderer {
    pub fn new(painter: egui::Painter, rect: egui::Rect) -> Self {
        Self {
            painter,
            offset: rect.min.to_vec2(),
        }
    }

    fn to_pos(&self, p: DVec2) -> Pos2 {
        Pos2::new(p.x as f32, p.y as f32) + self.offset
    }

    fn world(&self, camera: &Camera, p: DVec2) -> Pos2 {
        self.to_pos(camera.world_to_screen(p))
    }

    fn draw_grid(&self, camera: &Camera) {
        if camera.world_length_to_screen(1.0) < GRID_MIN_SPACING {
            return;
        }
        let area = camera.visible_world_rect();
        let stroke = Stroke::new(1.0, colors::GRID);

        let mut x = area.min.x.floor();
        while x <= area.max.x {
            self.painter.line_segment(
                [
                    self.world(camera, DVec2::new(x, area.min.y)),
                    self.world(camera, DVec2::new(x, area.max.y)),
                ],
                stroke,
            );
            x += 1.0;
        }
        let mut y = area.min.y.floor();
        while y <= area.max.y {
            self.painter.line_segment(
                [
                    self.world(camera, DVec2::new(area.min.x, y)),
                    self.world(camera, DVec2::new(area.max.x, y)),
                ],
                stroke,
            );
            y += 1.0;
        }
    }

    fn draw_axis(&self, camera: &Camera) {
        let axis = camera.axis_geometry();
        let stroke = Stroke::new(1.0, colors::AXIS);

        self.painter
            .line_segment(axis.x_axis.map(|p| self.to_pos(p)), stroke);
        self.painter
            .line_segment(axis.y_axis.map(|p| self.to_pos(p)), stroke);

        // Ticks alternate between the x and y axis; draw them across it.
        for (i, tick) in axis.ticks.iter().enumerate() {
            let center = self.to_pos(*tick);
            let across = if i % 2 == 0 {
                egui::vec2(0.0, TICK_HALF_LENGTH)
            } else {
                egui::vec2(TICK_HALF_LENGTH, 0.0)
            };
            self.painter
                .line_segment([center - across, center + across], stroke);
        }
    }

    fn draw_ground(&self, camera: &Camera, height: f64) {
        let area = camera.visible_world_rect();
        self.painter.line_segment(
            [
                self.world(camera, DVec2::new(area.min.x, height)),
                self.world(camera, DVec2::new(area.max.x, height)),
            ],
            Stroke::new(2.0, colors::GROUND),
        );
    }

    fn draw_body(&self, camera: &Camera, body: &Body) {
        let (fill, stroke_color) = if body.is_static() {
            (colors::STATIC_BODY_FILL, colors::STATIC_BODY_STROKE)
        } else {
            (colors::BODY_FILL, colors::BODY_STROKE)
        };
        let stroke = Stroke::new(1.5, stroke_color);

        match body.shape {
            Shape::Circle { radius } => {
                let center = self.world(camera, body.position);
                let r = camera.world_length_to_screen(radius) as f32;
                self.painter.circle(center, r, fill, stroke);
                // Radius line so rotation is visible.
                let rim = body.position + DVec2::from_angle(body.angle) * radius;
                self.painter
                    .line_segment([center, self.world(camera, rim)], stroke);
            }
            Shape::Rect { .. } | Shape::Polygon { .. } => {
                let points: Vec<Pos2> = body
                    .world_outline()
                    .into_iter()
                    .map(|p| self.world(camera, p))
                    .collect();
                if points.len() >= 3 {
                    self.painter
                        .add(egui::Shape::convex_polygon(points, fill, stroke));
                }
            }
        }
    }

    fn draw_aabb(&self, camera: &Camera, body: &Body) {
        let (lo, hi) = body.aabb();
        let rect = egui::Rect::from_two_pos(self.world(camera, lo), self.world(camera, hi));
        self.painter.rect_stroke(
            rect,
            0.0,
            Stroke::new(1.0, colors::AABB),
            egui::StrokeKind::Middle,
        );
    }
}

impl SceneRenderer<DemoWorld> for EguiRenderer {
    fn render(&mut self, camera: &Camera, world: &DemoWorld) {
        let layers = *camera.layers();
        let visible = camera.visible_world_rect().expand(1.0);

        if layers.grid {
            self.draw_grid(camera);
        }
        if layers.axis {
            self.draw_axis(camera);
        }
        if let Some(height) = world.ground {
            self.draw_ground(camera, height);
        }

        for body in world.bodies() {
            let (lo, hi) = body.aabb();
            if hi.x < visible.min.x
                || lo.x > visible.max.x
                || hi.y < visible.min.y
                || lo.y > visible.max.y
            {
                continue;
            }
            if layers.bodies {
                self.draw_body(camera, body);
            }
            if layers.aabbs {
                self.draw_aabb(camera, body);
            }
            if layers.centers {
                self.painter.circle_filled(
                    self.world(camera, body.position),
                    MARKER_RADIUS,
                    colors::CENTER,
                );
            }
        }

        if layers.joints {
            let stroke = Stroke::new(1.5, colors::JOINT);
            for [a, b] in world.joint_segments() {
                self.painter
                    .line_segment([self.world(camera, a), self.world(camera, b)], stroke);
            }
        }

        if layers.contacts {
            for contact in world.contacts() {
                self.painter.circle_filled(
                    self.world(camera, contact.point),
                    MARKER_RADIUS,
                    colors::CONTACT,
                );
            }
        }
    }
}
