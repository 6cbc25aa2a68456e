//! # Input Protocol
//!
//! Raw pointer, wheel and key events as the host application delivers them,
//! and the gesture handler that turns pointer and wheel events into camera
//! pan and zoom changes.

use crate::camera::Camera;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pointer buttons the scene reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    /// Selection click.
    Primary,
    /// Viewport drag.
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Keyboard keys the scene controller cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Space,
    Home,
    R,
    Escape,
}

/// A single input event. Positions are in display space (pixels).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Button {
        button: PointerButton,
        state: ButtonState,
        pos: DVec2,
    },
    PointerMoved {
        pos: DVec2,
    },
    /// Vertical wheel motion; positive is away from the user (zoom in).
    Wheel {
        delta: f64,
    },
    Key {
        key: Key,
        state: ButtonState,
    },
}

/// What a handled event did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    DragStarted,
    DragEnded,
    /// The view was panned by this display-space amount (before damping).
    Panned(DVec2),
    /// Pointer moved without a drag in progress.
    Moved,
    /// The zoom target changed to this scale.
    Zoomed(f64),
    /// Primary click at this world-space position.
    Clicked(DVec2),
    /// Not a pointer or wheel gesture (keys, zero wheel deltas).
    Unhandled,
}

/// Pointer and drag state between events.
#[derive(Clone, Debug)]
pub struct InputGestureHandler {
    /// Last observed pointer position, in world space.
    mouse_pos: DVec2,
    /// Set while the viewport drag button is held.
    dragging: bool,
    last_click: Option<DVec2>,
}

impl Default for InputGestureHandler {
    fn default() -> Self {
        Self {
            // Non-zero so a drag measured from the start state has a length.
            mouse_pos: DVec2::ONE,
            dragging: false,
            last_click: None,
        }
    }
}

impl InputGestureHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Last known pointer position in world space.
    pub fn pointer_world(&self) -> DVec2 {
        self.mouse_pos
    }

    /// World position of the most recent primary click.
    pub fn last_click(&self) -> Option<DVec2> {
        self.last_click
    }

    /// Applies one event to the camera.
    pub fn handle(&mut self, event: &InputEvent, camera: &mut Camera) -> Gesture {
        match *event {
            InputEvent::Button {
                button: PointerButton::Secondary,
                state,
                pos,
            } => self.handle_drag_button(state, pos, camera),
            InputEvent::Button {
                button: PointerButton::Primary,
                state,
                pos,
            } => {
                let world = camera.screen_to_world(pos);
                self.mouse_pos = world;
                match state {
                    ButtonState::Pressed => {
                        self.last_click = Some(world);
                        Gesture::Clicked(world)
                    }
                    ButtonState::Released => Gesture::Moved,
                }
            }
            InputEvent::PointerMoved { pos } => self.handle_move(pos, camera),
            InputEvent::Wheel { delta } => self.handle_wheel(delta, camera),
            InputEvent::Key { .. } => Gesture::Unhandled,
        }
    }

    fn handle_drag_button(&mut self, state: ButtonState, pos: DVec2, camera: &Camera) -> Gesture {
        match state {
            ButtonState::Pressed => {
                self.dragging = true;
                self.mouse_pos = camera.screen_to_world(pos);
                Gesture::DragStarted
            }
            ButtonState::Released => {
                self.dragging = false;
                Gesture::DragEnded
            }
        }
    }

    fn handle_move(&mut self, pos: DVec2, camera: &mut Camera) -> Gesture {
        let cur_pos = camera.screen_to_world(pos);
        let delta_world = cur_pos - self.mouse_pos;

        let gesture = if self.dragging {
            let delta_screen = delta_world * camera.scale();
            camera.pan_by(delta_screen);
            Gesture::Panned(delta_screen)
        } else {
            Gesture::Moved
        };

        self.mouse_pos = cur_pos;
        gesture
    }

    /// One discrete ±25% step of the zoom target per wheel event.
    fn handle_wheel(&mut self, delta: f64, camera: &mut Camera) -> Gesture {
        let target = camera.target_scale();
        if delta > 0.0 {
            camera.request_zoom(target + target / 4.0);
        } else if delta < 0.0 {
            camera.request_zoom(target - target / 4.0);
        } else {
            return Gesture::Unhandled;
        }
        Gesture::Zoomed(camera.target_scale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::viewport::Viewport;

    fn camera(scale: f64) -> Camera {
        let config = CameraConfig {
            initial_scale: scale,
            initial_target_scale: scale,
            ..Default::default()
        };
        Camera::new(Viewport::from_size(800.0, 600.0).unwrap(), config)
    }

    fn press(button: PointerButton, x: f64, y: f64) -> InputEvent {
        InputEvent::Button {
            button,
            state: ButtonState::Pressed,
            pos: DVec2::new(x, y),
        }
    }

    fn release(button: PointerButton) -> InputEvent {
        InputEvent::Button {
            button,
            state: ButtonState::Released,
            pos: DVec2::ZERO,
        }
    }

    fn move_to(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMoved {
            pos: DVec2::new(x, y),
        }
    }

    #[test]
    fn moves_without_drag_do_not_pan() {
        let mut cam = camera(33.0);
        let mut handler = InputGestureHandler::new();

        assert_eq!(handler.handle(&move_to(500.0, 200.0), &mut cam), Gesture::Moved);
        assert_eq!(cam.pan_offset(), DVec2::ZERO);
        assert_eq!(
            handler.pointer_world(),
            cam.screen_to_world(DVec2::new(500.0, 200.0))
        );
    }

    #[test]
    fn secondary_drag_pans_view() {
        let mut cam = camera(33.0);
        let mut handler = InputGestureHandler::new();

        handler.handle(&press(PointerButton::Secondary, 400.0, 300.0), &mut cam);
        assert!(handler.is_dragging());

        // 66 px to the right at scale 33 is 2 m, back to 66 px, damped by 0.5.
        let gesture = handler.handle(&move_to(466.0, 300.0), &mut cam);
        match gesture {
            Gesture::Panned(delta) => assert!((delta - DVec2::new(66.0, 0.0)).length() < 1e-9),
            other => panic!("expected pan, got {other:?}"),
        }
        assert!((cam.pan_offset() - DVec2::new(33.0, 0.0)).length() < 1e-9);

        handler.handle(&release(PointerButton::Secondary), &mut cam);
        assert!(!handler.is_dragging());

        let before = cam.pan_offset();
        handler.handle(&move_to(100.0, 100.0), &mut cam);
        assert_eq!(cam.pan_offset(), before);
    }

    #[test]
    fn wheel_steps_target_by_a_quarter() {
        let mut cam = camera(40.0);
        let mut handler = InputGestureHandler::new();

        assert_eq!(
            handler.handle(&InputEvent::Wheel { delta: 1.0 }, &mut cam),
            Gesture::Zoomed(50.0)
        );
        // Step size does not depend on wheel magnitude.
        handler.handle(&InputEvent::Wheel { delta: -12.0 }, &mut cam);
        assert_eq!(cam.target_scale(), 37.5);
        assert_eq!(cam.scale(), 40.0);

        assert_eq!(
            handler.handle(&InputEvent::Wheel { delta: 0.0 }, &mut cam),
            Gesture::Unhandled
        );
    }

    #[test]
    fn wheel_out_never_drops_below_floor() {
        let mut cam = camera(1.2);
        let mut handler = InputGestureHandler::new();
        for _ in 0..5 {
            handler.handle(&InputEvent::Wheel { delta: -1.0 }, &mut cam);
        }
        assert_eq!(cam.target_scale(), 1.0);
    }

    #[test]
    fn primary_click_records_world_position() {
        let mut cam = camera(32.0);
        let mut handler = InputGestureHandler::new();

        let gesture = handler.handle(&press(PointerButton::Primary, 432.0, 268.0), &mut cam);
        assert_eq!(gesture, Gesture::Clicked(DVec2::new(1.0, 1.0)));
        assert_eq!(handler.last_click(), Some(DVec2::new(1.0, 1.0)));
        assert!(!handler.is_dragging());
    }
}
