//! Camera defining the view into game space

use std::any::Any;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use super::{System, TickContext};

/// Smallest zoom factor the camera accepts
pub const ZOOM_MIN: f32 = 0.25;
/// Largest zoom factor the camera accepts
pub const ZOOM_MAX: f32 = 3.0;

/// Camera pan, zoom and rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Game-space offset added to every cursor position
    pub position: [f32; 2],
    /// Scale factor; larger values show more of the world
    pub zoom: f32,
    /// Rotation in degrees
    pub angle: f32,
}

impl Camera {
    pub fn new(position: [f32; 2], zoom: f32, angle: f32) -> Self {
        Self {
            position,
            zoom: zoom.clamp(ZOOM_MIN, ZOOM_MAX),
            angle,
        }
    }

    /// Pan the camera by delta in world units
    pub fn pan(&mut self, delta: [f32; 2]) {
        self.position[0] += delta[0];
        self.position[1] += delta[1];
    }

    /// Change zoom by `delta`, clamped to [`ZOOM_MIN`]..=[`ZOOM_MAX`]
    pub fn zoom_by(&mut self, delta: f32) {
        self.zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Rotate by `degrees`, keeping the angle within [0, 360)
    pub fn rotate(&mut self, degrees: f32) {
        self.angle = (self.angle + degrees).rem_euclid(360.0);
    }

    /// Wrap this camera for sharing between systems
    pub fn shared(self) -> SharedCamera {
        SharedCamera(Arc::new(RwLock::new(self)))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0],
            zoom: 1.0,
            angle: 0.0,
        }
    }
}

/// Camera handle shared by the camera system and its readers
#[derive(Debug, Clone)]
pub struct SharedCamera(Arc<RwLock<Camera>>);

impl SharedCamera {
    /// Copy of the current camera
    pub fn get(&self) -> Camera {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, camera: Camera) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = camera;
    }

    /// Mutate the camera in place
    pub fn update(&self, f: impl FnOnce(&mut Camera)) {
        f(&mut self.0.write().unwrap_or_else(PoisonError::into_inner));
    }
}

/// Owns the camera and optionally zooms it with the mouse wheel
#[derive(Debug)]
pub struct CameraSystem {
    camera: SharedCamera,
    scroll_zoom_speed: Option<f32>,
}

impl CameraSystem {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera: camera.shared(),
            scroll_zoom_speed: None,
        }
    }

    /// Zoom by `speed` per unit of vertical scroll each tick
    pub fn with_scroll_zoom(mut self, speed: f32) -> Self {
        self.scroll_zoom_speed = Some(speed);
        self
    }

    /// Handle to the camera this system drives
    pub fn camera(&self) -> SharedCamera {
        self.camera.clone()
    }
}

impl Default for CameraSystem {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl System for CameraSystem {
    fn name(&self) -> &str {
        "camera"
    }

    fn update(&mut self, _dt: f32, ctx: &TickContext<'_>) {
        let Some(speed) = self.scroll_zoom_speed else {
            return;
        };
        let [_, dy] = ctx.input.mouse_scroll();
        if dy != 0.0 {
            self.camera.update(|camera| camera.zoom_by(dy * speed));
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Screen;
    use crate::input::InputManager;

    #[test]
    fn test_camera_pan() {
        let mut camera = Camera::default();
        camera.pan([1.0, -2.0]);
        camera.pan([1.0, 0.5]);
        assert_eq!(camera.position, [2.0, -1.5]);
    }

    #[test]
    fn test_camera_zoom_is_clamped() {
        let mut camera = Camera::default();
        camera.zoom_by(0.5);
        assert_eq!(camera.zoom, 1.5);
        camera.zoom_by(10.0);
        assert_eq!(camera.zoom, ZOOM_MAX);
        camera.zoom_by(-10.0);
        assert_eq!(camera.zoom, ZOOM_MIN);
        assert_eq!(Camera::new([0.0, 0.0], 0.0, 0.0).zoom, ZOOM_MIN);
    }

    #[test]
    fn test_camera_rotate_wraps() {
        let mut camera = Camera::default();
        camera.rotate(350.0);
        camera.rotate(20.0);
        assert!((camera.angle - 10.0).abs() < 1e-4);
        camera.rotate(-20.0);
        assert!((camera.angle - 350.0).abs() < 1e-4);
    }

    #[test]
    fn test_shared_camera_sees_updates() {
        let shared = Camera::default().shared();
        let reader = shared.clone();
        shared.update(|camera| camera.pan([5.0, 5.0]));
        assert_eq!(reader.get().position, [5.0, 5.0]);

        shared.set(Camera::new([0.0, 0.0], 2.0, 45.0));
        assert_eq!(reader.get().angle, 45.0);
    }

    #[test]
    fn test_scroll_zoom() {
        let mut system = CameraSystem::default().with_scroll_zoom(0.1);
        let camera = system.camera();
        let input = InputManager::new();
        let screen = Screen::default();

        input.set_mouse_scroll(0.0, 2.0);
        system.update(0.016, &TickContext::new(&input, &screen));
        assert!((camera.get().zoom - 1.2).abs() < 1e-4);

        input.reset_scroll();
        system.update(0.016, &TickContext::new(&input, &screen));
        assert!((camera.get().zoom - 1.2).abs() < 1e-4);
    }
}
