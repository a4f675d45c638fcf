//! Hit testing and canvas to game space conversion

use serde::{Deserialize, Serialize};

use crate::sim::Camera;

/// Hit-testable area of an entity in game space
pub trait SpatialBounds: Send {
    /// Returns true if `point` lies inside the area
    fn within(&self, point: [f32; 2]) -> bool;
}

impl<F> SpatialBounds for F
where
    F: Fn([f32; 2]) -> bool + Send,
{
    fn within(&self, point: [f32; 2]) -> bool {
        self(point)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle of the given size centered on `center`
    pub fn centered(center: [f32; 2], width: f32, height: f32) -> Self {
        Self::new(center[0] - width / 2.0, center[1] - height / 2.0, width, height)
    }

    /// Check if a point is inside this rectangle
    pub fn contains(&self, pos: [f32; 2]) -> bool {
        pos[0] >= self.x
            && pos[0] <= self.x + self.width
            && pos[1] >= self.y
            && pos[1] <= self.y + self.height
    }

    /// Get the center point of the rectangle
    pub fn center(&self) -> [f32; 2] {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }
}

impl SpatialBounds for Rect {
    fn within(&self, point: [f32; 2]) -> bool {
        self.contains(point)
    }
}

/// Logical game resolution against the framebuffer it is drawn into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub game_width: f32,
    pub game_height: f32,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Screen {
    /// Screen whose canvas matches the game resolution
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            game_width: width,
            game_height: height,
            canvas_width: width,
            canvas_height: height,
        }
    }

    /// Sets a canvas size different from the game resolution
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Converts a cursor position in canvas pixels into game space as seen by `camera`
///
/// Applies zoom, the game/canvas ratio and camera pan, then undoes the camera
/// rotation when it is non-zero.
pub fn to_game_space(cursor: [f32; 2], camera: &Camera, screen: &Screen) -> [f32; 2] {
    let zoom = camera.zoom;
    let [cam_x, cam_y] = camera.position;

    let x = cursor[0] * zoom * (screen.game_width / screen.canvas_width) + cam_x
        - (screen.game_width / 2.0) * zoom;
    let y = cursor[1] * zoom * (screen.game_height / screen.canvas_height) + cam_y
        - (screen.game_height / 2.0) * zoom;

    if camera.angle == 0.0 {
        return [x, y];
    }

    let (sin, cos) = camera.angle.to_radians().sin_cos();
    [x * cos + y * sin, y * cos - x * sin]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-3 && (a[1] - b[1]).abs() < 1e-3
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains([10.0, 20.0]));
        assert!(rect.contains([40.0, 60.0]));
        assert!(!rect.contains([9.9, 30.0]));
        assert_eq!(rect.center(), [25.0, 40.0]);
        assert_eq!(Rect::centered([25.0, 40.0], 30.0, 40.0), rect);
    }

    #[test]
    fn test_closure_bounds() {
        let bounds = |p: [f32; 2]| p[0] > 0.0;
        assert!(bounds.within([1.0, 0.0]));
        assert!(!bounds.within([-1.0, 0.0]));
    }

    #[test]
    fn test_canvas_center_maps_to_origin() {
        let camera = Camera::default();
        let screen = Screen::new(800.0, 800.0);
        assert!(approx(to_game_space([400.0, 400.0], &camera, &screen), [0.0, 0.0]));
        assert!(approx(to_game_space([0.0, 0.0], &camera, &screen), [-400.0, -400.0]));
    }

    #[test]
    fn test_pan_and_zoom() {
        let camera = Camera {
            position: [100.0, -50.0],
            zoom: 2.0,
            angle: 0.0,
        };
        let screen = Screen::new(800.0, 600.0);
        // x = 500*2 + 100 - 400*2, y = 300*2 - 50 - 300*2
        assert!(approx(to_game_space([500.0, 300.0], &camera, &screen), [300.0, -50.0]));
    }

    #[test]
    fn test_canvas_scaling() {
        let camera = Camera::default();
        let screen = Screen::new(800.0, 600.0).with_canvas(1600.0, 1200.0);
        // A high-DPI canvas halves each pixel's contribution
        assert!(approx(to_game_space([800.0, 600.0], &camera, &screen), [0.0, 0.0]));
        assert!(approx(to_game_space([1600.0, 0.0], &camera, &screen), [400.0, -300.0]));
    }

    #[test]
    fn test_rotation_by_ninety_degrees() {
        let camera = Camera {
            angle: 90.0,
            ..Camera::default()
        };
        let screen = Screen::new(800.0, 800.0);
        // Pre-rotation point is (10, 0); x'' = 10*cos + 0*sin, y'' = 0*cos - 10*sin
        let point = to_game_space([410.0, 400.0], &camera, &screen);
        assert!(approx(point, [0.0, -10.0]), "got {point:?}");
    }
}
