//! Camera placement and orbit control configuration.

/// Perspective camera placement
#[derive(Debug, Clone)]
pub struct CameraConfig {
    /// Initial eye position (world units)
    pub position: [f32; 3],

    /// Orbit focal point (world units)
    pub target: [f32; 3],

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
            near_plane: 0.1,
            far_plane: 1000.0,
        }
    }
}

/// Orbit control behavior (drag to rotate around the target)
#[derive(Debug, Clone)]
pub struct OrbitConfig {
    /// Whether pointer drags rotate the camera
    pub enable_rotate: bool,

    /// Whether wheel/pinch input changes the camera distance
    pub enable_zoom: bool,

    /// Rotate around the target while the user is not dragging
    pub auto_rotate: bool,

    /// Auto-rotation speed
    /// 2.0 = one full orbit every 30 seconds
    pub auto_rotate_speed: f32,

    /// Drag sensitivity multiplier (dimensionless)
    pub rotate_speed: f32,

    /// Wheel sensitivity multiplier (dimensionless)
    pub zoom_speed: f32,

    /// Ease pending rotation in over several frames
    pub enable_damping: bool,

    /// Fraction of the pending rotation applied per frame (0..1)
    pub damping_factor: f32,

    /// Closest allowed camera distance (world units, zoom only)
    pub min_distance: f32,

    /// Farthest allowed camera distance (world units, zoom only)
    pub max_distance: f32,

    /// Polar angle limits measured from +Y (radians)
    pub min_polar_rad: f32,
    pub max_polar_rad: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            enable_rotate: true,
            enable_zoom: false,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_rad: 0.0,
            max_polar_rad: std::f32::consts::PI,
        }
    }
}

impl OrbitConfig {
    /// Azimuth change per second of auto-rotation (radians)
    pub fn auto_rotate_rate(&self) -> f32 {
        std::f32::consts::TAU / 60.0 * self.auto_rotate_speed
    }
}
