//! Orbit camera: user drag, idle auto-rotation and the view-projection matrix.

use glam::{Mat4, Vec3};

use crate::params::{CameraConfig, OrbitConfig};

/// Keeps the polar angle away from the poles, where the up vector degenerates
const POLAR_EPSILON: f32 = 1e-6;

/// Zoom factor per wheel step at zoom speed 1
const ZOOM_STEP_SCALE: f32 = 0.95;

/// Camera position around the target in spherical coordinates
///
/// `theta` is the azimuth around +Y measured from +Z, `phi` the polar angle
/// measured from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                theta: 0.0,
                phi: 0.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Orbit controls around a fixed focal point
///
/// Drag input and auto-rotation both accumulate into the same pending
/// rotation, so a manual drag offset persists while auto-rotation keeps
/// turning the camera from wherever the user left it.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: OrbitConfig,
    target: Vec3,
    spherical: Spherical,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    dragging: bool,
}

impl OrbitControls {
    pub fn new(camera: &CameraConfig, config: OrbitConfig) -> Self {
        let target = Vec3::from_array(camera.target);
        let eye = Vec3::from_array(camera.position);
        Self {
            config,
            target,
            spherical: Spherical::from_offset(eye - target),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            dragging: false,
        }
    }

    pub fn begin_drag(&mut self) {
        if self.config.enable_rotate {
            self.dragging = true;
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pointer moved by (dx, dy) pixels while dragging
    ///
    /// A drag across the full viewport height turns the camera one full
    /// revolution (at rotate speed 1).
    pub fn drag(&mut self, dx_px: f32, dy_px: f32, viewport_height_px: f32) {
        if !self.dragging || viewport_height_px <= 0.0 {
            return;
        }
        let per_pixel = std::f32::consts::TAU / viewport_height_px * self.config.rotate_speed;
        self.rotate_left(dx_px * per_pixel);
        self.rotate_up(dy_px * per_pixel);
    }

    /// Wheel input; positive steps move the camera closer
    ///
    /// Does nothing when zoom is disabled.
    pub fn zoom(&mut self, steps: f32) {
        if !self.config.enable_zoom || !steps.is_finite() {
            return;
        }
        self.pending_scale *= ZOOM_STEP_SCALE.powf(self.config.zoom_speed * steps);
    }

    /// Apply pending input and auto-rotation for one frame
    pub fn update(&mut self, delta_s: f32) {
        if self.config.auto_rotate && !self.dragging && delta_s > 0.0 {
            self.rotate_left(self.config.auto_rotate_rate() * delta_s);
        }

        let applied = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };

        self.spherical.theta += self.pending_theta * applied;
        self.spherical.phi += self.pending_phi * applied;

        let min_phi = self.config.min_polar_rad.max(POLAR_EPSILON);
        let max_phi = self.config.max_polar_rad.min(std::f32::consts::PI - POLAR_EPSILON);
        self.spherical.phi = self.spherical.phi.clamp(min_phi, max_phi);

        self.spherical.radius = (self.spherical.radius * self.pending_scale)
            .clamp(self.config.min_distance, self.config.max_distance);

        if self.config.enable_damping {
            self.pending_theta *= 1.0 - self.config.damping_factor;
            self.pending_phi *= 1.0 - self.config.damping_factor;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
        }
        self.pending_scale = 1.0;
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.spherical.to_offset()
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    pub fn azimuth(&self) -> f32 {
        self.spherical.theta
    }

    pub fn polar(&self) -> f32 {
        self.spherical.phi
    }

    fn rotate_left(&mut self, angle: f32) {
        self.pending_theta -= angle;
    }

    fn rotate_up(&mut self, angle: f32) {
        self.pending_phi -= angle;
    }
}

/// Perspective camera steered by orbit controls
pub struct CameraSystem {
    config: CameraConfig,
    controls: OrbitControls,
}

impl CameraSystem {
    pub fn new(config: CameraConfig, orbit: OrbitConfig) -> Self {
        let controls = OrbitControls::new(&config, orbit);
        Self { config, controls }
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    pub fn update(&mut self, delta_s: f32) {
        self.controls.update(delta_s);
    }

    /// Create view-projection matrix for rendering
    ///
    /// # Returns
    /// Tuple of (view_proj_matrix, camera_position)
    pub fn create_view_proj_matrix(&self, aspect_ratio: f32) -> (Mat4, Vec3) {
        let eye = self.controls.eye();

        // Always keep Y as up vector (camera never rolls)
        let view = Mat4::look_at_rh(eye, self.controls.target(), Vec3::Y);
        let proj = Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            aspect_ratio,
            self.config.near_plane,
            self.config.far_plane,
        );

        (proj * view, eye)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undamped() -> OrbitConfig {
        OrbitConfig {
            enable_damping: false,
            ..OrbitConfig::default()
        }
    }

    #[test]
    fn test_initial_eye_matches_config() {
        let controls = OrbitControls::new(&CameraConfig::default(), OrbitConfig::default());
        assert!(controls.eye().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
        assert!((controls.distance() - 5.0).abs() < 1e-6);
        assert!((controls.polar() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_disabled_keeps_distance() {
        let mut controls = OrbitControls::new(&CameraConfig::default(), OrbitConfig::default());
        for steps in [1.0, -3.0, 10.0, 0.5] {
            controls.zoom(steps);
            controls.update(1.0 / 60.0);
        }
        assert!((controls.distance() - 5.0).abs() < 1e-5);
        assert!((controls.eye().length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_enabled_changes_distance() {
        let config = OrbitConfig {
            enable_zoom: true,
            min_distance: 2.0,
            ..undamped()
        };
        let mut controls = OrbitControls::new(&CameraConfig::default(), config);
        controls.zoom(1.0);
        controls.update(0.0);
        assert!((controls.distance() - 5.0 * 0.95).abs() < 1e-5);

        controls.zoom(100.0);
        controls.update(0.0);
        assert!((controls.distance() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_auto_rotate_rate() {
        let mut controls = OrbitControls::new(&CameraConfig::default(), undamped());
        controls.update(1.0);
        let expected = -std::f32::consts::TAU / 60.0 * 0.5;
        assert!((controls.azimuth() - expected).abs() < 1e-6);
        // Distance unaffected by rotation
        assert!((controls.distance() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_auto_rotate_pauses_while_dragging() {
        let mut controls = OrbitControls::new(&CameraConfig::default(), undamped());
        controls.begin_drag();
        controls.update(1.0);
        assert_eq!(controls.azimuth(), 0.0);

        controls.end_drag();
        controls.update(1.0);
        assert!(controls.azimuth() < 0.0);
    }

    #[test]
    fn test_drag_and_auto_rotate_are_additive() {
        let mut controls = OrbitControls::new(&CameraConfig::default(), undamped());

        // Drag half the viewport height to the left: half a revolution
        controls.begin_drag();
        controls.drag(-300.0, 0.0, 600.0);
        controls.update(0.0);
        controls.end_drag();
        assert!((controls.azimuth() - std::f32::consts::PI).abs() < 1e-5);

        controls.update(2.0);
        let auto = OrbitConfig::default().auto_rotate_rate() * 2.0;
        assert!((controls.azimuth() - (std::f32::consts::PI - auto)).abs() < 1e-5);
    }

    #[test]
    fn test_drag_ignored_without_button() {
        let mut controls = OrbitControls::new(&CameraConfig::default(), undamped());
        controls.drag(100.0, 100.0, 600.0);
        controls.update(0.0);
        assert_eq!(controls.azimuth(), 0.0);
    }

    #[test]
    fn test_rotate_disabled_ignores_drag() {
        let config = OrbitConfig {
            enable_rotate: false,
            auto_rotate: false,
            ..undamped()
        };
        let mut controls = OrbitControls::new(&CameraConfig::default(), config);
        controls.begin_drag();
        controls.drag(100.0, 100.0, 600.0);
        controls.update(0.1);
        assert!(!controls.is_dragging());
        assert_eq!(controls.azimuth(), 0.0);
    }

    #[test]
    fn test_polar_angle_clamped() {
        let mut controls = OrbitControls::new(&CameraConfig::default(), undamped());
        controls.begin_drag();
        controls.drag(0.0, 10_000.0, 600.0);
        controls.update(0.0);
        assert!(controls.polar() > 0.0);
        assert!(controls.polar() < std::f32::consts::PI);
        assert!(controls.eye().is_finite());
    }

    #[test]
    fn test_damping_converges_to_full_drag() {
        let mut controls = OrbitControls::new(
            &CameraConfig::default(),
            OrbitConfig {
                auto_rotate: false,
                ..OrbitConfig::default()
            },
        );
        controls.begin_drag();
        controls.drag(-60.0, 0.0, 600.0);
        controls.end_drag();

        controls.update(1.0 / 60.0);
        let first = controls.azimuth();
        assert!(first > 0.0 && first < std::f32::consts::TAU / 10.0);

        for _ in 0..600 {
            controls.update(1.0 / 60.0);
        }
        assert!((controls.azimuth() - std::f32::consts::TAU / 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = CameraSystem::new(CameraConfig::default(), OrbitConfig::default());
        let (view_proj, eye_pos) = camera.create_view_proj_matrix(640.0 / 600.0);

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert!(eye_pos.is_finite());

        // Target projects to the center of the screen
        let center = view_proj.project_point3(Vec3::ZERO);
        assert!(center.x.abs() < 1e-5 && center.y.abs() < 1e-5);
    }
}
