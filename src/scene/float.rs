//! Floating motion: slow bobbing and tilting around the hero object.

use glam::{EulerRot, Mat4, Vec3};

use crate::params::FloatConfig;

/// Transform produced by the floating motion at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatPose {
    /// Tilt (radians, applied as Euler XYZ)
    pub rotation: Vec3,

    /// Vertical offset (world units)
    pub offset_y: f32,
}

impl FloatPose {
    pub const IDENTITY: FloatPose = FloatPose {
        rotation: Vec3::ZERO,
        offset_y: 0.0,
    };

    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.offset_y, 0.0))
            * Mat4::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            )
    }
}

/// Floating motion driven by total elapsed time
#[derive(Debug, Clone)]
pub struct FloatMotion {
    config: FloatConfig,
}

impl FloatMotion {
    pub fn new(config: FloatConfig) -> Self {
        Self { config }
    }

    /// Pose after `elapsed_s` seconds of motion
    pub fn pose(&self, elapsed_s: f32) -> FloatPose {
        let p = &self.config;
        if p.speed == 0.0 {
            return FloatPose::IDENTITY;
        }

        let phase = (p.phase_offset_s + elapsed_s) / 4.0 * p.speed;
        let (sin, cos) = phase.sin_cos();

        let rotation = Vec3::new(cos / 8.0, sin / 8.0, sin / 20.0) * p.rotation_intensity;

        // sin/10 spans [-0.1, 0.1]; remap that span onto the floating range
        let [low, high] = p.floating_range;
        let offset_y = map_linear(sin / 10.0, -0.1, 0.1, low, high) * p.float_intensity;

        FloatPose { rotation, offset_y }
    }
}

fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_at_t0() {
        let motion = FloatMotion::new(FloatConfig::default());
        let pose = motion.pose(0.0);

        // cos(0) = 1, sin(0) = 0
        assert!((pose.rotation.x - 0.125).abs() < 1e-6);
        assert!(pose.rotation.y.abs() < 1e-6);
        assert!(pose.rotation.z.abs() < 1e-6);
        // Midpoint of the range
        assert!(pose.offset_y.abs() < 1e-6);
    }

    #[test]
    fn test_offset_stays_within_scaled_range() {
        let config = FloatConfig::default();
        let motion = FloatMotion::new(config.clone());
        let low = config.floating_range[0] * config.float_intensity;
        let high = config.floating_range[1] * config.float_intensity;

        for step in 0..500 {
            let pose = motion.pose(step as f32 * 0.05);
            assert!(
                pose.offset_y >= low - 1e-5 && pose.offset_y <= high + 1e-5,
                "offset {} outside [{}, {}]",
                pose.offset_y,
                low,
                high
            );
        }
    }

    #[test]
    fn test_peak_reaches_upper_bound() {
        let config = FloatConfig::default();
        let motion = FloatMotion::new(config.clone());
        // sin(phase) = 1 when phase = pi/2, phase = t/4 * speed
        let t = std::f32::consts::FRAC_PI_2 * 4.0 / config.speed;
        let pose = motion.pose(t);
        assert!((pose.offset_y - 0.4).abs() < 1e-5);
        assert!((pose.rotation.y - 0.125).abs() < 1e-5);
        assert!((pose.rotation.z - 0.05).abs() < 1e-5);
    }

    #[test]
    fn test_zero_speed_is_static() {
        let config = FloatConfig {
            speed: 0.0,
            ..FloatConfig::default()
        };
        let motion = FloatMotion::new(config);
        assert_eq!(motion.pose(12.5), FloatPose::IDENTITY);
        assert_eq!(FloatPose::IDENTITY.to_mat4(), Mat4::IDENTITY);
    }

    #[test]
    fn test_phase_offset_shifts_time() {
        let shifted = FloatMotion::new(FloatConfig {
            phase_offset_s: 3.0,
            ..FloatConfig::default()
        });
        let plain = FloatMotion::new(FloatConfig::default());
        let a = shifted.pose(1.0);
        let b = plain.pose(4.0);
        assert!((a.offset_y - b.offset_y).abs() < 1e-6);
        assert!((a.rotation - b.rotation).length() < 1e-6);
    }
}
