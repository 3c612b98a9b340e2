//! Hero scene simulation: spinning, floating, distorting octahedron.
//!
//! The scene owns all per-frame state. The host loop calls
//! [`HeroScene::update`] once per frame with the time since the previous
//! frame; nothing else mutates the scene.

mod float;
mod mesh;

use std::f32::consts::TAU;

use glam::{EulerRot, Mat4, Vec3};

pub use float::{FloatMotion, FloatPose};
pub use mesh::{DistortedOctahedron, Vertex};

use crate::params::{SceneConfig, ShapeConfig};

/// Accumulated spin of the hero object (radians, wrapped to [0, 2π))
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub x: f32,
    pub y: f32,
}

impl Spin {
    /// Advance by `delta_s` seconds at the configured rates
    pub fn advance(&mut self, delta_s: f32, shape: &ShapeConfig) {
        self.x = (self.x + delta_s * shape.spin_rate_x).rem_euclid(TAU);
        self.y = (self.y + delta_s * shape.spin_rate_y).rem_euclid(TAU);
    }

    pub fn to_mat4(self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.x, self.y, 0.0)
    }
}

/// Animated hero object and the static configuration it was built from
pub struct HeroScene {
    config: SceneConfig,
    spin: Spin,
    float: FloatMotion,
    mesh: DistortedOctahedron,
    elapsed_s: f32,
}

impl HeroScene {
    pub fn new(config: SceneConfig) -> Self {
        let mut mesh = DistortedOctahedron::new(config.shape.radius, config.shape.detail);
        mesh.update(0.0, &config.material);

        Self {
            float: FloatMotion::new(config.float.clone()),
            mesh,
            spin: Spin::default(),
            elapsed_s: 0.0,
            config,
        }
    }

    /// Advance the scene by one frame
    ///
    /// Rotation grows by `delta_s × rate`, so the animation runs at the
    /// same speed at any refresh rate. Negative or non-finite deltas are
    /// treated as zero.
    pub fn update(&mut self, delta_s: f32) {
        let delta_s = if delta_s.is_finite() {
            delta_s.max(0.0)
        } else {
            0.0
        };

        self.elapsed_s += delta_s;
        self.spin.advance(delta_s, &self.config.shape);
        self.mesh.update(self.elapsed_s, &self.config.material);
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn spin(&self) -> Spin {
        self.spin
    }

    pub fn elapsed_s(&self) -> f32 {
        self.elapsed_s
    }

    pub fn mesh(&self) -> &DistortedOctahedron {
        &self.mesh
    }

    pub fn float_pose(&self) -> FloatPose {
        self.float.pose(self.elapsed_s)
    }

    /// Object-to-world transform: floating wrapper around the spinning mesh
    pub fn model_matrix(&self) -> Mat4 {
        self.float_pose().to_mat4() * self.spin.to_mat4()
    }

    /// Lowest point of the object's bounding sphere (world Y)
    pub fn lowest_point(&self) -> f32 {
        let material = &self.config.material;
        let reach = self.config.shape.radius
            * (material.radius + material.distort * material.distort);
        self.model_matrix().transform_point3(Vec3::ZERO).y - reach
    }
}
