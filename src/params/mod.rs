//! Parameter definitions with physical units and documented semantics.
//!
//! Every literal the hero scene depends on lives here, grouped into one
//! [`SceneConfig`] that is handed to the scene at construction:
//! - Units in the field names (seconds, radians, degrees, world units)
//! - Defaults equal to the values the landing page ships with

mod camera;
mod render;
mod scene;

// Re-export all types
pub use camera::{CameraConfig, OrbitConfig};
pub use render::RenderConfig;
pub use scene::{
    AmbientLight, Color, ContactShadowConfig, EnvironmentConfig, EnvironmentPreset, FloatConfig,
    LightingConfig, MaterialConfig, PointLight, SceneConfig, ShapeConfig, SpotLight,
};
