//! Hero scene lighting, material, shape and motion parameters.

use super::{CameraConfig, OrbitConfig};

/// sRGB color with components in 0..1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Build from a 0xRRGGBB literal
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Convert to linear RGB for lighting math
    pub fn to_linear(self) -> [f32; 3] {
        fn decode(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [decode(self.r), decode(self.g), decode(self.b)]
    }

    /// Linear RGB pre-multiplied by an intensity
    pub fn scaled_linear(self, intensity: f32) -> [f32; 3] {
        let [r, g, b] = self.to_linear();
        [r * intensity, g * intensity, b * intensity]
    }
}

/// Uniform light applied to every surface
#[derive(Debug, Clone)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Cone light aimed at the orbit target
#[derive(Debug, Clone)]
pub struct SpotLight {
    /// Light position (world units)
    pub position: [f32; 3],
    pub color: Color,
    pub intensity: f32,

    /// Half-angle of the cone (radians)
    pub angle_rad: f32,

    /// Fraction of the cone that fades out (0 = hard edge, 1 = fully soft)
    pub penumbra: f32,
}

impl SpotLight {
    /// Cosines of the (outer, inner) cone edges
    pub fn cone_cosines(&self) -> (f32, f32) {
        let outer = self.angle_rad.cos();
        let inner = (self.angle_rad * (1.0 - self.penumbra.clamp(0.0, 1.0))).cos();
        // smoothstep needs a non-empty edge range
        (outer, inner.max(outer + 1e-4))
    }
}

/// Omnidirectional light
#[derive(Debug, Clone)]
pub struct PointLight {
    /// Light position (world units)
    pub position: [f32; 3],
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone)]
pub struct LightingConfig {
    pub ambient: AmbientLight,
    pub spot: SpotLight,
    pub point: PointLight,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Color::WHITE,
                intensity: 0.5,
            },
            spot: SpotLight {
                position: [10.0, 10.0, 10.0],
                color: Color::WHITE,
                intensity: 1.0,
                angle_rad: 0.15,
                penumbra: 1.0,
            },
            point: PointLight {
                position: [-10.0, -10.0, -10.0],
                color: Color::from_hex(0xffedd5), // orange-100
                intensity: 1.0,
            },
        }
    }
}

/// Environment lighting preset used for reflections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvironmentPreset {
    /// Warm low sun, orange horizon
    #[default]
    Sunset,
}

impl EnvironmentPreset {
    /// Sky gradient as (zenith, horizon, ground)
    pub fn gradient(self) -> (Color, Color, Color) {
        match self {
            Self::Sunset => (
                Color::from_hex(0x3b4f7d),
                Color::from_hex(0xffa566),
                Color::from_hex(0x40302a),
            ),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnvironmentConfig {
    pub preset: EnvironmentPreset,
}

/// Surface material of the hero object
#[derive(Debug, Clone)]
pub struct MaterialConfig {
    pub color: Color,

    /// Strength of environment reflections (dimensionless)
    pub env_map_intensity: f32,

    /// Clearcoat layer strength (0..1)
    pub clearcoat: f32,

    /// Clearcoat roughness (0 = mirror, 1 = matte)
    pub clearcoat_roughness: f32,

    /// Metalness of the base layer (0..1)
    pub metalness: f32,

    /// Distortion strength; displacement scales with distort²
    pub distort: f32,

    /// Distortion animation speed multiplier
    pub speed: f32,

    /// Base scale the noise displacement is added to
    pub radius: f32,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            color: Color::from_hex(0xf97316), // orange-500
            env_map_intensity: 1.0,
            clearcoat: 1.0,
            clearcoat_roughness: 0.1,
            metalness: 0.1,
            distort: 0.3,
            speed: 2.0,
            radius: 1.0,
        }
    }
}

/// Geometry and spin of the hero object
#[derive(Debug, Clone)]
pub struct ShapeConfig {
    /// Octahedron circumradius (world units)
    pub radius: f32,

    /// Subdivision level (0 = plain eight-faced octahedron)
    pub detail: u32,

    /// Spin rate around X (radians per second)
    pub spin_rate_x: f32,

    /// Spin rate around Y (radians per second)
    pub spin_rate_y: f32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            radius: 1.5,
            detail: 0,
            spin_rate_x: 0.1,
            spin_rate_y: 0.2,
        }
    }
}

/// Gentle bobbing and tilting applied around the hero object
#[derive(Debug, Clone)]
pub struct FloatConfig {
    /// Animation speed multiplier (0 disables the motion)
    pub speed: f32,

    /// Tilt strength (dimensionless)
    pub rotation_intensity: f32,

    /// Vertical travel multiplier (dimensionless)
    pub float_intensity: f32,

    /// Vertical travel range before intensity scaling (world units)
    pub floating_range: [f32; 2],

    /// Phase offset added to elapsed time (seconds)
    pub phase_offset_s: f32,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            speed: 2.0,
            rotation_intensity: 1.0,
            float_intensity: 2.0,
            floating_range: [-0.2, 0.2],
            phase_offset_s: 0.0,
        }
    }
}

/// Soft shadow on a ground plane below the object
#[derive(Debug, Clone)]
pub struct ContactShadowConfig {
    /// Plane center (world units)
    pub position: [f32; 3],

    /// Peak opacity (0..1)
    pub opacity: f32,

    /// Plane edge length (world units)
    pub scale: f32,

    /// Edge softness
    pub blur: f32,

    /// Height above the plane at which the shadow has faded out (world units)
    pub far: f32,

    pub color: Color,
}

impl Default for ContactShadowConfig {
    fn default() -> Self {
        Self {
            position: [0.0, -2.5, 0.0],
            opacity: 0.4,
            scale: 10.0,
            blur: 2.5,
            far: 4.0,
            color: Color::from_hex(0xf97316),
        }
    }
}

/// Complete static configuration of the hero scene
#[derive(Debug, Clone, Default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub lighting: LightingConfig,
    pub environment: EnvironmentConfig,
    pub material: MaterialConfig,
    pub shape: ShapeConfig,
    pub float: FloatConfig,
    pub contact_shadow: ContactShadowConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let orange = Color::from_hex(0xf97316);
        assert!((orange.r - 249.0 / 255.0).abs() < 1e-6);
        assert!((orange.g - 115.0 / 255.0).abs() < 1e-6);
        assert!((orange.b - 22.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_conversion_endpoints() {
        assert_eq!(Color::from_hex(0x000000).to_linear(), [0.0, 0.0, 0.0]);
        let white = Color::WHITE.to_linear();
        for c in white {
            assert!((c - 1.0).abs() < 1e-6);
        }
        // Mid gray is darker in linear space
        assert!(Color::from_hex(0x808080).to_linear()[0] < 0.5);
    }

    #[test]
    fn test_spot_cone_with_full_penumbra() {
        let spot = LightingConfig::default().spot;
        let (outer, inner) = spot.cone_cosines();
        assert!((outer - 0.15f32.cos()).abs() < 1e-6);
        assert!((inner - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_spot_cone_hard_edge_stays_ordered() {
        let mut spot = LightingConfig::default().spot;
        spot.penumbra = 0.0;
        let (outer, inner) = spot.cone_cosines();
        assert!(inner > outer);
    }

    #[test]
    fn test_defaults_match_landing_page() {
        let config = SceneConfig::default();
        assert_eq!(config.camera.position, [0.0, 0.0, 5.0]);
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert!(!config.orbit.enable_zoom);
        assert!(config.orbit.auto_rotate);
        assert_eq!(config.orbit.auto_rotate_speed, 0.5);
        assert_eq!(config.shape.spin_rate_y, 0.2);
        assert_eq!(config.shape.spin_rate_x, 0.1);
        assert_eq!(config.material.distort, 0.3);
        assert_eq!(config.contact_shadow.position, [0.0, -2.5, 0.0]);
        assert_eq!(config.environment.preset, EnvironmentPreset::Sunset);
    }
}
