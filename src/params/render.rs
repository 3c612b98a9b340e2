//! Rendering target configuration.

use super::Color;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Viewport width (pixels)
    pub window_width: u32,

    /// Viewport height (pixels)
    /// 600 = the scene region's height on wide screens
    pub window_height: u32,

    /// Window title (native viewer only)
    pub title: String,

    /// Background behind the scene
    /// gray-50, the page background the canvas sits on
    pub clear_color: Color,

    /// Background opacity (0 lets the page show through the canvas)
    pub clear_alpha: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 600,
            title: "ASTRA.IO".to_string(),
            clear_color: Color::from_hex(0xf9fafb),
            clear_alpha: 1.0,
        }
    }
}

impl RenderConfig {
    /// Configuration for a canvas embedded in the page (transparent background)
    pub fn embedded(width: u32, height: u32) -> Self {
        Self {
            window_width: width.max(1),
            window_height: height.max(1),
            clear_alpha: 0.0,
            ..Self::default()
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }

    /// Clear color in linear space, as the render pass expects it
    pub fn clear_color_linear(&self) -> wgpu::Color {
        let [r, g, b] = self.clear_color.to_linear();
        let a = self.clear_alpha as f64;
        // Premultiplied so a transparent canvas composites correctly
        wgpu::Color {
            r: r as f64 * a,
            g: g as f64 * a,
            b: b as f64 * a,
            a,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratio() {
        let config = RenderConfig::default();
        assert!((config.aspect_ratio() - 640.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_embedded_is_transparent() {
        let config = RenderConfig::embedded(0, 400);
        assert_eq!(config.window_width, 1);
        assert_eq!(config.clear_color_linear().a, 0.0);
        assert_eq!(config.clear_color_linear().r, 0.0);
    }
}
