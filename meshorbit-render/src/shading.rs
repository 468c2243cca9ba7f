//! Surface shading

use image::Rgb;
use meshorbit_core::{Error, Result, Vector3f};
use serde::{Deserialize, Serialize};

/// A plain surface material with a Phong-style highlight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Linear base color, each channel in [0, 1]
    pub base_color: [f32; 3],
    /// Highlight strength in [0, 1]
    pub specular: f32,
    /// Highlight spread in (0, 1]; lower is glossier
    pub roughness: f32,
    /// Light reaching surfaces that face away from the light
    pub ambient: f32,
}

impl Material {
    /// White, moderately glossy surface
    pub fn white() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0],
            specular: 0.5,
            roughness: 0.2,
            ambient: 0.1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f32| (0.0..=1.0).contains(&v);
        if !self.base_color.iter().all(|&c| in_unit(c))
            || !in_unit(self.specular)
            || !in_unit(self.ambient)
            || !(self.roughness > 0.0 && self.roughness <= 1.0)
        {
            return Err(Error::InvalidConfig(format!("material out of range: {:?}", self)));
        }
        Ok(())
    }

    /// Blinn-Phong exponent for the roughness
    pub fn shininess(&self) -> f32 {
        2.0 / (self.roughness * self.roughness) - 2.0
    }

    /// Shade a surface point
    ///
    /// `light` and `view` are unit vectors pointing away from the surface.
    /// Surfaces are two-sided: a normal facing away from the viewer is
    /// flipped.
    pub fn shade(&self, normal: &Vector3f, light: &Vector3f, view: &Vector3f) -> Rgb<u8> {
        let n = if normal.dot(view) < 0.0 { -normal } else { *normal };

        let diffuse = n.dot(light).max(0.0);
        let half = (light + view).try_normalize(f32::EPSILON).unwrap_or(n);
        let highlight = if diffuse > 0.0 {
            self.specular * n.dot(&half).max(0.0).powf(self.shininess())
        } else {
            0.0
        };

        let lit = self.ambient + (1.0 - self.ambient) * diffuse;
        let channel = |c: f32| ((c * lit + highlight).clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb([
            channel(self.base_color[0]),
            channel(self.base_color[1]),
            channel(self.base_color[2]),
        ])
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::white()
    }
}
