//! Blinn-Phong material definition.

use lumen_math::Vec3;
use thiserror::Error;

/// A coefficient or color outside its legal range.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Parameter '{name}' must be between 0 and 1, got {value}")]
    Coefficient { name: &'static str, value: f32 },

    #[error("Parameter '{name}' must have every component between 0 and 1, got {value}")]
    Color { name: &'static str, value: Vec3 },

    #[error("Parameter '{name}' must be non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

/// Check that every component of `value` lies in [0, 1].
pub fn validate_color(name: &'static str, value: Vec3) -> Result<Vec3, ValidationError> {
    let in_range = |c: f32| (0.0..=1.0).contains(&c);
    if in_range(value.x) && in_range(value.y) && in_range(value.z) {
        Ok(value)
    } else {
        Err(ValidationError::Color { name, value })
    }
}

fn validate_coefficient(name: &'static str, value: f32) -> Result<f32, ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::Coefficient { name, value })
    }
}

/// Reflectance coefficients for Blinn-Phong shading.
///
/// Every setter validates its argument; an invalid value leaves the material
/// unchanged and returns the error to the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Diffuse color (Od)
    diffuse: Vec3,
    /// Specular color (Os)
    specular: Vec3,
    ka: f32,
    kd: f32,
    ks: f32,
    /// Specular falloff exponent
    n: f32,
}

impl Default for Material {
    /// Black, non-reflective material.
    fn default() -> Self {
        Self {
            diffuse: Vec3::ZERO,
            specular: Vec3::ZERO,
            ka: 0.0,
            kd: 0.0,
            ks: 0.0,
            n: 0.0,
        }
    }
}

impl Material {
    /// Create a fully validated material.
    pub fn new(
        diffuse: Vec3,
        specular: Vec3,
        ka: f32,
        kd: f32,
        ks: f32,
        n: f32,
    ) -> Result<Self, ValidationError> {
        let mut material = Self::default();
        material.set_diffuse(diffuse)?;
        material.set_specular(specular)?;
        material.set_ka(ka)?;
        material.set_kd(kd)?;
        material.set_ks(ks)?;
        material.set_n(n)?;
        Ok(material)
    }

    pub fn diffuse(&self) -> Vec3 {
        self.diffuse
    }

    pub fn specular(&self) -> Vec3 {
        self.specular
    }

    pub fn ka(&self) -> f32 {
        self.ka
    }

    pub fn kd(&self) -> f32 {
        self.kd
    }

    pub fn ks(&self) -> f32 {
        self.ks
    }

    pub fn n(&self) -> f32 {
        self.n
    }

    pub fn set_diffuse(&mut self, diffuse: Vec3) -> Result<(), ValidationError> {
        self.diffuse = validate_color("Od", diffuse)?;
        Ok(())
    }

    pub fn set_specular(&mut self, specular: Vec3) -> Result<(), ValidationError> {
        self.specular = validate_color("Os", specular)?;
        Ok(())
    }

    pub fn set_ka(&mut self, ka: f32) -> Result<(), ValidationError> {
        self.ka = validate_coefficient("ka", ka)?;
        Ok(())
    }

    pub fn set_kd(&mut self, kd: f32) -> Result<(), ValidationError> {
        self.kd = validate_coefficient("kd", kd)?;
        Ok(())
    }

    pub fn set_ks(&mut self, ks: f32) -> Result<(), ValidationError> {
        self.ks = validate_coefficient("ks", ks)?;
        Ok(())
    }

    /// Set the specular falloff exponent (must be >= 0).
    pub fn set_n(&mut self, n: f32) -> Result<(), ValidationError> {
        if n.is_nan() || n < 0.0 {
            return Err(ValidationError::Negative { name: "n", value: n });
        }
        self.n = n;
        Ok(())
    }
}
