//! Phong lighting: light sources, surface materials and CPU-side shading.
//!
//! Three light kinds mirror the usual forward-renderer uniforms:
//! [`DirectionalLight`], [`PointLight`] and [`SpotLight`]. Each contributes
//! [`LightTerms`] (ambient, diffuse, specular) at a surface point:
//!
//! ```text
//! ambient  = Ka * material.ambient
//! diffuse  = Kd * material.diffuse  * max(n.l, 0)
//! specular = Ks * material.specular * max(r.v, 0)^shininess   (0 if n.l <= 0)
//! ```
//!
//! Point and spot lights scale all terms by
//! `1 / (kc + kl d + kq d^2)`; spot lights also fade diffuse and specular
//! between their inner and outer cone.
//!
//! Evaluating per vertex ([`shade_vertices`]) gives Gouraud shading;
//! evaluating per fragment with interpolated normals gives Phong shading.
//! All vectors are in world space and normals are expected to be unit
//! length.
//!
//! # Usage
//!
//! ```rust
//! use cg_scene::light::{shade, DirectionalLight, Light, Material};
//! use cg_math::Vec3;
//!
//! let sun = Light::Directional(DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0)));
//! let color = shade(&[sun], &Material::default(), Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 5.0, 0.0));
//! assert!(color.y() > 0.0);
//! ```

use std::ops::Add;

use cg_core::to_radians;
use cg_math::{smoothstep, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{SceneError, SceneResult};

fn default_ambient() -> Vec3 {
    Vec3::splat(0.2)
}

fn default_diffuse() -> Vec3 {
    Vec3::splat(0.5)
}

fn default_specular() -> Vec3 {
    Vec3::ONE
}

fn default_inner_cutoff() -> f32 {
    SpotLight::DEFAULT_INNER_CUTOFF
}

fn default_outer_cutoff() -> f32 {
    SpotLight::DEFAULT_OUTER_CUTOFF
}

/// Distance falloff `1 / (constant + linear d + quadratic d^2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attenuation {
    /// Constant coefficient `kc`.
    pub constant: f32,
    /// Linear coefficient `kl`.
    pub linear: f32,
    /// Quadratic coefficient `kq`.
    pub quadratic: f32,
}

impl Default for Attenuation {
    /// Roughly a 200 unit range.
    fn default() -> Self {
        Self {
            constant: 1.0,
            linear: 0.022,
            quadratic: 0.0019,
        }
    }
}

impl Attenuation {
    /// No falloff at all.
    pub const NONE: Self = Self {
        constant: 1.0,
        linear: 0.0,
        quadratic: 0.0,
    };

    /// Falloff factor at `distance`.
    #[inline]
    pub fn factor(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }

    fn check(&self) -> SceneResult<()> {
        let Self {
            constant,
            linear,
            quadratic,
        } = *self;
        if !(constant > 0.0 && linear >= 0.0 && quadratic >= 0.0)
            || !(constant + linear + quadratic).is_finite()
        {
            return Err(SceneError::invalid(
                "attenuation",
                format!("kc={constant} kl={linear} kq={quadratic}: need kc > 0, kl >= 0, kq >= 0"),
            ));
        }
        Ok(())
    }
}

/// Surface reflectance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Ambient reflectance.
    pub ambient: Vec3,
    /// Diffuse reflectance (albedo).
    pub diffuse: Vec3,
    /// Specular reflectance.
    pub specular: Vec3,
    /// Specular exponent.
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec3::ONE,
            diffuse: Vec3::ONE,
            specular: Vec3::splat(0.5),
            shininess: 32.0,
        }
    }
}

/// Per-light contribution, split by term.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightTerms {
    /// Ambient term.
    pub ambient: Vec3,
    /// Diffuse (Lambert) term.
    pub diffuse: Vec3,
    /// Specular (Phong) term.
    pub specular: Vec3,
}

impl LightTerms {
    /// Sum of the three terms.
    #[inline]
    pub fn total(&self) -> Vec3 {
        self.ambient + self.diffuse + self.specular
    }

    fn scaled(self, k: f32) -> Self {
        Self {
            ambient: k * self.ambient,
            diffuse: k * self.diffuse,
            specular: k * self.specular,
        }
    }
}

impl Add for LightTerms {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            ambient: self.ambient + rhs.ambient,
            diffuse: self.diffuse + rhs.diffuse,
            specular: self.specular + rhs.specular,
        }
    }
}

/// Reflects incident direction `i` about unit normal `n`.
#[inline]
fn reflect(i: Vec3, n: Vec3) -> Vec3 {
    i - 2.0 * n.dot(i) * n
}

/// Phong terms for a unit direction towards the light and towards the eye.
///
/// A surface facing away from the light gets no specular highlight.
fn phong(
    ka: Vec3,
    kd: Vec3,
    ks: Vec3,
    to_light: Vec3,
    normal: Vec3,
    to_eye: Vec3,
    material: &Material,
) -> LightTerms {
    let n_dot_l = normal.dot(to_light).max(0.0);
    let highlight = if n_dot_l > 0.0 {
        let r_dot_v = reflect(-to_light, normal).dot(to_eye).max(0.0);
        r_dot_v.powf(material.shininess)
    } else {
        0.0
    };
    LightTerms {
        ambient: ka.component_mul(material.ambient),
        diffuse: n_dot_l * kd.component_mul(material.diffuse),
        specular: highlight * ks.component_mul(material.specular),
    }
}

/// Light at infinity shining along `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Direction the light travels in; need not be normalized.
    pub direction: Vec3,
    /// Ambient intensity `Ka`.
    #[serde(default = "default_ambient")]
    pub ambient: Vec3,
    /// Diffuse intensity `Kd`.
    #[serde(default = "default_diffuse")]
    pub diffuse: Vec3,
    /// Specular intensity `Ks`.
    #[serde(default = "default_specular")]
    pub specular: Vec3,
}

impl DirectionalLight {
    /// White light along `direction`.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction,
            ambient: default_ambient(),
            diffuse: default_diffuse(),
            specular: default_specular(),
        }
    }

    /// Contribution at `point` with unit `normal`, seen from `eye`.
    pub fn illuminate(&self, point: Vec3, normal: Vec3, eye: Vec3, material: &Material) -> LightTerms {
        let to_light = -self.direction.normalized();
        let to_eye = (eye - point).normalized();
        phong(self.ambient, self.diffuse, self.specular, to_light, normal, to_eye, material)
    }
}

/// Omnidirectional light with distance falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// World position.
    pub position: Vec3,
    /// Ambient intensity `Ka`.
    #[serde(default = "default_ambient")]
    pub ambient: Vec3,
    /// Diffuse intensity `Kd`.
    #[serde(default = "default_diffuse")]
    pub diffuse: Vec3,
    /// Specular intensity `Ks`.
    #[serde(default = "default_specular")]
    pub specular: Vec3,
    /// Distance falloff.
    #[serde(default)]
    pub attenuation: Attenuation,
}

impl PointLight {
    /// Light at `position` with the given intensities and default falloff.
    pub fn new(position: Vec3, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
        Self {
            position,
            ambient,
            diffuse,
            specular,
            attenuation: Attenuation::default(),
        }
    }

    /// Falloff factor at `distance` from the light.
    #[inline]
    pub fn attenuation(&self, distance: f32) -> f32 {
        self.attenuation.factor(distance)
    }

    /// Contribution at `point` with unit `normal`, seen from `eye`.
    pub fn illuminate(&self, point: Vec3, normal: Vec3, eye: Vec3, material: &Material) -> LightTerms {
        let delta = self.position - point;
        let distance = delta.magnitude();
        let to_light = delta.normalized();
        let to_eye = (eye - point).normalized();
        phong(self.ambient, self.diffuse, self.specular, to_light, normal, to_eye, material)
            .scaled(self.attenuation(distance))
    }
}

/// Cone-shaped light with distance falloff.
///
/// Full intensity inside `inner_cutoff`, none outside `outer_cutoff`,
/// smoothly blended in between. Cutoffs are half-angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    /// World position.
    pub position: Vec3,
    /// Cone axis; need not be normalized.
    pub direction: Vec3,
    /// Ambient intensity `Ka`.
    #[serde(default = "default_ambient")]
    pub ambient: Vec3,
    /// Diffuse intensity `Kd`.
    #[serde(default = "default_diffuse")]
    pub diffuse: Vec3,
    /// Specular intensity `Ks`.
    #[serde(default = "default_specular")]
    pub specular: Vec3,
    /// Distance falloff.
    #[serde(default)]
    pub attenuation: Attenuation,
    /// Half-angle of the full-intensity cone in degrees.
    #[serde(default = "default_inner_cutoff")]
    pub inner_cutoff: f32,
    /// Half-angle of the outer cone in degrees.
    #[serde(default = "default_outer_cutoff")]
    pub outer_cutoff: f32,
}

impl SpotLight {
    /// Default inner cone half-angle.
    pub const DEFAULT_INNER_CUTOFF: f32 = 12.5;

    /// Default outer cone half-angle.
    pub const DEFAULT_OUTER_CUTOFF: f32 = 17.5;

    /// White spot light at `position` pointing along `direction`.
    pub fn new(position: Vec3, direction: Vec3) -> Self {
        Self {
            position,
            direction,
            ambient: default_ambient(),
            diffuse: default_diffuse(),
            specular: default_specular(),
            attenuation: Attenuation::default(),
            inner_cutoff: Self::DEFAULT_INNER_CUTOFF,
            outer_cutoff: Self::DEFAULT_OUTER_CUTOFF,
        }
    }

    /// Falloff factor at `distance` from the light.
    #[inline]
    pub fn attenuation(&self, distance: f32) -> f32 {
        self.attenuation.factor(distance)
    }

    /// Cone factor for `point`: 1 inside the inner cone, 0 outside the
    /// outer cone.
    pub fn spot_factor(&self, point: Vec3) -> f32 {
        let to_point = (point - self.position).normalized();
        let theta = to_point.dot(self.direction.normalized());
        let inner = to_radians(self.inner_cutoff).cos();
        let outer = to_radians(self.outer_cutoff).cos();
        smoothstep(outer, inner, theta)
    }

    /// Contribution at `point` with unit `normal`, seen from `eye`.
    pub fn illuminate(&self, point: Vec3, normal: Vec3, eye: Vec3, material: &Material) -> LightTerms {
        let delta = self.position - point;
        let distance = delta.magnitude();
        let to_light = delta.normalized();
        let to_eye = (eye - point).normalized();
        let mut terms =
            phong(self.ambient, self.diffuse, self.specular, to_light, normal, to_eye, material);
        let cone = self.spot_factor(point);
        terms.diffuse *= cone;
        terms.specular *= cone;
        terms.scaled(self.attenuation(distance))
    }
}

/// Any light source, tagged by `kind` in scene files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    /// See [`DirectionalLight`].
    Directional(DirectionalLight),
    /// See [`PointLight`].
    Point(PointLight),
    /// See [`SpotLight`].
    Spot(SpotLight),
}

impl Light {
    /// Contribution at `point` with unit `normal`, seen from `eye`.
    pub fn illuminate(&self, point: Vec3, normal: Vec3, eye: Vec3, material: &Material) -> LightTerms {
        match self {
            Self::Directional(l) => l.illuminate(point, normal, eye, material),
            Self::Point(l) => l.illuminate(point, normal, eye, material),
            Self::Spot(l) => l.illuminate(point, normal, eye, material),
        }
    }

    /// Rejects parameters that shade to NaN or invert the cone.
    pub fn check(&self) -> SceneResult<()> {
        let nonzero = |field: &'static str, v: Vec3| {
            v.try_normalized()
                .map(|_| ())
                .map_err(|_| SceneError::invalid(field, "direction must be non-zero"))
        };
        match self {
            Self::Directional(l) => nonzero("light.direction", l.direction),
            Self::Point(l) => l.attenuation.check(),
            Self::Spot(l) => {
                nonzero("light.direction", l.direction)?;
                l.attenuation.check()?;
                if !(0.0 <= l.inner_cutoff && l.inner_cutoff < l.outer_cutoff && l.outer_cutoff < 90.0) {
                    return Err(SceneError::invalid(
                        "light.cutoff",
                        format!(
                            "need 0 <= inner < outer < 90, got inner={} outer={}",
                            l.inner_cutoff, l.outer_cutoff
                        ),
                    ));
                }
                Ok(())
            }
        }
    }
}

impl From<DirectionalLight> for Light {
    fn from(l: DirectionalLight) -> Self {
        Self::Directional(l)
    }
}

impl From<PointLight> for Light {
    fn from(l: PointLight) -> Self {
        Self::Point(l)
    }
}

impl From<SpotLight> for Light {
    fn from(l: SpotLight) -> Self {
        Self::Spot(l)
    }
}

/// Color at `point` summed over all `lights`.
pub fn shade(lights: &[Light], material: &Material, point: Vec3, normal: Vec3, eye: Vec3) -> Vec3 {
    lights
        .iter()
        .map(|l| l.illuminate(point, normal, eye, material))
        .fold(LightTerms::default(), |acc, t| acc + t)
        .total()
}

/// Per-vertex colors for Gouraud shading.
///
/// `normals` runs parallel to `positions`; extra entries in either are
/// ignored.
pub fn shade_vertices(
    positions: &[Vec3],
    normals: &[Vec3],
    lights: &[Light],
    material: &Material,
    eye: Vec3,
) -> Vec<Vec3> {
    if positions.len() != normals.len() {
        warn!(
            positions = positions.len(),
            normals = normals.len(),
            "position and normal counts differ"
        );
    }
    let colors: Vec<Vec3> = positions
        .iter()
        .zip(normals)
        .map(|(&p, &n)| shade(lights, material, p, n, eye))
        .collect();
    trace!(vertices = colors.len(), lights = lights.len(), "shaded vertices");
    colors
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn overhead_sun() -> DirectionalLight {
        DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_attenuation() {
        let att = Attenuation::default();
        assert_eq!(att.factor(0.0), 1.0);
        assert_relative_eq!(att.factor(10.0), 1.0 / 1.41, epsilon = 1e-6);
        assert!(att.factor(50.0) < att.factor(10.0));
        assert_eq!(Attenuation::NONE.factor(1000.0), 1.0);

        let light = PointLight::new(Vec3::ZERO, Vec3::ZERO, Vec3::ONE, Vec3::ONE);
        assert_eq!(light.attenuation(0.0), 1.0);
    }

    #[test]
    fn test_front_facing_phong() {
        let material = Material::default();
        let terms = overhead_sun().illuminate(Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 5.0, 0.0), &material);
        assert_eq!(terms.ambient, Vec3::splat(0.2));
        assert_eq!(terms.diffuse, Vec3::splat(0.5));
        // eye sits on the mirror direction
        assert_eq!(terms.specular, Vec3::splat(0.5));
    }

    #[test]
    fn test_back_facing_has_no_diffuse() {
        let terms = overhead_sun().illuminate(
            Vec3::ZERO,
            -Vec3::Y,
            Vec3::new(0.0, -5.0, 0.0),
            &Material::default(),
        );
        assert_eq!(terms.diffuse, Vec3::ZERO);
        assert_eq!(terms.specular, Vec3::ZERO);
        assert_eq!(terms.ambient, Vec3::splat(0.2));
    }

    #[test]
    fn test_specular_falls_off_from_mirror() {
        let material = Material::default();
        let sun = overhead_sun();
        let at_mirror = sun.illuminate(Vec3::ZERO, Vec3::Y, Vec3::Y, &material).specular;
        let grazing = sun.illuminate(Vec3::ZERO, Vec3::Y, Vec3::new(1.0, 1.0, 0.0), &material).specular;
        assert!(grazing.x() < 0.01 * at_mirror.x());
    }

    #[test]
    fn test_point_light_attenuates_all_terms() {
        let light = PointLight::new(Vec3::new(0.0, 2.0, 0.0), Vec3::ONE, Vec3::ONE, Vec3::ZERO);
        let terms = light.illuminate(Vec3::ZERO, Vec3::Y, Vec3::new(0.0, 5.0, 0.0), &Material::default());
        let k = light.attenuation(2.0);
        assert_relative_eq!(k, 1.0 / (1.0 + 0.044 + 0.0076), epsilon = 1e-6);
        assert_relative_eq!(terms.ambient.x(), k, epsilon = 1e-6);
        assert_relative_eq!(terms.diffuse.x(), k, epsilon = 1e-6);
        assert_eq!(terms.specular, Vec3::ZERO);
    }

    #[test]
    fn test_spot_factor_cones() {
        let spot = SpotLight::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        // on axis
        assert_eq!(spot.spot_factor(Vec3::ZERO), 1.0);
        // 10 degrees off axis, inside the inner cone
        let inside = Vec3::new(5.0 * to_radians(10.0).tan(), 0.0, 0.0);
        assert_eq!(spot.spot_factor(inside), 1.0);
        // 45 degrees off axis, outside the outer cone
        assert_eq!(spot.spot_factor(Vec3::new(5.0, 0.0, 0.0)), 0.0);
        // 15 degrees: between the cones
        let edge = spot.spot_factor(Vec3::new(5.0 * to_radians(15.0).tan(), 0.0, 0.0));
        assert!(edge > 0.0 && edge < 1.0);
    }

    #[test]
    fn test_spot_outside_cone_keeps_ambient_only() {
        let spot = SpotLight::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let p = Vec3::new(5.0, 0.0, 0.0);
        let terms = spot.illuminate(p, Vec3::Y, Vec3::new(5.0, 5.0, 0.0), &Material::default());
        assert_eq!(terms.diffuse, Vec3::ZERO);
        assert_eq!(terms.specular, Vec3::ZERO);
        assert!(terms.ambient.x() > 0.0);
    }

    #[test]
    fn test_shade_sums_lights() {
        let material = Material::default();
        let eye = Vec3::new(1.0, 3.0, 2.0);
        let a: Light = overhead_sun().into();
        let b: Light = PointLight::new(Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO, Vec3::ONE, Vec3::ONE).into();
        let both = shade(&[a, b], &material, Vec3::ZERO, Vec3::Y, eye);
        let sum = shade(&[a], &material, Vec3::ZERO, Vec3::Y, eye)
            + shade(&[b], &material, Vec3::ZERO, Vec3::Y, eye);
        assert!(both.abs_diff_eq(sum, 1e-6));
        assert_eq!(shade(&[], &material, Vec3::ZERO, Vec3::Y, eye), Vec3::ZERO);
    }

    #[test]
    fn test_shade_vertices() {
        let lights = [Light::from(overhead_sun())];
        let positions = [Vec3::ZERO, Vec3::X];
        let normals = [Vec3::Y, -Vec3::Y];
        let colors = shade_vertices(&positions, &normals, &lights, &Material::default(), Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(colors.len(), 2);
        assert!(colors[0].y() > colors[1].y());
        assert_eq!(colors[1], Vec3::splat(0.2));
    }

    #[test]
    fn test_check() {
        assert!(Light::from(overhead_sun()).check().is_ok());
        assert!(Light::from(DirectionalLight::new(Vec3::ZERO)).check().is_err());

        let mut spot = SpotLight::new(Vec3::ZERO, Vec3::Y);
        assert!(Light::from(spot).check().is_ok());
        spot.inner_cutoff = 20.0;
        assert!(matches!(
            Light::from(spot).check(),
            Err(SceneError::InvalidValue { field: "light.cutoff", .. })
        ));

        let mut point = PointLight::new(Vec3::ZERO, Vec3::ONE, Vec3::ONE, Vec3::ONE);
        point.attenuation.constant = 0.0;
        assert!(Light::from(point).check().is_err());
    }
}
