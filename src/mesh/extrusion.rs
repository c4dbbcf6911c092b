use crate::error::{MeshError, Result};

use super::profile::BumperProfile;
use super::sweep::{straight_frames, sweep_profile};
use super::TriangleMesh;

/// Extrudes a bumper profile from the origin along `+z`, for free-standing
/// obstacle rails.
pub struct BuildBumperExtrusion {
    profile: BumperProfile,
    length: f64,
}

impl BuildBumperExtrusion {
    /// Creates a new `BuildBumperExtrusion` operation.
    #[must_use]
    pub fn new(profile: BumperProfile, length: f64) -> Self {
        Self { profile, length }
    }

    /// Executes the extrusion.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameters`] if the profile is invalid or
    /// the length is not a positive finite number.
    pub fn execute(&self) -> Result<TriangleMesh> {
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(MeshError::InvalidParameters(format!(
                "extrusion length must be positive, got {}",
                self.length
            ))
            .into());
        }
        self.profile.validate()?;

        let mesh = sweep_profile(&straight_frames(self.length), &self.profile.outline(), 0.0)?
            .welded();
        tracing::debug!(
            length = self.length,
            triangles = mesh.triangle_count(),
            "built bumper extrusion"
        );
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    #[test]
    fn extrusion_spans_profile_and_length() {
        let profile = BumperProfile::default();
        let mesh = BuildBumperExtrusion::new(profile, 3.0).execute().unwrap();
        let (lo, hi) = mesh.aabb().unwrap();
        let half = profile.thickness * 0.5;
        assert!((lo - Point3::new(-half, 0.0, 0.0)).norm() < 1e-12);
        assert!((hi - Point3::new(half, profile.height, 3.0)).norm() < 1e-12);
        assert!(mesh.is_closed());
    }

    #[test]
    fn rounder_profiles_have_more_triangles() {
        let sharp = BumperProfile {
            bevel_radius: 0.0,
            ..BumperProfile::default()
        };
        let round = BumperProfile {
            bevel_segments: 8,
            ..BumperProfile::default()
        };
        let a = BuildBumperExtrusion::new(sharp, 1.0).execute().unwrap();
        let b = BuildBumperExtrusion::new(round, 1.0).execute().unwrap();
        // A plain box: four sides and two caps.
        assert_eq!(a.triangle_count(), 12);
        assert!(b.triangle_count() > a.triangle_count());
    }

    #[test]
    fn non_positive_length_is_rejected() {
        let profile = BumperProfile::default();
        assert!(BuildBumperExtrusion::new(profile, 0.0).execute().is_err());
        assert!(BuildBumperExtrusion::new(profile, f64::INFINITY).execute().is_err());
    }
}
