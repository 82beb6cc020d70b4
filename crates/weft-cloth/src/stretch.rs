//! Stretch limiting (Provot 1995).
//!
//! A single relaxation pass over the springs in enumeration order. A
//! spring longer than `1.1 × rest_length` has its endpoints pulled
//! together by the excess: the free endpoint takes all of it when the
//! other is pinned, each takes half when both are free. Later springs can
//! re-stretch earlier ones; the residual is worked off over later steps.

use weft_math::unit_or_zero;
use weft_types::constants::MAX_STRAIN;

use crate::point_mass::PointMass;
use crate::spring::Spring;

/// Result of one stretch-limiting pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StretchResult {
    /// Springs whose endpoints were moved.
    pub corrected: u32,
    /// Largest strain seen before correction.
    pub max_strain_before: f32,
}

/// Apply one pass of stretch limiting to `point_masses`.
pub fn limit_stretch(springs: &[Spring], point_masses: &mut [PointMass]) -> StretchResult {
    let mut result = StretchResult::default();
    let cap_factor = 1.0 + MAX_STRAIN;

    for spring in springs {
        let a = spring.pm_a.index();
        let b = spring.pm_b.index();
        let ab = point_masses[a].position() - point_masses[b].position();
        let length = ab.length();
        let cap = spring.rest_length * cap_factor;

        result.max_strain_before = result.max_strain_before.max(spring.strain(length));
        if length <= cap {
            continue;
        }

        // Unit vector from b towards a.
        let dir_ba = unit_or_zero(ab);
        let excess = length - cap;

        match (point_masses[a].is_pinned(), point_masses[b].is_pinned()) {
            (true, true) => continue,
            (true, false) => point_masses[b].translate(dir_ba * excess),
            (false, true) => point_masses[a].translate(-dir_ba * excess),
            (false, false) => {
                let half = dir_ba * (excess * 0.5);
                point_masses[a].translate(-half);
                point_masses[b].translate(half);
            }
        }
        result.corrected += 1;
    }

    result
}

/// Largest current strain over `springs` (`0.0` for an empty set).
pub fn max_strain(springs: &[Spring], point_masses: &[PointMass]) -> f32 {
    springs
        .iter()
        .map(|s| {
            let length = (point_masses[s.pm_a.index()].position()
                - point_masses[s.pm_b.index()].position())
            .length();
            s.strain(length)
        })
        .fold(0.0, f32::max)
}
