//! Integration tests for weft-cloth.

use weft_cloth::{
    Cloth, ClothParameters, Collidable, GridSpec, Orientation, PointMass, SpatialHash,
    SpringType, StepConfig, NO_COLLIDABLES,
};
use weft_math::Vec3;
use weft_types::{PointMassId, SpringId, WeftError};

const GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);

/// Floor at a fixed height, projecting penetrating points straight up.
struct Floor(f32);

impl Collidable for Floor {
    fn collide(&self, point_mass: &mut PointMass) {
        let p = point_mass.position();
        if p.y < self.0 {
            point_mass.set_position(Vec3::new(p.x, self.0, p.z));
        }
    }

    fn name(&self) -> &str {
        "floor"
    }
}

fn counts(cloth: &Cloth) -> (usize, usize, usize) {
    (
        cloth.spring_count(SpringType::Structural),
        cloth.spring_count(SpringType::Shearing),
        cloth.spring_count(SpringType::Bending),
    )
}

// ─── Topology ─────────────────────────────────────────────────

#[test]
fn three_by_three_spring_counts() {
    let cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 3, 3), 0).unwrap();
    assert_eq!(cloth.point_masses().len(), 9);
    assert_eq!(counts(&cloth), (12, 8, 6));
    assert_eq!(cloth.springs().len(), 26);
}

#[test]
fn spring_counts_follow_closed_form() {
    for (m, n) in [(1, 1), (2, 1), (1, 4), (2, 2), (4, 3), (5, 7)] {
        let cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, m, n), 0).unwrap();
        let structural = m * (n - 1) + n * (m - 1);
        let shearing = 2 * (m - 1) * (n - 1);
        let bending = m * n.saturating_sub(2) + n * m.saturating_sub(2);
        assert_eq!(counts(&cloth), (structural, shearing, bending), "grid {m}x{n}");
    }
}

#[test]
fn spring_enumeration_order_is_row_major() {
    let cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 3, 3), 0).unwrap();
    let head: Vec<(u32, u32, SpringType)> = cloth.springs()[..5]
        .iter()
        .map(|s| (s.pm_a.0, s.pm_b.0, s.spring_type))
        .collect();
    assert_eq!(
        head,
        vec![
            (0, 1, SpringType::Structural),
            (1, 2, SpringType::Structural),
            (0, 2, SpringType::Bending),
            (0, 3, SpringType::Structural),
            (1, 3, SpringType::Shearing),
        ]
    );
}

#[test]
fn rest_lengths_are_positive_and_measured() {
    let cloth = Cloth::with_seed(GridSpec::new(2.0, 1.0, 4, 2), 0).unwrap();
    assert!(cloth.springs().iter().all(|s| s.rest_length > 0.0));
    let first = cloth.springs()[0];
    assert!((first.rest_length - 0.5).abs() < 1e-6);
}

#[test]
fn vertical_build_is_reproducible_per_seed() {
    let spec = GridSpec::new(1.0, 1.0, 6, 6).with_orientation(Orientation::Vertical);
    let a = Cloth::with_seed(spec.clone(), 42).unwrap();
    let b = Cloth::with_seed(spec.clone(), 42).unwrap();
    let c = Cloth::with_seed(spec, 43).unwrap();
    assert_eq!(a.positions(), b.positions());
    assert_ne!(a.positions(), c.positions());
}

#[test]
fn id_at_maps_grid_coordinates() {
    let cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 4, 3), 0).unwrap();
    assert_eq!(cloth.id_at(0, 0), Some(PointMassId(0)));
    assert_eq!(cloth.id_at(3, 2), Some(PointMassId(11)));
    assert_eq!(cloth.id_at(4, 0), None);
}

#[test]
fn spring_lookup_by_id() {
    let cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 3, 3), 0).unwrap();
    let last = cloth.springs().len() as u32 - 1;
    assert_eq!(cloth.spring(SpringId(0)), Some(&cloth.springs()[0]));
    assert_eq!(
        cloth.spring(SpringId(last)).map(|s| (s.pm_a, s.pm_b)),
        cloth.springs().last().map(|s| (s.pm_a, s.pm_b))
    );
    assert_eq!(cloth.spring(SpringId(last + 1)), None);
}

// ─── Construction Errors ──────────────────────────────────────

#[test]
fn zero_points_rejected() {
    let err = Cloth::with_seed(GridSpec::new(1.0, 1.0, 0, 3), 0).err().unwrap();
    assert!(matches!(err, WeftError::InvalidGrid(_)));
}

#[test]
fn oversized_grid_rejected() {
    // 2^20 x 2^20 points overflow the u32 id space.
    let err = Cloth::with_seed(GridSpec::new(1.0, 1.0, 1 << 20, 1 << 20), 0)
        .err()
        .unwrap();
    assert!(matches!(err, WeftError::InvalidGrid(_)));

    let spec = GridSpec::new(1.0, 1.0, usize::MAX, 2);
    assert_eq!(spec.point_count(), usize::MAX);
    assert!(matches!(spec.validate(), Err(WeftError::InvalidGrid(_))));
}

#[test]
fn non_positive_extent_rejected() {
    assert!(Cloth::with_seed(GridSpec::new(0.0, 1.0, 2, 2), 0).is_err());
    assert!(Cloth::with_seed(GridSpec::new(1.0, -1.0, 2, 2), 0).is_err());
}

#[test]
fn pin_outside_grid_rejected() {
    let spec = GridSpec::new(1.0, 1.0, 2, 2).with_pin(0, 2);
    assert!(matches!(
        Cloth::with_seed(spec, 0),
        Err(WeftError::InvalidGrid(_))
    ));
}

// ─── Step Validation ──────────────────────────────────────────

#[test]
fn invalid_density_leaves_cloth_untouched() {
    let mut cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 3, 3), 0).unwrap();
    let before = cloth.positions();
    let params = ClothParameters {
        density: 0.0,
        ..Default::default()
    };
    let err = cloth
        .simulate(&StepConfig::default(), &params, &[GRAVITY], NO_COLLIDABLES)
        .unwrap_err();
    assert!(matches!(err, WeftError::InvalidParameters(_)));
    assert_eq!(cloth.positions(), before);
    assert_eq!(cloth.steps_taken(), 0);
}

#[test]
fn zero_substeps_rejected() {
    let mut cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 2, 2), 0).unwrap();
    let result = cloth.simulate(
        &StepConfig::new(90.0, 0),
        &ClothParameters::default(),
        &[],
        NO_COLLIDABLES,
    );
    assert!(result.is_err());
}

// ─── Dynamics ─────────────────────────────────────────────────

#[test]
fn gravity_pulls_free_cloth_down() {
    let mut cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 4, 4), 0).unwrap();
    let step = StepConfig::default();
    for _ in 0..10 {
        cloth
            .simulate(&step, &ClothParameters::default(), &[GRAVITY], NO_COLLIDABLES)
            .unwrap();
    }
    assert!(cloth.point_masses().iter().all(|pm| pm.position().y < 1.0));
    assert!(cloth.kinetic_energy(&ClothParameters::default(), &step) > 0.0);
}

#[test]
fn accelerations_are_summed() {
    let spec = GridSpec::new(1.0, 1.0, 1, 1);
    let step = StepConfig::new(10.0, 1);
    let params = ClothParameters::springless();

    let mut split = Cloth::with_seed(spec.clone(), 0).unwrap();
    split
        .simulate(&step, &params, &[Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, -2.0, 0.0)], NO_COLLIDABLES)
        .unwrap();

    let mut whole = Cloth::with_seed(spec, 0).unwrap();
    whole
        .simulate(&step, &params, &[Vec3::new(0.0, -3.0, 0.0)], NO_COLLIDABLES)
        .unwrap();

    let dy = split.positions()[0].y - whole.positions()[0].y;
    assert!(dy.abs() < 1e-6);
    // One step from rest: Δy = a · dt² = -3 · 0.01
    assert!((whole.positions()[0].y - (1.0 - 0.03)).abs() < 1e-5);
}

#[test]
fn pinned_point_masses_never_move() {
    let spec = GridSpec::new(1.0, 1.0, 5, 5)
        .with_orientation(Orientation::Vertical)
        .with_pin(0, 4)
        .with_pin(4, 4);
    let mut cloth = Cloth::with_seed(spec, 3).unwrap();
    let pinned: Vec<(usize, PointMass)> = cloth
        .point_masses()
        .iter()
        .enumerate()
        .filter(|(_, pm)| pm.is_pinned())
        .map(|(i, pm)| (i, pm.clone()))
        .collect();
    assert_eq!(pinned.len(), 2);

    // A floor above the pinned corners would lift them if they were offered to it.
    let bodies = [Floor(2.0)];
    let step = StepConfig::default();
    for _ in 0..50 {
        cloth
            .simulate(&step, &ClothParameters::default(), &[GRAVITY], &bodies)
            .unwrap();
    }

    for (i, original) in pinned {
        let pm = &cloth.point_masses()[i];
        assert_eq!(pm.position(), original.position());
        assert_eq!(pm.last_position(), original.last_position());
    }
}

#[test]
fn cloth_at_rest_stays_at_rest() {
    let mut cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 5, 5).with_thickness(0.001), 0).unwrap();
    let rest = cloth.positions();
    let params = ClothParameters::undamped();
    for _ in 0..100 {
        cloth
            .simulate(&StepConfig::default(), &params, &[], NO_COLLIDABLES)
            .unwrap();
    }
    assert_eq!(cloth.positions(), rest);
    assert!(cloth.max_strain().abs() < 1e-6);
}

#[test]
fn collidable_corrections_are_reported() {
    let mut cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 3, 3), 0).unwrap();
    let report = cloth
        .simulate(
            &StepConfig::default(),
            &ClothParameters::default(),
            &[GRAVITY],
            &[Floor(1.0)],
        )
        .unwrap();
    assert_eq!(report.collision_corrections, 9);
    assert!(cloth.positions().iter().all(|p| p.y == 1.0));
}

#[test]
fn later_collidable_overrides_earlier() {
    let mut cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 2, 2), 0).unwrap();
    let bodies: Vec<Box<dyn Collidable>> = vec![Box::new(Floor(1.5)), Box::new(Floor(2.0))];
    cloth
        .simulate(&StepConfig::default(), &ClothParameters::springless(), &[GRAVITY], &bodies)
        .unwrap();
    assert!(cloth.positions().iter().all(|p| p.y == 2.0));
}

#[test]
fn frame_runs_all_substeps() {
    let mut cloth = Cloth::with_seed(GridSpec::new(1.0, 1.0, 3, 3), 0).unwrap();
    let step = StepConfig::new(60.0, 8);
    let report = cloth
        .simulate_frame(&step, &ClothParameters::default(), &[GRAVITY], NO_COLLIDABLES)
        .unwrap();
    assert_eq!(report.substeps, 8);
    assert_eq!(cloth.steps_taken(), 8);
}

// ─── Self-Collision ───────────────────────────────────────────

#[test]
fn close_point_masses_are_pushed_apart() {
    // Two points 0.5 apart, thickness 0.26: they overlap by 0.02, which
    // keeps the push below the stretch cap of their structural spring.
    let spec = GridSpec::new(1.0, 1.0, 2, 1).with_thickness(0.26);
    let mut cloth = Cloth::with_seed(spec, 0).unwrap();
    let before = (cloth.positions()[1] - cloth.positions()[0]).length();

    let report = cloth
        .simulate(&StepConfig::new(90.0, 1), &ClothParameters::springless(), &[], NO_COLLIDABLES)
        .unwrap();

    // The first point takes the whole overlap, which leaves the second
    // exactly at 2·thickness.
    let after = (cloth.positions()[1] - cloth.positions()[0]).length();
    assert!(report.self_collision_contacts >= 1);
    assert!(after >= before);
    assert!((after - 0.52).abs() < 1e-5);
    assert!((cloth.positions()[0].x + 0.02).abs() < 1e-6);
}

#[test]
fn self_collision_is_scaled_by_substeps() {
    let spec = GridSpec::new(1.0, 1.0, 2, 1).with_thickness(0.26);
    let mut cloth = Cloth::with_seed(spec, 0).unwrap();
    let report = cloth
        .simulate(&StepConfig::new(90.0, 4), &ClothParameters::springless(), &[], NO_COLLIDABLES)
        .unwrap();
    // First point: 0.02 / 4. Second point: what is left of the overlap, / 4.
    let positions = cloth.positions();
    assert_eq!(report.self_collision_contacts, 2);
    assert!((positions[0].x + 0.005).abs() < 1e-6);
    assert!((positions[1].x - 0.50375).abs() < 1e-6);
}

#[test]
fn distant_point_masses_are_unaffected() {
    let spec = GridSpec::new(1.0, 1.0, 2, 1).with_thickness(0.2);
    let mut cloth = Cloth::with_seed(spec, 0).unwrap();
    let before = cloth.positions();
    let report = cloth
        .simulate(&StepConfig::new(90.0, 1), &ClothParameters::springless(), &[], NO_COLLIDABLES)
        .unwrap();
    assert_eq!(report.self_collision_contacts, 0);
    assert_eq!(cloth.positions(), before);
}

#[test]
fn spatial_hash_buckets_by_cell_polynomial() {
    let mut hash = SpatialHash::new(1.0, 1.0, 3, 3);
    assert_eq!(hash.cell_size(), Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(hash.hash_position(Vec3::new(0.5, 0.5, 0.5)), 0);
    assert_eq!(hash.hash_position(Vec3::new(1.5, 2.5, 3.5)), 961 + 62 + 3);
    // (0, 0, 31) and (0, 1, 0) alias on purpose.
    assert_eq!(
        hash.hash_position(Vec3::new(0.0, 0.0, 31.0)),
        hash.hash_position(Vec3::new(0.0, 1.0, 0.0))
    );

    let pms = vec![
        PointMass::new(Vec3::new(0.1, 0.1, 0.1), false),
        PointMass::new(Vec3::new(0.9, 0.2, 0.3), false),
        PointMass::new(Vec3::new(5.0, 0.0, 0.0), false),
    ];
    hash.rebuild(&pms);
    assert_eq!(hash.bucket(0), &[PointMassId(0), PointMassId(1)]);
    assert_eq!(hash.bucket_count(), 2);

    // Rebuilding drops stale entries.
    hash.rebuild(&pms[2..]);
    assert!(hash.bucket(0).is_empty());
}

// ─── Reset ────────────────────────────────────────────────────

#[test]
fn reset_restores_start_positions_exactly() {
    let spec = GridSpec::new(1.0, 1.0, 6, 6)
        .with_orientation(Orientation::Vertical)
        .with_pin(0, 5);
    let mut cloth = Cloth::with_seed(spec, 9).unwrap();
    let start = cloth.positions();
    for _ in 0..25 {
        cloth
            .simulate(&StepConfig::default(), &ClothParameters::default(), &[GRAVITY], &[Floor(0.2)])
            .unwrap();
    }
    assert_ne!(cloth.positions(), start);

    cloth.reset();
    assert_eq!(cloth.steps_taken(), 0);
    for (pm, &s) in cloth.point_masses().iter().zip(&start) {
        assert_eq!(pm.position(), s);
        assert_eq!(pm.last_position(), s);
        assert_eq!(pm.start_position(), s);
    }
}

// ─── Parameters ───────────────────────────────────────────────

#[test]
fn parameters_default() {
    let params = ClothParameters::default();
    assert_eq!(params.ks, 5000.0);
    assert_eq!(params.density, 15.0);
    assert!((params.damping - 0.2).abs() < 1e-6);
    assert!(SpringType::all().iter().all(|&t| params.is_enabled(t)));
    assert!(params.validate().is_ok());
}

#[test]
fn parameters_reject_out_of_range_damping() {
    let params = ClothParameters {
        damping: 150.0,
        ..Default::default()
    };
    assert!(params.validate().is_err());
}

#[test]
fn parameters_toml_round_trip() {
    let params = ClothParameters {
        ks: 1200.0,
        enable_bending: false,
        ..Default::default()
    };
    let text = toml::to_string(&params).unwrap();
    let recovered: ClothParameters = toml::from_str(&text).unwrap();
    assert_eq!(recovered, params);
}

#[test]
fn partial_toml_fills_defaults() {
    let params: ClothParameters = toml::from_str("ks = 100.0\nenable_shearing = false").unwrap();
    assert_eq!(params.ks, 100.0);
    assert!(!params.enable_shearing);
    assert_eq!(params.density, 15.0);
}

#[test]
fn grid_spec_json_round_trip() {
    let spec = GridSpec::new(1.0, 1.0, 8, 8)
        .with_orientation(Orientation::Vertical)
        .with_pins([[0, 7], [7, 7]]);
    let json = serde_json::to_string(&spec).unwrap();
    assert!(json.contains("\"vertical\""));
    let recovered: GridSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, spec);
}

#[test]
fn step_config_dt() {
    let step = StepConfig::new(90.0, 30);
    assert!((step.dt() - 1.0 / 2700.0).abs() < 1e-9);
}
