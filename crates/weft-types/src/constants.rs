//! Physical constants and simulation defaults.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f32 = 9.8;

/// Default frames per second of the outer render loop.
pub const DEFAULT_FRAMES_PER_SECOND: f32 = 90.0;

/// Default number of simulation sub-steps per frame.
pub const DEFAULT_SUBSTEPS_PER_FRAME: u32 = 30;

/// Default spring stiffness (N/m).
pub const DEFAULT_KS: f32 = 5000.0;

/// Default fabric density (per unit area).
pub const DEFAULT_DENSITY: f32 = 15.0;

/// Default damping, as a percentage of the Verlet velocity removed per step.
pub const DEFAULT_DAMPING_PERCENT: f32 = 0.2;

/// Default cloth thickness used by self-collision.
pub const DEFAULT_THICKNESS: f32 = 0.01;

/// Half-width of the out-of-plane jitter applied to vertical grids.
pub const VERTICAL_JITTER: f32 = 0.001;

/// Maximum fractional elongation a spring keeps after stretch limiting.
pub const MAX_STRAIN: f32 = 0.1;

/// Stiffness multiplier for bending springs.
pub const BENDING_KS_SCALE: f32 = 0.2;

/// Contact slack: plane corrections land this far on the side the point
/// came from, and points this close inside a sphere count as on its surface.
pub const SURFACE_OFFSET: f32 = 1.0e-4;

/// Epsilon below which a vector is treated as zero-length.
pub const EPSILON: f32 = 1.0e-12;
