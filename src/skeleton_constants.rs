//! Reference segment lengths and style scale factors for the skeleton model.
//!
//! Units are body-space metres. The default figure stands about 1.7 units
//! tall with its ankles on y = 0.

/// Pelvis to base of neck
pub const DEFAULT_SPINE: f32 = 0.50;
/// Base of neck to head marker
pub const DEFAULT_HEAD: f32 = 0.20;
/// Neck to each shoulder (half shoulder width)
pub const DEFAULT_CLAVICLE: f32 = 0.18;
pub const DEFAULT_UPPER_ARM: f32 = 0.30;
pub const DEFAULT_FOREARM: f32 = 0.27;
/// Pelvis centre to each hip joint (half hip width)
pub const DEFAULT_PELVIS: f32 = 0.10;
pub const DEFAULT_THIGH: f32 = 0.45;
pub const DEFAULT_SHIN: f32 = 0.45;

// Gender-coded width factors: (clavicle, pelvis, overall scale)
pub const MALE_SCALE: (f32, f32, f32) = (1.10, 0.90, 1.0);
pub const FEMALE_SCALE: (f32, f32, f32) = (0.88, 1.20, 0.93);

// Heavy builds widen the trunk
pub const HEAVY_CLAVICLE_SCALE: f32 = 1.20;
pub const HEAVY_PELVIS_SCALE: f32 = 1.25;
