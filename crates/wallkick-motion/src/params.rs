use std::f32::consts::FRAC_1_SQRT_2;

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Ambient world gravity (units/s^2, downward). Landing parks the vertical
/// velocity here instead of at zero so the ground probe stays pressed on the
/// following tick.
pub const WORLD_GRAVITY_Y: f32 = -9.81;

/// The canonical dash directions in snapping order: none, then the eight
/// compass directions with normalized diagonals.
pub const DASH_DIRECTIONS: [Vec2; 9] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(0.0, 1.0),
    Vec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(-1.0, 0.0),
    Vec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    Vec2::new(0.0, -1.0),
    Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

/// Tunable motion parameters, loadable from TOML.
///
/// The flat fields are the authoring surface; gravity and launch speeds are
/// derived from the jump-profile fields by [`recalculate`](Self::recalculate)
/// and read through accessors, never recomputed by consumers. Out-of-range
/// values are clamped to the authoring ranges when loading or recalculating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParameters {
    /// Input magnitude below which horizontal input counts as neutral.
    pub move_threshold: f32,
    pub max_walk_speed: f32,
    pub max_run_speed: f32,
    pub ground_acceleration: f32,
    pub ground_deceleration: f32,
    pub air_acceleration: f32,
    pub air_deceleration: f32,
    /// Steering response while wall-jump movement stats are in effect.
    pub wall_jump_move_acceleration: f32,
    pub wall_jump_move_deceleration: f32,

    // Probe geometry, read by the external collision caster.
    pub ground_detection_ray_length: f32,
    pub head_detection_ray_length: f32,
    /// Head probe width as a fraction of the body width.
    pub head_width: f32,
    pub wall_detection_ray_length: f32,
    pub wall_detection_ray_height_multiplier: f32,

    /// Desired jump apex height in world units.
    pub jump_height: f32,
    /// Scales the requested height to cancel integration undershoot.
    pub jump_height_compensation_factor: f32,
    /// Seconds from launch to apex; drives the gravity derivation.
    pub time_till_jump_apex: f32,
    pub gravity_on_release_multiplier: f32,
    pub max_fall_speed: f32,
    pub number_of_jumps_allowed: u32,
    pub reset_jumps_on_wall_slide: bool,
    /// Window over which a jump cut eases the release speed to zero.
    pub time_for_upwards_cancel: f32,
    /// Apex-progress fraction beyond which the hang kicks in.
    pub apex_threshold: f32,
    pub apex_hang_time: f32,
    pub jump_buffer_time: f32,
    pub jump_coyote_time: f32,

    pub wall_slide_speed: f32,
    pub wall_slide_deceleration_speed: f32,

    /// Wall-jump launch vector: |x| is the horizontal launch speed, y is the
    /// apex height fed into the wall-jump gravity derivation.
    pub wall_jump_direction: Vec2,
    pub wall_jump_post_buffer_time: f32,
    pub wall_jump_gravity_on_release_multiplier: f32,

    pub dash_time: f32,
    pub dash_speed: f32,
    pub time_btw_dashes_on_ground: f32,
    pub reset_dash_on_wall_slide: bool,
    pub number_of_dashes: u32,
    /// Subtracted from diagonal candidates' distances while snapping, so
    /// near-cardinal input still favors cardinals.
    pub dash_diagonally_bias: f32,
    pub dash_gravity_on_release_multiplier: f32,
    pub dash_time_for_upwards_cancel: f32,

    #[serde(skip)]
    derived: DerivedValues,
}

/// Cache of the physics values derived from the jump profile.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct DerivedValues {
    adjusted_jump_height: f32,
    gravity: f32,
    initial_jump_velocity: f32,
    adjusted_wall_jump_height: f32,
    wall_jump_gravity: f32,
    initial_wall_jump_velocity: f32,
}

impl Default for MotionParameters {
    fn default() -> Self {
        let mut params = Self {
            move_threshold: 0.25,
            max_walk_speed: 12.5,
            max_run_speed: 20.0,
            ground_acceleration: 5.0,
            ground_deceleration: 20.0,
            air_acceleration: 5.0,
            air_deceleration: 5.0,
            wall_jump_move_acceleration: 5.0,
            wall_jump_move_deceleration: 5.0,
            ground_detection_ray_length: 0.02,
            head_detection_ray_length: 0.02,
            head_width: 0.75,
            wall_detection_ray_length: 0.125,
            wall_detection_ray_height_multiplier: 0.9,
            jump_height: 6.5,
            jump_height_compensation_factor: 1.054,
            time_till_jump_apex: 0.35,
            gravity_on_release_multiplier: 2.0,
            max_fall_speed: 26.0,
            number_of_jumps_allowed: 2,
            reset_jumps_on_wall_slide: true,
            time_for_upwards_cancel: 0.027,
            apex_threshold: 0.97,
            apex_hang_time: 0.075,
            jump_buffer_time: 0.125,
            jump_coyote_time: 0.1,
            wall_slide_speed: 5.0,
            wall_slide_deceleration_speed: 50.0,
            wall_jump_direction: Vec2::new(-20.0, 6.5),
            wall_jump_post_buffer_time: 0.125,
            wall_jump_gravity_on_release_multiplier: 1.0,
            dash_time: 0.11,
            dash_speed: 40.0,
            time_btw_dashes_on_ground: 0.225,
            reset_dash_on_wall_slide: true,
            number_of_dashes: 2,
            dash_diagonally_bias: 0.4,
            dash_gravity_on_release_multiplier: 1.0,
            dash_time_for_upwards_cancel: 0.027,
            derived: DerivedValues::default(),
        };
        params.recalculate();
        params
    }
}

impl MotionParameters {
    /// Load parameters from a TOML file. Falls back to defaults if the file
    /// is missing or unparseable. Derived values are always recomputed.
    pub fn load() -> Self {
        let path = std::env::var("WALLKICK_MOTION_CONFIG")
            .unwrap_or_else(|_| "config/motion.toml".to_string());
        let mut params = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<MotionParameters>(&content) {
                Ok(params) => params,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    MotionParameters::default()
                },
            },
            Err(_) => MotionParameters::default(),
        };
        params.recalculate();
        params
    }

    /// Clamp fields to their authoring ranges and recompute the derived
    /// gravity/launch values. Must be called after mutating any field that
    /// feeds the derivation (`jump_height`, `jump_height_compensation_factor`,
    /// `time_till_jump_apex`, `wall_jump_direction`).
    pub fn recalculate(&mut self) {
        self.clamp_ranges();

        let d = &mut self.derived;
        d.adjusted_jump_height = self.jump_height * self.jump_height_compensation_factor;
        d.gravity = -(2.0 * d.adjusted_jump_height) / self.time_till_jump_apex.powi(2);
        d.initial_jump_velocity = d.gravity.abs() * self.time_till_jump_apex;

        d.adjusted_wall_jump_height =
            self.wall_jump_direction.y * self.jump_height_compensation_factor;
        d.wall_jump_gravity = -(2.0 * d.adjusted_wall_jump_height) / self.time_till_jump_apex.powi(2);
        d.initial_wall_jump_velocity = d.wall_jump_gravity.abs() * self.time_till_jump_apex;
    }

    fn clamp_ranges(&mut self) {
        self.move_threshold = self.move_threshold.clamp(0.0, 1.0);
        self.max_walk_speed = self.max_walk_speed.clamp(1.0, 100.0);
        self.max_run_speed = self.max_run_speed.clamp(1.0, 100.0);
        self.ground_acceleration = self.ground_acceleration.clamp(0.25, 50.0);
        self.ground_deceleration = self.ground_deceleration.clamp(0.25, 50.0);
        self.air_acceleration = self.air_acceleration.clamp(0.25, 50.0);
        self.air_deceleration = self.air_deceleration.clamp(0.25, 50.0);
        self.wall_jump_move_acceleration = self.wall_jump_move_acceleration.clamp(0.25, 50.0);
        self.wall_jump_move_deceleration = self.wall_jump_move_deceleration.clamp(0.25, 50.0);
        self.head_width = self.head_width.clamp(0.0, 1.0);
        self.wall_detection_ray_height_multiplier =
            self.wall_detection_ray_height_multiplier.clamp(0.01, 2.0);
        self.jump_height_compensation_factor =
            self.jump_height_compensation_factor.clamp(1.0, 1.1);
        // Floor keeps the gravity derivation away from a zero divisor.
        self.time_till_jump_apex = self.time_till_jump_apex.max(0.01);
        self.gravity_on_release_multiplier = self.gravity_on_release_multiplier.clamp(0.01, 5.0);
        self.number_of_jumps_allowed = self.number_of_jumps_allowed.clamp(1, 5);
        self.time_for_upwards_cancel = self.time_for_upwards_cancel.clamp(0.02, 0.3);
        self.apex_threshold = self.apex_threshold.clamp(0.5, 1.0);
        self.apex_hang_time = self.apex_hang_time.clamp(0.01, 1.0);
        self.jump_buffer_time = self.jump_buffer_time.clamp(0.0, 1.0);
        self.jump_coyote_time = self.jump_coyote_time.clamp(0.0, 1.0);
        self.wall_slide_speed = self.wall_slide_speed.max(0.01);
        self.wall_slide_deceleration_speed = self.wall_slide_deceleration_speed.clamp(0.25, 50.0);
        self.wall_jump_post_buffer_time = self.wall_jump_post_buffer_time.clamp(0.0, 1.0);
        self.wall_jump_gravity_on_release_multiplier =
            self.wall_jump_gravity_on_release_multiplier.clamp(0.01, 5.0);
        self.dash_time = self.dash_time.clamp(0.0, 1.0);
        self.dash_speed = self.dash_speed.clamp(1.0, 200.0);
        self.time_btw_dashes_on_ground = self.time_btw_dashes_on_ground.clamp(0.0, 1.0);
        self.number_of_dashes = self.number_of_dashes.min(5);
        self.dash_diagonally_bias = self.dash_diagonally_bias.clamp(0.0, 0.5);
        self.dash_gravity_on_release_multiplier =
            self.dash_gravity_on_release_multiplier.clamp(0.01, 5.0);
        self.dash_time_for_upwards_cancel = self.dash_time_for_upwards_cancel.clamp(0.02, 0.3);
    }

    /// Jump gravity (units/s^2, negative).
    pub fn gravity(&self) -> f32 {
        self.derived.gravity
    }

    /// Launch speed that reaches the adjusted jump height at the apex time.
    pub fn initial_jump_velocity(&self) -> f32 {
        self.derived.initial_jump_velocity
    }

    pub fn adjusted_jump_height(&self) -> f32 {
        self.derived.adjusted_jump_height
    }

    /// Wall-jump gravity (units/s^2, negative).
    pub fn wall_jump_gravity(&self) -> f32 {
        self.derived.wall_jump_gravity
    }

    pub fn initial_wall_jump_velocity(&self) -> f32 {
        self.derived.initial_wall_jump_velocity
    }

    pub fn adjusted_wall_jump_height(&self) -> f32 {
        self.derived.adjusted_wall_jump_height
    }
}
