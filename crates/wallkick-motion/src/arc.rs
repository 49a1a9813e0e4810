//! Jump-arc sampling for debug overlays: the predicted trajectory of a full
//! jump at a given horizontal speed, using the same derived gravity the jump
//! machine flies with.

use crate::math::Vec2;
use crate::params::MotionParameters;

/// Sample the predicted jump arc as displacements relative to the launch
/// position.
///
/// Ascent integrates the derived jump gravity up to the apex time; descent
/// integrates the release-multiplied gravity back down to the launch height.
/// `resolution` is the number of segments (at least 2). Pass
/// `max_walk_speed` or `max_run_speed` to preview either arc.
pub fn jump_arc_points(
    params: &MotionParameters,
    horizontal_speed: f32,
    resolution: usize,
) -> Vec<Vec2> {
    let steps = resolution.max(2);
    let apex_time = params.time_till_jump_apex;
    let apex_height = params.adjusted_jump_height();
    let descent_gravity = params.gravity() * params.gravity_on_release_multiplier;
    let descent_time = (2.0 * apex_height / descent_gravity.abs()).sqrt();
    let total_time = apex_time + descent_time;

    (0..=steps)
        .map(|i| {
            let t = total_time * i as f32 / steps as f32;
            let y = if t <= apex_time {
                params.initial_jump_velocity() * t + 0.5 * params.gravity() * t * t
            } else {
                let td = t - apex_time;
                apex_height + 0.5 * descent_gravity * td * td
            };
            Vec2::new(horizontal_speed * t, y)
        })
        .collect()
}
