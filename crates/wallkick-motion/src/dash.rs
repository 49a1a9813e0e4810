//! Dash sub-machine: 8-directional snapping, ground cooldown, air-dash
//! credits and the dash fast-fall.

use crate::input::InputSnapshot;
use crate::math::{Vec2, lerp};
use crate::params::{DASH_DIRECTIONS, MotionParameters};
use crate::state::{DashCarry, Mode, MotionState};

/// Per-logic-tick dash trigger.
pub(crate) fn check(state: &mut MotionState, input: &InputSnapshot, params: &MotionParameters) {
    if !input.dash_pressed {
        return;
    }

    if state.contacts.grounded && state.dash.ground_cooldown <= 0.0 && state.mode != Mode::Dashing
    {
        initiate(state, input, params, false);
    } else if !state.contacts.grounded
        && state.mode != Mode::Dashing
        && state.dash.dashes_used < params.number_of_dashes
    {
        initiate(state, input, params, true);

        // A dash taken inside the post-wall-jump window must not cost the
        // jump that was still available there.
        if state.wall_jump.post_buffer_timer > 0.0 {
            state.jump.jumps_used = state.jump.jumps_used.saturating_sub(1);
        }
    }
}

/// Snap raw input to the nearest canonical direction by Euclidean distance.
/// Exact equality short-circuits; diagonal candidates get the configured
/// bias subtracted from their distance before comparison. Total: every
/// input, including zero, maps to exactly one entry of [`DASH_DIRECTIONS`].
pub fn snap_direction(raw: Vec2, params: &MotionParameters) -> Vec2 {
    let mut closest = Vec2::ZERO;
    let mut min_distance = raw.distance(DASH_DIRECTIONS[0]);

    for candidate in DASH_DIRECTIONS {
        if raw == candidate {
            return candidate;
        }

        let mut distance = raw.distance(candidate);
        if candidate.x != 0.0 && candidate.y != 0.0 {
            distance -= params.dash_diagonally_bias;
        }
        if distance < min_distance {
            min_distance = distance;
            closest = candidate;
        }
    }

    closest
}

/// Start a dash. Supersedes whatever arc was in flight; a zero snap resolves
/// to the current facing.
pub(crate) fn initiate(
    state: &mut MotionState,
    input: &InputSnapshot,
    params: &MotionParameters,
    air: bool,
) {
    let mut direction = snap_direction(input.movement.sanitized(), params);
    if direction == Vec2::ZERO {
        direction = if state.facing_right {
            Vec2::RIGHT
        } else {
            Vec2::LEFT
        };
    }

    state.dash.direction = direction;
    state.dash.dashes_used += 1;
    state.dash.air = air;
    state.dash.elapsed = 0.0;
    state.dash.ground_cooldown = params.time_btw_dashes_on_ground;

    state.reset_jump_values();
    state.reset_wall_jump_values();
    state.mode = Mode::Dashing;
}

/// Per-physics-tick dash forcing and the dash fast-fall cut.
pub(crate) fn integrate(state: &mut MotionState, params: &MotionParameters, dt: f32) {
    if state.mode == Mode::Dashing {
        state.dash.elapsed += dt;
        if state.dash.elapsed >= params.dash_time {
            finish(state);
            return;
        }

        state.horizontal_velocity = params.dash_speed * state.dash.direction.x;
        // A purely horizontal ground dash leaves vertical motion alone.
        if state.dash.direction.y != 0.0 || state.dash.air {
            state.vertical_velocity = params.dash_speed * state.dash.direction.y;
        }
    } else if state.mode == Mode::DashFastFalling {
        if state.vertical_velocity > 0.0 {
            if state.dash.fast_fall.time < params.dash_time_for_upwards_cancel {
                state.vertical_velocity = lerp(
                    state.dash.fast_fall.release_speed,
                    0.0,
                    state.dash.fast_fall.time / params.dash_time_for_upwards_cancel,
                );
            } else {
                state.vertical_velocity +=
                    params.gravity() * params.dash_gravity_on_release_multiplier * dt;
            }
            state.dash.fast_fall.time += dt;
        } else {
            state.vertical_velocity +=
                params.gravity() * params.dash_gravity_on_release_multiplier * dt;
        }
    }
}

/// The dash timer expired: hand control to the carried episode, the ground,
/// or the dash fast-fall.
fn finish(state: &mut MotionState) {
    if state.contacts.grounded {
        state.dash.dashes_used = 0;
    }
    state.dash.air = false;

    match state.dash.carry.take() {
        Some(DashCarry::Jump) => state.mode = Mode::Jumping,
        Some(DashCarry::WallJump) => state.mode = Mode::WallJumping,
        None => {
            state.dash.fast_fall.time = 0.0;
            state.dash.fast_fall.release_speed = state.vertical_velocity;
            if state.contacts.grounded {
                state.dash.fast_fall.active = false;
                state.mode = Mode::Grounded;
            } else {
                state.dash.fast_fall.active = true;
                state.mode = Mode::DashFastFalling;
            }
        },
    }
}
