//! Wall-slide and wall-jump sub-machines, including the post-wall-jump
//! buffer and its debounce.

use crate::input::InputSnapshot;
use crate::math::{inverse_lerp, lerp};
use crate::params::MotionParameters;
use crate::state::{DashCarry, Mode, MotionState};

/// Per-logic-tick wall-slide entry/exit.
pub(crate) fn slide_check(state: &mut MotionState, params: &MotionParameters) {
    if state.contacts.touching_wall && !state.contacts.grounded && state.mode != Mode::Dashing {
        if state.vertical_velocity < 0.0 && state.mode != Mode::WallSliding {
            // Entering the slide cancels whatever arc was in flight.
            state.reset_jump_values();
            state.reset_wall_jump_values();
            state.reset_dash_values();
            if params.reset_dash_on_wall_slide {
                state.dash.dashes_used = 0;
            }
            if params.reset_jumps_on_wall_slide {
                state.jump.jumps_used = 0;
            }
            state.wall_slide.slide_falling = false;
            state.mode = Mode::WallSliding;
        }
    } else if state.mode == Mode::WallSliding
        && (!state.contacts.touching_wall || state.contacts.grounded)
        && !state.wall_slide.slide_falling
    {
        // Left the wall: the slide-falling gate keeps the post-buffer armed
        // while the body falls away.
        state.wall_slide.slide_falling = true;
        state.mode = Mode::Falling;
    }
}

/// Per-physics-tick slide easing: not an instant clamp, so momentum carries
/// into the slide.
pub(crate) fn slide_integrate(state: &mut MotionState, params: &MotionParameters, dt: f32) {
    if state.mode == Mode::WallSliding {
        state.vertical_velocity = lerp(
            state.vertical_velocity,
            -params.wall_slide_speed,
            params.wall_slide_deceleration_speed * dt,
        );
    }
}

fn should_apply_post_buffer(state: &MotionState) -> bool {
    !state.contacts.grounded
        && !state.contacts.touching_wall
        && (state.contacts.was_wall_sliding || state.wall_slide.slide_falling)
}

/// Per-logic-tick wall-jump checks: post-buffer upkeep, release cut, trigger
/// and debounce.
pub(crate) fn jump_check(
    state: &mut MotionState,
    input: &InputSnapshot,
    params: &MotionParameters,
) {
    // (Re)arm the post-buffer while falling away from a wall; zero it once
    // grounded or back on a wall.
    if should_apply_post_buffer(state) {
        if state.wall_jump.post_buffer_timer <= 0.0 {
            state.wall_jump.post_buffer_timer = params.wall_jump_post_buffer_time;
        }
    } else if state.contacts.grounded || state.contacts.touching_wall {
        state.wall_jump.post_buffer_timer = 0.0;
    }

    // Release while ascending cuts the wall jump.
    if input.jump_released
        && state.mode != Mode::WallSliding
        && !state.contacts.touching_wall
        && state.wall_jump_active()
        && state.vertical_velocity > 0.0
    {
        if state.wall_jump.apex.past_threshold {
            state.wall_jump.apex.past_threshold = false;
            state
                .wall_jump
                .fast_fall
                .begin_expired(params.time_for_upwards_cancel);
            state.vertical_velocity = 0.0;
        } else {
            state.wall_jump.fast_fall.begin(state.vertical_velocity);
        }
    }

    if input.jump_pressed {
        let can_wall_jump = state.mode == Mode::WallSliding
            || (state.contacts.touching_wall && !state.contacts.grounded)
            || (state.wall_jump.post_buffer_timer > 0.0
                && !state.contacts.grounded
                && !state.contacts.touching_wall);
        if can_wall_jump && !state.wall_jump_active() && !state.episode.wall_jumped_recently {
            initiate(state, params);
            state.episode.wall_jumped_recently = true;
        }
    }

    // Debounce lifts once grounded, or once airborne clear of the wall.
    if state.contacts.grounded
        || (!state.contacts.touching_wall && state.episode.wall_jumped_recently)
    {
        state.episode.wall_jumped_recently = false;
    }
}

/// Launch a wall jump away from the recorded wall contact. A wall jump
/// triggered under an active dash is carried until the dash ends.
pub(crate) fn initiate(state: &mut MotionState, params: &MotionParameters) {
    state.reset_jump_values();
    if state.mode == Mode::Dashing {
        state.dash.carry = Some(DashCarry::WallJump);
    } else {
        state.mode = Mode::WallJumping;
    }
    state.wall_jump.steering_override = true;
    state.episode.wall_jump_performed = true;
    state.wall_jump.elapsed = 0.0;
    state.wall_jump.post_buffer_timer = 0.0;
    state.wall_jump.fast_fall.clear();
    state.wall_jump.apex.clear();
    state.wall_jump.descending = false;
    state.vertical_velocity = params.initial_wall_jump_velocity();

    let direction = match state.contacts.last_wall_contact {
        Some(contact) => {
            if contact.x > state.contacts.body_x {
                -1.0
            } else {
                1.0
            }
        },
        None => {
            tracing::warn!("no wall contact recorded for wall jump, launching against facing");
            if state.facing_right { -1.0 } else { 1.0 }
        },
    };
    state.horizontal_velocity = params.wall_jump_direction.x.abs() * direction;
}

/// Per-physics-tick vertical integration for a live wall-jump episode.
pub(crate) fn jump_integrate(state: &mut MotionState, params: &MotionParameters, dt: f32) {
    if state.wall_jump_active() {
        // Steering hands back to the normal air stats at the apex time.
        state.wall_jump.elapsed += dt;
        if state.wall_jump.elapsed >= params.time_till_jump_apex {
            state.wall_jump.steering_override = false;
        }

        if state.contacts.head_bumped {
            if !state.wall_jump.fast_fall.active {
                state.wall_jump.fast_fall.begin(0.0);
            }
            state.wall_jump.steering_override = false;
        }

        if state.vertical_velocity >= 0.0 {
            let apex_fraction = inverse_lerp(
                params.initial_wall_jump_velocity(),
                0.0,
                state.vertical_velocity,
            );
            if apex_fraction > params.apex_threshold && !state.wall_jump.fast_fall.active {
                if !state.wall_jump.apex.past_threshold {
                    state.wall_jump.apex.past_threshold = true;
                    state.wall_jump.apex.time_past = 0.0;
                }
                state.wall_jump.apex.time_past += dt;
                if state.wall_jump.apex.time_past < params.apex_hang_time {
                    state.vertical_velocity = 0.0;
                } else {
                    state.vertical_velocity = -0.01;
                }
            } else if !state.wall_jump.fast_fall.active {
                state.vertical_velocity += params.wall_jump_gravity() * dt;
                if state.wall_jump.apex.past_threshold {
                    state.wall_jump.apex.past_threshold = false;
                }
            }
        } else if !state.wall_jump.fast_fall.active {
            state.vertical_velocity += params.wall_jump_gravity()
                * params.wall_jump_gravity_on_release_multiplier
                * dt;
        } else {
            state.wall_jump.descending = true;
        }
    }

    // Wall-jump cut, same shape as the jump cut with wall-jump constants.
    if state.wall_jump.fast_fall.active {
        if state.wall_jump.fast_fall.time >= params.time_for_upwards_cancel {
            state.vertical_velocity += params.wall_jump_gravity()
                * params.wall_jump_gravity_on_release_multiplier
                * dt;
        } else {
            state.vertical_velocity = lerp(
                state.wall_jump.fast_fall.release_speed,
                0.0,
                state.wall_jump.fast_fall.time / params.time_for_upwards_cancel,
            );
        }
        state.wall_jump.fast_fall.time += dt;
    }
}
