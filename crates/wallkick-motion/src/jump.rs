//! Normal-jump sub-machine: buffering, coyote time, multi-jump precedence,
//! apex hang and the jump cut.

use crate::input::InputSnapshot;
use crate::math::{inverse_lerp, lerp};
use crate::params::MotionParameters;
use crate::state::{DashCarry, Mode, MotionState};

/// Per-logic-tick jump checks: buffer arming, release handling and jump
/// initiation, in precedence order.
///
/// `just_left_wall` is the previous-tick fact captured at the pipeline head.
pub(crate) fn checks(
    state: &mut MotionState,
    input: &InputSnapshot,
    params: &MotionParameters,
    just_left_wall: bool,
) {
    if input.jump_pressed {
        // A press on a wall belongs to the wall-jump machine; no buffering
        // or initiation happens this tick.
        if state.mode == Mode::WallSliding
            || (state.contacts.touching_wall && !state.contacts.grounded)
        {
            return;
        }
        state.jump.buffer_timer = params.jump_buffer_time;
        state.jump.released_during_buffer = false;
    }

    if input.jump_released {
        if state.jump.buffer_timer > 0.0 {
            state.jump.released_during_buffer = true;
        }

        // Release while ascending cuts the jump.
        if state.jump_active() && state.vertical_velocity > 0.0 {
            if state.jump.apex.past_threshold {
                // Past the apex the cut skips the easing phase entirely.
                state.jump.apex.past_threshold = false;
                state.jump.descending = true;
                state
                    .jump
                    .fast_fall
                    .begin_expired(params.time_for_upwards_cancel);
                state.vertical_velocity = 0.0;
            } else {
                state.jump.fast_fall.begin(state.vertical_velocity);
            }
        }
    }

    let buffered = state.jump.buffer_timer > 0.0;

    // (a) ground / coyote jump
    if buffered
        && !state.jump_active()
        && (state.contacts.grounded || state.jump.coyote_timer > 0.0)
        && !state.wall_jump_active()
    {
        initiate(state, params, 1);
        if state.jump.released_during_buffer {
            // The press was already released: start the hop pre-cut.
            state.jump.fast_fall.begin(state.vertical_velocity);
        }
    }
    // (b) air jump out of a live arc, a wall-slide fall, or a dash
    else if buffered
        && (state.jump_active()
            || (state.wall_jump_active() && !just_left_wall)
            || state.wall_slide.slide_falling
            || (state.mode == Mode::Dashing && state.dash.air)
            || state.mode == Mode::DashFastFalling)
        && !state.contacts.touching_wall
        && state.jump.jumps_used < params.number_of_jumps_allowed
        && !state.episode.wall_jump_performed
    {
        state.jump.fast_fall.clear();
        state.jump.descending = false;
        state.jump.apex.clear();
        let leaving_dash_fast_fall = state.mode == Mode::DashFastFalling;
        initiate(state, params, 1);
        if leaving_dash_fast_fall {
            state.dash.fast_fall.clear();
        }
    }
    // (c) post-coyote air jump; reserves the final credit by charging two
    else if buffered
        && state.is_falling()
        && !state.wall_slide.slide_falling
        && state.jump.jumps_used + 1 < params.number_of_jumps_allowed
        && !state.episode.wall_jump_performed
    {
        initiate(state, params, 2);
        state.jump.fast_fall.clear();
    }
}

/// Launch a jump, consuming `credits` jump credits. A jump launched under an
/// active dash is carried: the dash keeps forcing velocity until it ends.
pub(crate) fn initiate(state: &mut MotionState, params: &MotionParameters, credits: u32) {
    if state.mode == Mode::Dashing {
        state.dash.carry = Some(DashCarry::Jump);
    } else {
        state.mode = Mode::Jumping;
    }
    if !state.wall_jump_active() {
        state.reset_wall_jump_values();
    }
    state.jump.buffer_timer = 0.0;
    state.jump.jumps_used += credits;
    state.jump.descending = false;
    state.jump.fast_fall.clear();
    state.jump.apex.clear();
    state.vertical_velocity = params.initial_jump_velocity();
    tracing::debug!(jumps_used = state.jump.jumps_used, "jump launched");
}

/// Per-physics-tick vertical integration for a live jump episode.
pub(crate) fn integrate(state: &mut MotionState, params: &MotionParameters, dt: f32) {
    if state.jump_active() {
        if state.contacts.head_bumped && !state.jump.fast_fall.active {
            // Instant cut: no captured speed to ease from.
            state.jump.fast_fall.begin(0.0);
        }

        if state.vertical_velocity >= 0.0 {
            let apex_fraction = inverse_lerp(
                params.initial_jump_velocity(),
                0.0,
                state.vertical_velocity,
            );
            if apex_fraction > params.apex_threshold && !state.jump.fast_fall.active {
                if !state.jump.apex.past_threshold {
                    state.jump.apex.past_threshold = true;
                    state.jump.apex.time_past = 0.0;
                }
                state.jump.apex.time_past += dt;
                if state.jump.apex.time_past < params.apex_hang_time {
                    state.vertical_velocity = 0.0;
                } else {
                    // Nudge below zero so descent integration takes over
                    // without a velocity discontinuity.
                    state.vertical_velocity = -0.01;
                }
            } else if !state.jump.fast_fall.active {
                state.vertical_velocity += params.gravity() * dt;
                if state.jump.apex.past_threshold {
                    state.jump.apex.past_threshold = false;
                }
            }
        } else if !state.jump.fast_fall.active {
            state.vertical_velocity +=
                params.gravity() * params.gravity_on_release_multiplier * dt;
        } else {
            state.jump.descending = true;
        }
    }

    // Jump cut: ease the captured speed to zero over the cancel window, then
    // let multiplied gravity take over.
    if state.jump.fast_fall.active {
        if state.jump.fast_fall.time >= params.time_for_upwards_cancel {
            state.vertical_velocity +=
                params.gravity() * params.gravity_on_release_multiplier * dt;
        } else {
            state.vertical_velocity = lerp(
                state.jump.fast_fall.release_speed,
                0.0,
                state.jump.fast_fall.time / params.time_for_upwards_cancel,
            );
        }
        state.jump.fast_fall.time += dt;
    }
}
