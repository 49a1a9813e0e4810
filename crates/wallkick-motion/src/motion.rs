//! The per-tick pipelines. The logic pass runs once per rendered frame with
//! that frame's elapsed time; the physics pass runs on the fixed timestep
//! and commits the velocity that the host applies to the body.
//!
//! Stage order is the data contract: timers → jump checks → land check →
//! wall-slide check → wall-jump check → dash check for the logic pass, and
//! probes → jump → fall → wall slide → wall jump → dash → movement → clamp
//! for the physics pass.

use crate::dash;
use crate::input::InputSnapshot;
use crate::jump;
use crate::math::{Vec2, lerp};
use crate::params::{MotionParameters, WORLD_GRAVITY_Y};
use crate::probe::ContactProbes;
use crate::state::{Mode, MotionState};
use crate::wall;

/// Hard ceiling on vertical speed (units/s).
const VERTICAL_SPEED_CAP: f32 = 50.0;
/// Fall clamp while dashing; wider than `max_fall_speed` so a steep dash is
/// not slowed artificially.
const DASH_FALL_CLAMP: f32 = 50.0;

/// Facts captured from the previous tick before any stage mutates the
/// state, handed to the stages as data.
#[derive(Debug, Clone, Copy)]
struct TickFacts {
    just_left_wall: bool,
}

impl TickFacts {
    fn capture(state: &mut MotionState) -> Self {
        let sliding_now = state.mode == Mode::WallSliding;
        let facts = TickFacts {
            just_left_wall: state.contacts.was_wall_sliding && !sliding_now,
        };
        state.contacts.was_wall_sliding = sliding_now;
        facts
    }
}

/// The input/logic pass: timers and mode-transition checks.
///
/// `dt` is the elapsed time since the previous logic pass (variable).
pub fn logic_tick(
    state: &mut MotionState,
    input: &InputSnapshot,
    params: &MotionParameters,
    dt: f32,
) {
    let facts = TickFacts::capture(state);
    count_timers(state, params, dt);
    jump::checks(state, input, params, facts.just_left_wall);
    land_check(state);
    wall::slide_check(state, params);
    wall::jump_check(state, input, params);
    dash::check(state, input, params);
}

/// The fixed-timestep physics pass: consume probes, integrate the active
/// mode, steer, clamp, and return the velocity to commit to the body.
pub fn physics_tick(
    state: &mut MotionState,
    probes: &ContactProbes,
    input: &InputSnapshot,
    params: &MotionParameters,
    dt: f32,
) -> Vec2 {
    state.contacts.absorb(probes);

    jump::integrate(state, params, dt);
    ambient_fall(state, params, dt);
    wall::slide_integrate(state, params, dt);
    wall::jump_integrate(state, params, dt);
    dash::integrate(state, params, dt);

    let (acceleration, deceleration) = if state.contacts.grounded {
        (params.ground_acceleration, params.ground_deceleration)
    } else if state.wall_jump.steering_override {
        (
            params.wall_jump_move_acceleration,
            params.wall_jump_move_deceleration,
        )
    } else {
        (params.air_acceleration, params.air_deceleration)
    };
    apply_movement(state, input, params, acceleration, deceleration, dt);

    state.vertical_velocity = if state.mode == Mode::Dashing {
        state
            .vertical_velocity
            .clamp(-DASH_FALL_CLAMP, VERTICAL_SPEED_CAP)
    } else {
        state
            .vertical_velocity
            .clamp(-params.max_fall_speed, VERTICAL_SPEED_CAP)
    };

    Vec2::new(state.horizontal_velocity, state.vertical_velocity)
}

fn count_timers(state: &mut MotionState, params: &MotionParameters, dt: f32) {
    state.jump.buffer_timer -= dt;

    if state.contacts.grounded {
        state.jump.coyote_timer = params.jump_coyote_time;
    } else {
        state.jump.coyote_timer -= dt;
    }

    // The post-buffer only runs down while clear of ground and wall.
    if !state.contacts.touching_wall && !state.contacts.grounded {
        state.wall_jump.post_buffer_timer -= dt;
    }

    if state.contacts.grounded {
        state.dash.ground_cooldown -= dt;
    }
}

/// Touchdown: atomically reset every airborne episode's transient state.
/// No-op on a settled grounded state.
pub(crate) fn land_check(state: &mut MotionState) {
    let airborne_episode = matches!(
        state.mode,
        Mode::Jumping
            | Mode::Falling
            | Mode::WallSliding
            | Mode::WallJumping
            | Mode::DashFastFalling
    ) || state.dash.carry.is_some()
        || state.jump.descending
        || state.wall_jump.descending
        || state.wall_slide.slide_falling;

    if !(airborne_episode && state.contacts.grounded && state.vertical_velocity <= 0.0) {
        return;
    }

    state.reset_jump_values();
    state.reset_wall_jump_values();
    state.reset_dash_values();
    state.dash.dashes_used = 0;
    state.jump.jumps_used = 0;
    state.episode.clear();

    // Rest at ambient gravity, not zero, so the ground probe stays pressed.
    state.vertical_velocity = WORLD_GRAVITY_Y;

    // A still-running ground dash keeps driving; everything else grounds.
    if state.mode != Mode::Dashing {
        state.mode = Mode::Grounded;
    }
}

/// Plain gravity for airborne ticks no sub-machine is driving.
fn ambient_fall(state: &mut MotionState, params: &MotionParameters, dt: f32) {
    if !state.contacts.grounded && state.mode == Mode::Grounded {
        state.mode = Mode::Falling;
    }
    if state.mode == Mode::Falling && !state.contacts.grounded {
        state.vertical_velocity += params.gravity() * dt;
    }
}

/// Steer horizontal velocity toward the input intent. The caller picks the
/// (acceleration, deceleration) pair for the current mode, giving grounded,
/// wall-jump and airborne steering different feels through one function.
pub(crate) fn apply_movement(
    state: &mut MotionState,
    input: &InputSnapshot,
    params: &MotionParameters,
    acceleration: f32,
    deceleration: f32,
    dt: f32,
) {
    if state.mode == Mode::Dashing {
        return;
    }

    let movement = input.movement.sanitized();
    if movement.x.abs() >= params.move_threshold {
        turn_check(state, movement.x);

        let max_speed = if input.run_held {
            params.max_run_speed
        } else {
            params.max_walk_speed
        };
        state.horizontal_velocity = lerp(
            state.horizontal_velocity,
            movement.x * max_speed,
            acceleration * dt,
        );
    } else {
        state.horizontal_velocity = lerp(state.horizontal_velocity, 0.0, deceleration * dt);
    }
}

fn turn_check(state: &mut MotionState, input_x: f32) {
    if state.facing_right && input_x < 0.0 {
        state.facing_right = false;
    } else if !state.facing_right && input_x > 0.0 {
        state.facing_right = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::params::DASH_DIRECTIONS;

    const DT: f32 = 1.0 / 60.0;

    fn params() -> MotionParameters {
        MotionParameters::default()
    }

    fn tick(
        state: &mut MotionState,
        input: &InputSnapshot,
        probes: &ContactProbes,
        params: &MotionParameters,
    ) {
        logic_tick(state, input, params, DT);
        physics_tick(state, probes, input, params, DT);
    }

    /// Run enough grounded ticks for the state to settle on the floor.
    fn settled_on_ground(params: &MotionParameters) -> MotionState {
        let mut state = MotionState::new();
        let idle = InputSnapshot::default();
        for _ in 0..5 {
            tick(&mut state, &idle, &ContactProbes::grounded(), params);
        }
        state
    }

    fn jump_press() -> InputSnapshot {
        InputSnapshot {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        }
    }

    fn wall_probes(wall_x: f32, body_x: f32) -> ContactProbes {
        ContactProbes {
            touching_wall: true,
            wall_contact: Some(Vec2::new(wall_x, 0.0)),
            body_center: Vec2::new(body_x, 0.0),
            ..Default::default()
        }
    }

    #[test]
    fn grounded_jump_press_launches_within_one_tick() {
        let params = params();
        let mut state = settled_on_ground(&params);

        logic_tick(&mut state, &jump_press(), &params, DT);
        assert_eq!(state.mode, Mode::Jumping);
        assert_eq!(state.vertical_velocity, params.initial_jump_velocity());
        assert_eq!(state.jump.jumps_used, 1);
    }

    #[test]
    fn second_jump_in_air_consumes_second_credit() {
        let params = params();
        let mut state = settled_on_ground(&params);
        tick(&mut state, &jump_press(), &ContactProbes::grounded(), &params);
        assert_eq!(state.jump.jumps_used, 1);

        // Let the arc play out a few airborne ticks, then press again.
        let idle = InputSnapshot::default();
        for _ in 0..10 {
            tick(&mut state, &idle, &ContactProbes::airborne(), &params);
        }
        tick(&mut state, &jump_press(), &ContactProbes::airborne(), &params);
        assert_eq!(state.jump.jumps_used, 2);
        assert_eq!(state.mode, Mode::Jumping);
    }

    #[test]
    fn full_jump_arc_lands_and_resets() {
        let params = params();
        let mut state = settled_on_ground(&params);
        tick(&mut state, &jump_press(), &ContactProbes::grounded(), &params);

        // Fly until the arc tips into descent.
        let idle = InputSnapshot::default();
        let mut ticks = 0;
        while state.vertical_velocity > -1.0 {
            tick(&mut state, &idle, &ContactProbes::airborne(), &params);
            ticks += 1;
            assert!(ticks < 600, "jump arc never descended");
        }

        // Touch down: the probe lands in the physics pass, the landing
        // itself resolves on the next logic pass.
        tick(&mut state, &idle, &ContactProbes::grounded(), &params);
        tick(&mut state, &idle, &ContactProbes::grounded(), &params);
        assert_eq!(state.mode, Mode::Grounded);
        assert_eq!(state.jump.jumps_used, 0);
        assert!(!state.episode.wall_jump_performed);
        assert_eq!(state.vertical_velocity, WORLD_GRAVITY_Y);
    }

    #[test]
    fn coyote_window_still_allows_ground_jump() {
        let params = params();
        let mut state = settled_on_ground(&params);

        // Walk off the ledge: a couple of airborne ticks, still inside the
        // coyote window.
        let idle = InputSnapshot::default();
        tick(&mut state, &idle, &ContactProbes::airborne(), &params);
        tick(&mut state, &idle, &ContactProbes::airborne(), &params);
        assert_eq!(state.mode, Mode::Falling);
        assert!(state.jump.coyote_timer > 0.0);

        logic_tick(&mut state, &jump_press(), &params, DT);
        assert_eq!(state.mode, Mode::Jumping);
        assert_eq!(state.jump.jumps_used, 1, "coyote jump is a ground jump");
    }

    #[test]
    fn buffered_press_fires_on_touchdown() {
        let params = params();
        let mut state = settled_on_ground(&params);

        // Fall past the coyote window with every credit spent, so a press
        // can only buffer.
        let idle = InputSnapshot::default();
        for _ in 0..10 {
            tick(&mut state, &idle, &ContactProbes::airborne(), &params);
        }
        assert_eq!(state.mode, Mode::Falling);
        assert!(state.jump.coyote_timer <= 0.0);
        state.jump.jumps_used = 2;

        tick(&mut state, &jump_press(), &ContactProbes::airborne(), &params);
        assert_eq!(state.mode, Mode::Falling, "press buffered, no credit left");
        assert!(state.jump.buffer_timer > 0.0);

        // Touch down inside the buffer window: the press is honored on the
        // logic pass after the grounded probe.
        tick(&mut state, &idle, &ContactProbes::grounded(), &params);
        tick(&mut state, &idle, &ContactProbes::grounded(), &params);
        assert_eq!(state.mode, Mode::Jumping);
    }

    #[test]
    fn landing_is_idempotent() {
        let params = params();
        let mut state = settled_on_ground(&params);
        // Land once for real.
        state.mode = Mode::Falling;
        state.vertical_velocity = -3.0;
        land_check(&mut state);
        assert_eq!(state.mode, Mode::Grounded);

        let settled = state.clone();
        land_check(&mut state);
        land_check(&mut state);
        assert_eq!(state, settled, "settled landing must not change fields");
    }

    #[test]
    fn wall_slide_and_wall_jump_away_from_wall() {
        let params = params();
        let mut state = MotionState::new();
        state.mode = Mode::Falling;
        state.vertical_velocity = -4.0;

        // A few ticks pressed against a wall on the right.
        let idle = InputSnapshot::default();
        let probes = wall_probes(5.5, 5.0);
        tick(&mut state, &idle, &probes, &params);
        tick(&mut state, &idle, &probes, &params);
        assert_eq!(state.mode, Mode::WallSliding);

        tick(&mut state, &jump_press(), &probes, &params);
        assert_eq!(state.mode, Mode::WallJumping);
        assert!(state.episode.wall_jump_performed);
        assert!(
            state.horizontal_velocity < 0.0,
            "wall on the right launches left, got {}",
            state.horizontal_velocity
        );
    }

    #[test]
    fn no_double_jump_right_after_wall_jump() {
        let params = params();
        let mut state = MotionState::new();
        state.mode = Mode::Falling;
        state.vertical_velocity = -4.0;

        let idle = InputSnapshot::default();
        let probes = wall_probes(5.5, 5.0);
        tick(&mut state, &idle, &probes, &params);
        tick(&mut state, &jump_press(), &probes, &params);
        assert_eq!(state.mode, Mode::WallJumping);
        let used_after_wall_jump = state.jump.jumps_used;

        // Clear of the wall, press jump again: blocked by the episode flag.
        tick(&mut state, &idle, &ContactProbes::airborne(), &params);
        tick(&mut state, &jump_press(), &ContactProbes::airborne(), &params);
        assert_eq!(state.mode, Mode::WallJumping);
        assert_eq!(state.jump.jumps_used, used_after_wall_jump);
    }

    #[test]
    fn landing_clears_wall_jump_episode() {
        let params = params();
        let mut state = MotionState::new();
        state.mode = Mode::WallJumping;
        state.episode.wall_jump_performed = true;
        state.vertical_velocity = -2.0;

        let idle = InputSnapshot::default();
        tick(&mut state, &idle, &ContactProbes::grounded(), &params);
        tick(&mut state, &idle, &ContactProbes::grounded(), &params);
        assert_eq!(state.mode, Mode::Grounded);
        assert!(!state.episode.wall_jump_performed);
        assert!(!state.episode.wall_jumped_recently);
    }

    #[test]
    fn ground_dash_recovers_after_cooldown() {
        let params = params();
        let mut state = settled_on_ground(&params);
        let dash_press = InputSnapshot {
            movement: Vec2::new(1.0, 0.0),
            dash_pressed: true,
            ..Default::default()
        };

        tick(&mut state, &dash_press, &ContactProbes::grounded(), &params);
        assert_eq!(state.mode, Mode::Dashing);

        // Keep pressing dash every tick; it must not re-trigger until the
        // ground cooldown has fully elapsed.
        let mut elapsed = 0.0;
        loop {
            let was_dashing = state.mode == Mode::Dashing;
            tick(&mut state, &dash_press, &ContactProbes::grounded(), &params);
            elapsed += DT;
            if state.mode == Mode::Dashing && !was_dashing {
                break;
            }
            assert!(elapsed < 1.0, "ground dash never recovered");
        }
        assert!(
            (elapsed - params.time_btw_dashes_on_ground).abs() <= 2.0 * DT,
            "recovered after {elapsed}s, expected ~{}",
            params.time_btw_dashes_on_ground
        );
    }

    #[test]
    fn dash_end_in_air_captures_release_speed() {
        let params = params();
        let mut state = MotionState::new();
        state.mode = Mode::Falling;

        let dash_press = InputSnapshot {
            movement: Vec2::new(1.0, 1.0),
            dash_pressed: true,
            ..Default::default()
        };
        let idle = InputSnapshot::default();
        tick(&mut state, &dash_press, &ContactProbes::airborne(), &params);
        assert_eq!(state.mode, Mode::Dashing);

        let mut ticks = 0;
        while state.mode == Mode::Dashing {
            tick(&mut state, &idle, &ContactProbes::airborne(), &params);
            ticks += 1;
            assert!(ticks < 60, "dash never expired");
        }
        assert_eq!(state.mode, Mode::DashFastFalling);
        assert_eq!(
            state.dash.fast_fall.release_speed,
            params.dash_speed * DASH_DIRECTIONS[2].y
        );
    }

    #[test]
    fn fall_speed_clamped_except_while_dashing() {
        let params = params();
        let mut state = MotionState::new();
        state.mode = Mode::Falling;

        // Free fall clamps at max_fall_speed.
        let idle = InputSnapshot::default();
        for _ in 0..200 {
            tick(&mut state, &idle, &ContactProbes::airborne(), &params);
        }
        assert_eq!(state.vertical_velocity, -params.max_fall_speed);

        // A straight-down dash is allowed to exceed it.
        let dash_press = InputSnapshot {
            movement: Vec2::new(0.0, -1.0),
            dash_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &dash_press, &ContactProbes::airborne(), &params);
        assert_eq!(state.mode, Mode::Dashing);
        tick(&mut state, &idle, &ContactProbes::airborne(), &params);
        assert_eq!(state.vertical_velocity, -params.dash_speed);
        assert!(state.vertical_velocity < -params.max_fall_speed);
    }

    #[test]
    fn movement_accelerates_toward_walk_then_run_speed() {
        let params = params();
        let mut state = settled_on_ground(&params);
        let walk = InputSnapshot {
            movement: Vec2::new(1.0, 0.0),
            ..Default::default()
        };

        for _ in 0..600 {
            tick(&mut state, &walk, &ContactProbes::grounded(), &params);
        }
        assert!(
            (state.horizontal_velocity - params.max_walk_speed).abs() < 0.5,
            "walk speed not reached: {}",
            state.horizontal_velocity
        );

        let run = InputSnapshot {
            movement: Vec2::new(1.0, 0.0),
            run_held: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &run, &ContactProbes::grounded(), &params);
        }
        assert!(
            (state.horizontal_velocity - params.max_run_speed).abs() < 0.5,
            "run speed not reached: {}",
            state.horizontal_velocity
        );
    }

    #[test]
    fn neutral_input_decays_and_facing_flips() {
        let params = params();
        let mut state = settled_on_ground(&params);
        assert!(state.facing_right);

        let left = InputSnapshot {
            movement: Vec2::new(-1.0, 0.0),
            ..Default::default()
        };
        tick(&mut state, &left, &ContactProbes::grounded(), &params);
        assert!(!state.facing_right);
        assert!(state.horizontal_velocity < 0.0);

        let idle = InputSnapshot::default();
        for _ in 0..600 {
            tick(&mut state, &idle, &ContactProbes::grounded(), &params);
        }
        assert!(state.horizontal_velocity.abs() < 0.01);
        assert!(!state.facing_right, "neutral input keeps facing");
    }

    #[test]
    fn below_threshold_input_counts_as_neutral() {
        let params = params();
        let mut state = settled_on_ground(&params);
        state.horizontal_velocity = 5.0;
        let nudge = InputSnapshot {
            movement: Vec2::new(params.move_threshold / 2.0, 0.0),
            ..Default::default()
        };

        tick(&mut state, &nudge, &ContactProbes::grounded(), &params);
        assert!(
            state.horizontal_velocity < 5.0,
            "sub-threshold input decays velocity"
        );
    }

    #[test]
    fn head_bump_cuts_the_jump() {
        let params = params();
        let mut state = settled_on_ground(&params);
        tick(&mut state, &jump_press(), &ContactProbes::grounded(), &params);

        let bump = ContactProbes {
            head_bumped: true,
            ..Default::default()
        };
        let idle = InputSnapshot::default();
        tick(&mut state, &idle, &bump, &params);
        assert!(state.jump.fast_fall.active);
        assert_eq!(state.vertical_velocity, 0.0);
    }

    #[test]
    fn dash_supersedes_jump_but_jump_rides_under_it() {
        let params = params();
        let mut state = settled_on_ground(&params);
        let dash_press = InputSnapshot {
            movement: Vec2::new(1.0, 0.0),
            dash_pressed: true,
            ..Default::default()
        };
        tick(&mut state, &dash_press, &ContactProbes::grounded(), &params);
        assert_eq!(state.mode, Mode::Dashing);

        // Jump pressed mid-dash: the dash keeps the mode, the jump rides.
        tick(&mut state, &jump_press(), &ContactProbes::grounded(), &params);
        assert_eq!(state.mode, Mode::Dashing);
        assert!(state.jump_active());
        assert_eq!(state.jump.jumps_used, 1);
        assert!(
            state.vertical_velocity > 0.0,
            "horizontal ground dash lets the jump drive vertical motion"
        );

        // When the dash expires the jump becomes the mode.
        let idle = InputSnapshot::default();
        let mut ticks = 0;
        while state.mode == Mode::Dashing {
            tick(&mut state, &idle, &ContactProbes::airborne(), &params);
            ticks += 1;
            assert!(ticks < 60, "dash never expired");
        }
        assert_eq!(state.mode, Mode::Jumping);
    }

    #[test]
    fn wall_slide_refreshes_credits_per_config() {
        let params = params();
        let mut state = MotionState::new();
        state.mode = Mode::Jumping;
        state.jump.jumps_used = 2;
        state.dash.dashes_used = 2;
        state.vertical_velocity = -1.0;

        let idle = InputSnapshot::default();
        tick(&mut state, &idle, &wall_probes(5.5, 5.0), &params);
        tick(&mut state, &idle, &wall_probes(5.5, 5.0), &params);
        assert_eq!(state.mode, Mode::WallSliding);
        assert_eq!(state.jump.jumps_used, 0);
        assert_eq!(state.dash.dashes_used, 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        struct ScriptStep {
            move_x: f32,
            jump_pressed: bool,
            jump_released: bool,
            dash_pressed: bool,
            grounded: bool,
            touching_wall: bool,
        }

        fn step_strategy() -> impl Strategy<Value = ScriptStep> {
            (
                -1.0f32..=1.0,
                proptest::bool::ANY,
                proptest::bool::ANY,
                proptest::bool::ANY,
                proptest::bool::weighted(0.6),
                proptest::bool::weighted(0.2),
            )
                .prop_map(
                    |(move_x, jump_pressed, jump_released, dash_pressed, grounded, touching_wall)| {
                        ScriptStep {
                            move_x,
                            jump_pressed,
                            jump_released,
                            dash_pressed,
                            grounded,
                            touching_wall,
                        }
                    },
                )
        }

        proptest! {
            // Core driver invariants over arbitrary input scripts: a single
            // mode at a time, carries only under a dash, velocities finite
            // and inside the clamps.
            #[test]
            fn driver_invariants_hold(script in proptest::collection::vec(step_strategy(), 1..200)) {
                let params = MotionParameters::default();
                let mut state = MotionState::new();

                for step in &script {
                    let input = InputSnapshot {
                        movement: Vec2::new(step.move_x, 0.0),
                        jump_pressed: step.jump_pressed,
                        jump_held: step.jump_pressed,
                        jump_released: step.jump_released,
                        run_held: false,
                        dash_pressed: step.dash_pressed,
                    };
                    let probes = ContactProbes {
                        grounded: step.grounded,
                        touching_wall: step.touching_wall,
                        wall_contact: step.touching_wall.then(|| Vec2::new(1.0, 0.0)),
                        body_center: Vec2::new(0.5, 0.0),
                        ..Default::default()
                    };
                    let velocity = {
                        logic_tick(&mut state, &input, &params, DT);
                        physics_tick(&mut state, &probes, &input, &params, DT)
                    };

                    prop_assert!(velocity.x.is_finite() && velocity.y.is_finite());
                    prop_assert!(velocity.y <= VERTICAL_SPEED_CAP);
                    prop_assert!(velocity.y >= -DASH_FALL_CLAMP.max(params.max_fall_speed));
                    if state.dash.carry.is_some() {
                        prop_assert_eq!(state.mode, Mode::Dashing, "carry outside a dash");
                    }
                }
            }

            // Landing from any airborne mode resets the episode counters.
            #[test]
            fn landing_always_resets_episode(script in proptest::collection::vec(step_strategy(), 1..100)) {
                let params = MotionParameters::default();
                let mut state = MotionState::new();
                let idle = InputSnapshot::default();

                for step in &script {
                    let input = InputSnapshot {
                        movement: Vec2::new(step.move_x, 0.0),
                        jump_pressed: step.jump_pressed,
                        jump_held: step.jump_pressed,
                        jump_released: step.jump_released,
                        run_held: false,
                        dash_pressed: step.dash_pressed,
                    };
                    let probes = ContactProbes {
                        grounded: step.grounded,
                        touching_wall: step.touching_wall,
                        wall_contact: step.touching_wall.then(|| Vec2::new(1.0, 0.0)),
                        body_center: Vec2::new(0.5, 0.0),
                        ..Default::default()
                    };
                    logic_tick(&mut state, &input, &params, DT);
                    physics_tick(&mut state, &probes, &input, &params, DT);
                }

                // Let any live arc play out in the air, then drive to a
                // clean grounded landing with no inputs.
                for _ in 0..40 {
                    logic_tick(&mut state, &idle, &params, DT);
                    physics_tick(&mut state, &ContactProbes::airborne(), &idle, &params, DT);
                }
                for _ in 0..40 {
                    logic_tick(&mut state, &idle, &params, DT);
                    physics_tick(&mut state, &ContactProbes::grounded(), &idle, &params, DT);
                }
                prop_assert_eq!(state.jump.jumps_used, 0);
                prop_assert!(!state.episode.wall_jump_performed);
                prop_assert_eq!(state.dash.dashes_used, 0);
            }
        }
    }
}
