use serde::{Deserialize, Serialize};

use crate::math::Vec2;
use crate::probe::ContactProbes;

/// The mutually-exclusive vertical-integration drivers. Exactly one mode is
/// active per tick; dash supersedes a jump or wall jump launched underneath
/// it (see [`DashCarry`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Grounded,
    /// A jump episode drives the arc, ascent through descent.
    Jumping,
    /// Airborne with no active driver (walked off a ledge, slid off a wall).
    Falling,
    WallSliding,
    WallJumping,
    Dashing,
    /// A dash expired mid-air without a carried jump; easing out of the dash
    /// speed with the dash-specific cut constants.
    DashFastFalling,
}

/// A jump or wall-jump episode initiated while a dash is active. The dash
/// forces velocity while it lasts; the carried machine keeps integrating
/// underneath and becomes the mode when the dash ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashCarry {
    Jump,
    WallJump,
}

/// An accelerated-descent modifier: easing the captured release speed to
/// zero over a cancel window, then letting multiplied gravity take over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FastFall {
    pub active: bool,
    /// Seconds since activation; past the cancel window the interpolation
    /// phase is over.
    pub time: f32,
    /// Vertical speed captured at activation, eased toward zero.
    pub release_speed: f32,
}

impl FastFall {
    /// Activate, easing from `release_speed` toward zero.
    pub fn begin(&mut self, release_speed: f32) {
        self.active = true;
        self.time = 0.0;
        self.release_speed = release_speed;
    }

    /// Activate with the interpolation phase already spent, so multiplied
    /// gravity applies from the next tick.
    pub fn begin_expired(&mut self, cancel_window: f32) {
        self.active = true;
        self.time = cancel_window;
        self.release_speed = 0.0;
    }

    pub fn clear(&mut self) {
        *self = FastFall::default();
    }
}

/// Progress tracking for the apex hang.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ApexTracker {
    pub past_threshold: bool,
    /// Seconds spent past the threshold; the hang holds velocity at zero
    /// until this exceeds the configured hang time.
    pub time_past: f32,
}

impl ApexTracker {
    pub fn clear(&mut self) {
        *self = ApexTracker::default();
    }
}

/// Latest collision probe results plus the sticky records derived from them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactState {
    pub grounded: bool,
    pub head_bumped: bool,
    pub touching_wall: bool,
    /// Last known wall contact point; persists after leaving the wall so a
    /// post-buffer wall jump can still launch away from it.
    pub last_wall_contact: Option<Vec2>,
    /// Body center x at the latest probe.
    pub body_x: f32,
    /// Whether the body was wall sliding at the start of the previous logic
    /// tick; feeds the just-left-wall and post-buffer rules.
    pub was_wall_sliding: bool,
}

impl ContactState {
    /// Absorb fresh probe results at the top of a physics tick.
    pub fn absorb(&mut self, probes: &ContactProbes) {
        self.grounded = probes.grounded;
        self.head_bumped = probes.head_bumped;
        self.touching_wall = probes.touching_wall;
        if probes.touching_wall
            && let Some(point) = probes.wall_contact
        {
            self.last_wall_contact = Some(point);
        }
        self.body_x = probes.body_center.x;
    }
}

/// Normal-jump sub-machine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JumpState {
    pub fast_fall: FastFall,
    pub apex: ApexTracker,
    /// The jump arc has tipped into descent (via fast-fall or apex release).
    pub descending: bool,
    pub jumps_used: u32,
    /// Countdown armed by a jump press; a touchdown inside the window still
    /// honors the press.
    pub buffer_timer: f32,
    pub released_during_buffer: bool,
    /// Countdown armed while grounded; a jump shortly after walking off a
    /// ledge still counts as a ground jump.
    pub coyote_timer: f32,
}

/// Wall-slide sub-machine state beyond the mode tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WallSlideState {
    /// Set when the slide ends without a wall jump; keeps the post-buffer
    /// armed while falling away from the wall.
    pub slide_falling: bool,
}

/// Wall-jump sub-machine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WallJumpState {
    pub fast_fall: FastFall,
    pub apex: ApexTracker,
    pub descending: bool,
    /// Seconds since launch; hands steering back to the normal air stats
    /// once the apex time elapses.
    pub elapsed: f32,
    /// While set, movement uses the wall-jump acceleration pair.
    pub steering_override: bool,
    /// Grace window after leaving a wall during which a wall jump is still
    /// permitted.
    pub post_buffer_timer: f32,
}

/// Dash sub-machine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashState {
    /// The current dash started airborne; it forces vertical velocity even
    /// for a purely horizontal direction.
    pub air: bool,
    pub elapsed: f32,
    /// Countdown between ground dashes; ticks down while grounded and is
    /// expired by the landing reset.
    pub ground_cooldown: f32,
    pub dashes_used: u32,
    /// Snapped canonical direction of the current dash.
    pub direction: Vec2,
    pub fast_fall: FastFall,
    /// Jump or wall-jump episode riding under the active dash.
    pub carry: Option<DashCarry>,
}

/// Flags scoped to one airborne episode, cleared exactly once at the landing
/// transition (plus the debounce's own early-clear rule).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeFlags {
    /// A wall jump happened this episode; blocks air jumps until landing.
    pub wall_jump_performed: bool,
    /// Input-edge debounce; clears once grounded or airborne off the wall.
    pub wall_jumped_recently: bool,
}

impl EpisodeFlags {
    pub fn clear(&mut self) {
        *self = EpisodeFlags::default();
    }
}

/// The full motion record for one character. Created at spawn, lives for the
/// character's lifetime, mutated once per logic tick and once per physics
/// tick; never replaced mid-episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub horizontal_velocity: f32,
    pub vertical_velocity: f32,
    pub facing_right: bool,
    pub mode: Mode,
    pub contacts: ContactState,
    pub jump: JumpState,
    pub wall_slide: WallSlideState,
    pub wall_jump: WallJumpState,
    pub dash: DashState,
    pub episode: EpisodeFlags,
}

impl MotionState {
    pub fn new() -> Self {
        Self {
            horizontal_velocity: 0.0,
            vertical_velocity: 0.0,
            facing_right: true,
            mode: Mode::Grounded,
            contacts: ContactState::default(),
            jump: JumpState::default(),
            wall_slide: WallSlideState::default(),
            wall_jump: WallJumpState::default(),
            dash: DashState::default(),
            episode: EpisodeFlags::default(),
        }
    }

    /// A normal-jump episode is live, either as the mode or carried under a
    /// dash.
    pub fn jump_active(&self) -> bool {
        self.mode == Mode::Jumping || self.dash.carry == Some(DashCarry::Jump)
    }

    /// A wall-jump episode is live, either as the mode or carried under a
    /// dash.
    pub fn wall_jump_active(&self) -> bool {
        self.mode == Mode::WallJumping || self.dash.carry == Some(DashCarry::WallJump)
    }

    /// Falling in the jump-initiation sense: ambient falling, or a jump arc
    /// that has tipped into descent.
    pub fn is_falling(&self) -> bool {
        self.mode == Mode::Falling || self.jump.descending
    }

    /// Kill the normal-jump episode's transient state. Jump credits, buffer
    /// and coyote timers are deliberately untouched.
    pub fn reset_jump_values(&mut self) {
        self.jump.fast_fall.clear();
        self.jump.apex.clear();
        self.jump.descending = false;
        if self.dash.carry == Some(DashCarry::Jump) {
            self.dash.carry = None;
        }
    }

    /// Kill the wall-jump episode's transient state, including the
    /// slide-falling gate. The post-buffer timer and the episode flags have
    /// their own lifecycles and are deliberately untouched.
    pub fn reset_wall_jump_values(&mut self) {
        self.wall_slide.slide_falling = false;
        self.wall_jump.steering_override = false;
        self.wall_jump.fast_fall.clear();
        self.wall_jump.apex.clear();
        self.wall_jump.descending = false;
        self.wall_jump.elapsed = 0.0;
        if self.dash.carry == Some(DashCarry::WallJump) {
            self.dash.carry = None;
        }
    }

    /// Clear the dash's transient fast-fall and expire the ground cooldown.
    /// Dash credits are reset separately (`dash.dashes_used`).
    pub fn reset_dash_values(&mut self) {
        self.dash.fast_fall.clear();
        self.dash.ground_cooldown = 0.0;
    }
}

impl Default for MotionState {
    fn default() -> Self {
        Self::new()
    }
}
