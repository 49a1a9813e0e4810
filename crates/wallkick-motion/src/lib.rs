//! Deterministic 2D platformer character-motion core.
//!
//! Given a per-frame [`InputSnapshot`] and per-physics-tick [`ContactProbes`],
//! the core produces the velocity to commit to a capsule-like rigid body,
//! implementing run/walk movement, multi-jump with buffering and coyote
//! time, wall-slide/wall-jump, and an air dash. Input polling, collision
//! casting and rendering are the host's job; the core is pure with respect
//! to its inputs and replays identically on a fixed timestep.
//!
//! Two passes per simulation tick, in dependency order:
//!
//! 1. [`motion::logic_tick`] — once per rendered frame: timers, jump/land/
//!    wall-slide/wall-jump/dash eligibility checks.
//! 2. [`motion::physics_tick`] — on the fixed timestep: probe consumption,
//!    mode-specific gravity and velocity integration, the committed
//!    velocity as the return value.
//!
//! ```
//! use wallkick_motion::{ContactProbes, InputSnapshot, MotionParameters, MotionState};
//!
//! let params = MotionParameters::default();
//! let mut state = MotionState::new();
//!
//! // Settle on the ground so the probes are absorbed, then press jump.
//! let idle = InputSnapshot::default();
//! wallkick_motion::logic_tick(&mut state, &idle, &params, 1.0 / 60.0);
//! wallkick_motion::physics_tick(&mut state, &ContactProbes::grounded(), &idle, &params, 1.0 / 50.0);
//!
//! let input = InputSnapshot {
//!     jump_pressed: true,
//!     jump_held: true,
//!     ..Default::default()
//! };
//! wallkick_motion::logic_tick(&mut state, &input, &params, 1.0 / 60.0);
//! let velocity =
//!     wallkick_motion::physics_tick(&mut state, &ContactProbes::grounded(), &input, &params, 1.0 / 50.0);
//! assert!(velocity.y > 0.0);
//! ```

pub mod arc;
pub mod dash;
pub mod input;
pub mod jump;
pub mod math;
pub mod motion;
pub mod params;
pub mod probe;
pub mod state;
pub mod wall;

pub use input::InputSnapshot;
pub use math::Vec2;
pub use motion::{logic_tick, physics_tick};
pub use params::{DASH_DIRECTIONS, MotionParameters, WORLD_GRAVITY_Y};
pub use probe::ContactProbes;
pub use state::{Mode, MotionState};
