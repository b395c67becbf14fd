//! Press/release animation policy for the keycap.
//!
//! The policy is expressed as pure per-tick step functions over plain pose
//! values so it can be unit tested without a renderer. `KeycapSim` is a thin
//! stateful wrapper the frame loop drives.

use glam::Vec3;

// Press-phase fixed steps and limits (per tick, relative to the rest pose).
// The press phase is deterministic and reaches its limits in a bounded
// number of ticks; the release phase is an exponential ease that converges
// within visual tolerance.
pub const PRESS_SCALE_STEP: f32 = 0.04;
pub const PRESS_SCALE_FLOOR: f32 = 0.65; // fraction of rest scale on the press axis
pub const PRESS_DROP_STEP: f32 = 0.02;
pub const PRESS_DROP_LIMIT: f32 = 0.15; // world units below rest
pub const PRESS_TILT_STEP: f32 = 0.005;
pub const PRESS_TILT_LIMIT: f32 = 0.03; // radians past rest

// Release-phase ease rates (fraction of remaining distance per tick)
pub const RELEASE_POS_RATE: f32 = 0.12;
pub const RELEASE_TILT_RATE: f32 = 0.15;
pub const RELEASE_SCALE_RATE: f32 = 0.10;

// Contact-shadow response. Pressed values snap, release eases.
pub const SHADOW_PRESSED_SCALE: f32 = 0.9; // fraction of rest scale
pub const SHADOW_PRESSED_OPACITY: f32 = 0.6;
pub const SHADOW_PRESSED_OFFSET: Vec3 = Vec3::new(0.02, 0.0, 0.035);
pub const SHADOW_RELEASE_RATE: f32 = 0.10;

/// Wall-clock delay before an accepted press auto-releases.
pub const RELEASE_DELAY_MS: i32 = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressState {
    Idle,
    Pressed,
}

/// Transform of the keycap node, mutated once per frame tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Vec3, // Euler radians; x is the press tilt axis
    pub scale: Vec3,
}

impl Pose {
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Ground contact-shadow approximation, driven in lockstep with `Pose`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowPose {
    pub position: Vec3,
    pub scale: Vec3,
    pub opacity: f32,
}

impl ShadowPose {
    pub const fn rest(position: Vec3, scale: Vec3, opacity: f32) -> Self {
        Self {
            position,
            scale,
            opacity,
        }
    }
}

#[inline]
fn ease(value: f32, target: f32, rate: f32) -> f32 {
    value + (target - value) * rate
}

#[inline]
fn ease_vec(value: Vec3, target: Vec3, rate: f32) -> Vec3 {
    Vec3::new(
        ease(value.x, target.x, rate),
        ease(value.y, target.y, rate),
        ease(value.z, target.z, rate),
    )
}

/// Advance the keycap pose one tick toward the state's target.
pub fn next_pose(pose: Pose, rest: &Pose, state: PressState) -> Pose {
    let mut p = pose;
    match state {
        PressState::Pressed => {
            p.scale.y = (p.scale.y - PRESS_SCALE_STEP).max(rest.scale.y * PRESS_SCALE_FLOOR);
            p.position.y = (p.position.y - PRESS_DROP_STEP).max(rest.position.y - PRESS_DROP_LIMIT);
            p.rotation.x = (p.rotation.x + PRESS_TILT_STEP).min(rest.rotation.x + PRESS_TILT_LIMIT);
        }
        PressState::Idle => {
            p.position = ease_vec(p.position, rest.position, RELEASE_POS_RATE);
            p.rotation = ease_vec(p.rotation, rest.rotation, RELEASE_TILT_RATE);
            p.scale = ease_vec(p.scale, rest.scale, RELEASE_SCALE_RATE);
        }
    }
    p
}

/// Advance the contact shadow one tick. Pressed values snap, idle eases.
pub fn next_shadow(shadow: ShadowPose, rest: &ShadowPose, state: PressState) -> ShadowPose {
    match state {
        PressState::Pressed => ShadowPose {
            position: rest.position + SHADOW_PRESSED_OFFSET,
            scale: rest.scale * SHADOW_PRESSED_SCALE,
            opacity: SHADOW_PRESSED_OPACITY,
        },
        PressState::Idle => ShadowPose {
            position: ease_vec(shadow.position, rest.position, SHADOW_RELEASE_RATE),
            scale: ease_vec(shadow.scale, rest.scale, SHADOW_RELEASE_RATE),
            opacity: ease(shadow.opacity, rest.opacity, SHADOW_RELEASE_RATE),
        },
    }
}

/// Press/release state machine plus the animated poses it owns.
pub struct KeycapSim {
    state: PressState,
    pose: Pose,
    shadow: ShadowPose,
    rest_pose: Pose,
    rest_shadow: ShadowPose,
}

impl KeycapSim {
    pub fn new(rest_pose: Pose, rest_shadow: ShadowPose) -> Self {
        Self {
            state: PressState::Idle,
            pose: rest_pose,
            shadow: rest_shadow,
            rest_pose,
            rest_shadow,
        }
    }

    pub fn state(&self) -> PressState {
        self.state
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn shadow(&self) -> ShadowPose {
        self.shadow
    }

    /// The single externally triggerable transition. Returns `false` (and
    /// does nothing) while a press is already in flight, so completion
    /// callbacks, sound and the release timer fire at most once per press.
    pub fn press(&mut self) -> bool {
        if self.state == PressState::Pressed {
            return false;
        }
        self.state = PressState::Pressed;
        true
    }

    /// Unconditional transition back to Idle. Idempotent, so a stray timer
    /// firing against an already-idle key is a no-op.
    pub fn release(&mut self) {
        self.state = PressState::Idle;
    }

    /// Advance pose and shadow one frame tick.
    pub fn step(&mut self) {
        self.pose = next_pose(self.pose, &self.rest_pose, self.state);
        self.shadow = next_shadow(self.shadow, &self.rest_shadow, self.state);
    }
}
