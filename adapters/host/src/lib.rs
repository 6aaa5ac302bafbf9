#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Host-facing contracts for the Last Stand engine.
//!
//! The engine never touches the host game directly. Systems emit
//! [`HostDirective`] values describing presentation, spawn, and feedback
//! effects, and the embedding host executes them through a [`HostBackend`]
//! implementation of its own.

use anyhow::Result as AnyResult;
use glam::{Quat, Vec3};
use last_stand_core::SpawnRef;
use std::{error::Error, fmt};

/// RGBA color used when presenting last-stand alerts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }
}

/// Pose of the player whose destruction event triggered an evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPose {
    /// World-space position of the player.
    pub position: Vec3,
    /// World-space orientation of the player.
    pub rotation: Quat,
}

impl PlayerPose {
    /// Creates a pose from explicit position and rotation.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Unit vector pointing up from the player.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Unit vector pointing ahead of the player.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

/// Big on-screen announcement shown when the stand is declared.
#[derive(Clone, Debug, PartialEq)]
pub struct Announcement {
    /// Headline text.
    pub title: String,
    /// Marker text shown beneath the headline.
    pub subtitle: String,
    /// Seconds the announcement stays on screen.
    pub seconds: f32,
    /// Color applied to the headline.
    pub title_color: Color,
    /// Color applied to the marker text.
    pub subtitle_color: Color,
}

/// Short notice pushed onto every player's HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct FocusNotice {
    /// Notice text.
    pub message: String,
    /// Seconds the notice stays focused.
    pub seconds: f32,
    /// Color applied to the notice text.
    pub text_color: Color,
    /// Color applied to the notice outline.
    pub outline_color: Color,
}

/// Replication route for spawned objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnRoute {
    /// Spawn replicated to every connected peer.
    Networked,
    /// Spawn visible only to the local process.
    Local,
}

/// Request to create the granted reward in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    /// Locator the host resolves to the spawnable object.
    pub spawn_ref: SpawnRef,
    /// World-space position where the object appears.
    pub position: Vec3,
    /// World-space orientation applied to the object.
    pub rotation: Quat,
    /// Replication route for the created object.
    pub route: SpawnRoute,
}

impl SpawnRequest {
    /// Builds a request that drops the reward one unit up and one unit ahead
    /// of the player, facing the player's current rotation.
    #[must_use]
    pub fn in_front_of(player: &PlayerPose, spawn_ref: SpawnRef, route: SpawnRoute) -> Self {
        Self {
            spawn_ref,
            position: player.position + player.up() + player.forward(),
            rotation: player.rotation,
            route,
        }
    }
}

/// Camera feedback fired at the spawn position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraShake {
    /// Strength of the impulse.
    pub intensity: f32,
    /// Range in world units within which players feel the shake.
    pub distance: f32,
    /// Seconds the shake persists.
    pub duration: f32,
    /// World-space origin of the shake.
    pub position: Vec3,
    /// Decay parameter applied across the range.
    pub falloff: f32,
}

/// Operator-visible failures of the pity grant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrantFailure {
    /// Every candidate weight was zero or negative, so nothing was selectable.
    NoSelectableReward,
    /// This process lacks spawn authority, so the selected reward stayed
    /// unspawned.
    NotAuthoritative {
        /// Name of the reward that was selected but not granted.
        reward: String,
    },
}

impl fmt::Display for GrantFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelectableReward => {
                write!(f, "no reward selectable: all candidate weights are non-positive")
            }
            Self::NotAuthoritative { reward } => {
                write!(f, "failed to spawn '{reward}': this process is not the session host")
            }
        }
    }
}

impl Error for GrantFailure {}

/// Typed host-effect requests emitted by the engine's systems.
#[derive(Clone, Debug, PartialEq)]
pub enum HostDirective {
    /// Show the big last-stand announcement.
    Announce(Announcement),
    /// Push the focus notice onto every player's HUD.
    Notify(FocusNotice),
    /// Create the granted reward in the world.
    SpawnReward(SpawnRequest),
    /// Fire camera feedback at the spawn position.
    ShakeCamera(CameraShake),
    /// Surface a non-fatal grant failure to the operator.
    ReportFailure(GrantFailure),
}

/// Host integration capable of executing engine directives.
///
/// Implementations are best-effort: by the time a directive reaches the host
/// the engine has already committed its state, so a failed directive must
/// degrade to a missing effect rather than poisoning the round.
pub trait HostBackend {
    /// Executes one directive against the host game.
    fn execute(&mut self, directive: HostDirective) -> AnyResult<()>;
}
