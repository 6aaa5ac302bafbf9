#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that watches haul feasibility as collectibles break.
//!
//! Every destruction event is checked against the round metrics: once the
//! value left in the level can no longer cover the haul goal, the watch
//! declares the last stand exactly once, emitting the activation command,
//! the alert presentation directives, and a best-effort pity reward spawn.

use last_stand_core::{Command, Currency, Event, RewardCandidate, RoundMetrics};
use last_stand_host::{
    Announcement, CameraShake, Color, FocusNotice, GrantFailure, HostDirective, PlayerPose,
    SpawnRequest, SpawnRoute,
};
use last_stand_selection::choose_weighted;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const ALERT_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const ANNOUNCEMENT_TITLE: &str = "LAST STAND ACTIVATED";
const ANNOUNCEMENT_SUBTITLE: &str = "{!}";
const ANNOUNCEMENT_SECONDS: f32 = 25.0;
const NOTICE_MESSAGE: &str = "Not enough loot to complete the level! Take your last stand!";
const NOTICE_SECONDS: f32 = 3.0;
const SHAKE_INTENSITY: f32 = 3.0;
const SHAKE_DISTANCE: f32 = 3.0;
const SHAKE_DURATION: f32 = 8.0;
const SHAKE_FALLOFF: f32 = 0.1;

/// Configuration parameters required to construct the haul watch.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided selection seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }
}

/// Network topology snapshot sampled by the host before each handle call.
///
/// Defaults describe single-player: authoritative and not networked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NetworkAuthority {
    /// Whether this process may create world objects.
    pub spawn_authority: bool,
    /// Whether spawned objects must replicate to connected peers.
    pub networked: bool,
}

impl NetworkAuthority {
    /// Creates a new authority snapshot with explicit field values.
    #[must_use]
    pub const fn new(spawn_authority: bool, networked: bool) -> Self {
        Self {
            spawn_authority,
            networked,
        }
    }
}

impl Default for NetworkAuthority {
    fn default() -> Self {
        Self {
            spawn_authority: true,
            networked: false,
        }
    }
}

/// Host-sampled inputs accompanying each batch of events.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostContext {
    /// Pose of the player held responsible for the latest destruction.
    pub player: PlayerPose,
    /// Network topology snapshot for authority and routing decisions.
    pub authority: NetworkAuthority,
}

impl HostContext {
    /// Creates a new context with explicit field values.
    #[must_use]
    pub const fn new(player: PlayerPose, authority: NetworkAuthority) -> Self {
        Self { player, authority }
    }
}

/// Pure system that declares the last stand when the goal becomes unreachable.
#[derive(Debug)]
pub struct HaulWatch {
    rng: ChaCha8Rng,
    engaged: bool,
}

impl HaulWatch {
    /// Creates a new haul watch using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            engaged: false,
        }
    }

    /// Consumes events and immutable views to emit activation commands and
    /// host directives.
    ///
    /// `stand_active` mirrors the round state's flag and `candidates` the
    /// armory view in configuration order. Callers apply the emitted
    /// commands before the next handle call.
    pub fn handle(
        &mut self,
        events: &[Event],
        candidates: &[RewardCandidate],
        stand_active: bool,
        context: &HostContext,
        out_commands: &mut Vec<Command>,
        out_directives: &mut Vec<HostDirective>,
    ) {
        for event in events {
            match event {
                Event::RoundStarted { .. } | Event::HaulCompleted => {
                    self.engaged = false;
                }
                Event::LastStandActivated => {
                    // Keeps the latch honest when activation originated
                    // outside this system.
                    self.engaged = true;
                }
                Event::CollectibleDestroyed { value, metrics } => {
                    // Guard before any arithmetic: one declaration per round.
                    if self.engaged || stand_active {
                        continue;
                    }
                    if goal_still_reachable(*value, metrics) {
                        continue;
                    }
                    self.declare_stand(candidates, context, out_commands, out_directives);
                }
            }
        }
    }

    /// Declares the stand: activation first, then the best-effort grant.
    fn declare_stand(
        &mut self,
        candidates: &[RewardCandidate],
        context: &HostContext,
        out_commands: &mut Vec<Command>,
        out_directives: &mut Vec<HostDirective>,
    ) {
        self.engaged = true;
        out_commands.push(Command::ActivateLastStand);
        out_directives.push(HostDirective::Announce(announcement()));
        out_directives.push(HostDirective::Notify(stand_notice()));

        let candidate = match choose_weighted(&mut self.rng, candidates, |candidate| {
            candidate.weight().get()
        }) {
            Some(candidate) => candidate,
            None => {
                out_directives
                    .push(HostDirective::ReportFailure(GrantFailure::NoSelectableReward));
                return;
            }
        };

        if !context.authority.spawn_authority {
            out_directives.push(HostDirective::ReportFailure(
                GrantFailure::NotAuthoritative {
                    reward: candidate.name().to_owned(),
                },
            ));
            return;
        }

        let route = if context.authority.networked {
            SpawnRoute::Networked
        } else {
            SpawnRoute::Local
        };
        let request =
            SpawnRequest::in_front_of(&context.player, candidate.spawn_ref().clone(), route);
        let shake = reward_impact(&request);
        out_directives.push(HostDirective::SpawnReward(request));
        out_directives.push(HostDirective::ShakeCamera(shake));
    }
}

/// Reports whether the haul goal remains reachable after a destruction.
///
/// The metrics snapshot still includes the destroyed value, so it is
/// subtracted explicitly before projecting the final haul.
fn goal_still_reachable(destroyed: Currency, metrics: &RoundMetrics) -> bool {
    let remaining_after_break = metrics.in_level_value() - destroyed;
    let projected_total = remaining_after_break + metrics.extracted_value();
    projected_total >= metrics.goal_value()
}

fn announcement() -> Announcement {
    Announcement {
        title: ANNOUNCEMENT_TITLE.to_owned(),
        subtitle: ANNOUNCEMENT_SUBTITLE.to_owned(),
        seconds: ANNOUNCEMENT_SECONDS,
        title_color: ALERT_COLOR,
        subtitle_color: ALERT_COLOR,
    }
}

fn stand_notice() -> FocusNotice {
    FocusNotice {
        message: NOTICE_MESSAGE.to_owned(),
        seconds: NOTICE_SECONDS,
        text_color: ALERT_COLOR,
        outline_color: ALERT_COLOR,
    }
}

fn reward_impact(request: &SpawnRequest) -> CameraShake {
    CameraShake {
        intensity: SHAKE_INTENSITY,
        distance: SHAKE_DISTANCE,
        duration: SHAKE_DURATION,
        position: request.position,
        falloff: SHAKE_FALLOFF,
    }
}
