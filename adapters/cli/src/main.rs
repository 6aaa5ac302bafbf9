#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that simulates a round of loot destruction until the
//! last stand triggers.

mod host;
mod level;

use std::{
    fs,
    num::NonZeroU32,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use glam::{Quat, Vec3};
use host::LoggingHost;
use last_stand_core::{Command, RoundSeed};
use last_stand_host::{HostBackend, HostDirective, PlayerPose};
use last_stand_round::{self as round, query, RewardConfig, RoundState};
use last_stand_system_haul_watch::{Config, HaulWatch, HostContext, NetworkAuthority};
use level::Level;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Command-line arguments controlling the simulated round.
#[derive(Debug, Parser)]
#[command(
    name = "last-stand",
    about = "Smashes collectibles in a simulated level until the last stand triggers"
)]
struct Args {
    /// Path to a TOML reward table overriding the built-in armory.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed shared by the round, the level generator, and reward selection.
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Total haul value the crew must extract to win the round.
    #[arg(long, default_value_t = 400)]
    haul_goal: u32,

    /// Number of extraction points the haul goal is split across.
    #[arg(long, default_value = "4")]
    extraction_points: NonZeroU32,

    /// Number of collectibles scattered through the level.
    #[arg(long, default_value_t = 12)]
    collectibles: usize,

    /// Extraction points the crew banks before the rampage starts.
    #[arg(long, default_value_t = 1)]
    banked_points: u32,

    /// Runs without spawn authority, as a connected spectator.
    #[arg(long)]
    spectator: bool,

    /// Marks the session as networked so grants replicate to peers.
    #[arg(long)]
    networked: bool,

    /// Prints the round report as JSON on stdout instead of a summary line.
    #[arg(long)]
    json: bool,

    /// Prints the built-in reward table as TOML and exits.
    #[arg(long)]
    print_default_rewards: bool,
}

/// Entry point for the last-stand command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.print_default_rewards {
        print!("{}", toml::to_string_pretty(&RewardConfig::default())?);
        return Ok(());
    }

    run(&args)
}

/// Simulates one round: bank a few extraction points, then smash collectibles
/// until the goal breaks or the level runs dry.
fn run(args: &Args) -> Result<()> {
    if args.banked_points >= args.extraction_points.get() {
        bail!("--banked-points must stay below --extraction-points");
    }

    let rewards = match &args.config {
        Some(path) => load_reward_config(path)?,
        None => RewardConfig::default(),
    };
    let mut state = RoundState::new(&rewards)?;
    let mut watch = HaulWatch::new(Config::new(args.seed));
    let mut level = Level::generate(
        args.haul_goal,
        args.extraction_points,
        args.collectibles,
        ChaCha8Rng::seed_from_u64(args.seed),
    );
    let context = HostContext::new(
        PlayerPose::new(Vec3::ZERO, Quat::IDENTITY),
        NetworkAuthority::new(!args.spectator, args.networked),
    );
    let mut backend = LoggingHost::default();

    pump(
        &mut state,
        &mut watch,
        &context,
        &mut backend,
        Command::BeginRound {
            seed: RoundSeed::new(args.seed),
        },
    )?;
    log::info!(
        "round {} started: goal ${}, {} extraction points, {} collectibles",
        args.seed,
        args.haul_goal,
        args.extraction_points,
        level.remaining()
    );

    let mut banked = 0_u32;
    for _ in 0..args.banked_points {
        if level.bank_point() {
            banked += 1;
            log::info!(
                "extraction point banked; ${} left in the level",
                level.in_level_value().get()
            );
        } else {
            log::warn!("not enough loot left to bank another extraction point");
            break;
        }
    }

    let mut smashed = 0_usize;
    while !query::last_stand_active(&state) {
        match level.smash_random() {
            Some((value, metrics)) => {
                smashed += 1;
                log::debug!(
                    "collectible worth ${} smashed; ${} left in the level",
                    value.get(),
                    (metrics.in_level_value() - value).get()
                );
                pump(
                    &mut state,
                    &mut watch,
                    &context,
                    &mut backend,
                    Command::DestroyCollectible { value, metrics },
                )?;
            }
            None => {
                log::info!("the level ran out of collectibles before the goal broke");
                break;
            }
        }
    }

    let report = RoundReport::compile(args, banked, smashed, &state, backend.executed());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
    }
    Ok(())
}

/// Applies a command and feeds the resulting events through the haul watch,
/// executing emitted directives until the round settles.
fn pump(
    state: &mut RoundState,
    watch: &mut HaulWatch,
    context: &HostContext,
    backend: &mut LoggingHost,
    command: Command,
) -> Result<()> {
    let mut events = Vec::new();
    round::apply(state, command, &mut events);

    loop {
        let mut commands = Vec::new();
        let mut directives = Vec::new();
        watch.handle(
            &events,
            query::reward_candidates(state),
            query::last_stand_active(state),
            context,
            &mut commands,
            &mut directives,
        );
        for directive in directives {
            backend.execute(directive)?;
        }

        if commands.is_empty() {
            break;
        }
        events.clear();
        for command in commands {
            round::apply(state, command, &mut events);
        }
    }
    Ok(())
}

/// Loads a reward table from a TOML file.
fn load_reward_config(path: &Path) -> Result<RewardConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read reward config {}", path.display()))?;
    toml::from_str(&contents).context("failed to parse reward config toml contents")
}

/// Machine-readable summary of a simulated round.
#[derive(Debug, Serialize)]
struct RoundReport {
    seed: u64,
    haul_goal: u32,
    extraction_points: u32,
    banked_points: u32,
    collectibles_smashed: usize,
    last_stand_active: bool,
    reward_spawned: Option<String>,
    grant_failure: Option<String>,
}

impl RoundReport {
    /// Builds the report from the round outcome and the executed directives.
    fn compile(
        args: &Args,
        banked_points: u32,
        collectibles_smashed: usize,
        state: &RoundState,
        executed: &[HostDirective],
    ) -> Self {
        let reward_spawned = executed.iter().find_map(|directive| match directive {
            HostDirective::SpawnReward(request) => Some(request.spawn_ref.as_str().to_owned()),
            _ => None,
        });
        let grant_failure = executed.iter().find_map(|directive| match directive {
            HostDirective::ReportFailure(failure) => Some(failure.to_string()),
            _ => None,
        });

        Self {
            seed: args.seed,
            haul_goal: args.haul_goal,
            extraction_points: args.extraction_points.get(),
            banked_points,
            collectibles_smashed,
            last_stand_active: query::last_stand_active(state),
            reward_spawned,
            grant_failure,
        }
    }

    /// One-line human-readable account of the round.
    fn summary(&self) -> String {
        if !self.last_stand_active {
            return format!(
                "round {}: goal stayed reachable through {} smashed collectibles",
                self.seed, self.collectibles_smashed
            );
        }
        let grant = match (&self.reward_spawned, &self.grant_failure) {
            (Some(reward), _) => format!("granted '{reward}'"),
            (None, Some(failure)) => format!("grant failed: {failure}"),
            (None, None) => "no grant attempted".to_owned(),
        };
        format!(
            "round {}: last stand declared after {} smashed collectibles; {}",
            self.seed, self.collectibles_smashed, grant
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(active: bool, reward: Option<&str>, failure: Option<&str>) -> RoundReport {
        RoundReport {
            seed: 7,
            haul_goal: 400,
            extraction_points: 4,
            banked_points: 1,
            collectibles_smashed: 5,
            last_stand_active: active,
            reward_spawned: reward.map(str::to_owned),
            grant_failure: failure.map(str::to_owned),
        }
    }

    #[test]
    fn summary_names_the_granted_reward() {
        let summary = report(true, Some("items/Item Gun Handgun"), None).summary();
        assert_eq!(
            summary,
            "round 7: last stand declared after 5 smashed collectibles; granted 'items/Item Gun Handgun'"
        );
    }

    #[test]
    fn summary_reports_the_grant_failure() {
        let summary = report(
            true,
            None,
            Some("no reward selectable: all candidate weights are non-positive"),
        )
        .summary();
        assert!(
            summary.contains("grant failed: no reward selectable"),
            "unexpected summary: {summary}"
        );
    }

    #[test]
    fn summary_reports_a_goal_that_held() {
        let summary = report(false, None, None).summary();
        assert_eq!(
            summary,
            "round 7: goal stayed reachable through 5 smashed collectibles"
        );
    }
}
