//! Held-backspace timeline command.

use std::time::Duration;

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::input::{InputConnection, ScratchPad};
use crate::models::{ActionKind, TiltSignal};
use crate::surface::KeyboardSurface;
use clap::Args;
use serde::Serialize;

/// Longest hold the simulation runs for
pub const MAX_SIMULATED_MS: u64 = 100_000;

/// Simulate holding Backspace and print when each delete fires
#[derive(Debug, Clone, Args)]
pub struct RepeatArgs {
    /// Time at which the key is released, in milliseconds
    #[arg(long, value_name = "MS")]
    pub release_ms: u64,

    /// End of the simulation (defaults to 500 ms after release, at most 100000)
    #[arg(long, value_name = "MS")]
    pub until_ms: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One delete delivered to the text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fire {
    /// Milliseconds since the press
    pub at_ms: u64,
    /// `true` for the initial press, `false` for a repeat
    pub initial: bool,
}

/// Full simulated hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepeatTimeline {
    /// Configured delay before the first repeat
    pub delay_ms: u64,
    /// Configured gap between repeats
    pub interval_ms: u64,
    /// When the key came up
    pub release_ms: u64,
    /// When the simulation stopped
    pub until_ms: u64,
    /// Every delete, in order
    pub fires: Vec<Fire>,
}

impl RepeatArgs {
    /// Execute the repeat command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let until_ms = self
            .until_ms
            .unwrap_or_else(|| self.release_ms.saturating_add(500).min(MAX_SIMULATED_MS));
        if until_ms > MAX_SIMULATED_MS {
            return Err(CliError::validation(format!(
                "--until-ms ({until_ms}) must not exceed {MAX_SIMULATED_MS}"
            )));
        }
        if until_ms < self.release_ms {
            return Err(CliError::validation(format!(
                "--until-ms ({until_ms}) must not be before --release-ms ({})",
                self.release_ms
            )));
        }

        let timeline = simulate(config, self.release_ms, until_ms)?;

        if self.json {
            return print_json(&timeline);
        }

        println!(
            "Backspace held 0 → {} ms (delay {} ms, interval {} ms)",
            timeline.release_ms, timeline.delay_ms, timeline.interval_ms
        );
        for fire in &timeline.fires {
            let kind = if fire.initial { "press" } else { "repeat" };
            println!("  {:>6} ms  delete ({kind})", fire.at_ms);
        }
        println!(
            "{} deletes, none after release at {} ms",
            timeline.fires.len(),
            timeline.release_ms
        );
        Ok(())
    }
}

/// Runs a surface at 1 ms resolution with Backspace held from 0 to `release_ms`.
///
/// A release and a repeat due at the same millisecond resolve as release first.
/// `until_ms` is clamped to [`MAX_SIMULATED_MS`].
pub fn simulate(config: &Config, release_ms: u64, until_ms: u64) -> CliResult<RepeatTimeline> {
    let until_ms = until_ms.min(MAX_SIMULATED_MS);
    let settings = config.surface_settings();
    let mut surface = KeyboardSurface::new(TiltSignal::new(), config.theme.initial, settings);
    let backspace = surface
        .find_key(ActionKind::Backspace)
        .ok_or_else(|| CliError::validation("Layout has no Backspace key"))?;

    let mut pad = ScratchPad::new();
    // Enough text that every delete is observable
    pad.commit_text(&"x".repeat(usize::try_from(until_ms).unwrap_or(usize::MAX)));
    let mut fires = Vec::new();

    surface.tick(Duration::ZERO, Some(&mut pad));
    if surface.press(backspace, Duration::ZERO, Some(&mut pad)).is_some() {
        fires.push(Fire {
            at_ms: 0,
            initial: true,
        });
    }

    let release = |surface: &mut KeyboardSurface, pad: &mut ScratchPad, fires: &mut Vec<Fire>| {
        let late = surface.release(backspace, Duration::from_millis(release_ms), Some(pad));
        fires.extend((0..late).map(|_| Fire {
            at_ms: release_ms,
            initial: false,
        }));
    };

    if release_ms == 0 {
        release(&mut surface, &mut pad, &mut fires);
    }

    for t in 1..=until_ms {
        if t == release_ms {
            release(&mut surface, &mut pad, &mut fires);
        }
        let due = surface.tick(Duration::from_millis(t), Some(&mut pad));
        fires.extend((0..due).map(|_| Fire {
            at_ms: t,
            initial: false,
        }));
    }
    Ok(RepeatTimeline {
        delay_ms: u64::try_from(settings.repeat.delay.as_millis()).unwrap_or(u64::MAX),
        interval_ms: u64::try_from(settings.repeat.interval.as_millis()).unwrap_or(u64::MAX),
        release_ms,
        until_ms,
        fires,
    })
}
