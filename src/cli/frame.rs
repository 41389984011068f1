//! Single-frame layer transform command.

use crate::animation::{backdrop_transforms, compose_frame, AnimationFrame, BackdropTransforms};
use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::{Tilt, Vec2};
use crate::theme::ThemeId;
use clap::Args;
use serde::Serialize;

/// Compute the layer transforms of one key for a given tilt and press progress
#[derive(Debug, Clone, Args)]
pub struct FrameArgs {
    /// Roll in radians
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub tilt_x: f32,

    /// Pitch in radians
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub tilt_y: f32,

    /// Press progress (0 = idle, 1 = fully sunk)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub progress: f32,

    /// Theme whose press scale is used (defaults to the configured theme)
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct FrameReport {
    theme: ThemeId,
    tilt: Tilt,
    key: AnimationFrame,
    backdrop: BackdropTransforms,
}

impl FrameArgs {
    /// Execute the frame command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        for (name, value) in [
            ("--tilt-x", self.tilt_x),
            ("--tilt-y", self.tilt_y),
            ("--progress", self.progress),
        ] {
            if !value.is_finite() {
                return Err(CliError::validation(format!("{name} must be a finite number")));
            }
        }

        let theme = match &self.theme {
            Some(name) => name
                .parse::<ThemeId>()
                .map_err(|e| CliError::validation(e.to_string()))?,
            None => config.theme.initial,
        };

        let report = build_report(config, theme, Tilt::new(self.tilt_x, self.tilt_y), self.progress);

        if self.json {
            return print_json(&report);
        }

        let key = &report.key;
        println!("Theme:     {}", report.theme);
        println!("Tilt:      {}", fmt_vec(report.tilt));
        println!("Progress:  {}", key.press_progress);
        println!("Base:      {}", fmt_vec(key.base_offset));
        println!("Body:      {}", fmt_vec(key.body_offset));
        println!("Surface:   {}", fmt_vec(key.surface_offset));
        println!("Scale:     {}", fmt_vec(key.scale));
        println!("Elevation: {:.3}", key.elevation);
        println!("Background:{}", fmt_vec(report.backdrop.background));
        println!("Overlay:   {}", fmt_vec(report.backdrop.overlay));
        Ok(())
    }
}

/// The frame a key would show once its animations have reached `progress`.
///
/// Scale and elevation are interpolated along the same progress so the
/// report is a single consistent snapshot.
fn build_report(config: &Config, theme: ThemeId, tilt: Tilt, progress: f32) -> FrameReport {
    let settings = config.surface_settings();
    let animation = theme.theme().animation;
    let scale = Vec2::ONE.lerp(
        Vec2::new(animation.press_scale_x, animation.press_scale_y),
        progress,
    );
    let elevation = settings.idle_elevation * (1.0 - progress);

    FrameReport {
        theme,
        tilt,
        key: compose_frame(tilt, progress, scale, elevation, &settings.layers),
        backdrop: backdrop_transforms(tilt, &settings.backdrop),
    }
}

fn fmt_vec(v: Vec2) -> String {
    format!(" ({:.3}, {:.3})", v.x, v.y)
}
