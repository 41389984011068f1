//! Layout table command.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::{ActionKind, KeyboardLayoutMode};
use crate::surface::{layout_rects, KeyId, KeyRect};
use clap::{Args, ValueEnum};
use serde::Serialize;

/// Layout mode selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Letters
    Alphabetic,
    /// Digits and punctuation
    Symbolic,
}

impl From<ModeArg> for KeyboardLayoutMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Alphabetic => Self::Alphabetic,
            ModeArg::Symbolic => Self::Symbolic,
        }
    }
}

/// Print a layout's key grid with proportional widths
#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    /// Layout mode to show
    #[arg(long, value_enum, default_value_t = ModeArg::Alphabetic)]
    pub mode: ModeArg,

    /// Row width in surface units
    #[arg(long, default_value_t = 100.0)]
    pub width: f32,

    /// Total height in surface units
    #[arg(long, default_value_t = 40.0)]
    pub height: f32,

    /// Show labels as they appear with shift active
    #[arg(long)]
    pub shifted: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct KeyEntry {
    id: KeyId,
    action: ActionKind,
    label: String,
    weight: f32,
    rect: KeyRect,
}

#[derive(Debug, Serialize)]
struct LayoutReport {
    mode: KeyboardLayoutMode,
    toggles_to: KeyboardLayoutMode,
    rows: Vec<Vec<KeyEntry>>,
}

impl LayoutArgs {
    /// Execute the layout command
    pub fn execute(&self) -> CliResult<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(CliError::validation("--width must be a positive number"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(CliError::validation("--height must be a positive number"));
        }

        let report = build_report(self.mode.into(), self.width, self.height, self.shifted);

        if self.json {
            return print_json(&report);
        }

        println!("Layout: {} (ModeChange → {})", report.mode, report.toggles_to);
        println!();
        for row in &report.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|key| format!("{}[{:.1}]", key.label, key.rect.width))
                .collect();
            println!("  {}", cells.join("  "));
        }
        Ok(())
    }
}

fn build_report(mode: KeyboardLayoutMode, width: f32, height: f32, shifted: bool) -> LayoutReport {
    let table = mode.rows();
    let mut rows: Vec<Vec<KeyEntry>> = table.iter().map(|_| Vec::new()).collect();
    for (id, rect) in layout_rects(&table, width, height) {
        let descriptor = &table[id.row][id.col];
        rows[id.row].push(KeyEntry {
            id,
            action: descriptor.action(),
            label: descriptor.label(shifted),
            weight: descriptor.weight(),
            rect,
        });
    }
    LayoutReport {
        mode,
        toggles_to: mode.toggled(),
        rows,
    }
}
