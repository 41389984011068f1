//! Theme listing command.

use crate::cli::common::{print_json, CliResult};
use crate::theme::{KeyboardTheme, ThemeId};
use clap::Args;
use serde::Serialize;

/// List the built-in themes in cycling order
#[derive(Debug, Clone, Args)]
pub struct ThemesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ThemeEntry {
    name: &'static str,
    next: &'static str,
    #[serde(flatten)]
    theme: &'static KeyboardTheme,
}

impl ThemesArgs {
    /// Execute the themes command
    pub fn execute(&self) -> CliResult<()> {
        let entries: Vec<ThemeEntry> = ThemeId::ALL
            .iter()
            .map(|id| ThemeEntry {
                name: id.name(),
                next: id.next().name(),
                theme: id.theme(),
            })
            .collect();

        if self.json {
            return print_json(&entries);
        }

        for entry in &entries {
            let colors = &entry.theme.colors;
            let anim = &entry.theme.animation;
            println!("{}  →  {}", entry.name, entry.next);
            println!("  key:       {}", colors.key_background);
            println!("  pressed:   {}", colors.key_background_pressed);
            println!("  text:      {}", colors.key_text);
            println!("  keyboard:  {}", colors.keyboard_background);
            println!(
                "  press scale {}×{}",
                anim.press_scale_x, anim.press_scale_y
            );
        }
        Ok(())
    }
}
