//! # Interactive Shell Module
//!
//! Welcome banner and interactive prompts (`dialoguer`) for runs started
//! without `--input`. Thin presentation only: every decision ends up in the
//! same batch pipeline as the non-interactive flow.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::path::PathBuf;

/// Top-level menu choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Optimize,
    Exit,
}

/// Print the welcome banner
pub fn display_welcome() {
    println!();
    println!("  ╭──────────────────────────────────────────────╮");
    println!("  │     High-Performance Asset Compressor        │");
    println!("  │  Optimizing Images and Videos for Production │");
    println!("  ╰──────────────────────────────────────────────╯");
    println!();
}

/// Ask what to do next
pub fn prompt_action() -> Result<MenuAction> {
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Action")
        .items(&["Optimize Assets", "Exit"])
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => MenuAction::Optimize,
        _ => MenuAction::Exit,
    })
}

/// Ask for the file or directory to optimize
pub fn prompt_path() -> Result<PathBuf> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Target folder/file")
        .interact_text()?;

    Ok(PathBuf::from(input.trim()))
}
