// Command-line configuration

use crate::gui::{TOOL_FILE_NAME, Theme};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "disk_info_viewer", about = "Show the disks reported by ntfstool", version)]
pub struct Args {
    /// Path to the disk inventory tool (default: ntfstool in the working directory)
    #[arg(long)]
    pub tool: Option<PathBuf>,

    /// Theme to start with
    #[arg(long, value_enum, default_value_t = Theme::Dark)]
    pub theme: Theme,

    /// Do not request administrator privileges
    #[arg(long)]
    pub no_elevate: bool,

    /// Set on the elevated copy started by this program
    #[arg(long, hide = true)]
    pub relaunched: bool,
}

impl Args {
    /// Resolves the tool path against the current working directory.
    pub fn tool_path(&self) -> Result<PathBuf> {
        let cwd = std::env::current_dir().context("failed to read working directory")?;
        Ok(resolve_tool(&cwd, self.tool.as_deref()))
    }
}

fn resolve_tool(cwd: &Path, tool: Option<&Path>) -> PathBuf {
    match tool {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd.join(TOOL_FILE_NAME),
    }
}
