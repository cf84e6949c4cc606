use anyhow::Result;

use crate::config::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    crate::tui_shell::run(config)
}
