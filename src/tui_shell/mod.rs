use anyhow::Result;

use crate::config::AppConfig;

mod app;

mod view;
mod views;

use app::fmt_ts_since;
use view::{RenderCtx, View, render_view_chrome};

pub fn run(config: &AppConfig) -> Result<()> {
    app::run(config)
}
