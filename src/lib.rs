pub mod config;
pub mod flow;
pub mod form;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod tui;

mod tui_shell;
