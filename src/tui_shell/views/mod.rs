pub(super) mod connections;
pub(super) mod form;
pub(super) mod session;

pub(in crate::tui_shell) use connections::ConnectionsView;
pub(in crate::tui_shell) use form::FormView;
pub(in crate::tui_shell) use session::SessionView;
