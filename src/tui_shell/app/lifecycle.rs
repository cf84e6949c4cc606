use super::*;

impl<K: KeyValueStore, L: SessionLauncher> App<K, L> {
    pub(in crate::tui_shell) fn load(
        store: ConnectionsStore<K>,
        launcher: L,
        store_label: String,
    ) -> Self {
        let flow = FlowController::new(store, launcher);
        let mut app = App {
            flow,
            store_label,
            loaded_at: now_ts(),
            last_result: None,
            quit: false,
        };

        let n = app.flow.displayed().len();
        let first = if n == 0 {
            "No connections yet; press `n` to add one.".to_string()
        } else {
            format!("Loaded {} connection{}.", n, if n == 1 { "" } else { "s" })
        };
        app.push_output(vec![first]);
        app
    }
}
