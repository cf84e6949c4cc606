use super::*;
use crate::store::MemoryKv;

fn store() -> ConnectionsStore<MemoryKv> {
    ConnectionsStore::new(MemoryKv::new())
}

fn filled(name: &str, host: &str, port: &str) -> ConnectionForm {
    let mut form = ConnectionForm::new_connection();
    form.set_field(Field::Name, name);
    form.set_field(Field::Host, host);
    form.set_field(Field::Port, port);
    form
}

fn rejected_field(outcome: SaveOutcome) -> Field {
    match outcome {
        SaveOutcome::Rejected(err) => err.field,
        SaveOutcome::Saved(c) => panic!("expected rejection, saved {:?}", c),
    }
}

#[test]
fn new_form_defaults_port() {
    let form = ConnectionForm::new_connection();
    assert_eq!(form.mode(), &FormMode::New);
    assert_eq!(form.field(Field::Port).as_str(), "7681");
    assert!(form.field(Field::Name).is_empty());
    assert_eq!(form.title(), "New Connection");
}

#[test]
fn port_boundaries() -> Result<()> {
    for bad in ["0", "65536", "-1", "", "  ", "http", "7681x", "99999999999999999999"] {
        let s = store();
        let mut form = filled("Home", "host", bad);
        assert_eq!(rejected_field(form.submit(&s)?), Field::Port, "port {:?}", bad);
        assert!(s.load().is_empty());
    }

    for good in ["1", "65535", " 22 "] {
        let s = store();
        let mut form = filled("Home", "host", good);
        assert!(matches!(form.submit(&s)?, SaveOutcome::Saved(_)), "port {:?}", good);
        assert_eq!(s.load().len(), 1);
    }
    Ok(())
}

#[test]
fn empty_name_and_host_are_rejected_independently() -> Result<()> {
    let s = store();

    let mut form = filled("", "host", "7681");
    assert_eq!(rejected_field(form.submit(&s)?), Field::Name);

    let mut form = filled("   ", "host", "7681");
    assert_eq!(rejected_field(form.submit(&s)?), Field::Name);

    let mut form = filled("Home", "", "7681");
    assert_eq!(rejected_field(form.submit(&s)?), Field::Host);

    assert!(s.load().is_empty());
    Ok(())
}

#[test]
fn checks_run_in_fixed_order() {
    let form = filled("", "", "0");
    assert_eq!(form.validate().unwrap_err().field, Field::Name);

    let form = filled("n", "", "0");
    assert_eq!(form.validate().unwrap_err().field, Field::Host);
}

#[test]
fn rejection_moves_focus_and_sticks_until_next_attempt() -> Result<()> {
    let s = store();
    let mut form = filled("Home", "", "7681");
    form.set_focus(Field::Port);

    form.submit(&s)?;
    assert_eq!(form.focus(), Field::Host);
    assert_eq!(form.error().map(|e| e.to_string()), Some("host: required".to_string()));

    form.set_field(Field::Host, "10.0.0.9");
    assert!(matches!(form.submit(&s)?, SaveOutcome::Saved(_)));
    assert!(form.error().is_none());
    Ok(())
}

#[test]
fn saved_values_are_trimmed() -> Result<()> {
    let s = store();
    let mut form = filled("  Home ", " 192.168.1.5\t", "7681");
    let SaveOutcome::Saved(c) = form.submit(&s)? else {
        panic!("expected save");
    };
    assert_eq!(c.name, "Home");
    assert_eq!(c.host, "192.168.1.5");
    assert_eq!(s.load(), vec![c]);
    Ok(())
}

#[test]
fn new_mode_mints_distinct_uuid_ids() -> Result<()> {
    let s = store();
    for i in 0..20 {
        let mut form = filled(&format!("c{}", i), "h", "7681");
        form.submit(&s)?;
    }
    let list = s.load();
    let ids: HashSet<_> = list.iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids.len(), 20);
    for c in &list {
        let id = c.id.as_str();
        assert_eq!(id.len(), 36);
        let parsed = uuid::Uuid::parse_str(id).expect("uuid");
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(parsed.to_string(), id);
    }
    Ok(())
}

#[test]
fn edit_mode_prefills_and_updates_in_place() -> Result<()> {
    let s = store();
    let mut form = filled("Home", "192.168.1.5", "7681");
    let SaveOutcome::Saved(home) = form.submit(&s)? else {
        panic!("expected save");
    };
    let mut other = filled("Lab", "10.1.1.1", "22");
    other.submit(&s)?;

    let mut edit = ConnectionForm::open(&s, Some(&home.id));
    assert_eq!(edit.title(), "Edit Connection");
    assert_eq!(edit.field(Field::Name).as_str(), "Home");
    assert_eq!(edit.field(Field::Port).as_str(), "7681");

    edit.set_field(Field::Name, "Office");
    edit.submit(&s)?;

    let list = s.load();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].id, home.id);
    assert_eq!(list[0].name, "Office");
    assert_eq!(list[0].host, "192.168.1.5");
    assert_eq!(list[1].name, "Lab");
    Ok(())
}

#[test]
fn stale_edit_target_opens_blank() -> Result<()> {
    let s = store();
    let gone = ConnectionId::from("deleted-id");
    let form = ConnectionForm::open(&s, Some(&gone));
    assert_eq!(form.mode(), &FormMode::Editing(gone));
    for f in Field::ALL {
        assert!(form.field(f).is_empty(), "{:?} should be blank", f);
    }
    Ok(())
}

#[test]
fn saving_stale_edit_does_not_add_entry() -> Result<()> {
    let s = store();
    let mut form = ConnectionForm::open(&s, Some(&ConnectionId::from("gone")));
    form.set_field(Field::Name, "Ghost");
    form.set_field(Field::Host, "h");
    form.set_field(Field::Port, "1");
    assert!(matches!(form.submit(&s)?, SaveOutcome::Saved(_)));
    assert!(s.load().is_empty());
    Ok(())
}

#[test]
fn text_input_edits_at_cursor() {
    let mut input = TextInput::with_value("hst");
    input.move_left();
    input.move_left();
    input.insert_char('o');
    assert_eq!(input.as_str(), "host");
    input.move_end();
    input.backspace();
    assert_eq!(input.as_str(), "hos");
    input.move_home();
    input.delete();
    assert_eq!(input.as_str(), "os");
    assert_eq!(input.cursor(), 0);

    let mut wide = TextInput::with_value("café");
    wide.backspace();
    wide.insert_char('e');
    assert_eq!(wide.as_str(), "cafe");
}
