//! Integration tests for cayley_runtime.

use cayley_engine::{Coordinate, TableKind};

use cayley_runtime::commands::{apply_command, apply_sequence, Command, Outcome};
use cayley_runtime::replay::{self, parse_script};
use cayley_runtime::{Workbench, WorkbenchConfig};

const Z5_SCRIPT: &str = include_str!("../scripts/z5_field.json");
const Z5_CONFIG: &str = include_str!("../scripts/z5_config.json");

fn z5_commands() -> Vec<Command> {
    parse_script(Z5_SCRIPT).expect("z5 script parses")
}

fn z5_config() -> WorkbenchConfig {
    WorkbenchConfig::from_json_str(Z5_CONFIG).expect("z5 config parses")
}

// ─────────────────────────────────────────────────────────────
// Z/5 is a field: both tables complete, no flags, no counter-examples
// ─────────────────────────────────────────────────────────────

#[test]
fn z5_script_builds_a_clean_field() {
    let (workbench, _) = replay::rebuild(&z5_config(), &z5_commands()).expect("replay");

    for kind in [TableKind::Addition, TableKind::Multiplication] {
        let table = workbench.table(kind);
        for y in 0..5 {
            for x in 0..5 {
                let at = Coordinate::new(x, y);
                assert!(table.index_at(at).is_some(), "{} {} is empty", kind, at);
            }
        }
        assert!(table.errors().is_empty(), "{} has duplicates", kind);
    }
    assert!(workbench.report().is_clean(), "{}", workbench.report());
    assert_eq!(workbench.active(), None);
}

// ─────────────────────────────────────────────────────────────
// Replay is deterministic
// ─────────────────────────────────────────────────────────────

#[test]
fn replay_is_deterministic() {
    let config = z5_config();
    let commands = z5_commands();
    let first = replay::verify_determinism(&config, &commands).expect("replay");
    let second = replay::rebuild_fingerprint(&config, &commands).expect("replay");
    assert_eq!(first, second);

    let partial = replay::rebuild_fingerprint(&config, &commands[..10]).expect("replay");
    assert_ne!(first, partial);
}

// ─────────────────────────────────────────────────────────────
// Corrupting one product surfaces in the distributive report
// ─────────────────────────────────────────────────────────────

#[test]
fn corrupted_product_is_reported_after_the_edit() {
    let (mut workbench, _) = replay::rebuild(&z5_config(), &z5_commands()).expect("replay");
    let edits = workbench.edits();

    let corrupt = [
        Command::Select {
            table: TableKind::Multiplication,
            x: 3,
            y: 2,
        },
        Command::Write {
            symbol: "c".to_string(),
        },
    ];
    apply_sequence(&mut workbench, &corrupt).expect("corrupt");

    assert_eq!(workbench.edits(), edits + 1);
    let report = workbench.report();
    assert!(!report.distributive.is_empty());
    assert!(report
        .distributive
        .contains(&"a×(1+a) = c does not equal (a×1)+(a×a) = 1".to_string()));
    assert!(!report.multiplication_associative.is_empty());
    assert!(report.addition_associative.is_empty());
    assert!(workbench
        .multiplication()
        .is_in_error(Coordinate::new(3, 2)));

    // Undo restores a clean report.
    apply_command(
        &mut workbench,
        &Command::Write {
            symbol: "1".to_string(),
        },
    )
    .expect("restore");
    assert!(workbench.report().is_clean());
}

// ─────────────────────────────────────────────────────────────
// Rebinding relabels both tables and the report text
// ─────────────────────────────────────────────────────────────

#[test]
fn rebind_flows_into_report_text() {
    let mut commands = z5_commands();
    commands.push(Command::Select {
        table: TableKind::Multiplication,
        x: 3,
        y: 2,
    });
    commands.push(Command::Write {
        symbol: "c".to_string(),
    });
    commands.push(Command::Rebind {
        index: 2,
        symbol: "two".to_string(),
    });
    let (workbench, _) = replay::rebuild(&z5_config(), &commands).expect("replay");

    assert_eq!(
        workbench.addition().value_at(Coordinate::new(2, 0)),
        Some("two")
    );
    assert!(workbench.report().distributive.contains(
        &"two×(1+two) = c does not equal (two×1)+(two×two) = 1".to_string()
    ));
}

// ─────────────────────────────────────────────────────────────
// Keyboard-style input and no-ops
// ─────────────────────────────────────────────────────────────

#[test]
fn keys_and_no_ops() {
    let mut workbench = Workbench::new(WorkbenchConfig::with_order(4)).expect("workbench");

    // Nothing selected: every edit is a no-op.
    for key in ["ArrowDown", "0", "Backspace"] {
        let outcome = apply_command(
            &mut workbench,
            &Command::Key {
                key: key.to_string(),
            },
        )
        .expect("key");
        assert!(matches!(outcome, Outcome::Ignored(_)), "{}", key);
    }
    assert_eq!(workbench.edits(), 0);

    workbench
        .select(TableKind::Addition, Coordinate::new(3, 3))
        .expect("select");
    // Letter beyond the order of 4 ("c" would be index 4).
    let outcome = apply_command(
        &mut workbench,
        &Command::Key {
            key: "c".to_string(),
        },
    )
    .expect("key");
    assert!(matches!(outcome, Outcome::Ignored(_)));

    // Moving down from the diagonal is rejected and the selection stays.
    let outcome = apply_command(&mut workbench, &Command::Move { dx: 0, dy: 1 }).expect("move");
    assert!(matches!(outcome, Outcome::Ignored(_)));
    assert_eq!(
        workbench.selection(),
        Some((TableKind::Addition, Coordinate::new(3, 3)))
    );
}

#[test]
fn extreme_moves_from_a_script_are_ignored() {
    let script = r#"[
        {"op": "select", "table": "addition", "x": 2, "y": 1},
        {"op": "move", "dx": 9223372036854775807, "dy": 0},
        {"op": "move", "dx": 0, "dy": -9223372036854775808},
        {"op": "move", "dx": -9223372036854775808, "dy": 9223372036854775807}
    ]"#;
    let commands = parse_script(script).expect("script parses");
    assert_eq!(
        commands[1],
        Command::Move {
            dx: i64::MAX,
            dy: 0
        }
    );

    let mut workbench = Workbench::new(WorkbenchConfig::with_order(5)).expect("workbench");
    let outcomes = apply_sequence(&mut workbench, &commands).expect("moves");
    assert_eq!(outcomes[0], Outcome::Applied);
    assert!(outcomes[1..]
        .iter()
        .all(|o| matches!(o, Outcome::Ignored(_))));
    assert_eq!(
        workbench.selection(),
        Some((TableKind::Addition, Coordinate::new(2, 1)))
    );
}

// ─────────────────────────────────────────────────────────────
// Resize through a command
// ─────────────────────────────────────────────────────────────

#[test]
fn resize_command_rebuilds_tables() {
    let mut commands = z5_commands();
    commands.push(Command::Resize { order: 7 });
    let (workbench, _) = replay::rebuild(&z5_config(), &commands).expect("replay");

    assert_eq!(workbench.order(), 7);
    assert_eq!(workbench.multiplication().order(), 7);
    assert_eq!(
        workbench.addition().value_at(Coordinate::new(6, 0)),
        Some("e")
    );
    assert_eq!(workbench.addition().index_at(Coordinate::new(1, 1)), None);
    assert!(workbench.report().is_clean());
}

#[test]
fn snapshot_serializes() {
    let (workbench, fingerprint) =
        replay::rebuild(&z5_config(), &z5_commands()).expect("replay");
    let json = serde_json::to_value(workbench.snapshot()).expect("serialize");
    assert_eq!(json["order"], 5);
    assert_eq!(json["fingerprint"], fingerprint.as_str());
    assert_eq!(json["addition"]["canonical"]["cells"][2][3], 0);
    assert_eq!(json["multiplication"]["canonical"]["cells"][3][2], 1);
}
