use crate::*;
use serde_json::json;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn assert_distinct(assignment: &RoleAssignment) {
    let held: Vec<&str> = Role::ALL
        .into_iter()
        .filter_map(|r| assignment.get(r))
        .collect();
    for (i, a) in held.iter().enumerate() {
        assert!(!held[i + 1..].contains(a), "{a} assigned twice: {assignment:?}");
    }
}

#[test]
fn preferred_defaults_win_when_present() {
    let mut selector = FieldSelector::new();
    let assignment = selector
        .refresh(&strings(&["Source", "Target", "Volume"]))
        .clone();
    assert_eq!(
        assignment,
        RoleAssignment {
            from: Some("Source".into()),
            to: Some("Target".into()),
            value: Some("Volume".into()),
        }
    );
}

#[test]
fn preferred_defaults_are_found_out_of_position() {
    let mut selector = FieldSelector::new();
    let assignment = selector.refresh(&strings(&["Volume", "Target", "Source"]));
    assert_eq!(assignment.from.as_deref(), Some("Source"));
    assert_eq!(assignment.to.as_deref(), Some("Target"));
    assert_eq!(assignment.value.as_deref(), Some("Volume"));
}

#[test]
fn positional_fallback_fills_unknown_headings() {
    let mut selector = FieldSelector::new();
    let assignment = selector.refresh(&strings(&["from", "to", "amount", "note"]));
    assert_eq!(assignment.from.as_deref(), Some("from"));
    assert_eq!(assignment.to.as_deref(), Some("to"));
    assert_eq!(assignment.value.as_deref(), Some("amount"));
}

#[test]
fn earlier_roles_claim_positions_before_later_preferences() {
    let mut selector = FieldSelector::new();
    // `from` has no preferred heading here, so it takes `Target` by position and `to` falls back
    // to its own position.
    let assignment = selector.refresh(&strings(&["Target", "b", "Volume"])).clone();
    assert_eq!(
        assignment,
        RoleAssignment {
            from: Some("Target".into()),
            to: Some("b".into()),
            value: Some("Volume".into()),
        }
    );
    assert_eq!(assignment.complete_headings(), Some(["Target", "b", "Volume"]));
}

#[test]
fn positional_fallback_skips_claimed_headings() {
    let mut selector = FieldSelector::new();
    // `from` prefers `Source`, which also sits at the `to` position.
    let assignment = selector.refresh(&strings(&["x", "Source", "Target"]));
    assert_eq!(assignment.from.as_deref(), Some("Source"));
    assert_eq!(assignment.to.as_deref(), Some("Target"));
    assert_eq!(assignment.value, None);
}

#[test]
fn selecting_a_missing_heading_leaves_the_role_unassigned() {
    let mut selector = FieldSelector::new();
    selector.refresh(&strings(&["Source", "Target", "Volume"]));
    selector.select(Role::From, Some("Gone".into()));
    assert_eq!(selector.assignment().from, None);

    let assignment = selector.refresh(&strings(&["Source", "Target", "Volume"]));
    assert_eq!(assignment.from.as_deref(), Some("Source"));
}

#[test]
fn selections_before_any_headings_are_kept() {
    let mut selector = FieldSelector::new();
    selector.select(Role::Value, Some("Cost".into()));
    assert_eq!(selector.assignment().value.as_deref(), Some("Cost"));
}

#[test]
fn too_few_headings_leave_roles_unassigned() {
    let mut selector = FieldSelector::new();
    let assignment = selector.refresh(&strings(&["a", "", "a"]));
    assert_eq!(assignment.from.as_deref(), Some("a"));
    assert_eq!(assignment.to, None);
    assert_eq!(assignment.value, None);
    assert_eq!(selector.options(Role::To), &strings(&["a"])[..]);
}

#[test]
fn refresh_is_idempotent() {
    let headings = strings(&["x", "Target", "y", "z"]);
    let mut selector = FieldSelector::new();
    let first = selector.refresh(&headings).clone();
    let second = selector.refresh(&headings).clone();
    assert_eq!(first, second);
}

#[test]
fn selections_survive_unrelated_heading_changes() {
    let mut selector = FieldSelector::new();
    selector.refresh(&strings(&["Source", "Target", "Volume", "Cost"]));
    selector.select(Role::Value, Some("Cost".into()));

    let assignment = selector.refresh(&strings(&["Source", "Target", "Cost", "Volume", "Extra"]));
    assert_eq!(assignment.value.as_deref(), Some("Cost"));
}

#[test]
fn vanished_selection_is_cleared_and_reinferred() {
    let mut selector = FieldSelector::new();
    selector.refresh(&strings(&["Source", "Target", "Volume", "Cost"]));
    selector.select(Role::Value, Some("Cost".into()));

    let assignment = selector.refresh(&strings(&["Source", "Target", "Volume"]));
    assert_eq!(assignment.value.as_deref(), Some("Volume"));
}

#[test]
fn explicit_selection_steals_heading_from_other_role() {
    let mut selector = FieldSelector::new();
    selector.refresh(&strings(&["Source", "Target", "Volume"]));
    selector.select(Role::From, Some("Target".into()));
    assert_eq!(selector.assignment().from.as_deref(), Some("Target"));
    assert_eq!(selector.assignment().to, None);
    assert_distinct(selector.assignment());
}

#[test]
fn no_heading_is_ever_shared() {
    let cases: &[&[&str]] = &[
        &["Source", "Source", "Source"],
        &["Target", "Source"],
        &["Volume", "a", "b"],
        &["a", "Volume", "Target", "Source"],
        &["", "", "Volume"],
        &[],
    ];
    for headings in cases {
        let mut selector = FieldSelector::new();
        assert_distinct(selector.refresh(&strings(headings)));
    }
}

#[test]
fn chart_table_projects_role_columns() {
    let headings = strings(&["Note", "Volume", "Target", "Source"]);
    let rows: Vec<Vec<Cell>> = serde_json::from_value(json!([
        ["n1", 10, "B", "A"],
        ["n2", "x", "A"]
    ]))
    .unwrap();

    let mut selector = FieldSelector::new();
    let table = selector.select_fields(&headings, &rows);
    assert_eq!(table.headings, strings(&["Source", "Target", "Volume"]));
    assert_eq!(
        table.rows,
        vec![
            vec![json!("A"), json!("B"), json!(10)],
            vec![json!(null), json!("A"), json!("x")],
        ]
    );
}

#[test]
fn incomplete_assignment_yields_no_chart_data() {
    let headings = strings(&["Source", "Target"]);
    let rows: Vec<Vec<Cell>> = serde_json::from_value(json!([["A", "B"]])).unwrap();
    let mut selector = FieldSelector::new();
    assert!(selector.select_fields(&headings, &rows).is_empty());
}
