//! Behavioural tests for resolving outline templates against example rows.
#![expect(
    clippy::expect_used,
    reason = "integration tests use expect for clarity"
)]

use std::cell::Cell as Counter;

use outline_steps::{
    DataTable, DocString, Location, MatchError, MatchLookup, Row, StepArgument, StepMatch,
    Substitutions, Template, delimit, first_match, undelimit,
};
use rstest::{fixture, rstest};

fn template(name: &str) -> Template {
    Template::new("en", Location::new("features/cukes.feature", 5), "Given ", name)
        .expect("valid template")
}

fn found(candidate: &str, original: &str) -> MatchLookup {
    MatchLookup::Found(StepMatch::new("definition", candidate, original))
}

fn headers(template: &Template, row: &Row) -> Vec<String> {
    template
        .resolve(row)
        .consumed_cells()
        .iter()
        .map(|cell| cell.header().to_owned())
        .collect()
}

#[fixture]
fn counts() -> Vec<Row> {
    ["1", "2", "3"]
        .into_iter()
        .map(|n| Row::new(&["count"], &[n]))
        .collect()
}

#[rstest]
#[case("count")]
#[case("fruit name")]
#[case("ünïcödé")]
#[case("a-b_c.d")]
fn delimiting_round_trips(#[case] identifier: &str) {
    assert_eq!(undelimit(&delimit(identifier)), Some(identifier));
}

#[rstest]
#[case("I have <count> <veg>")]
#[case("<count><count> and <veg>")]
#[case("nothing to replace")]
fn substitution_is_idempotent(#[case] text: &str) {
    let subs = Substitutions::from_cells([("count", Some("5")), ("veg", Some("leeks"))]);
    let once = subs.apply(text);
    assert_eq!(subs.apply(&once), once);
}

#[test]
fn overlapping_tokens_resolve_longest_first() {
    let row = Row::new(&["a", "ab", "abc"], &["1", "2", "3"]);
    let step = template("<abc> <ab> <a> <abcd>");
    assert_eq!(step.resolve(&row).name(), "3 2 1 <abcd>");
}

#[test]
fn name_and_argument_share_one_mapping() {
    let step = template("I send <greeting>").with_argument(DocString::new("<greeting>, <who>!"));
    let invocation = step.resolve(&Row::new(&["greeting", "who"], &["Hello", "world"]));
    assert_eq!(invocation.name(), "I send Hello");
    assert_eq!(
        invocation.argument().and_then(StepArgument::as_docstring).map(DocString::content),
        Some("Hello, world!")
    );
}

#[test]
fn worked_example_substitutes_count() {
    let step = template("I have <count> cucumbers");
    let row = Row::new(&["count"], &["5"]);
    assert_eq!(step.resolve(&row).name(), "I have 5 cucumbers");
    assert_eq!(headers(&step, &row), ["count"]);
}

#[test]
fn worked_example_static_step() {
    let step = template("a static step");
    let row = Row::new(&["count"], &["5"]);
    assert_eq!(step.resolve(&row).name(), "a static step");
    assert!(headers(&step, &row).is_empty());
}

#[test]
fn worked_example_table_argument_consumes_cell() {
    let step = template("I have some cucumbers").with_argument(DataTable::new(vec![
        vec!["kind".into(), "count".into()],
        vec!["pickled".into(), "<count>".into()],
    ]));
    let row = Row::new(&["count"], &["5"]);
    let invocation = step.resolve(&row);
    assert_eq!(invocation.name(), "I have some cucumbers");
    assert_eq!(headers(&step, &row), ["count"]);
    let table = invocation
        .argument()
        .and_then(StepArgument::as_table)
        .expect("table argument");
    assert_eq!(table.cell(1, 1), Some("5"));
}

#[test]
fn worked_example_text_length() {
    // "Given " is six code points; "ébcd" is four, one of them two bytes.
    let step = template("ébcd");
    assert_eq!("ébcd".len(), 5);
    assert_eq!(step.text_length(), 2 + 2 + 6 + 4);
}

#[rstest]
fn empty_rows_yield_unmatched_original() {
    let step = template("I have <count> cucumbers");
    let rows: Vec<Row> = Vec::new();
    let outcome = first_match(&step, &rows, &found);
    let missing = outcome.no_match().expect("nothing to probe");
    assert_eq!(missing.name(), "I have <count> cucumbers");
}

#[rstest]
fn first_successful_row_wins(counts: Vec<Row>) {
    let step = template("I have <count> cucumbers");
    let probes = Counter::new(0);
    let matcher = |candidate: &str, original: &str| {
        probes.set(probes.get() + 1);
        if candidate.contains('1') {
            MatchLookup::NotFound
        } else {
            found(candidate, original)
        }
    };
    let outcome = first_match(&step, &counts, &matcher);
    assert_eq!(
        outcome.step_match().map(StepMatch::step_name),
        Some("I have 2 cucumbers")
    );
    assert_eq!(probes.get(), 2);
}

#[rstest]
fn matcher_errors_never_escape(counts: Vec<Row>) {
    let step = template("I have <count> cucumbers");
    let failing = |candidate: &str, _: &str| {
        MatchLookup::Errored(MatchError::Lookup {
            step: candidate.to_owned(),
            reason: "definitions unavailable".into(),
        })
    };
    let outcome = first_match(&step, &counts, &failing);
    assert!(!outcome.is_matched());
    assert_eq!(outcome.name_to_report(), "I have <count> cucumbers");
}

#[rstest]
fn resolution_is_safe_across_threads(counts: Vec<Row>) {
    let step = template("I have <count> cucumbers");
    let names: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = counts
            .iter()
            .map(|row| scope.spawn(|| step.resolve(row).into_name()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("resolution does not panic"))
            .collect()
    });
    assert_eq!(names, [
        "I have 1 cucumbers",
        "I have 2 cucumbers",
        "I have 3 cucumbers"
    ]);
}

#[test]
#[should_panic(expected = "example row has 2 cells but the table declares 1 headers")]
fn mismatched_row_arity_is_fatal() {
    let _ = Row::new(&["count"], &["1", "2"]);
}
