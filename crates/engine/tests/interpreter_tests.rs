// Interpreter behaviour driven through `process` with a scripted selector.
// Run with: cargo test -p csvsh-engine --test interpreter_tests

use std::collections::VecDeque;

use csvsh_engine::{
    process, Effect, LoadError, NoSelector, Outcome, Response, Selector, Session, State, Table,
    TableLoader,
};

/// Answers selector prompts from a queue. An exhausted queue cancels.
#[derive(Default)]
struct Scripted {
    answers: VecDeque<Option<String>>,
    prompts: Vec<String>,
}

impl Scripted {
    fn new(answers: &[Option<&str>]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.map(str::to_string)).collect(),
            prompts: Vec::new(),
        }
    }

    fn next(&mut self, prompt: String) -> Option<String> {
        self.prompts.push(prompt);
        self.answers.pop_front().flatten()
    }
}

impl Selector for Scripted {
    fn choose_column(&mut self, names: &[String]) -> Option<String> {
        self.next(format!("column of {}", names.join(",")))
    }

    fn choose_row(&mut self, indices: &[String]) -> Option<String> {
        self.next(format!("row of {}", indices.len()))
    }

    fn input_value(&mut self, title: &str, initial: Option<&str>) -> Option<String> {
        self.next(format!("input {} [{}]", title, initial.unwrap_or("")))
    }
}

struct Memory;

impl TableLoader for Memory {
    fn load(&self, path: &str) -> Result<Table, LoadError> {
        match path {
            "people.csv" => Ok(people()),
            "header-only.csv" => Ok(Table::from_parts(strings(&["A", "B"]), vec![])),
            "dupes.csv" => Ok(Table::from_parts(
                strings(&["id", "id"]),
                vec![strings(&["1", "2"])],
            )),
            "sparse.csv" => Ok(Table::from_parts(
                strings(&["name", "note"]),
                vec![strings(&["Ada", ""]), strings(&["Alan"])],
            )),
            _ => Err(LoadError::NotFound(path.to_string())),
        }
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn people() -> Table {
    Table::from_parts(
        strings(&["First Name", "Age", "City"]),
        vec![
            strings(&["Ada", "36", "London"]),
            strings(&["Alan", "41", "Wilmslow"]),
            strings(&["Grace", "85", "Arlington"]),
        ],
    )
}

fn loaded() -> Session {
    let mut session = Session::new();
    let r = process("load people.csv", &mut session, &mut NoSelector, &Memory);
    assert!(r.ok(), "load failed: {:?}", r);
    session
}

fn run(session: &mut Session, selector: &mut Scripted, line: &str) -> Response {
    process(line, session, selector, &Memory)
}

fn single(r: &Response) -> &Outcome {
    assert_eq!(r.outcomes.len(), 1, "expected one outcome: {:?}", r);
    &r.outcomes[0]
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[test]
fn table_commands_refused_before_load() {
    let mut session = Session::new();
    for line in ["ls", "peek column Age", "show", "cell Age 0", "sw row 0|1", "replace Age 0"] {
        let r = run(&mut session, &mut Scripted::default(), line);
        assert_eq!(single(&r).body, "No «CSV file» has been loaded", "line {:?}", line);
    }
    assert_eq!(session.state(), State::NoTableLoaded);
}

#[test]
fn clear_works_in_both_states() {
    let mut session = Session::new();
    let r = run(&mut session, &mut Scripted::default(), "cls");
    assert_eq!(r.effect, Some(Effect::ClearScreen));
    assert!(r.outcomes.is_empty());

    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "C");
    assert_eq!(r.effect, Some(Effect::ClearScreen));
}

#[test]
fn load_reports_dimensions() {
    let mut session = Session::new();
    let r = run(&mut session, &mut Scripted::default(), "LD people.csv");
    assert_eq!(
        single(&r),
        &Outcome::success("Loaded", "The file «people.csv» was loaded (3 rows, 3 columns)")
    );
}

#[test]
fn failed_reload_keeps_previous_table() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "load nowhere.csv");
    assert!(!r.ok());
    assert_eq!(session.state(), State::TableLoaded);
    assert_eq!(session.table(), &people());
}

#[test]
fn header_only_file_loads_without_rows() {
    let mut session = Session::new();
    let r = run(&mut session, &mut Scripted::default(), "load header-only.csv");
    assert!(r.ok());
    let r = run(&mut session, &mut Scripted::default(), "ls row");
    assert_eq!(single(&r).body, "There are no rows!");
}

#[test]
fn blank_line_is_a_noop() {
    let mut session = loaded();
    assert!(run(&mut session, &mut Scripted::default(), "   ").is_noop());
}

// ---------------------------------------------------------------------------
// Listing and peeking
// ---------------------------------------------------------------------------

#[test]
fn ls_lists_rows_then_columns() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "ls");
    assert_eq!(
        r.outcomes,
        vec![
            Outcome::success("Rows", "[0, 2]"),
            Outcome::success("Columns", "First Name | Age | City"),
        ]
    );
}

#[test]
fn peek_multi_word_column() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "peek column First Name");
    let o = single(&r);
    assert_eq!(o.title, "First name");
    assert_eq!(o.body, "\n«0:» Ada\n«1:» Alan\n«2:» Grace");
}

#[test]
fn peek_row_through_selector() {
    let mut session = loaded();
    let mut selector = Scripted::new(&[Some("1")]);
    let r = run(&mut session, &mut selector, "peek row");
    assert_eq!(single(&r).title, "1");
    assert_eq!(single(&r).body, "\n«First Name:» Alan\n«Age:» 41\n«City:» Wilmslow");
    assert_eq!(selector.prompts, vec!["row of 3"]);
}

#[test]
fn peek_unknown_row() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "peek row 7");
    assert_eq!(single(&r), &Outcome::error("The row «7» does not exist!"));
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

#[test]
fn delete_column_through_selector() {
    let mut session = loaded();
    let mut selector = Scripted::new(&[Some("Age")]);
    let r = run(&mut session, &mut selector, "del column");
    assert_eq!(single(&r).body, "The column «Age» was successfully deleted!");
    assert_eq!(session.table().header(), strings(&["First Name", "City"]).as_slice());
    assert_eq!(selector.prompts, vec!["column of First Name,Age,City"]);
}

#[test]
fn delete_missing_row_leaves_table() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "delete row 3");
    assert_eq!(single(&r), &Outcome::error("The row «3» does not exist!"));
    assert_eq!(session.table(), &people());
}

#[test]
fn switch_rows_inline() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "sw row 0 | 2");
    assert_eq!(single(&r).body, "The rows «0» and «2» were successfully switched!");
    assert_eq!(session.table().rows()[0][0], "Grace");
    assert_eq!(session.table().rows()[2][0], "Ada");
}

#[test]
fn switch_columns_asks_twice() {
    let mut session = loaded();
    let mut selector = Scripted::new(&[Some("Age"), Some("City")]);
    let r = run(&mut session, &mut selector, "switch column");
    assert!(r.ok());
    assert_eq!(selector.prompts.len(), 2);
    assert_eq!(session.table().rows()[0], strings(&["Ada", "London", "36"]));
}

#[test]
fn switch_cancelled_on_second_choice() {
    let mut session = loaded();
    let mut selector = Scripted::new(&[Some("Age"), None]);
    let r = run(&mut session, &mut selector, "switch column");
    assert!(r.is_noop());
    assert_eq!(session.table(), &people());
}

#[test]
fn switch_rows_with_missing_index() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "switch row 0|9");
    assert_eq!(
        single(&r),
        &Outcome::error("At least one of «row 0» and «row 9» do not exist!")
    );
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

#[test]
fn cell_with_multi_word_column() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "cell First Name 2");
    assert_eq!(single(&r), &Outcome::success("Cell First Name-2", "Grace"));
}

#[test]
fn cell_through_selector_asks_column_then_row() {
    let mut session = loaded();
    let mut selector = Scripted::new(&[Some("City"), Some("0")]);
    let r = run(&mut session, &mut selector, "cell");
    assert_eq!(single(&r).body, "London");
    assert_eq!(selector.prompts, vec!["column of First Name,Age,City", "row of 3"]);
}

#[test]
fn cell_missing_names_both_inputs() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "cell Zip 0");
    assert_eq!(
        single(&r).body,
        "At least one of «column Zip» and «row 0» do not exist!"
    );
}

#[test]
fn copy_produces_clipboard_effect() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "cp Age 1");
    assert_eq!(single(&r).body, "41");
    assert_eq!(r.effect, Some(Effect::CopyToClipboard("41".to_string())));
}

#[test]
fn copy_failure_has_no_effect() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "copy Age 10");
    assert!(!r.ok());
    assert_eq!(r.effect, None);
}

#[test]
fn copy_of_empty_cell_copies_nothing() {
    let mut session = Session::new();
    run(&mut session, &mut Scripted::default(), "load sparse.csv");

    let r = run(&mut session, &mut Scripted::default(), "copy note 0");
    assert_eq!(single(&r), &Outcome::success("Cell note-0", ""));
    assert_eq!(r.effect, None);

    // A short row reads as empty too
    let r = run(&mut session, &mut Scripted::default(), "copy note 1");
    assert!(r.ok());
    assert_eq!(r.effect, None);
}

#[test]
fn edit_prefills_current_value() {
    let mut session = loaded();
    let mut selector = Scripted::new(&[Some("37")]);
    let r = run(&mut session, &mut selector, "edit Age 0");
    assert_eq!(single(&r), &Outcome::success("Set to", "37"));
    assert_eq!(selector.prompts, vec!["input Age - 0 [36]"]);
    assert_eq!(session.table().get_cell("Age", "0"), Ok("37"));
}

#[test]
fn replace_starts_empty() {
    let mut session = loaded();
    let mut selector = Scripted::new(&[Some("Paris")]);
    let r = run(&mut session, &mut selector, "replace City 2");
    assert!(r.ok());
    assert_eq!(selector.prompts, vec!["input City - 2 []"]);
    assert_eq!(session.table().get_cell("City", "2"), Ok("Paris"));
}

#[test]
fn cancelled_or_empty_input_is_not_set() {
    for answer in [None, Some("")] {
        let mut session = loaded();
        let mut selector = Scripted::new(&[answer]);
        let r = run(&mut session, &mut selector, "replace City 2");
        assert_eq!(single(&r), &Outcome::error("The value was not set!"));
        assert_eq!(session.table(), &people());
    }
}

#[test]
fn edit_unknown_cell_never_prompts() {
    let mut session = loaded();
    let mut selector = Scripted::new(&[Some("x")]);
    let r = run(&mut session, &mut selector, "edit Age 99");
    assert!(!r.ok());
    assert!(selector.prompts.is_empty());
}

// ---------------------------------------------------------------------------
// Show and strict columns
// ---------------------------------------------------------------------------

#[test]
fn show_returns_snapshot() {
    let mut session = loaded();
    let r = run(&mut session, &mut Scripted::default(), "s");
    match r.effect {
        Some(Effect::ShowTable(snapshot)) => {
            assert_eq!(snapshot.columns, strings(&["#", "First Name", "Age", "City"]));
            assert_eq!(snapshot.rows[1], strings(&["1", "Alan", "41", "Wilmslow"]));
        }
        other => panic!("expected a snapshot, got {:?}", other),
    }
}

#[test]
fn duplicate_columns_resolve_first_by_default() {
    let mut session = Session::new();
    run(&mut session, &mut Scripted::default(), "load dupes.csv");
    let r = run(&mut session, &mut Scripted::default(), "cell id 0");
    assert_eq!(single(&r).body, "1");
}

#[test]
fn strict_session_reports_ambiguous_columns() {
    let mut session = Session::new().with_strict_columns(true);
    run(&mut session, &mut Scripted::default(), "load dupes.csv");
    let r = run(&mut session, &mut Scripted::default(), "delete column id");
    assert_eq!(
        single(&r),
        &Outcome::error("The column «id» appears 2 times in the header")
    );
    assert_eq!(session.table().column_count(), 2);
}

// ---------------------------------------------------------------------------
// Unexpected faults
// ---------------------------------------------------------------------------

/// Panics on `boom`, otherwise serves the usual fixtures.
struct Faulty;

impl TableLoader for Faulty {
    fn load(&self, path: &str) -> Result<Table, LoadError> {
        if path == "boom" {
            panic!("loader failed on {}", path);
        }
        Memory.load(path)
    }
}

#[test]
fn panic_during_command_is_not_valid_and_session_survives() {
    let mut session = Session::new();
    let r = process("load boom", &mut session, &mut NoSelector, &Faulty);
    assert_eq!(r, Response::one(Outcome::not_valid()));
    assert_eq!(session.state(), State::NoTableLoaded);

    let r = process("load people.csv", &mut session, &mut NoSelector, &Faulty);
    assert!(r.ok(), "{:?}", r);
    let before = session.table().clone();

    let r = process("ld boom", &mut session, &mut NoSelector, &Faulty);
    assert_eq!(r, Response::one(Outcome::not_valid()));
    assert_eq!(session.state(), State::TableLoaded);
    assert_eq!(session.table(), &before);

    let r = process("cell Age 2", &mut session, &mut NoSelector, &Faulty);
    assert_eq!(single(&r).body, "85");
}
