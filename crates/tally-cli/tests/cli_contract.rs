use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

const EXPECTED_ROOT_HELP: &str = "Tally - personal income and expense tracker

Usage:
  tally <command>

Start here:
  tally add \"Lunch\" 12.50 --category food
  tally report
";

static TEST_COUNTER: AtomicU64 = AtomicU64::new(1);

struct CliOutput {
    code: Option<i32>,
    stdout: String,
}

impl CliOutput {
    fn ok(&self) -> bool {
        self.code == Some(0)
    }
}

fn unique_test_home() -> PathBuf {
    let mut path = std::env::temp_dir();
    let stamp = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(value) => value.as_nanos(),
        Err(_) => 0,
    };
    let sequence = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!(
        "tally-cli-test-{}-{stamp}-{sequence}",
        std::process::id()
    ));
    path
}

fn run_cli_in_home(home: &Path, args: &[&str]) -> CliOutput {
    let output = Command::new(env!("CARGO_BIN_EXE_tally"))
        .args(args)
        .env("TALLY_HOME", home)
        .env_remove("TALLY_LOG")
        .output();
    assert!(output.is_ok());
    if let Ok(result) = output {
        let stdout = String::from_utf8(result.stdout);
        assert!(stdout.is_ok());
        if let Ok(stdout_text) = stdout {
            return CliOutput {
                code: result.status.code(),
                stdout: stdout_text,
            };
        }
    }

    CliOutput {
        code: None,
        stdout: String::new(),
    }
}

fn run_cli(args: &[&str]) -> (CliOutput, PathBuf) {
    let home = unique_test_home();
    let output = run_cli_in_home(&home, args);
    (output, home)
}

fn parse_json(body: &str) -> Value {
    let parsed = serde_json::from_str::<Value>(body);
    assert!(parsed.is_ok());
    if let Ok(value) = parsed {
        return value;
    }
    Value::Null
}

fn add_json(home: &Path, args: &[&str]) -> Value {
    let mut full = vec!["add"];
    full.extend_from_slice(args);
    full.push("--json");
    let output = run_cli_in_home(home, &full);
    assert!(output.ok(), "add failed: {}", output.stdout);
    parse_json(&output.stdout)
}

fn assert_text_error_contract(body: &str, code: &str) {
    assert!(body.contains("Something went wrong, but it's easy to fix."));
    assert!(body.contains(&format!("  Error:    {code}")));
    assert!(body.contains("  Details:"));
    assert!(body.contains("What to do next:"));
}

fn assert_json_error_contract(body: &str, code: &str) -> Value {
    let payload = parse_json(body);
    assert_eq!(payload["error"]["code"], Value::String(code.to_string()));
    assert!(payload["error"]["message"].is_string());
    assert!(payload["error"]["recovery_steps"].is_array());
    payload
}

#[test]
fn root_command_uses_short_plaintext_help() {
    let (output, home) = run_cli(&[]);
    assert!(output.ok());
    assert_eq!(output.stdout, EXPECTED_ROOT_HELP);
    assert!(!home.exists());
}

#[test]
fn help_and_version_return_success_output() {
    let (help, _) = run_cli(&["--help"]);
    assert!(help.ok());
    assert!(help.stdout.starts_with("Tally - personal income and expense tracker"));
    assert!(help.stdout.contains("tally report"));

    let (add_help, _) = run_cli(&["add", "--help"]);
    assert!(add_help.ok());
    assert!(add_help.stdout.contains("Field rules:"));

    let (version, _) = run_cli(&["--version"]);
    assert!(version.ok());
    assert_eq!(version.stdout.trim(), "tally 0.1.0");
}

#[test]
fn add_then_list_shows_the_transaction_with_signed_amount() {
    let home = unique_test_home();
    let added = run_cli_in_home(&home, &["add", "Lunch", "12.50", "--category", "food"]);
    assert!(added.ok());
    assert!(added.stdout.starts_with("Added expense: Lunch"));

    let listed = run_cli_in_home(&home, &["list"]);
    assert!(listed.ok());
    assert!(listed.stdout.contains("Lunch"));
    assert!(listed.stdout.contains("-$12.50"));
    assert!(listed.stdout.contains("food"));

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn empty_ledger_renders_empty_states() {
    let home = unique_test_home();
    let listed = run_cli_in_home(&home, &["list"]);
    assert!(listed.ok());
    assert_eq!(listed.stdout.trim(), "No transactions found");

    let chart = run_cli_in_home(&home, &["chart"]);
    assert!(chart.ok());
    assert!(chart.stdout.contains("No expense data to display"));

    let summary = run_cli_in_home(&home, &["summary", "--json"]);
    assert!(summary.ok());
    let payload = parse_json(&summary.stdout);
    assert_eq!(payload["data"]["total_income"], 0.0);
    assert_eq!(payload["data"]["total_expenses"], 0.0);
    assert_eq!(payload["data"]["balance"], 0.0);

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn json_success_uses_structured_envelope() {
    let home = unique_test_home();
    let payload = add_json(&home, &["Paycheck", "2500", "--type", "income"]);
    assert_eq!(payload["ok"], Value::Bool(true));
    assert_eq!(payload["version"], Value::String("v1".to_string()));
    assert_eq!(payload["data"]["transaction"]["type"], "income");
    assert_eq!(payload["data"]["transaction"]["category"], "other");
    assert_eq!(payload["data"]["transaction"]["amount"], 2500.0);
    assert!(payload["data"]["transaction"]["id"].is_i64());
    assert_eq!(payload["data"]["summary"]["balance"], 2500.0);

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn list_filters_are_and_combined() {
    let home = unique_test_home();
    add_json(&home, &["Groceries", "20", "--category", "food"]);
    add_json(&home, &["Bus", "3", "--category", "transport"]);
    add_json(&home, &["Refund", "7", "--type", "income", "--category", "food"]);

    let listed = run_cli_in_home(
        &home,
        &["list", "--type", "expense", "--category", "food", "--json"],
    );
    assert!(listed.ok());
    let payload = parse_json(&listed.stdout);
    assert_eq!(payload["data"]["type_filter"], "expense");
    assert_eq!(payload["data"]["category_filter"], "food");
    assert_eq!(payload["data"]["total"], 1);
    assert_eq!(payload["data"]["rows"][0]["description"], "Groceries");

    let all = run_cli_in_home(&home, &["list", "--json"]);
    let all_payload = parse_json(&all.stdout);
    let descriptions = all_payload["data"]["rows"]
        .as_array()
        .map(|rows| {
            rows.iter()
                .filter_map(|row| row["description"].as_str())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    assert_eq!(descriptions, vec!["Groceries", "Bus", "Refund"]);

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn summary_and_chart_reflect_expenses_exactly() {
    let home = unique_test_home();
    add_json(&home, &["Salary", "100", "--type", "income"]);
    add_json(&home, &["Dinner", "20", "--category", "food"]);
    add_json(&home, &["Snack", "5", "--category", "food"]);
    add_json(&home, &["Cents", "0.1"]);
    add_json(&home, &["More cents", "0.2"]);

    let summary = run_cli_in_home(&home, &["summary"]);
    assert!(summary.ok());
    assert!(summary.stdout.contains("$100.00"));
    assert!(summary.stdout.contains("$25.30"));
    assert!(summary.stdout.contains("$74.70"));

    let chart = run_cli_in_home(&home, &["chart", "--json"]);
    let payload = parse_json(&chart.stdout);
    assert_eq!(payload["data"]["totals"]["food"], 25.0);
    assert_eq!(payload["data"]["totals"]["other"], 0.3);
    assert_eq!(payload["data"]["totals"]["shopping"], 0.0);
    assert_eq!(payload["data"]["has_expenses"], Value::Bool(true));

    let chart_text = run_cli_in_home(&home, &["chart"]);
    assert!(chart_text.stdout.contains("Food: $25.00"));
    assert!(chart_text.stdout.contains("Other: $0.30"));
    assert!(!chart_text.stdout.contains("Shopping"));

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn amounts_beyond_the_cent_are_kept_and_displayed_rounded() {
    let home = unique_test_home();
    let added = add_json(&home, &["Fuel", "12.345", "--category", "transport"]);
    assert_eq!(added["data"]["transaction"]["amount"], 12.345);
    add_json(&home, &["Rounding", "0.004", "--type", "income"]);

    let listed = run_cli_in_home(&home, &["list", "--json"]);
    let payload = parse_json(&listed.stdout);
    let amounts = payload["data"]["rows"]
        .as_array()
        .map(|rows| rows.iter().map(|row| row["amount"].clone()).collect::<Vec<_>>())
        .unwrap_or_default();
    assert_eq!(amounts.len(), 2);
    assert!(amounts.contains(&Value::from(12.345)));
    assert!(amounts.contains(&Value::from(0.004)));

    let listed_text = run_cli_in_home(&home, &["list"]);
    assert!(listed_text.stdout.contains("-$12.35"));

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn negative_balance_is_flagged_as_deficit() {
    let home = unique_test_home();
    add_json(&home, &["Gift", "10", "--type", "income"]);
    add_json(&home, &["Concert", "30", "--category", "entertainment"]);

    let summary = run_cli_in_home(&home, &["summary"]);
    assert!(summary.ok());
    assert!(summary.stdout.contains("-$20.00 (deficit)"));

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn remove_deletes_by_id_and_unknown_id_is_a_no_op() {
    let home = unique_test_home();
    let first = add_json(&home, &["Coffee", "4.5", "--category", "food"]);
    add_json(&home, &["Tea", "3"]);
    let id = first["data"]["transaction"]["id"].as_i64().unwrap_or_default();

    let missing = run_cli_in_home(&home, &["remove", "42", "--json"]);
    assert!(missing.ok());
    let missing_payload = parse_json(&missing.stdout);
    assert_eq!(missing_payload["data"]["removed"], Value::Bool(false));

    let id_text = id.to_string();
    let removed = run_cli_in_home(&home, &["remove", &id_text]);
    assert!(removed.ok());
    assert!(removed.stdout.starts_with(&format!("Removed transaction {id}: Coffee")));

    let listed = run_cli_in_home(&home, &["list", "--json"]);
    let payload = parse_json(&listed.stdout);
    assert_eq!(payload["data"]["total"], 1);
    assert_eq!(payload["data"]["rows"][0]["description"], "Tea");

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn report_combines_list_summary_and_chart() {
    let home = unique_test_home();
    add_json(&home, &["Rent", "900", "--category", "utilities"]);
    add_json(&home, &["Paycheck", "2000", "--type", "income"]);

    let report = run_cli_in_home(&home, &["report", "--type", "income"]);
    assert!(report.ok());
    assert!(report.stdout.contains("Paycheck"));
    assert!(!report.stdout.contains("Rent"));
    assert!(report.stdout.contains("Balance:"));
    assert!(report.stdout.contains("Utilities: $900.00"));

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn invalid_input_is_a_user_error_and_writes_nothing() {
    let cases: [(&[&str], &str); 4] = [
        (&["add", "  ", "5"], "invalid_argument"),
        (&["add", "Lunch", "0"], "invalid_amount"),
        (&["add", "Lunch", "-5"], "invalid_amount"),
        (&["add", "Lunch", "2000000000000"], "invalid_amount"),
    ];

    for (args, code) in cases {
        let (output, home) = run_cli(args);
        assert_eq!(output.code, Some(1), "args: {args:?}");
        assert_text_error_contract(&output.stdout, code);
        assert!(!home.join("ledger.db").exists());
    }
}

#[test]
fn json_errors_use_universal_error_shape() {
    let (output, _) = run_cli(&["add", "Lunch", "abc", "--json"]);
    assert_eq!(output.code, Some(1));
    let payload = assert_json_error_contract(&output.stdout, "invalid_amount");
    assert!(payload.get("ok").is_none());
}

#[test]
fn parse_errors_carry_command_help_hint() {
    let (output, _) = run_cli(&["list", "--category", "rent"]);
    assert_eq!(output.code, Some(1));
    assert_text_error_contract(&output.stdout, "invalid_argument");
    assert!(output.stdout.contains("Run `tally list --help` for usage."));

    let (json_output, _) = run_cli(&["remove", "abc", "--json"]);
    assert_eq!(json_output.code, Some(1));
    assert_json_error_contract(&json_output.stdout, "invalid_argument");
}

#[test]
fn corrupt_ledger_file_is_an_internal_error() {
    let home = unique_test_home();
    let created = fs::create_dir_all(&home);
    assert!(created.is_ok());
    let written = fs::write(home.join("ledger.db"), b"this is not a database");
    assert!(written.is_ok());

    let output = run_cli_in_home(&home, &["summary", "--json"]);
    assert_eq!(output.code, Some(2));
    assert_json_error_contract(&output.stdout, "ledger_corrupt");

    let _ = fs::remove_dir_all(&home);
}

#[test]
fn success_output_pipe_close_does_not_panic() {
    let home = unique_test_home();
    add_json(&home, &["Lunch", "12.50"]);

    let mut producer = Command::new(env!("CARGO_BIN_EXE_tally"));
    producer.args(["report"]);
    producer.env("TALLY_HOME", &home);
    producer.stdout(Stdio::piped());
    producer.stderr(Stdio::piped());

    let producer_spawn = producer.spawn();
    assert!(producer_spawn.is_ok());
    if let Ok(mut producer_child) = producer_spawn {
        let producer_stdout = producer_child.stdout.take();
        let producer_stderr = producer_child.stderr.take();

        if let Some(stdout_pipe) = producer_stdout {
            let mut reader = BufReader::new(stdout_pipe);
            let mut first_line = String::new();
            let read_result = reader.read_line(&mut first_line);
            assert!(read_result.is_ok());
            assert!(!first_line.is_empty());
            drop(reader);
        }

        let status = producer_child.wait();
        assert!(status.is_ok());
        if let Ok(exit_status) = status {
            assert!(exit_status.success());
        }

        if let Some(mut stderr_pipe) = producer_stderr {
            let mut stderr_bytes = Vec::new();
            assert!(stderr_pipe.read_to_end(&mut stderr_bytes).is_ok());
            let stderr_text = String::from_utf8_lossy(&stderr_bytes);
            assert!(!stderr_text.contains("Broken pipe"));
            assert!(!stderr_text.contains("panicked"));
        }
    }

    let _ = fs::remove_dir_all(&home);
}
