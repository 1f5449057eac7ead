use assert_cmd::Command;
use predicates::prelude::*;

fn inkflow() -> Command {
    let mut cmd = Command::cargo_bin("inkflow").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("NEXT_PUBLIC_API_BASE_URL")
        .env_remove("INKFLOW_USER_ID");
    cmd
}

#[test]
fn test_help_lists_board_commands() {
    inkflow()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tasks"))
        .stdout(predicate::str::contains("advance"))
        .stdout(predicate::str::contains("claim"));
}

#[test]
fn test_stages_prints_catalog_in_order() {
    inkflow()
        .arg("stages")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"(?s)TO_DO.*GRAPHICS.*PRINTING.*CUTTING.*FINISHING.*PACKING.*DONE.*STANDBY.*CANCELLED").unwrap());
}

#[test]
fn test_no_subcommand_explains_how_to_get_work() {
    inkflow()
        .assert()
        .success()
        .stdout(predicate::str::contains("inkflow tasks"));
}

#[test]
fn test_advance_rejects_unknown_stage() {
    inkflow()
        .args(["advance", "o1", "i1", "laminating"])
        .env("NEXT_PUBLIC_API_BASE_URL", "http://127.0.0.1:9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Known stages"));
}
