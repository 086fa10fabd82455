use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn waves_lists_builtins() {
    Command::cargo_bin("skirmish")
        .unwrap()
        .arg("waves")
        .assert()
        .success()
        .stdout(predicate::str::contains("first_wave").and(predicate::str::contains("Dragon")));
}

#[test]
fn fight_prints_log_and_result() {
    Command::cargo_bin("skirmish")
        .unwrap()
        .args(["fight", "--class", "warrior", "--wave", "first_wave", "--actions", "attack"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[DOWN][Weak Goblin] is defeated")
                .and(predicate::str::contains("[END] Victory"))
                .and(predicate::str::contains("rounds=5 hero_hp=90/120")),
        );
}

#[test]
fn unknown_actions_fall_back_to_attack() {
    Command::cargo_bin("skirmish")
        .unwrap()
        .args(["fight", "--actions", "dance,attack"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[END] Victory"));
}

#[test]
fn play_reads_choices_from_stdin() {
    Command::cargo_bin("skirmish")
        .unwrap()
        .args(["play", "--class", "warrior", "--seed", "7"])
        .write_stdin("1\n".repeat(200))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[END] Victory")
                .and(predicate::str::contains("Game over")),
        );
}

#[test]
fn play_quits_on_q() {
    Command::cargo_bin("skirmish")
        .unwrap()
        .args(["play", "--class", "mage"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[END] Aborted").and(predicate::str::contains("Quit")));
}

#[test]
fn auto_run_emits_json() {
    Command::cargo_bin("skirmish")
        .unwrap()
        .args(["auto", "--class", "rogue", "--seed", "3", "--json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"status\"")
                .and(predicate::str::contains("\"hero_end\"")),
        );
}

#[test]
fn simulate_runs_reports_rates() {
    Command::cargo_bin("simulate-runs")
        .unwrap()
        .args(["--class", "mage", "--trials", "20", "--policy", "balanced"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clear rate:"));
}

#[test]
fn simulate_runs_rejects_unknown_class() {
    Command::cargo_bin("simulate-runs")
        .unwrap()
        .args(["--class", "bard", "--trials", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown hero class"));
}

#[test]
fn simulate_runs_rejects_unknown_policy() {
    Command::cargo_bin("simulate-runs")
        .unwrap()
        .args(["--policy", "balancd", "--trials", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("balancd"));
}
