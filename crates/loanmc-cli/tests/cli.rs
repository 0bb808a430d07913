//! End-to-end tests of the `loanmc` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `loanmc` command isolated from the user's configuration.
fn loanmc(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("loanmc").unwrap();
    cmd.env_remove("LOANMC_CONFIG")
        .env_remove("RUST_LOG")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn small_run(cmd: &mut Command) -> &mut Command {
    cmd.args(["--loans", "10", "-n", "200", "--seed", "7", "--sequential"])
}

#[test]
fn test_text_report_block() {
    let home = TempDir::new().unwrap();
    let output = small_run(loanmc(home.path()).args(["simulate", "--format", "text"]))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("Monte Carlo DCF Valuation for Loan Portfolio"));
    assert_eq!(lines[1], "Number of Loans: 10");
    assert_eq!(lines[2], "Simulations: 200");
    assert!(lines[3].starts_with("Mean Portfolio Value: $"));
    assert!(lines[7].starts_with("95th Percentile Portfolio Value (Upside Potential): $"));
}

#[test]
fn test_same_seed_same_output() {
    let home = TempDir::new().unwrap();
    let run = || {
        small_run(loanmc(home.path()).args(["simulate", "-f", "minimal"]))
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_minimal_output_is_a_number() {
    let home = TempDir::new().unwrap();
    let output = small_run(loanmc(home.path()).args(["simulate", "-f", "minimal"]))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let mean: f64 = String::from_utf8(output).unwrap().trim().parse().unwrap();
    // ten loans of 10k
    assert!(mean > 80_000.0 && mean < 120_000.0, "mean {mean}");
}

#[test]
fn test_json_output() {
    let home = TempDir::new().unwrap();
    let output = small_run(loanmc(home.path()).args(["simulate", "-f", "json", "--histogram"]))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(value["report"]["seed"], 7);
    assert_eq!(value["report"]["simulations"], 200);
    assert!(value["value_histogram"]["bins"].is_array());
}

#[test]
fn test_zero_simulations_rejected() {
    let home = TempDir::new().unwrap();
    loanmc(home.path())
        .args(["simulate", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("simulations"));
}

#[test]
fn test_config_init_then_validate() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("conf").join("loanmc.toml");
    let path_arg = path.to_str().unwrap();

    loanmc(home.path())
        .args(["config", "init", path_arg, "--quick"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(path.exists());

    loanmc(home.path())
        .args(["config", "validate", path_arg])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));

    loanmc(home.path())
        .args(["config", "init", path_arg])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    loanmc(home.path())
        .args(["config", "init", path_arg, "--force"])
        .assert()
        .success();
}

#[test]
fn test_validate_rejects_bad_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("bad.toml");
    std::fs::write(&path, "[simulation]\nsimulations = 0\n").unwrap();

    loanmc(home.path())
        .args(["config", "validate", path.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn test_config_file_with_flag_override() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("run.toml");
    std::fs::write(
        &path,
        r#"
[simulation]
simulations = 150
seed = 11
parallel = false

[[portfolio.tranches]]
name = "auto"
count = 4
principal = 20000.0
annual_rate = 0.07
term_years = 5
default_probability = 0.03
prepay_probability = 0.08
"#,
    )
    .unwrap();

    let output = loanmc(home.path())
        .args(["--config", path.to_str().unwrap(), "simulate", "-f", "json"])
        .args(["-n", "120"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["report"]["loan_count"], 4);
    assert_eq!(value["report"]["simulations"], 120);
    assert_eq!(value["report"]["seed"], 11);
}

#[test]
fn test_simulate_from_tape() {
    let home = TempDir::new().unwrap();
    let tape = home.path().join("book.csv");
    std::fs::write(
        &tape,
        "name,count,principal,annual_rate,term_years,default_probability,prepay_probability\n\
         prime,6,10000,0.09,10,0.01,0.05\n\
         subprime,3,5000,0.18,4,0.08,0.02\n",
    )
    .unwrap();

    loanmc(home.path())
        .args(["simulate", "-f", "text", "-n", "100", "--seed", "1", "--sequential"])
        .args(["--tape", tape.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of Loans: 9"));
}

#[test]
fn test_stress_single_scenario() {
    let home = TempDir::new().unwrap();
    let output = small_run(loanmc(home.path()).args(["stress", "-f", "json"]))
        .args(["--scenario", "Rates +200bp"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

    let results = value["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["scenario_name"], "Rates +200bp");
    assert!(results[0]["mean_change"].as_f64().unwrap() < 0.0);
}

#[test]
fn test_stress_unknown_scenario() {
    let home = TempDir::new().unwrap();
    small_run(loanmc(home.path()).args(["stress", "--scenario", "Meteor"]))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Meteor"));
}

#[test]
fn test_schedule_csv() {
    let home = TempDir::new().unwrap();
    let output = loanmc(home.path())
        .args(["schedule", "-f", "csv"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    // header plus ten years
    assert_eq!(lines.len(), 11);
    assert!(lines[0].starts_with("year,payment"));
    assert!(lines[1].starts_with("1,1627.45"));
}

#[test]
fn test_config_scenarios_lists_standard_set() {
    let home = TempDir::new().unwrap();
    loanmc(home.path())
        .args(["config", "scenarios", "-f", "minimal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Severe Recession"))
        .stdout(predicate::str::contains("Baseline"));
}

/// Writes an unparsable file wherever `dirs::config_dir` points for `home`.
fn plant_broken_default_config(home: &Path) -> Vec<std::path::PathBuf> {
    [
        home.join(".config"),
        home.join("Library").join("Application Support"),
    ]
    .into_iter()
    .map(|dir| {
        let path = dir.join("loanmc").join("config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[simulation").unwrap();
        path
    })
    .collect()
}

#[test]
fn test_broken_default_config_can_be_repaired() {
    let home = TempDir::new().unwrap();
    let planted = plant_broken_default_config(home.path());

    loanmc(home.path())
        .args(["simulate", "-n", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));

    let other = home.path().join("other.toml");
    std::fs::write(&other, "[simulation]\nsimulations = 100\n").unwrap();
    loanmc(home.path())
        .args(["config", "validate", other.to_str().unwrap()])
        .assert()
        .success();

    loanmc(home.path())
        .args(["config", "init", "--force"])
        .assert()
        .success();

    // whichever planted file is the real default has been rewritten
    assert!(planted
        .iter()
        .any(|p| std::fs::read_to_string(p).unwrap().contains("[simulation]")));
    small_run(loanmc(home.path()).args(["simulate", "-f", "minimal"]))
        .assert()
        .success();
}

#[test]
fn test_quiet_silences_status_messages() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("quiet.toml");

    loanmc(home.path())
        .args(["--quiet", "config", "init", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert!(path.exists());
}
