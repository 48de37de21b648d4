use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("spellcheck"))
}

#[test]
fn build_then_check() {
    let tmp = tempdir().expect("tempdir");
    let dictionary = tmp.path().join("words");
    fs::write(&dictionary, "the\nquick\nbrown\nfox\n").unwrap();
    let saved = tmp.path().join("words.bloom");

    cli_cmd()
        .arg("build")
        .arg("--dictionary")
        .arg(&dictionary)
        .arg("--output")
        .arg(&saved)
        .args(["--bytes-per-hash", "2"])
        .assert()
        .success();
    assert_eq!(16 + 8192, fs::metadata(&saved).unwrap().len());

    cli_cmd()
        .arg("check")
        .arg("--filter")
        .arg(&saved)
        .args(["--bytes-per-hash", "2", "the", "fox"])
        .assert()
        .success()
        .stdout(predicate::str::contains("the: ok").and(predicate::str::contains("fox: ok")));

    cli_cmd()
        .arg("check")
        .arg("--filter")
        .arg(&saved)
        .args(["--bytes-per-hash", "2", "quick", "zzqxv"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("zzqxv: misspelled"));
}

#[test]
fn check_reads_stdin() {
    let tmp = tempdir().expect("tempdir");
    let dictionary = tmp.path().join("words");
    fs::write(&dictionary, "jumped\nover\n").unwrap();

    cli_cmd()
        .arg("check")
        .arg("--dictionary")
        .arg(&dictionary)
        .write_stdin("over\n\n  jumped \n")
        .assert()
        .success()
        .stdout("over: ok\njumped: ok\n");
}

#[test]
fn check_trims_arguments() {
    let tmp = tempdir().expect("tempdir");
    let dictionary = tmp.path().join("words");
    fs::write(&dictionary, "the\nlazy\n").unwrap();

    cli_cmd()
        .arg("check")
        .arg("--dictionary")
        .arg(&dictionary)
        .args([" the", "lazy\t", "  "])
        .assert()
        .success()
        .stdout("the: ok\nlazy: ok\n");
}

#[test]
fn rejects_incompatible_filter() {
    let tmp = tempdir().expect("tempdir");
    let dictionary = tmp.path().join("words");
    fs::write(&dictionary, "lazy\ndog\n").unwrap();
    let saved = tmp.path().join("words.bloom");

    cli_cmd()
        .arg("build")
        .arg("--dictionary")
        .arg(&dictionary)
        .arg("--output")
        .arg(&saved)
        .args(["--bytes-per-hash", "2"])
        .assert()
        .success();

    cli_cmd()
        .arg("check")
        .arg("--filter")
        .arg(&saved)
        .args(["--algorithm", "sha256", "--bytes-per-hash", "2", "dog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incompatible filter"));
}

#[test]
fn rejects_oversized_configuration() {
    let tmp = tempdir().expect("tempdir");
    let dictionary = tmp.path().join("words");
    fs::write(&dictionary, "dog\n").unwrap();

    cli_cmd()
        .arg("check")
        .arg("--dictionary")
        .arg(&dictionary)
        .args(["--bytes-per-hash", "4", "dog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn evaluate_with_seed() {
    let tmp = tempdir().expect("tempdir");
    let dictionary = tmp.path().join("words");
    fs::write(&dictionary, "alpha\nbravo\ncharlie\n").unwrap();

    let run = || {
        cli_cmd()
            .arg("evaluate")
            .arg("--dictionary")
            .arg(&dictionary)
            .args(["--samples", "100", "--seed", "7"])
            .assert()
            .success()
            .stdout(predicate::str::contains("0/100 false positives (0.00%)"))
            .get_output()
            .stdout
            .clone()
    };
    assert_eq!(run(), run());
}
