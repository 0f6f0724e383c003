use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_unreadable_rows_do_not_stop_the_batch() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, caller, student, name, age, amount").unwrap();
    writeln!(file, "pay, 1, , , , 1").unwrap();
    writeln!(file, "frobnicate, 1, 7, , , ").unwrap(); // unknown op
    writeln!(file, "register, not-a-number, 7, Moses, 19, ").unwrap(); // bad caller
    writeln!(file, "register, 1, 7, Moses, 19, ").unwrap();
    writeln!(file, "authorize, 0, 7, , , ").unwrap();

    let mut cmd = Command::new(cargo_bin!("rollcall"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("7,Moses,1,19,true,false"));
}

#[test]
fn test_rejected_rows_leave_prior_state_intact() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, caller, student, name, age, amount").unwrap();
    writeln!(file, "pay, 1, , , , 1").unwrap();
    writeln!(file, "register, 1, 7, Moses, 19, ").unwrap();
    writeln!(file, "authorize, 0, 7, , , ").unwrap();
    // A burst of rejected operations against the same record
    writeln!(file, "register, 2, 8, Ruth, 21, ").unwrap(); // caller 2 never paid
    writeln!(file, "update, 0, 7, , 20, ").unwrap(); // empty name
    writeln!(file, "update, 0, 7, Moses, 17, ").unwrap(); // under age
    writeln!(file, "delete, 1, 7, , , ").unwrap(); // not the admin
    writeln!(file, "authorize, 0, 8, , , ").unwrap(); // never registered

    let mut cmd = Command::new(cargo_bin!("rollcall"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("7,Moses,1,19,true,false"))
        .stdout(predicate::str::contains("8,Ruth").not());
}

#[test]
fn test_empty_batch_produces_empty_roster() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, caller, student, name, age, amount").unwrap();

    let mut cmd = Command::new(cargo_bin!("rollcall"));
    cmd.arg(file.path());

    cmd.assert().success().stdout(predicate::str::is_empty());
}
