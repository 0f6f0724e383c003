use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_registration_without_payment_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, caller, student, name, age, amount").unwrap();
    writeln!(file, "register, 1, 7, Moses, 19, ").unwrap(); // caller 1 never paid
    writeln!(file, "authorize, 0, 7, , , ").unwrap();

    let mut cmd = Command::new(cargo_bin!("rollcall"));
    cmd.arg(file.path());

    // Nothing made it onto the roster
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Moses").not());
}

#[test]
fn test_paid_sponsor_registers_another_identity() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, caller, student, name, age, amount").unwrap();
    writeln!(file, "pay, 1, , , , 1").unwrap();
    // The payment check is on the caller, so 1 can sponsor identity 7
    writeln!(file, "register, 1, 7, Moses, 19, ").unwrap();
    writeln!(file, "authorize, 0, 7, , , ").unwrap();

    let mut cmd = Command::new(cargo_bin!("rollcall"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("7,Moses,1,19,true,false"));
}

#[test]
fn test_zero_value_fee_does_not_mark_paid() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, caller, student, name, age, amount").unwrap();
    writeln!(file, "pay, 1, , , , 0").unwrap(); // rejected: no value sent
    writeln!(file, "register, 1, 7, Moses, 19, ").unwrap();
    writeln!(file, "authorize, 0, 7, , , ").unwrap();

    let mut cmd = Command::new(cargo_bin!("rollcall"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Moses").not());
}

#[test]
fn test_invalid_registrations_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "op, caller, student, name, age, amount").unwrap();
    writeln!(file, "pay, 1, , , , 1").unwrap();
    writeln!(file, "register, 1, 7, , 19, ").unwrap(); // empty name
    writeln!(file, "register, 1, 8, Ruth, 17, ").unwrap(); // under age
    writeln!(file, "register, 1, 9, Dave, 21, ").unwrap();
    writeln!(file, "register, 1, 9, Dave, 21, ").unwrap(); // already registered
    writeln!(file, "authorize, 0, 7, , , ").unwrap();
    writeln!(file, "authorize, 0, 8, , , ").unwrap();
    writeln!(file, "authorize, 0, 9, , , ").unwrap();

    let mut cmd = Command::new(cargo_bin!("rollcall"));
    cmd.arg(file.path());

    // Only the one valid registration was promoted, and it holds id 1
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("9,Dave,1,21,true,false"))
        .stdout(predicate::str::contains("7,").not())
        .stdout(predicate::str::contains("8,Ruth").not());
}
