//! Integration tests for the converters, calculators and quotes

#![allow(deprecated)]

use predicates::prelude::*;

mod common;
use common::embedlink_cmd;

#[test]
fn test_convert_base() {
    embedlink_cmd()
        .args(["convert", "base", "0xFF", "--from", "hex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("DEC 255"))
        .stdout(predicate::str::contains("BIN 0b11111111"));
}

#[test]
fn test_convert_bad_digits_exits_3() {
    embedlink_cmd()
        .args(["convert", "base", "102", "--from", "bin"])
        .assert()
        .code(3);
    embedlink_cmd()
        .args(["convert", "base", "1", "--from", "octal"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid base"));
}

#[test]
fn test_text_hex_round_trip_commands() {
    embedlink_cmd()
        .args(["convert", "text-to-hex", "OK"])
        .assert()
        .success()
        .stdout("4F 4B\n");
    embedlink_cmd()
        .args(["convert", "hex-to-text", "4F 4B"])
        .assert()
        .success()
        .stdout("OK\n");
}

#[test]
fn test_baud_calculator() {
    embedlink_cmd()
        .args(["calc", "baud", "--pclk", "72", "--baud", "115200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USARTDIV = 39.0625"))
        .stdout(predicate::str::contains("Error = 0.00%"));
}

#[test]
fn test_baud_too_fast_for_clock_exits_3() {
    embedlink_cmd()
        .args(["calc", "baud", "--pclk", "1", "--baud", "3000000"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("too fast"))
        .stdout(predicate::str::contains("inf").not());
}

#[test]
fn test_timer_calculator_defaults() {
    embedlink_cmd()
        .args(["calc", "timer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Frequency = 1.00 Hz"))
        .stdout(predicate::str::contains("Period = 1000.00 ms"));
}

#[test]
fn test_quote_has_author_line() {
    embedlink_cmd()
        .arg("quote")
        .assert()
        .success()
        .stdout(predicate::str::contains("  - "));
}
