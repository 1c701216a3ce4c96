use std::process::Command;

fn trigger_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shutter-trigger"))
}

#[test]
fn test_wrong_argument_count_exits_zero() {
    let output = trigger_bin().args(["30", "10"]).output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Not enough arguments: 3 required"));
}

#[test]
fn test_no_arguments_exits_zero() {
    let output = trigger_bin().output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Not enough arguments: 3 required"));
}

#[test]
fn test_too_many_arguments_exits_zero() {
    let output = trigger_bin().args(["30", "10", "2", "7"]).output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Not enough arguments: 3 required"));
}

// No Raspberry Pi GPIO controller exists on these hosts, so opening the lines must fail.
#[cfg(not(any(target_arch = "arm", target_arch = "aarch64")))]
#[test]
fn test_gpio_setup_failure_exits_one() {
    let output = trigger_bin().args(["1", "1", "1"]).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Error: GPIO setup failed"));
    assert!(!stdout.contains("Photo 1/1"));
}

#[test]
fn test_invalid_number_fails() {
    let output = trigger_bin().args(["30", "ten", "2"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_dry_run_completes() {
    let dir = tempfile::TempDir::new().unwrap();
    let progress = dir.path().join("progress.json");

    let output = trigger_bin()
        .args(["2", "3", "500ms", "--dry-run", "--progress-file"])
        .arg(&progress)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Photo 1/3"));
    assert!(stdout.contains("Photo 3/3"));
    assert!(!stdout.contains("Photo 4/3"));
    assert!(stdout.contains("GPIO released"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(progress).unwrap()).unwrap();
    assert_eq!(saved["taken"], 3);
}

#[test]
fn test_same_pin_for_both_lines_fails() {
    let output = trigger_bin()
        .args(["1", "1", "1", "--dry-run", "--shutter-pin", "20"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
