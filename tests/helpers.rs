//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

pub use fixtures::{
    FULL_SCALE_UV, GROUND_UV, MID_SCALE_UV, MockAnalog, MockDelay, MockSerial,
};

use ntc_monitor::{Monitor, TickOutcome};

/// Monitor type used throughout the integration tests.
pub type TestMonitor = Monitor<MockAnalog, MockSerial, MockDelay>;

// ============================================================================
// Monitor Creation Helpers
// ============================================================================

/// Start a monitor over a constant divider voltage, banner cleared.
pub fn create_test_monitor(uv: i32) -> TestMonitor {
    create_monitor_with(MockAnalog::constant(uv))
}

/// Start a monitor over the given channel, banner cleared.
pub fn create_monitor_with(channel: MockAnalog) -> TestMonitor {
    let mut monitor = Monitor::start(channel, MockSerial::new(), MockDelay::new()).unwrap();
    monitor.serial_mut().clear_output();
    monitor
}

// ============================================================================
// Loop Helpers
// ============================================================================

/// Queue `byte`, run one tick and return the outcome.
pub fn tick_with_input(monitor: &mut TestMonitor, byte: u8) -> TickOutcome {
    monitor.serial_mut().push_input(&[byte]);
    monitor.tick().unwrap()
}

/// Run `count` ticks without input.
pub fn run_ticks(monitor: &mut TestMonitor, count: usize) -> Vec<TickOutcome> {
    (0..count).map(|_| monitor.tick().unwrap()).collect()
}

/// Captured output lines, then clear the capture.
pub fn take_lines(monitor: &mut TestMonitor) -> Vec<String> {
    let lines = monitor
        .serial_mut()
        .lines()
        .into_iter()
        .map(str::to_string)
        .collect();
    monitor.serial_mut().clear_output();
    lines
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert that output contains all expected strings.
pub fn assert_contains_all(output: &str, expected: &[&str]) {
    for exp in expected {
        assert!(
            output.contains(exp),
            "Expected '{}' in output, got: {:?}",
            exp,
            output
        );
    }
}

/// Assert that output does NOT contain any of the strings.
pub fn assert_contains_none(output: &str, forbidden: &[&str]) {
    for forbid in forbidden {
        assert!(
            !output.contains(forbid),
            "Did not expect '{}' in output, got: {:?}",
            forbid,
            output
        );
    }
}
