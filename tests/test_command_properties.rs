//! Command interpreter and temperature conversion properties.
//!
//! Exhaustive checks over every byte and sweeps over the divider range.

use ntc_monitor::{
    Acknowledgment, Command, DefaultConfig, MonitorConfig, SamplingConfig, SharedSamplingConfig,
    Temperature, ThermistorModel, estimate_celsius, transition,
};

fn all_configs() -> Vec<SamplingConfig> {
    let mut configs = Vec::new();
    for interval_ms in [1000, 2000, 5000] {
        for paused in [false, true] {
            let mut config = SamplingConfig::new();
            config.set_interval_ms(interval_ms).unwrap();
            if paused {
                config.apply(Command::ToggleReporting);
            }
            configs.push(config);
        }
    }
    configs
}

// ============================================================================
// Interpreter Properties
// ============================================================================

#[test]
fn test_every_byte_has_an_acknowledgment() {
    for config in all_configs() {
        for byte in u8::MIN..=u8::MAX {
            let (next, ack) = transition(byte, config);
            let text = ack.to_string();
            assert!(!text.is_empty(), "byte {:#04x}", byte);

            match byte {
                b's' => {
                    assert_eq!(next.reporting_active(), !config.reporting_active());
                    assert_eq!(next.interval_ms(), config.interval_ms());
                }
                b'1' => {
                    assert_eq!(next.interval_ms(), 1000);
                    assert_eq!(next.reporting_active(), config.reporting_active());
                }
                b'2' => {
                    assert_eq!(next.interval_ms(), 2000);
                    assert_eq!(next.reporting_active(), config.reporting_active());
                }
                _ => {
                    assert_eq!(next, config, "byte {:#04x} changed state", byte);
                    assert_eq!(ack, Acknowledgment::IncorrectInput);
                }
            }
        }
    }
}

#[test]
fn test_toggle_twice_restores() {
    for config in all_configs() {
        let (once, first) = transition(b's', config);
        let (twice, second) = transition(b's', once);
        assert_eq!(twice, config);
        assert_ne!(first, second);
    }
}

#[test]
fn test_interval_commands_idempotent() {
    for config in all_configs() {
        for byte in [b'1', b'2'] {
            let (once, ack_once) = transition(byte, config);
            let (twice, ack_twice) = transition(byte, once);
            assert_eq!(once, twice);
            assert_eq!(ack_once, ack_twice);
        }
    }
}

#[test]
fn test_acknowledgment_texts() {
    let active = SamplingConfig::new();
    let (paused, _) = transition(b's', active);

    let cases = [
        (b's', active, "paused"),
        (b's', paused, "resumed"),
        (b'1', active, "interval set to 1 second"),
        (b'2', active, "interval set to 2 seconds"),
        (b'q', active, "incorrect input"),
    ];

    for (byte, config, expected) in cases {
        let (_, ack) = transition(byte, config);
        assert_eq!(ack.to_string(), expected, "byte '{}'", byte as char);
    }
}

#[test]
fn test_shared_config_matches_local_transitions() {
    let bytes = b"s2x1ss2\x00s";
    let shared = SharedSamplingConfig::new(SamplingConfig::new());
    let mut local = SamplingConfig::new();

    for &byte in bytes {
        let (next, ack) = transition(byte, local);
        let interpretation = shared.handle_byte(byte);

        assert_eq!(interpretation.acknowledgment, ack);
        assert_eq!(shared.load(), next);
        local = next;
    }
}

// ============================================================================
// Conversion Properties
// ============================================================================

#[test]
fn test_mid_scale_is_t0() {
    let celsius = estimate_celsius(1650.0, 3300.0, 10_000.0, 3455.0, 298.0)
        .celsius()
        .unwrap();
    assert!((celsius - 24.85).abs() < 1e-3);
}

#[test]
fn test_readings_inside_divider_range_are_defined_and_ordered() {
    let model = ThermistorModel::from_config::<DefaultConfig>();
    let mut previous: Option<f32> = None;

    // 1 mV .. 3299 mV: strictly inside the divider range
    for mv in (1..DefaultConfig::SUPPLY_MV as u32).step_by(7) {
        let temperature = model.estimate(mv as f32, DefaultConfig::SUPPLY_MV);
        let Temperature::Celsius(celsius) = temperature else {
            panic!("{} mV gave {:?}", mv, temperature);
        };
        assert!(celsius.is_finite(), "{} mV gave {}", mv, celsius);

        // Higher divider output means higher resistance, so colder
        if let Some(previous) = previous {
            assert!(celsius < previous, "{} mV: {} !< {}", mv, celsius, previous);
        }
        previous = Some(celsius);
    }
    assert!(previous.is_some());
}

#[test]
fn test_out_of_range_readings_are_undefined() {
    let model = ThermistorModel::from_config::<DefaultConfig>();
    for mv in [0.0, -5.0, 3300.0, 3500.0, f32::NAN, f32::INFINITY] {
        assert!(
            model.estimate(mv, DefaultConfig::SUPPLY_MV).is_undefined(),
            "{} mV should be undefined",
            mv
        );
    }
}
