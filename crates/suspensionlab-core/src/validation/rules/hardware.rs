//! Sensor hardware against the capture session profile.

use crate::validation::{RuleId, ValidationFinding, ValidationRule};

use super::RuleInput;

/// Sensors cannot be asked to report faster than they capture.
pub struct SampleRateRule;

impl ValidationRule for SampleRateRule {
    fn id(&self) -> RuleId {
        RuleId::HardwareSampleRate
    }

    fn description(&self) -> &'static str {
        "Hardware recording frequency is at least the session sample rate"
    }

    fn evaluate(&self, input: &RuleInput<'_>, findings: &mut Vec<ValidationFinding>) {
        let recording_freq = input.bike.hardware.recording_freq;
        let sample_rate = input.session.sample_rate;

        if recording_freq < sample_rate {
            findings.push(
                ValidationFinding::error(
                    RuleId::HardwareSampleRate,
                    "hardware.recording_freq",
                    format!(
                        "Recording frequency {} Hz is below the session sample rate {} Hz",
                        recording_freq, sample_rate
                    ),
                )
                .with_expected(format!(">= {} Hz", sample_rate))
                .with_actual(format!("{} Hz", recording_freq))
                .with_suggestion("Lower the session sample rate or raise the logger frequency"),
            );
        }
    }
}

/// Basic sanity of the capture profile and hardware counts.
pub struct CaptureProfileRule;

impl ValidationRule for CaptureProfileRule {
    fn id(&self) -> RuleId {
        RuleId::CaptureProfile
    }

    fn description(&self) -> &'static str {
        "Sample rate, recording frequency and sensor counts are usable and agree"
    }

    fn evaluate(&self, input: &RuleInput<'_>, findings: &mut Vec<ValidationFinding>) {
        let hardware = &input.bike.hardware;
        let session = input.session;

        if session.sample_rate == 0 {
            findings.push(
                ValidationFinding::error(
                    RuleId::CaptureProfile,
                    "session.sample_rate",
                    "Session sample rate must be greater than 0 Hz",
                )
                .with_expected("> 0"),
            );
        }

        if hardware.recording_freq == 0 {
            findings.push(
                ValidationFinding::error(
                    RuleId::CaptureProfile,
                    "hardware.recording_freq",
                    "Recording frequency must be greater than 0 Hz",
                )
                .with_expected("> 0"),
            );
        }

        if hardware.expected_sensors == 0 {
            findings.push(
                ValidationFinding::error(
                    RuleId::CaptureProfile,
                    "hardware.expected_sensors",
                    "At least one sensor must be expected",
                )
                .with_expected(">= 1"),
            );
        } else if session.sensor_count != hardware.expected_sensors {
            findings.push(
                ValidationFinding::warning(
                    RuleId::CaptureProfile,
                    "session.sensor_count",
                    format!(
                        "Session captures {} sensor(s) but the hardware expects {}",
                        session.sensor_count, hardware.expected_sensors
                    ),
                )
                .with_expected(hardware.expected_sensors.to_string())
                .with_actual(session.sensor_count.to_string()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Config, FrameGeometry, HardwareConfig};
    use crate::validation::rules::fixtures;

    fn run(
        rule: &dyn ValidationRule,
        hardware: HardwareConfig,
        session: Config,
    ) -> Vec<ValidationFinding> {
        let mut bike = fixtures::bike(FrameGeometry::rigid());
        bike.hardware = hardware;
        let mut findings = Vec::new();
        rule.evaluate(
            &RuleInput {
                bike: &bike,
                session: &session,
            },
            &mut findings,
        );
        findings
    }

    #[test]
    fn test_recording_below_sample_rate() {
        let findings = run(&SampleRateRule, HardwareConfig::new(2, 500), Config::new(2, 1000));
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_blocking());
    }

    #[test]
    fn test_equal_rates_pass() {
        let findings = run(&SampleRateRule, HardwareConfig::new(2, 1000), Config::new(2, 1000));
        assert!(findings.is_empty());
    }

    #[test]
    fn test_zero_profile_values() {
        let findings = run(&CaptureProfileRule, HardwareConfig::new(0, 0), Config::new(0, 0));
        assert_eq!(findings.len(), 3);
        assert!(findings.iter().all(|f| f.is_blocking()));
    }

    #[test]
    fn test_sensor_count_mismatch_warns() {
        let findings = run(&CaptureProfileRule, HardwareConfig::new(3, 1000), Config::new(2, 1000));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].field_path, "session.sensor_count");
        assert!(!findings[0].is_blocking());
    }
}
