//! Gyroscope sample-rate presets.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How often the motion source is polled while streaming.
///
/// Two presets rather than a free-form interval: `Fast` is responsive
/// enough for pointing, `Slow` saves battery and halves the packet rate
/// for flaky networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleRate {
    /// 10 ms between samples (100 Hz).
    #[default]
    Fast,
    /// 50 ms between samples (20 Hz).
    Slow,
}

impl SampleRate {
    /// The polling interval this preset stands for.
    pub fn interval(&self) -> Duration {
        match self {
            SampleRate::Fast => Duration::from_millis(10),
            SampleRate::Slow => Duration::from_millis(50),
        }
    }
}

impl FromStr for SampleRate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(SampleRate::Fast),
            "slow" => Ok(SampleRate::Slow),
            other => Err(format!("unknown sample rate '{other}' (expected 'fast' or 'slow')")),
        }
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleRate::Fast => write!(f, "fast"),
            SampleRate::Slow => write!(f, "slow"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_interval_is_10ms() {
        assert_eq!(SampleRate::Fast.interval(), Duration::from_millis(10));
    }

    #[test]
    fn test_slow_interval_is_50ms() {
        assert_eq!(SampleRate::Slow.interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_default_rate_is_fast() {
        assert_eq!(SampleRate::default(), SampleRate::Fast);
    }

    #[test]
    fn test_from_str_accepts_both_presets_case_insensitively() {
        assert_eq!("fast".parse::<SampleRate>().unwrap(), SampleRate::Fast);
        assert_eq!("SLOW".parse::<SampleRate>().unwrap(), SampleRate::Slow);
    }

    #[test]
    fn test_from_str_rejects_unknown_rate() {
        assert!("medium".parse::<SampleRate>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for rate in [SampleRate::Fast, SampleRate::Slow] {
            assert_eq!(rate.to_string().parse::<SampleRate>().unwrap(), rate);
        }
    }
}
