use crate::robot::link::RobotLink;
use crate::error::Result;
use std::collections::HashMap;

/// Proximity thresholds for the infrared sensors.
///
/// The sensing service reports opaque monotonic "closeness" scores, not
/// calibrated distances: higher means a nearer obstacle. The values below
/// match the simulator's observed range.
pub const SENSOR_SAFE: f64 = 10_000.0;
pub const SENSOR_WARNING: f64 = 30_000.0;
pub const SENSOR_CRITICAL: f64 = 50_000.0;

/// Classification of a front-proximity reading against the fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityBand {
    /// Below SAFE: clear path ahead.
    Clear,
    /// Between SAFE and WARNING: acceptable distance.
    Caution,
    /// Between WARNING and CRITICAL: too close, should turn away.
    Close,
    /// Above CRITICAL: collision range.
    Critical,
}

impl ProximityBand {
    pub fn of(reading: f64) -> Self {
        if reading > SENSOR_CRITICAL {
            Self::Critical
        } else if reading >= SENSOR_WARNING {
            Self::Close
        } else if reading >= SENSOR_SAFE {
            Self::Caution
        } else {
            Self::Clear
        }
    }
}

/// Reduce a raw sensor sweep to the strongest front-facing reading.
///
/// Only entries whose identifier names a front sensor count. An empty sweep
/// (or one with no front sensors) reduces to 0.0, treated as "no obstacle"
/// rather than a fault.
pub fn front_reading(sweep: &HashMap<String, f64>) -> f64 {
    sweep
        .iter()
        .filter(|(id, _)| id.contains("Front"))
        .map(|(_, value)| *value)
        .fold(0.0, f64::max)
}

/// One settled front-proximity probe: settle, read the sweep, settle again,
/// reduce. The settling delays bracket every read to respect the service's
/// throughput limits.
pub fn probe_front(link: &mut dyn RobotLink, settle_s: f64) -> Result<f64> {
    link.wait(settle_s);
    let sweep = link.read_ir_sensors()?;
    link.wait(settle_s);

    if sweep.is_empty() {
        log::warn!("empty IR sweep, treating as no obstacle");
        return Ok(0.0);
    }

    Ok(front_reading(&sweep))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_front_reading_takes_max_of_front_sensors() {
        let s = sweep(&[
            ("Front-C", 12_000.0),
            ("Front-L", 34_000.0),
            ("Front-R", 8_000.0),
            ("Back-C", 90_000.0),
        ]);
        assert_eq!(front_reading(&s), 34_000.0);
    }

    #[test]
    fn test_front_reading_ignores_non_front_sensors() {
        let s = sweep(&[("Back-L", 70_000.0), ("Back-R", 55_000.0)]);
        assert_eq!(front_reading(&s), 0.0);
    }

    #[test]
    fn test_front_reading_empty_sweep_is_zero() {
        assert_eq!(front_reading(&HashMap::new()), 0.0);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ProximityBand::of(0.0), ProximityBand::Clear);
        assert_eq!(ProximityBand::of(9_999.0), ProximityBand::Clear);
        assert_eq!(ProximityBand::of(10_000.0), ProximityBand::Caution);
        assert_eq!(ProximityBand::of(29_999.0), ProximityBand::Caution);
        assert_eq!(ProximityBand::of(30_000.0), ProximityBand::Close);
        assert_eq!(ProximityBand::of(50_000.0), ProximityBand::Close);
        assert_eq!(ProximityBand::of(50_001.0), ProximityBand::Critical);
    }
}
