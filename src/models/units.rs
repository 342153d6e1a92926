use serde::{Deserialize, Serialize};

const MPH_PER_MPS: f64 = 2.236_936;

/// Unit a swing speed arrives in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedUnit {
    #[default]
    Mph,
    /// Meters per second
    Mps,
}

/// Unit-tagged speed, converted to mph before scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Speed {
    pub value: f64,
    pub unit: SpeedUnit,
}

impl Speed {
    pub fn new(value: f64, unit: SpeedUnit) -> Self {
        Self { value, unit }
    }

    pub fn to_mph(self) -> f64 {
        match self.unit {
            SpeedUnit::Mph => self.value,
            SpeedUnit::Mps => self.value * MPH_PER_MPS,
        }
    }

    /// Whole mph, saturating at the u16 bounds
    pub fn whole_mph(self) -> u16 {
        self.to_mph().round().clamp(0.0, u16::MAX as f64) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mps_conversion() {
        let speed = Speed::new(40.0, SpeedUnit::Mps);
        assert_eq!(speed.whole_mph(), 89);
    }

    #[test]
    fn test_mph_passthrough() {
        assert_eq!(Speed::new(95.4, SpeedUnit::Mph).whole_mph(), 95);
    }
}
