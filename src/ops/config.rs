use crate::ops::error::Error;
use serde::Deserialize;

/// Parameters of a bridge scan.
///
/// Every field has a default, so a TOML file only needs the keys it overrides:
///
/// ```toml
/// radius = 6.0
/// max_waters = 1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Neighborhood (Å) around the source atoms considered for hydrogen bonds.
    pub radius: f64,
    /// Maximum donor–acceptor distance (Å).
    pub max_distance: f64,
    /// Minimum donor–H···acceptor angle (degrees).
    pub min_angle: f64,
    /// Maximum number of bridging residues between source and target.
    pub max_waters: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            max_distance: 3.0,
            min_angle: 120.0,
            max_waters: 2,
        }
    }
}

impl BridgeConfig {
    /// Longest allowed bridge path, counting both end residues.
    pub fn max_steps(&self) -> usize {
        self.max_waters + 2
    }

    pub fn validate(&self) -> Result<(), Error> {
        check_distance("radius", self.radius)?;
        check_distance("max_distance", self.max_distance)?;
        if !(0.0..=180.0).contains(&self.min_angle) {
            return Err(Error::invalid_parameter(
                "min_angle",
                format!("{} is outside [0, 180] degrees", self.min_angle),
            ));
        }
        Ok(())
    }

    /// Parses a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

pub(crate) fn check_distance(name: &'static str, value: f64) -> Result<(), Error> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_parameter(
            name,
            format!("{} is not a finite non-negative distance", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = BridgeConfig::default();

        assert_eq!(config.radius, 5.0);
        assert_eq!(config.max_distance, 3.0);
        assert_eq!(config.min_angle, 120.0);
        assert_eq!(config.max_waters, 2);
        assert_eq!(config.max_steps(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = BridgeConfig::from_toml_str("radius = 6.5\nmax_waters = 0\n").unwrap();

        assert_eq!(config.radius, 6.5);
        assert_eq!(config.max_waters, 0);
        assert_eq!(config.max_distance, 3.0);
        assert_eq!(config.max_steps(), 2);
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        assert!(BridgeConfig::from_toml_str("radiu = 6.5\n").is_err());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let negative = BridgeConfig {
            radius: -1.0,
            ..BridgeConfig::default()
        };
        let nan = BridgeConfig {
            max_distance: f64::NAN,
            ..BridgeConfig::default()
        };
        let angle = BridgeConfig {
            min_angle: 200.0,
            ..BridgeConfig::default()
        };

        for config in [negative, nan, angle] {
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidParameter { .. })
            ));
        }
    }
}
