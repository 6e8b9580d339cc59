use crate::error::{FireError, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Palette length of the classic effect (intensities 0..=36)
pub const DEFAULT_PALETTE_SIZE: u16 = 37;
/// Delay between ticks in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 60;

/// Direction the flame drifts as it rises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindDirection {
    Left,
    #[default]
    Right,
    None,
}

impl WindDirection {
    /// Next direction in the Left -> Right -> None cycle
    pub fn cycle(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::None,
            Self::None => Self::Left,
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

impl FromStr for WindDirection {
    type Err = FireError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            "none" | "calm" | "n" => Ok(Self::None),
            other => Err(FireError::config(format!(
                "unknown wind direction '{other}' (expected left, right or none)"
            ))),
        }
    }
}

/// Exclusive upper bound of the per-cell decay draw, chosen by grid aspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DecayProfile {
    /// Used when height >= width
    pub portrait: u8,
    /// Used when width > height
    pub landscape: u8,
}

impl Default for DecayProfile {
    fn default() -> Self {
        Self {
            portrait: 3,
            landscape: 2,
        }
    }
}

/// Viewport size in device pixels, as measured by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Grid dimensions when each grid cell covers `pixel_scale` x `pixel_scale` pixels.
    /// Partial cells at the right/bottom edge are rounded up so the whole viewport is covered.
    pub fn grid_size(&self, pixel_scale: usize) -> Result<(usize, usize)> {
        if self.width == 0 || self.height == 0 {
            return Err(FireError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if pixel_scale == 0 {
            return Err(FireError::config("pixel scale must be at least 1"));
        }
        Ok((self.width.div_ceil(pixel_scale), self.height.div_ceil(pixel_scale)))
    }
}

/// Configuration for one fire effect run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    pub wind: WindDirection,
    pub tick_interval_ms: u64,
    pub palette_size: u16,
    pub pixel_scale: usize,
    pub decay: DecayProfile,
    pub seed: Option<u64>,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            wind: WindDirection::default(),
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            palette_size: DEFAULT_PALETTE_SIZE,
            pixel_scale: 1,
            decay: DecayProfile::default(),
            seed: None,
        }
    }
}

impl FireConfig {
    /// Highest intensity a cell can hold
    pub fn max_intensity(&self) -> u8 {
        // validate() keeps palette_size within 2..=256
        self.palette_size.saturating_sub(1).min(u8::MAX as u16) as u8
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(2..=256).contains(&self.palette_size) {
            return Err(FireError::config(format!(
                "palette size {} out of range (2..=256)",
                self.palette_size
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(FireError::config("tick interval must be at least 1ms"));
        }
        if self.pixel_scale == 0 {
            return Err(FireError::config("pixel scale must be at least 1"));
        }
        if self.decay.portrait == 0 || self.decay.landscape == 0 {
            return Err(FireError::config("decay ranges must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_effect() {
        let config = FireConfig::default();
        assert_eq!(config.max_intensity(), 36);
        assert_eq!(config.tick_interval(), Duration::from_millis(60));
        assert_eq!(config.wind, WindDirection::Right);
        assert_eq!(config.decay, DecayProfile { portrait: 3, landscape: 2 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_intensity_for_full_byte_palette() {
        let config = FireConfig { palette_size: 256, ..FireConfig::default() };
        assert_eq!(config.max_intensity(), 255);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            FireConfig { palette_size: 1, ..FireConfig::default() },
            FireConfig { palette_size: 257, ..FireConfig::default() },
            FireConfig { tick_interval_ms: 0, ..FireConfig::default() },
            FireConfig { pixel_scale: 0, ..FireConfig::default() },
            FireConfig {
                decay: DecayProfile { portrait: 0, landscape: 2 },
                ..FireConfig::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(FireError::InvalidConfig(_))), "{config:?}");
        }
    }

    #[test]
    fn test_wind_parse_and_display() {
        assert_eq!("LEFT".parse::<WindDirection>().unwrap(), WindDirection::Left);
        assert_eq!("r".parse::<WindDirection>().unwrap(), WindDirection::Right);
        assert_eq!("calm".parse::<WindDirection>().unwrap(), WindDirection::None);
        assert!("up".parse::<WindDirection>().is_err());
        for wind in [WindDirection::Left, WindDirection::Right, WindDirection::None] {
            assert_eq!(wind.to_string().parse::<WindDirection>().unwrap(), wind);
        }
    }

    #[test]
    fn test_wind_cycle_visits_all() {
        let start = WindDirection::Left;
        assert_eq!(start.cycle(), WindDirection::Right);
        assert_eq!(start.cycle().cycle(), WindDirection::None);
        assert_eq!(start.cycle().cycle().cycle(), start);
    }

    #[test]
    fn test_viewport_grid_size_rounds_up() {
        let viewport = Viewport::new(100, 41);
        assert_eq!(viewport.grid_size(1).unwrap(), (100, 41));
        assert_eq!(viewport.grid_size(4).unwrap(), (25, 11));
    }

    #[test]
    fn test_viewport_rejects_empty() {
        assert!(matches!(
            Viewport::new(0, 10).grid_size(1),
            Err(FireError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(Viewport::new(10, 0).grid_size(1).is_err());
        assert!(Viewport::new(10, 10).grid_size(0).is_err());
    }
}
