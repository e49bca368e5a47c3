use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};

/// The closed set of filters, in the order they are displayed and composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterName {
    Brightness,
    Contrast,
    Saturation,
    HueRotation,
    Blur,
    Grayscale,
    Sepia,
    Opacity,
    Invert,
}

impl FilterName {
    pub const ALL: [FilterName; 9] = [
        FilterName::Brightness,
        FilterName::Contrast,
        FilterName::Saturation,
        FilterName::HueRotation,
        FilterName::Blur,
        FilterName::Grayscale,
        FilterName::Sepia,
        FilterName::Opacity,
        FilterName::Invert,
    ];

    /// Identifier used for control labels and preset tables
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturation",
            Self::HueRotation => "hueRotation",
            Self::Blur => "blur",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Opacity => "opacity",
            Self::Invert => "invert",
        }
    }

    /// Function name used in the effect descriptor
    pub fn function_name(self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturation => "saturate",
            Self::HueRotation => "hue-rotate",
            Self::Blur => "blur",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Opacity => "opacity",
            Self::Invert => "invert",
        }
    }

    /// The single source of truth for every filter's default value, bounds and unit.
    pub fn default_spec(self) -> FilterSpec {
        match self {
            Self::Brightness | Self::Contrast | Self::Saturation => {
                FilterSpec::new(100.0, 0.0, 200.0, Unit::Percent)
            }
            Self::HueRotation => FilterSpec::new(0.0, 0.0, 360.0, Unit::Degrees),
            Self::Blur => FilterSpec::new(0.0, 0.0, 20.0, Unit::Pixels),
            Self::Grayscale | Self::Sepia | Self::Invert => {
                FilterSpec::new(0.0, 0.0, 100.0, Unit::Percent)
            }
            Self::Opacity => FilterSpec::new(100.0, 0.0, 100.0, Unit::Percent),
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FilterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for FilterName {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name == "hue-rotation" {
            return Ok(Self::HueRotation);
        }
        Self::ALL
            .into_iter()
            .find(|filter| filter.identifier() == name)
            .ok_or_else(|| EditorError::UnknownFilter(name.to_owned()))
    }
}

/// Suffix appended to a value when composing the effect descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    Percent,
    Degrees,
    Pixels,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Degrees => "deg",
            Self::Pixels => "px",
        }
    }
}

/// Current value of one filter together with its inclusive bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub unit: Unit,
}

impl FilterSpec {
    pub fn new(value: f32, min: f32, max: f32, unit: Unit) -> Self {
        Self {
            value,
            min,
            max,
            unit,
        }
    }

    /// Brings `value` into `[min, max]`. Angles outside the bounds are first
    /// wrapped into a single turn.
    pub fn constrain(&self, value: f32) -> f32 {
        let value = match self.unit {
            Unit::Degrees if value < self.min || value > self.max => value.rem_euclid(360.0),
            _ => value,
        };
        value.clamp(self.min, self.max)
    }
}

/// Ordered registry of the nine filters and their current settings.
///
/// The registry never triggers rendering; callers run the render pipeline
/// after mutating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRegistry {
    entries: [FilterSpec; 9],
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self {
            entries: FilterName::ALL.map(FilterName::default_spec),
        }
    }
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: FilterName) -> FilterSpec {
        self.entries[name.index()]
    }

    /// Sets a filter value, clamped to the filter's bounds.
    ///
    /// Returns the value actually stored.
    pub fn set(&mut self, name: FilterName, value: f32) -> EditorResult<f32> {
        if !value.is_finite() {
            return Err(EditorError::NonFiniteValue {
                name: name.identifier(),
                value,
            });
        }
        let entry = &mut self.entries[name.index()];
        entry.value = entry.constrain(value);
        Ok(entry.value)
    }

    /// Restores value, bounds and unit of every entry.
    pub fn reset_to_defaults(&mut self) {
        self.entries = FilterName::ALL.map(FilterName::default_spec);
    }

    /// Restores every value to its default, leaving bounds and unit as they are.
    pub fn reset_values(&mut self) {
        for name in FilterName::ALL {
            let default = name.default_spec().value;
            let entry = &mut self.entries[name.index()];
            entry.value = entry.constrain(default);
        }
    }

    /// Replaces the value of each filter named in `overrides`.
    ///
    /// Nothing is changed if any override is non-finite.
    pub fn overlay(&mut self, overrides: &[(FilterName, f32)]) -> EditorResult<()> {
        if let Some(&(name, value)) = overrides.iter().find(|(_, value)| !value.is_finite()) {
            return Err(EditorError::NonFiniteValue {
                name: name.identifier(),
                value,
            });
        }
        for &(name, value) in overrides {
            let entry = &mut self.entries[name.index()];
            entry.value = entry.constrain(value);
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterName, FilterSpec)> + '_ {
        FilterName::ALL
            .into_iter()
            .map(move |name| (name, self.get(name)))
    }

    pub fn values(&self) -> [f32; 9] {
        self.entries.map(|entry| entry.value)
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
