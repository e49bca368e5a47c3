use crate::error::{EditorError, EditorResult};
use crate::filter::FilterName;
use crate::filter::FilterName::*;

/// A named, partial set of filter values applied on top of the defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    name: &'static str,
    overrides: &'static [(FilterName, f32)],
}

impl Preset {
    pub const fn new(name: &'static str, overrides: &'static [(FilterName, f32)]) -> Self {
        Self { name, overrides }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn overrides(&self) -> &'static [(FilterName, f32)] {
        self.overrides
    }

    pub fn override_for(&self, filter: FilterName) -> Option<f32> {
        self.overrides
            .iter()
            .find(|(name, _)| *name == filter)
            .map(|&(_, value)| value)
    }
}

const BUILTIN_PRESETS: &[Preset] = &[
    Preset::new("drama", &[(Brightness, 120.0), (Contrast, 150.0), (Saturation, 60.0)]),
    Preset::new("vintage", &[(Sepia, 70.0), (Contrast, 90.0), (Brightness, 110.0)]),
    Preset::new("oldSchool", &[(Grayscale, 100.0), (Contrast, 120.0)]),
    Preset::new("cyberpunk", &[(HueRotation, 180.0), (Saturation, 150.0), (Brightness, 110.0)]),
    Preset::new("softGlow", &[(Blur, 2.0), (Brightness, 110.0)]),
    Preset::new("noir", &[(Grayscale, 100.0), (Contrast, 180.0), (Brightness, 80.0)]),
    Preset::new("warmSunset", &[(Sepia, 40.0), (Saturation, 140.0), (HueRotation, -10.0)]),
    Preset::new("coolTone", &[(HueRotation, 190.0), (Saturation, 80.0)]),
    Preset::new("faded", &[(Opacity, 80.0), (Brightness, 110.0), (Contrast, 90.0)]),
];

/// Read-only table of presets, kept in display order
#[derive(Debug, Clone)]
pub struct PresetTable {
    presets: Vec<Preset>,
}

impl Default for PresetTable {
    fn default() -> Self {
        Self {
            presets: BUILTIN_PRESETS.to_vec(),
        }
    }
}

impl PresetTable {
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> EditorResult<&Preset> {
        self.presets
            .iter()
            .find(|preset| preset.name == name)
            .ok_or_else(|| EditorError::UnknownPreset(name.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.presets.iter().map(Preset::name)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_order() {
        let table = PresetTable::builtin();
        let names: Vec<_> = table.names().collect();
        assert_eq!(
            names,
            [
                "drama",
                "vintage",
                "oldSchool",
                "cyberpunk",
                "softGlow",
                "noir",
                "warmSunset",
                "coolTone",
                "faded"
            ]
        );
    }

    #[test]
    fn test_lookup() {
        let table = PresetTable::builtin();
        let noir = table.get("noir").unwrap();
        assert_eq!(noir.override_for(FilterName::Contrast), Some(180.0));
        assert_eq!(noir.override_for(FilterName::Sepia), None);

        assert!(matches!(
            table.get("sunrise"),
            Err(EditorError::UnknownPreset(name)) if name == "sunrise"
        ));
    }
}
