//! The effect descriptor handed to a rendering surface.
//!
//! A descriptor is an ordered list of filter terms. Its text form is the
//! familiar CSS filter syntax, e.g.
//! `brightness(100%) contrast(100%) saturate(100%) hue-rotate(0deg) blur(0px) ...`.

use std::fmt;

use crate::filter::{FilterName, FilterRegistry, Unit};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectTerm {
    pub filter: FilterName,
    pub amount: f32,
    pub unit: Unit,
}

impl EffectTerm {
    pub fn new(filter: FilterName, amount: f32, unit: Unit) -> Self {
        Self {
            filter,
            amount,
            unit,
        }
    }

    /// Amount as a multiplier: percentages become fractions, angles and lengths stay as-is.
    pub fn scalar(&self) -> f32 {
        match self.unit {
            Unit::Percent => self.amount / 100.0,
            Unit::Degrees | Unit::Pixels => self.amount,
        }
    }

    /// True when applying this term leaves every pixel unchanged.
    pub fn is_identity(&self) -> bool {
        let scalar = self.scalar();
        match self.filter {
            FilterName::Brightness
            | FilterName::Contrast
            | FilterName::Saturation
            | FilterName::Opacity => scalar == 1.0,
            FilterName::HueRotation => scalar.rem_euclid(360.0) == 0.0,
            FilterName::Blur
            | FilterName::Grayscale
            | FilterName::Sepia
            | FilterName::Invert => scalar == 0.0,
        }
    }
}

impl fmt::Display for EffectTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}{})",
            self.filter.function_name(),
            self.amount,
            self.unit.suffix()
        )
    }
}

/// An ordered list of filter terms applied to every subsequent draw
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectDescriptor {
    terms: Vec<EffectTerm>,
}

impl EffectDescriptor {
    /// A descriptor that applies nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// One term per filter, in registry order.
    pub fn from_registry(registry: &FilterRegistry) -> Self {
        Self {
            terms: registry
                .iter()
                .map(|(name, spec)| EffectTerm::new(name, spec.value, spec.unit))
                .collect(),
        }
    }

    pub fn terms(&self) -> &[EffectTerm] {
        &self.terms
    }

    pub fn is_identity(&self) -> bool {
        self.terms.iter().all(EffectTerm::is_identity)
    }
}

impl fmt::Display for EffectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("none");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
