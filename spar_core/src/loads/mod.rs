//! Load inputs for a spar-belt strength check
//!
//! - [`StrengthFactors`] - bending moment and height term of one load case
//! - [`GeometryParams`] - flange width and panel thickness
//! - [`LoadTable`] - load cases keyed by their handbook variant number
//!
//! # Example
//!
//! ```
//! use spar_core::loads::{GeometryParams, LoadTable, StrengthFactors};
//!
//! let mut table = LoadTable::default();
//! table.insert(12, StrengthFactors::new(180.0, 220.0));
//!
//! let factors = table.get(12).unwrap();
//! assert_eq!(factors.h, 220.0);
//!
//! let geometry = GeometryParams::default();
//! assert_eq!(geometry.flange_width_mm, 100.0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default spar flange width (mm)
pub const DEFAULT_FLANGE_WIDTH_MM: f64 = 100.0;

/// Default skin panel thickness (mm)
pub const DEFAULT_PANEL_THICKNESS_MM: f64 = 2.0;

/// Bending moment and height/shear term for one task variant.
///
/// `m_bend` is given in kN·m; the analysis multiplies it by
/// `AnalysisSettings::load_factor` to reach the N·mm scale. `h` is the
/// spar height in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthFactors {
    /// Bending moment M_bend (kN·m)
    pub m_bend: f64,
    /// Height term H (mm)
    pub h: f64,
}

impl StrengthFactors {
    pub fn new(m_bend: f64, h: f64) -> Self {
        StrengthFactors { m_bend, h }
    }

    /// Both terms must be finite and not negative. A zero `h` passes here
    /// and surfaces as `DivisionByZero` from the analysis.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.m_bend.is_finite() || self.m_bend < 0.0 {
            return Err(CalcError::invalid_input(
                "m_bend",
                self.m_bend.to_string(),
                "Bending moment must be a finite, non-negative number",
            ));
        }
        if !self.h.is_finite() || self.h < 0.0 {
            return Err(CalcError::invalid_input(
                "h",
                self.h.to_string(),
                "Height term must be a finite, non-negative number",
            ));
        }
        Ok(())
    }
}

/// Default section geometry handed to [`ElementFactory`](crate::elements::ElementFactory).
///
/// The analysis itself reads widths and thicknesses from the elements, so
/// these values only matter when elements are built through the factory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryParams {
    /// Spar flange (belt) width in mm
    pub flange_width_mm: f64,
    /// Skin panel thickness in mm
    pub panel_thickness_mm: f64,
}

impl GeometryParams {
    pub fn new(flange_width_mm: f64, panel_thickness_mm: f64) -> Self {
        GeometryParams {
            flange_width_mm,
            panel_thickness_mm,
        }
    }

    /// Both dimensions must be finite and not negative.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.flange_width_mm.is_finite() || self.flange_width_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "flange_width_mm",
                self.flange_width_mm.to_string(),
                "Flange width must be a finite, non-negative number",
            ));
        }
        if !self.panel_thickness_mm.is_finite() || self.panel_thickness_mm < 0.0 {
            return Err(CalcError::invalid_input(
                "panel_thickness_mm",
                self.panel_thickness_mm.to_string(),
                "Panel thickness must be a finite, non-negative number",
            ));
        }
        Ok(())
    }
}

impl Default for GeometryParams {
    fn default() -> Self {
        GeometryParams {
            flange_width_mm: DEFAULT_FLANGE_WIDTH_MM,
            panel_thickness_mm: DEFAULT_PANEL_THICKNESS_MM,
        }
    }
}

/// Load cases keyed by handbook variant number.
///
/// Serializes as a JSON object; keys are written as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadTable(BTreeMap<u32, StrengthFactors>);

impl LoadTable {
    pub fn insert(&mut self, load_case: u32, factors: StrengthFactors) -> Option<StrengthFactors> {
        self.0.insert(load_case, factors)
    }

    /// Look up one load case
    pub fn get(&self, load_case: u32) -> CalcResult<StrengthFactors> {
        self.0
            .get(&load_case)
            .copied()
            .ok_or(CalcError::LoadCaseNotFound { load_case })
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &StrengthFactors)> {
        self.0.iter().map(|(id, factors)| (*id, factors))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(u32, StrengthFactors)> for LoadTable {
    fn from_iter<I: IntoIterator<Item = (u32, StrengthFactors)>>(iter: I) -> Self {
        LoadTable(iter.into_iter().collect())
    }
}
