//! # spar_core - Hybrid Spar Belt Strength Engine
//!
//! `spar_core` computes the stress state and safety margin of a hybrid spar
//! belt: a metal flange bonded or riveted to a composite skin (or the other
//! way round) under a bending moment. Three load-distribution methods are
//! available, so candidate metal/composite pairings can be compared against
//! a required safety factor.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every analysis is a pure function of its input
//! - **JSON-First**: inputs, results and errors implement Serialize/Deserialize
//! - **Rich Errors**: zero denominators and bad pairings are explicit errors,
//!   never NaN or infinity
//!
//! ## Quick Start
//!
//! ```rust
//! use spar_core::calculations::{AnalysisInput, SafetyAnalysis};
//! use spar_core::elements::{ElementFactory, ElementRole};
//! use spar_core::loads::StrengthFactors;
//! use spar_core::materials::{standard_catalog, Grade, MaterialCategory};
//!
//! let catalog = standard_catalog();
//! let shelf = ElementFactory::new(catalog, MaterialCategory::Metal)
//!     .create(ElementRole::Shelf, &Grade::Number(1))
//!     .unwrap();
//! let panel = ElementFactory::new(catalog, MaterialCategory::Composite)
//!     .create(ElementRole::Panel, &Grade::Number(1))
//!     .unwrap();
//!
//! let input = AnalysisInput::new(shelf, panel, StrengthFactors::new(180.0, 220.0));
//! for method in SafetyAnalysis::ALL {
//!     let result = method.calculate(&input).unwrap();
//!     println!("{}: n = {:?}", method, result.safety_factors());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Material records and catalogs
//! - [`elements`] - Shelf/Panel elements and the element factory
//! - [`loads`] - Strength factors, geometry and load tables
//! - [`calculations`] - The three load-distribution methods
//! - [`comparison`] - Sweeps over grade pairings
//! - [`study`] - Study container, task variants and grade selections
//! - [`errors`] - Structured error types
//! - [`file_io`] - Study and catalog files with atomic saves

pub mod calculations;
pub mod comparison;
pub mod elements;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod study;

// Re-export commonly used types at crate root for convenience
pub use calculations::{AnalysisInput, AnalysisResult, SafetyAnalysis};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_catalog, load_study, save_study};
pub use study::Study;
