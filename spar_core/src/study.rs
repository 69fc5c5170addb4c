//! # Study Data Structures
//!
//! A `Study` is the root container for one comparison exercise: the
//! material catalog, the load cases of the loading handbook and the task
//! variants that say which grades each group has to compare. Studies
//! serialize to `.spar` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Study
//! ├── meta: StudyMetadata (version, author, group, timestamps)
//! ├── settings: StudySettings (geometry, numeric conventions, required n)
//! ├── catalog: MaterialCatalog (metals, composites)
//! ├── load_cases: LoadTable (handbook variant -> M_bend, H)
//! └── tasks: Vec<TaskVariant> (task number -> load case, group grades)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use spar_core::study::Study;
//!
//! let study = Study::template("Student", "402");
//! let assignment = study.assignment(7, "402").unwrap();
//! assert_eq!(assignment.metal_grades.len(), 3);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{AnalysisSettings, SafetyAnalysis};
use crate::comparison::{ComparisonRequest, Orientation};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{GeometryParams, LoadTable, StrengthFactors};
use crate::materials::{standard_catalog, Grade, MaterialCatalog};

/// Current schema version for .spar files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root study container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Study {
    pub meta: StudyMetadata,
    #[serde(default)]
    pub settings: StudySettings,
    pub catalog: MaterialCatalog,
    #[serde(default)]
    pub load_cases: LoadTable,
    #[serde(default)]
    pub tasks: Vec<TaskVariant>,
}

impl Study {
    /// Create an empty study.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spar_core::study::Study;
    ///
    /// let study = Study::new("Jane Student", "402");
    /// assert_eq!(study.meta.group, "402");
    /// assert!(study.tasks.is_empty());
    /// ```
    pub fn new(author: impl Into<String>, group: impl Into<String>) -> Self {
        let now = Utc::now();
        Study {
            meta: StudyMetadata {
                version: SCHEMA_VERSION.to_string(),
                author: author.into(),
                group: group.into(),
                created: now,
                modified: now,
            },
            settings: StudySettings::default(),
            catalog: MaterialCatalog::default(),
            load_cases: LoadTable::default(),
            tasks: Vec::new(),
        }
    }

    /// A ready-to-run study on the built-in catalog with one load case and
    /// one task variant for `group`.
    pub fn template(author: impl Into<String>, group: impl Into<String>) -> Self {
        let group = group.into();
        let mut study = Study::new(author, group.clone());
        study.catalog = standard_catalog().clone();
        study.load_cases.insert(12, StrengthFactors::new(180.0, 220.0));

        let mut groups = BTreeMap::new();
        groups.insert(
            group,
            GroupAssignment {
                metal_grades: GradeSelection::List(vec![Grade::Number(1), Grade::Number(3), Grade::Number(5)]),
                composite_grades: GradeSelection::Range { from: 1, to: 4 },
            },
        );
        study.tasks.push(TaskVariant {
            number: 7,
            load_case: 12,
            groups,
        });
        study
    }

    /// Find a task variant by number
    pub fn task(&self, number: u32) -> CalcResult<&TaskVariant> {
        self.tasks
            .iter()
            .find(|task| task.number == number)
            .ok_or_else(|| CalcError::TaskNotFound {
                task: format!("task {}", number),
            })
    }

    /// Resolve the load case and both grade lists of `group` in `task`.
    ///
    /// # Errors
    ///
    /// * `TaskNotFound` - no such task, or the task has no entry for `group`
    /// * `LoadCaseNotFound` - the task points at a missing load case
    pub fn assignment(&self, task: u32, group: &str) -> CalcResult<Assignment> {
        let variant = self.task(task)?;
        let grades = variant.groups.get(group).ok_or_else(|| CalcError::TaskNotFound {
            task: format!("task {} / group {}", task, group),
        })?;
        let factors = self.load_cases.get(variant.load_case)?;

        Ok(Assignment {
            task,
            group: group.to_string(),
            factors,
            metal_grades: grades.metal_grades.grades(),
            composite_grades: grades.composite_grades.grades(),
        })
    }

    /// Build the comparison sweep for one assignment using this study's
    /// catalog and settings.
    pub fn comparison_request(&self, task: u32, group: &str) -> CalcResult<ComparisonRequest<'_>> {
        let assignment = self.assignment(task, group)?;
        Ok(ComparisonRequest {
            catalog: &self.catalog,
            metal_grades: assignment.metal_grades,
            composite_grades: assignment.composite_grades,
            factors: assignment.factors,
            orientation: self.settings.orientation,
            methods: self.settings.methods.clone(),
            geometry: self.settings.geometry,
            analysis: self.settings.analysis,
            required_safety_factor: self.settings.required_safety_factor,
        })
    }

    /// Validate catalog, load cases and geometry.
    pub fn validate(&self) -> CalcResult<()> {
        self.catalog.validate()?;
        self.settings.geometry.validate()?;
        for (_, factors) in self.load_cases.iter() {
            factors.validate()?;
        }
        Ok(())
    }
}

/// Study metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// Who prepared the study
    pub author: String,
    /// Study group the default assignment belongs to
    pub group: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Study-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySettings {
    pub geometry: GeometryParams,
    pub analysis: AnalysisSettings,
    /// Safety factor both elements must reach for a pairing to pass
    pub required_safety_factor: f64,
    pub orientation: Orientation,
    /// Methods run for every pairing
    pub methods: Vec<SafetyAnalysis>,
}

impl Default for StudySettings {
    fn default() -> Self {
        StudySettings {
            geometry: GeometryParams::default(),
            analysis: AnalysisSettings::default(),
            required_safety_factor: 1.0,
            orientation: Orientation::MetalShelf,
            methods: SafetyAnalysis::ALL.to_vec(),
        }
    }
}

/// One task from the assignment book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskVariant {
    pub number: u32,
    /// Load case (handbook variant) the task uses
    pub load_case: u32,
    /// Grade assignments keyed by group
    pub groups: BTreeMap<String, GroupAssignment>,
}

/// Grades one group has to pair up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAssignment {
    pub metal_grades: GradeSelection,
    pub composite_grades: GradeSelection,
}

/// Resolved task assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub task: u32,
    pub group: String,
    pub factors: StrengthFactors,
    pub metal_grades: Vec<Grade>,
    pub composite_grades: Vec<Grade>,
}

/// Grade list as written in assignment tables.
///
/// `"1,3,5"` is a list; `"3-7"` and `"7-3"` are the same inclusive range.
/// A single token that is not a numeric range (e.g. `"KMU-4L"`) is a
/// one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GradeSelection {
    List(Vec<Grade>),
    Range { from: u32, to: u32 },
}

impl GradeSelection {
    /// Expand to the grades in order (ranges ascending)
    pub fn grades(&self) -> Vec<Grade> {
        match self {
            GradeSelection::List(grades) => grades.clone(),
            GradeSelection::Range { from, to } => {
                let (lo, hi) = if from <= to { (*from, *to) } else { (*to, *from) };
                (lo..=hi).map(Grade::Number).collect()
            }
        }
    }
}

impl FromStr for GradeSelection {
    type Err = CalcError;

    fn from_str(s: &str) -> CalcResult<Self> {
        let text = s.trim();
        if text.is_empty() {
            return Err(CalcError::invalid_input("grades", s, "Grade selection is empty"));
        }

        if !text.contains(',') {
            if let Some((a, b)) = text.split_once('-') {
                if let (Ok(from), Ok(to)) = (a.trim().parse::<u32>(), b.trim().parse::<u32>()) {
                    return Ok(GradeSelection::Range { from, to });
                }
            }
        }

        let mut grades = Vec::new();
        for token in text.split(',') {
            if token.trim().is_empty() {
                return Err(CalcError::invalid_input(
                    "grades",
                    s,
                    "Empty entry in grade list",
                ));
            }
            grades.push(Grade::parse(token));
        }
        Ok(GradeSelection::List(grades))
    }
}

impl fmt::Display for GradeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeSelection::List(grades) => {
                let parts: Vec<String> = grades.iter().map(|g| g.to_string()).collect();
                write!(f, "{}", parts.join(","))
            }
            GradeSelection::Range { from, to } => write!(f, "{}-{}", from, to),
        }
    }
}

impl TryFrom<String> for GradeSelection {
    type Error = CalcError;

    fn try_from(s: String) -> CalcResult<Self> {
        s.parse()
    }
}

impl From<GradeSelection> for String {
    fn from(selection: GradeSelection) -> Self {
        selection.to_string()
    }
}
