//! Core types of the constraint template system.
//!
//! A [`ConstraintTemplate`] declares a rule kind and its parameters. The
//! registry merges a [`ConstraintConfig`] with the template defaults and
//! calls [`ConstraintTemplate::compile`], yielding a [`CompiledConstraint`]
//! whose penalty function is reused for every evaluation of a run.

use super::context::ScheduleContext;
use super::params::Params;
use crate::error::ShiftError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// What a rule looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Per-employee rows (quota-like limits, coverage pairs).
    Employee,
    /// Per-day columns (headcount).
    Day,
    /// Work/rest run patterns.
    Pattern,
    /// Spread of a per-employee aggregate across the roster.
    Fairness,
}

/// Declared type of a template parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Int,
    Float,
    Bool,
    /// A string, optionally restricted to [`ParameterDef::options`].
    Choice,
}

/// A parameter value as supplied by configuration.
///
/// Deserializes from plain JSON scalars: `5` → `Int`, `5.0` → `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v.into())
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Definition of one template parameter, used for merging, validation and
/// configuration UIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDef {
    pub name: String,
    pub display_name: String,
    pub kind: ParamType,
    pub default: ParamValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub description: String,
}

impl ParameterDef {
    fn new(name: &str, display_name: &str, kind: ParamType, default: ParamValue) -> Self {
        Self {
            name: name.to_owned(),
            display_name: display_name.to_owned(),
            kind,
            default,
            min: None,
            max: None,
            options: Vec::new(),
            description: String::new(),
        }
    }

    pub fn int(name: &str, display_name: &str, default: i64) -> Self {
        Self::new(name, display_name, ParamType::Int, ParamValue::Int(default))
    }

    pub fn float(name: &str, display_name: &str, default: f64) -> Self {
        Self::new(name, display_name, ParamType::Float, ParamValue::Float(default))
    }

    pub fn bool(name: &str, display_name: &str, default: bool) -> Self {
        Self::new(name, display_name, ParamType::Bool, ParamValue::Bool(default))
    }

    /// A free-form string parameter.
    pub fn text(name: &str, display_name: &str, default: &str) -> Self {
        Self::new(name, display_name, ParamType::Choice, default.into())
    }

    /// A string parameter restricted to `options`.
    pub fn choice(name: &str, display_name: &str, default: &str, options: &[&str]) -> Self {
        let mut def = Self::text(name, display_name, default);
        def.options = options.iter().map(|s| (*s).to_owned()).collect();
        def
    }

    /// Sets the inclusive numeric range.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }
}

/// Outcome of one penalty function on one schedule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PenaltyResult {
    /// Cost; negative values are bonuses.
    pub penalty: f64,
    /// Human-readable list of occurrences, `"; "`-separated.
    pub details: String,
}

impl PenaltyResult {
    pub fn new(penalty: f64, details: Vec<String>) -> Self {
        Self {
            penalty,
            details: details.join("; "),
        }
    }

    /// No penalty, with an explanatory note.
    pub fn note(details: impl Into<String>) -> Self {
        Self {
            penalty: 0.0,
            details: details.into(),
        }
    }
}

/// A compiled rule: schedule context in, penalty out.
pub type PenaltyFn = Box<dyn Fn(&ScheduleContext<'_>) -> PenaltyResult + Send + Sync>;

/// A declarative rule kind.
///
/// Implementations are stateless; all configuration arrives through
/// [`compile`](Self::compile).
pub trait ConstraintTemplate: Send + Sync {
    /// Unique identifier used in configuration.
    fn id(&self) -> &'static str;

    /// Alternative ids accepted by [`ConstraintRegistry::get`](super::ConstraintRegistry::get).
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    fn display_name(&self) -> &'static str;

    fn category(&self) -> Category;

    fn description(&self) -> &'static str;

    /// Parameter definitions, in display order.
    fn parameters(&self) -> Vec<ParameterDef>;

    /// Builds the penalty function from fully resolved parameters.
    ///
    /// `params` always holds a value of the declared type for every
    /// definition returned by [`parameters`](Self::parameters).
    fn compile(&self, params: &Params) -> Result<PenaltyFn, ShiftError>;
}

/// Introspection record for one template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub display_name: String,
    pub category: Category,
    pub description: String,
    pub parameters: Vec<ParameterDef>,
}

/// One entry of a constraint set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    pub template_id: String,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamValue>,
}

fn enabled_default() -> bool {
    true
}

impl ConstraintConfig {
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            enabled: true,
            parameters: BTreeMap::new(),
        }
    }

    /// Overrides one parameter.
    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.to_owned(), value.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// A named, ordered collection of constraint configurations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    #[serde(default = "set_name_default")]
    pub name: String,
    #[serde(default)]
    pub constraints: Vec<ConstraintConfig>,
}

fn set_name_default() -> String {
    "default".to_owned()
}

impl ConstraintSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }

    pub fn with(mut self, config: ConstraintConfig) -> Self {
        self.constraints.push(config);
        self
    }

    /// Long-run quadratic penalty, stepping-stone rest penalty and exact
    /// daily headcount.
    pub fn default_set() -> Self {
        Self::new("default")
            .with(
                ConstraintConfig::new("avoid_long_consecutive_work")
                    .with_param("threshold", 5)
                    .with_param("penalty_weight", 1.0),
            )
            .with(ConstraintConfig::new("no_isolated_holidays").with_param("penalty_weight", 10.0))
            .with(
                ConstraintConfig::new("required_workers_match").with_param("penalty_per_diff", 4.0),
            )
    }
}

/// A template compiled with concrete parameters.
pub struct CompiledConstraint {
    pub template_id: String,
    pub display_name: String,
    pub params: Params,
    penalty_fn: PenaltyFn,
}

impl CompiledConstraint {
    pub(crate) fn new(
        template_id: &str,
        display_name: &str,
        params: Params,
        penalty_fn: PenaltyFn,
    ) -> Self {
        Self {
            template_id: template_id.to_owned(),
            display_name: display_name.to_owned(),
            params,
            penalty_fn,
        }
    }

    /// Runs the penalty function.
    pub fn evaluate(&self, ctx: &ScheduleContext<'_>) -> PenaltyResult {
        (self.penalty_fn)(ctx)
    }
}

impl fmt::Debug for CompiledConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledConstraint")
            .field("template_id", &self.template_id)
            .field("display_name", &self.display_name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
