//! Parameter resolution: defaults merged with overrides, type- and
//! range-checked once at compile time.

use super::types::{ParamType, ParamValue, ParameterDef};
use crate::error::ShiftError;
use std::collections::BTreeMap;
use tracing::warn;

/// Fully resolved parameters of one compiled constraint.
///
/// Holds one value per declared parameter, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    template: String,
    values: Vec<(String, ParamValue)>,
}

impl Params {
    /// Merges `overrides` onto the defaults in `defs`.
    ///
    /// Unknown override keys are ignored with a warning.
    ///
    /// # Errors
    /// Returns [`ShiftError::InvalidParameter`] if an override does not match
    /// its declared type, falls outside `[min, max]`, or is not one of the
    /// declared options.
    pub fn resolve(
        template: &str,
        defs: &[ParameterDef],
        overrides: &BTreeMap<String, ParamValue>,
    ) -> Result<Self, ShiftError> {
        for key in overrides.keys() {
            if !defs.iter().any(|d| &d.name == key) {
                warn!(template, parameter = %key, "ignoring unknown parameter override");
            }
        }

        let values = defs
            .iter()
            .map(|def| {
                let value = match overrides.get(&def.name) {
                    Some(v) => coerce(template, def, v)?,
                    None => def.default.clone(),
                };
                Ok((def.name.clone(), value))
            })
            .collect::<Result<Vec<_>, ShiftError>>()?;

        Ok(Self {
            template: template.to_owned(),
            values,
        })
    }

    /// Builds parameters directly from values, skipping validation.
    pub fn from_values<I, S>(template: &str, values: I) -> Self
    where
        I: IntoIterator<Item = (S, ParamValue)>,
        S: Into<String>,
    {
        Self {
            template: template.to_owned(),
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn int(&self, name: &str) -> Result<i64, ShiftError> {
        match self.require(name)? {
            ParamValue::Int(v) => Ok(*v),
            other => Err(self.mismatch(name, "an integer", other)),
        }
    }

    /// An integer parameter that must not be negative.
    pub fn count(&self, name: &str) -> Result<usize, ShiftError> {
        let v = self.int(name)?;
        usize::try_from(v).map_err(|_| self.invalid(name, format!("{v} must not be negative")))
    }

    /// A float parameter; integers are widened.
    pub fn float(&self, name: &str) -> Result<f64, ShiftError> {
        match self.require(name)? {
            ParamValue::Float(v) => Ok(*v),
            ParamValue::Int(v) => Ok(*v as f64),
            other => Err(self.mismatch(name, "a number", other)),
        }
    }

    pub fn bool(&self, name: &str) -> Result<bool, ShiftError> {
        match self.require(name)? {
            ParamValue::Bool(v) => Ok(*v),
            other => Err(self.mismatch(name, "a boolean", other)),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str, ShiftError> {
        match self.require(name)? {
            ParamValue::Text(v) => Ok(v),
            other => Err(self.mismatch(name, "a string", other)),
        }
    }

    fn require(&self, name: &str) -> Result<&ParamValue, ShiftError> {
        self.get(name)
            .ok_or_else(|| self.invalid(name, "missing".to_owned()))
    }

    fn mismatch(&self, name: &str, expected: &str, got: &ParamValue) -> ShiftError {
        self.invalid(name, format!("expected {expected}, got {got}"))
    }

    fn invalid(&self, name: &str, reason: String) -> ShiftError {
        invalid(&self.template, name, reason)
    }
}

fn invalid(template: &str, parameter: &str, reason: String) -> ShiftError {
    ShiftError::InvalidParameter {
        template: template.to_owned(),
        parameter: parameter.to_owned(),
        reason,
    }
}

/// Checks one override against its definition, normalizing numeric types.
fn coerce(
    template: &str,
    def: &ParameterDef,
    value: &ParamValue,
) -> Result<ParamValue, ShiftError> {
    let value = match (def.kind, value) {
        (ParamType::Int, ParamValue::Int(v)) => ParamValue::Int(*v),
        (ParamType::Int, ParamValue::Float(v)) if v.fract() == 0.0 => ParamValue::Int(*v as i64),
        (ParamType::Float, ParamValue::Float(v)) => ParamValue::Float(*v),
        (ParamType::Float, ParamValue::Int(v)) => ParamValue::Float(*v as f64),
        (ParamType::Bool, ParamValue::Bool(v)) => ParamValue::Bool(*v),
        (ParamType::Choice, ParamValue::Text(v)) => {
            if !def.options.is_empty() && !def.options.iter().any(|o| o == v) {
                return Err(invalid(
                    template,
                    &def.name,
                    format!("{v:?} is not one of {}", def.options.join(", ")),
                ));
            }
            ParamValue::Text(v.clone())
        }
        (kind, other) => {
            return Err(invalid(
                template,
                &def.name,
                format!("expected {kind:?}, got {other}"),
            ))
        }
    };

    let numeric = match value {
        ParamValue::Int(v) => Some(v as f64),
        ParamValue::Float(v) => Some(v),
        _ => None,
    };
    if let Some(n) = numeric {
        if def.min.is_some_and(|min| n < min) || def.max.is_some_and(|max| n > max) {
            return Err(invalid(
                template,
                &def.name,
                format!(
                    "{n} outside [{}, {}]",
                    def.min.unwrap_or(f64::NEG_INFINITY),
                    def.max.unwrap_or(f64::INFINITY)
                ),
            ));
        }
    }
    Ok(value)
}

/// Parses a comma-separated list of 1-indexed day numbers.
///
/// Blank or non-numeric items are skipped.
pub fn parse_day_list(s: &str) -> Vec<usize> {
    s.split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .collect()
}

/// Parses a comma-separated list of tags, dropping blanks.
pub fn parse_tag_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defs() -> Vec<ParameterDef> {
        vec![
            ParameterDef::int("threshold", "Threshold", 5).range(3.0, 10.0),
            ParameterDef::float("weight", "Weight", 1.0).range(0.1, 100.0),
            ParameterDef::choice("shape", "Shape", "quadratic", &["quadratic", "linear"]),
            ParameterDef::bool("strict", "Strict", true),
        ]
    }

    #[test]
    fn test_defaults_when_no_overrides() {
        let p = Params::resolve("t", &defs(), &BTreeMap::new()).unwrap();
        assert_eq!(p.int("threshold").unwrap(), 5);
        assert!((p.float("weight").unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(p.text("shape").unwrap(), "quadratic");
        assert!(p.bool("strict").unwrap());
    }

    #[test]
    fn test_overrides_are_coerced() {
        let overrides = BTreeMap::from([
            ("threshold".to_owned(), ParamValue::Float(7.0)),
            ("weight".to_owned(), ParamValue::Int(4)),
        ]);
        let p = Params::resolve("t", &defs(), &overrides).unwrap();
        assert_eq!(p.get("threshold"), Some(&ParamValue::Int(7)));
        assert_eq!(p.get("weight"), Some(&ParamValue::Float(4.0)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let overrides = BTreeMap::from([("threshold".to_owned(), ParamValue::Int(11))]);
        let err = Params::resolve("t", &defs(), &overrides).unwrap_err();
        assert!(matches!(
            err,
            ShiftError::InvalidParameter { ref parameter, .. } if parameter == "threshold"
        ));
    }

    #[test]
    fn test_wrong_type_rejected() {
        let overrides = BTreeMap::from([("strict".to_owned(), ParamValue::Int(1))]);
        assert!(Params::resolve("t", &defs(), &overrides).is_err());
        let overrides = BTreeMap::from([("threshold".to_owned(), ParamValue::Float(4.5))]);
        assert!(Params::resolve("t", &defs(), &overrides).is_err());
    }

    #[test]
    fn test_choice_restricted_to_options() {
        let overrides = BTreeMap::from([("shape".to_owned(), ParamValue::from("cubic"))]);
        let err = Params::resolve("t", &defs(), &overrides).unwrap_err();
        assert!(err.to_string().contains("quadratic, linear"));
    }

    #[test]
    fn test_unknown_override_ignored() {
        let overrides = BTreeMap::from([("bogus".to_owned(), ParamValue::Int(1))]);
        let p = Params::resolve("t", &defs(), &overrides).unwrap();
        assert!(p.get("bogus").is_none());
    }

    #[test]
    fn test_count_rejects_negative() {
        let p = Params::from_values("t", [("n", ParamValue::Int(-1))]);
        assert!(p.count("n").is_err());
    }

    #[test]
    fn test_parse_lists() {
        assert_eq!(parse_day_list("1, 5,x,,31"), vec![1, 5, 31]);
        assert!(parse_day_list("").is_empty());
        assert_eq!(parse_tag_list(" prep , lunch,"), vec!["prep", "lunch"]);
    }
}
