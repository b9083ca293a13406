//! Template registry: lookup, introspection and compilation.

use super::day::{
    ClosedDay, MaxWorkersOnDate, MinSkilledWorkers, MinWorkersOnDate, RequiredWorkersMatch,
    SectionMinWorkers,
};
use super::employee::{
    MaxConsecutiveWork, MinDaysOffPerWeek, RestAfterConsecutiveWork, SubstituteCoverage,
    UnavailableDayHard, VacationDaysLimit, WeekendRest,
};
use super::fairness::{EqualHolidayDistribution, EqualWeekendDistribution};
use super::params::Params;
use super::pattern::{
    AvoidLongConsecutiveWork, ConsecutiveHolidayBonus, NoIsolatedHolidays, NoIsolatedWorkdays,
};
use super::types::{
    Category, CompiledConstraint, ConstraintConfig, ConstraintSet, ConstraintTemplate,
    TemplateInfo,
};
use crate::error::ShiftError;
use tracing::debug;

/// Templates keyed by id, in registration order.
///
/// # Examples
///
/// ```
/// use u_shift::constraints::{ConstraintConfig, ConstraintRegistry};
///
/// let registry = ConstraintRegistry::with_builtins();
/// let compiled = registry
///     .compile(&ConstraintConfig::new("max_consecutive_work").with_param("max_days", 5))
///     .unwrap();
/// assert_eq!(compiled.template_id, "max_consecutive_work");
/// ```
pub struct ConstraintRegistry {
    templates: Vec<Box<dyn ConstraintTemplate>>,
}

impl ConstraintRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            templates: Vec::new(),
        }
    }

    /// A registry holding every built-in template.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(RequiredWorkersMatch);
        registry.register(MinWorkersOnDate);
        registry.register(MaxWorkersOnDate);
        registry.register(MinSkilledWorkers);
        registry.register(SectionMinWorkers);
        registry.register(ClosedDay);
        registry.register(MaxConsecutiveWork);
        registry.register(WeekendRest);
        registry.register(MinDaysOffPerWeek);
        registry.register(RestAfterConsecutiveWork);
        registry.register(SubstituteCoverage);
        registry.register(VacationDaysLimit);
        registry.register(UnavailableDayHard);
        registry.register(AvoidLongConsecutiveWork);
        registry.register(NoIsolatedHolidays);
        registry.register(NoIsolatedWorkdays);
        registry.register(ConsecutiveHolidayBonus);
        registry.register(EqualWeekendDistribution);
        registry.register(EqualHolidayDistribution);
        registry
    }

    /// Adds a template. A template with the same id is replaced in place.
    pub fn register<T: ConstraintTemplate + 'static>(&mut self, template: T) {
        let boxed: Box<dyn ConstraintTemplate> = Box::new(template);
        match self.templates.iter_mut().find(|t| t.id() == boxed.id()) {
            Some(slot) => *slot = boxed,
            None => self.templates.push(boxed),
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Looks up a template by id.
    ///
    /// # Errors
    /// [`ShiftError::UnknownTemplate`] listing every registered id.
    pub fn get(&self, id: &str) -> Result<&dyn ConstraintTemplate, ShiftError> {
        self.templates
            .iter()
            .find(|t| t.id() == id || t.aliases().iter().any(|a| *a == id))
            .map(|t| t.as_ref())
            .ok_or_else(|| {
                let mut available: Vec<String> =
                    self.templates.iter().map(|t| t.id().to_owned()).collect();
                available.sort();
                ShiftError::UnknownTemplate {
                    id: id.to_owned(),
                    available,
                }
            })
    }

    /// All templates in registration order.
    pub fn list_all(&self) -> impl Iterator<Item = &dyn ConstraintTemplate> {
        self.templates.iter().map(|t| t.as_ref())
    }

    pub fn list_by_category(
        &self,
        category: Category,
    ) -> impl Iterator<Item = &dyn ConstraintTemplate> {
        self.list_all().filter(move |t| t.category() == category)
    }

    /// Serializable description of every template.
    pub fn describe(&self) -> Vec<TemplateInfo> {
        self.list_all()
            .map(|t| TemplateInfo {
                id: t.id().to_owned(),
                display_name: t.display_name().to_owned(),
                category: t.category(),
                description: t.description().to_owned(),
                parameters: t.parameters(),
            })
            .collect()
    }

    /// Resolves parameters and compiles one configuration.
    ///
    /// The `enabled` flag is not consulted here; see
    /// [`compile_set`](Self::compile_set).
    pub fn compile(&self, config: &ConstraintConfig) -> Result<CompiledConstraint, ShiftError> {
        let template = self.get(&config.template_id)?;
        let params = Params::resolve(template.id(), &template.parameters(), &config.parameters)?;
        let penalty_fn = template.compile(&params)?;
        debug!(template = template.id(), params = ?params, "compiled constraint");
        Ok(CompiledConstraint::new(
            template.id(),
            template.display_name(),
            params,
            penalty_fn,
        ))
    }

    /// Compiles every enabled entry, preserving order.
    pub fn compile_set(&self, set: &ConstraintSet) -> Result<Vec<CompiledConstraint>, ShiftError> {
        set.constraints
            .iter()
            .filter(|c| c.enabled)
            .map(|c| self.compile(c))
            .collect()
    }
}

impl Default for ConstraintRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ParamValue;

    #[test]
    fn test_builtins_registered() {
        let registry = ConstraintRegistry::default();
        assert_eq!(registry.len(), 19);
        let ids: Vec<_> = registry.list_all().map(|t| t.id()).collect();
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(ids[0], "required_workers_match");
    }

    #[test]
    fn test_unknown_template_lists_ids() {
        let registry = ConstraintRegistry::with_builtins();
        let err = registry
            .compile(&ConstraintConfig::new("no_such_rule"))
            .unwrap_err();
        match &err {
            ShiftError::UnknownTemplate { id, available } => {
                assert_eq!(id, "no_such_rule");
                assert_eq!(available.len(), 19);
                assert!(available.windows(2).all(|w| w[0] <= w[1]));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("max_consecutive_work"));
    }

    #[test]
    fn test_compile_merges_defaults() {
        let registry = ConstraintRegistry::with_builtins();
        let compiled = registry
            .compile(&ConstraintConfig::new("max_consecutive_work").with_param("max_days", 4))
            .unwrap();
        assert_eq!(compiled.params.get("max_days"), Some(&ParamValue::Int(4)));
        assert_eq!(
            compiled.params.get("penalty_per_day"),
            Some(&ParamValue::Float(10.0))
        );
    }

    #[test]
    fn test_compile_rejects_out_of_range() {
        let registry = ConstraintRegistry::with_builtins();
        let err = registry
            .compile(&ConstraintConfig::new("max_consecutive_work").with_param("max_days", 40))
            .unwrap_err();
        assert!(matches!(err, ShiftError::InvalidParameter { .. }));
    }

    #[test]
    fn test_compile_set_skips_disabled() {
        let registry = ConstraintRegistry::with_builtins();
        let set = ConstraintSet::new("s")
            .with(ConstraintConfig::new("weekend_rest"))
            .with(ConstraintConfig::new("no_isolated_holidays").with_enabled(false))
            .with(ConstraintConfig::new("max_consecutive_work"));
        let compiled = registry.compile_set(&set).unwrap();
        let ids: Vec<_> = compiled.iter().map(|c| c.template_id.as_str()).collect();
        assert_eq!(ids, vec!["weekend_rest", "max_consecutive_work"]);
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = ConstraintRegistry::with_builtins();
        registry.register(WeekendRest);
        assert_eq!(registry.len(), 19);
    }

    #[test]
    fn test_aliases_resolve_to_canonical_id() {
        let registry = ConstraintRegistry::with_builtins();
        assert_eq!(registry.get("kitchen_min_workers").unwrap().id(), "section_min_workers");
        let compiled = registry
            .compile(
                &ConstraintConfig::new("substitute_constraint")
                    .with_param("primary_name", "Shimamura")
                    .with_param("substitute_name", "Saito"),
            )
            .unwrap();
        assert_eq!(compiled.template_id, "substitute_coverage");
        assert_eq!(
            compiled.params.get("primary_name"),
            Some(&ParamValue::Text("Shimamura".into()))
        );
    }

    #[test]
    fn test_list_by_category_and_describe() {
        let registry = ConstraintRegistry::with_builtins();
        assert_eq!(registry.list_by_category(Category::Fairness).count(), 2);
        assert_eq!(registry.list_by_category(Category::Pattern).count(), 4);
        assert_eq!(registry.list_by_category(Category::Day).count(), 6);
        assert_eq!(registry.list_by_category(Category::Employee).count(), 7);

        let info = registry.describe();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json[0]["id"], "required_workers_match");
        assert_eq!(json[0]["category"], "day");
    }

    #[test]
    fn test_default_set_compiles() {
        let registry = ConstraintRegistry::with_builtins();
        let compiled = registry.compile_set(&ConstraintSet::default_set()).unwrap();
        assert_eq!(compiled.len(), 3);
    }
}
