//! Per-employee metadata.

use serde::{Deserialize, Serialize};

/// Employment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    FullTime,
    PartTime,
}

/// Immutable per-employee record produced by the input loader.
///
/// Day numbers in [`requested_off`](Self::requested_off) and
/// [`unavailable`](Self::unavailable) are **1-indexed**, the way they appear
/// on the planning sheet.
///
/// # Examples
///
/// ```
/// use u_shift::model::{EmployeeInfo, EmploymentType};
///
/// let alice = EmployeeInfo::new(0, "Alice", 8)
///     .with_requested_off(vec![3, 17])
///     .with_tags(["kitchen", "prep"])
///     .with_employment(EmploymentType::PartTime);
/// assert!(alice.has_tag("prep"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    /// Row in the schedule matrix.
    pub index: usize,
    pub name: String,
    /// Rest days (assigned + fixed) the employee must end up with.
    pub rest_quota: usize,
    #[serde(default)]
    pub requested_off: Vec<usize>,
    #[serde(default)]
    pub unavailable: Vec<usize>,
    #[serde(default)]
    pub employment: EmploymentType,
    /// Section and skill tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Paid-leave days available in the planning month.
    #[serde(default)]
    pub leave_budget: usize,
}

impl EmployeeInfo {
    pub fn new(index: usize, name: impl Into<String>, rest_quota: usize) -> Self {
        Self {
            index,
            name: name.into(),
            rest_quota,
            requested_off: Vec::new(),
            unavailable: Vec::new(),
            employment: EmploymentType::FullTime,
            tags: Vec::new(),
            leave_budget: 0,
        }
    }

    pub fn with_requested_off(mut self, days: Vec<usize>) -> Self {
        self.requested_off = days;
        self
    }

    pub fn with_unavailable(mut self, days: Vec<usize>) -> Self {
        self.unavailable = days;
        self
    }

    pub fn with_employment(mut self, employment: EmploymentType) -> Self {
        self.employment = employment;
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_leave_budget(mut self, days: usize) -> Self {
        self.leave_budget = days;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_part_time(&self) -> bool {
        self.employment == EmploymentType::PartTime
    }
}
