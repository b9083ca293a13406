//! Shared planning inputs for unit tests.

use super::{EmployeeInfo, EmploymentType, PlanningInput, Schedule, Weekday};

/// 3 employees × 7 days (Mon–Sun), every quota 2, two workers required per
/// day, Alice holding a requested day off on day 3.
pub fn small_input() -> PlanningInput {
    let employees = vec![
        EmployeeInfo::new(0, "Alice", 2).with_requested_off(vec![3]),
        EmployeeInfo::new(1, "Bob", 2),
        EmployeeInfo::new(2, "Charlie", 2),
    ];
    let base = PlanningInput::base_from_employees(&employees, 7);
    PlanningInput::new(employees, base, vec![2; 7])
        .and_then(|i| i.with_weekdays(Weekday::sequence(Weekday::Mon, 7)))
        .expect("fixture input is consistent")
}

/// 5 kitchen/hall employees over two weeks starting Monday.
///
/// Rows: 0 Kawasaki (full, prep), 1 Saito (full, prep+lunch),
/// 2 Hirata (part, prep), 3 Shimamura (full, lunch, unavailable on both
/// Wednesdays), 4 Hashimoto (part, lunch).
pub fn kitchen_input() -> PlanningInput {
    let employees = vec![
        EmployeeInfo::new(0, "Kawasaki", 4).with_tags(["prep"]),
        EmployeeInfo::new(1, "Saito", 4)
            .with_tags(["prep", "lunch"])
            .with_requested_off(vec![2])
            .with_leave_budget(1),
        EmployeeInfo::new(2, "Hirata", 6)
            .with_tags(["prep"])
            .with_employment(EmploymentType::PartTime),
        EmployeeInfo::new(3, "Shimamura", 4)
            .with_tags(["lunch"])
            .with_unavailable(vec![3, 10]),
        EmployeeInfo::new(4, "Hashimoto", 6)
            .with_tags(["lunch", "hall"])
            .with_employment(EmploymentType::PartTime),
    ];
    let base = PlanningInput::base_from_employees(&employees, 14);
    PlanningInput::new(employees, base, vec![3; 14])
        .and_then(|i| i.with_weekdays(Weekday::sequence(Weekday::Mon, 14)))
        .and_then(|i| i.with_section_demand("prep", vec![2; 14]))
        .expect("fixture input is consistent")
}

/// A copy of `input`'s base schedule with the given zero-based cells set.
pub fn with_cells(base: &Schedule, cells: &[(usize, usize, super::Cell)]) -> Schedule {
    let mut s = base.clone();
    for &(e, d, c) in cells {
        s.set(e, d, c);
    }
    s
}
