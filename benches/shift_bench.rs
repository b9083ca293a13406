//! Criterion benchmarks for u-shift.
//!
//! Synthetic rosters of increasing size: one schedule evaluation against
//! the full built-in rule set, and short GA runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_shift::constraints::{ConstraintConfig, ConstraintRegistry, ConstraintSet};
use u_shift::evaluation::evaluate;
use u_shift::ga::operators::seed_individual;
use u_shift::ga::{GaConfig, ShiftRunner};
use u_shift::model::{EmployeeInfo, PlanningInput, Weekday};

/// `employees` staff over `days` days from Monday, quota ≈ 30% of days,
/// one requested day per employee.
fn synthetic_input(employees: usize, days: usize) -> PlanningInput {
    let staff: Vec<EmployeeInfo> = (0..employees)
        .map(|i| {
            EmployeeInfo::new(i, format!("E{i}"), days * 3 / 10)
                .with_requested_off(vec![i % days + 1])
                .with_tags(if i % 3 == 0 { vec!["prep"] } else { vec!["hall"] })
        })
        .collect();
    let base = PlanningInput::base_from_employees(&staff, days);
    let required = vec![employees * 7 / 10; days];
    PlanningInput::new(staff, base, required)
        .and_then(|i| i.with_weekdays(Weekday::sequence(Weekday::Mon, days)))
        .expect("synthetic input is consistent")
}

fn full_set() -> ConstraintSet {
    ConstraintSet::default_set()
        .with(ConstraintConfig::new("max_consecutive_work"))
        .with(ConstraintConfig::new("weekend_rest"))
        .with(ConstraintConfig::new("min_days_off_per_week"))
        .with(ConstraintConfig::new("min_skilled_workers").with_param("skill", "prep"))
        .with(ConstraintConfig::new("unavailable_day_hard"))
        .with(ConstraintConfig::new("equal_weekend_distribution"))
        .with(ConstraintConfig::new("equal_holiday_distribution"))
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    let constraints = ConstraintRegistry::with_builtins()
        .compile_set(&full_set())
        .expect("built-in set compiles");

    for (employees, days) in [(10usize, 28usize), (30, 31), (100, 31)] {
        let input = synthetic_input(employees, days);
        let schedule = seed_individual(&input, &mut StdRng::seed_from_u64(42));
        group.bench_with_input(
            BenchmarkId::new(format!("e{employees}_d{days}"), employees),
            &(input, schedule),
            |b, (input, schedule)| {
                b.iter(|| black_box(evaluate(black_box(schedule), input, &constraints)))
            },
        );
    }
    group.finish();
}

fn bench_ga(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga");
    group.sample_size(10);
    let constraints = ConstraintRegistry::with_builtins()
        .compile_set(&full_set())
        .expect("built-in set compiles");

    for (employees, days, gens) in [(10usize, 28usize, 10usize), (30, 31, 5)] {
        let input = synthetic_input(employees, days);
        let config = GaConfig::default()
            .with_initial_population(50)
            .with_elite_count(10)
            .with_generations(gens)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("e{employees}_d{days}_g{gens}"), employees),
            &(input, config),
            |b, (input, config)| {
                b.iter(|| black_box(ShiftRunner::run(black_box(input), &constraints, config)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_ga);
criterion_main!(benches);
