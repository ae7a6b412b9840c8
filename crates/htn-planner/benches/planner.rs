use criterion::{black_box, criterion_group, criterion_main, Criterion};
use htn_planner::{FnMethod, FnOperator, HtnDomain, HtnPlanner, HtnTask, Refused};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Task {
    Root,
    Fill(u32),
    Step,
}

impl HtnTask for Task {
    type Key = u8;

    fn key(&self) -> u8 {
        match self {
            Task::Root => 0,
            Task::Fill(_) => 1,
            Task::Step => 2,
        }
    }
}

fn build_domain(steps: usize) -> HtnDomain<u32, Task> {
    let mut domain = HtnDomain::new();
    domain.declare_operator(
        2,
        FnOperator::new("step", |s: &mut u32, _t: &Task| -> Result<(), Refused> {
            *s += 1;
            Ok(())
        }),
    );
    domain.add_method(
        0,
        FnMethod::new("many_steps", move |_s: &u32, _t: &Task| {
            Some((0..steps).map(|_| Task::Step).collect())
        }),
    );
    // Recursive fill: recheck after every step, like a "have at least n" goal.
    domain.add_method(
        1,
        FnMethod::new("filled", |s: &u32, t: &Task| match t {
            Task::Fill(n) if *s >= *n => Some(vec![]),
            _ => None,
        }),
    );
    domain.add_method(
        1,
        FnMethod::new("fill_one", |_s: &u32, t: &Task| Some(vec![Task::Step, *t])),
    );
    domain
}

fn bench_htn_planner(c: &mut Criterion) {
    let domain = build_domain(256);
    let planner = HtnPlanner::new(&domain);

    c.bench_function("htn-planner/plan(steps=256)", |b| {
        b.iter(|| {
            let plan = planner.plan(&0, &[Task::Root]).expect("plan");
            black_box(plan.len());
        })
    });

    c.bench_function("htn-planner/plan(fill=128)", |b| {
        b.iter(|| {
            let plan = planner.plan(&0, &[Task::Fill(128)]).expect("plan");
            black_box(plan.len());
        })
    });
}

criterion_group!(benches, bench_htn_planner);
criterion_main!(benches);
