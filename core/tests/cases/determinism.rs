use crate::common::TestHarness;
use qsim_core::{Exponential, Normal, RandomChoice, RoundRobinChoice};

fn build_and_run(seed: u64) -> TestHarness {
    let mut h = TestHarness::new_with_seed(seed);
    h.timing(100.0, 20_000.0);
    let random = h.engine.random();

    let rr = h.engine.new_balancer(RoundRobinChoice::new());
    h.balanced(rr, 2, "round", 100.0);
    let rnd = h.engine.new_balancer(RandomChoice::new(&random));
    h.balanced(rnd, 2, "random", 100.0);
    h.pipeline(Exponential::new(20.0, &random), Normal::new(15.0, 5.0, &random));

    h.run();
    h
}

#[test]
fn test_determinism_across_runs() {
    let h1 = build_and_run(12345);
    let h2 = build_and_run(12345);
    assert_eq!(h1.snapshots_json(), h2.snapshots_json());
    assert_eq!(h1.engine.scheduler().fired(), h2.engine.scheduler().fired());
}

#[test]
fn test_determinism_with_different_seeds() {
    let h1 = build_and_run(100);
    let h2 = build_and_run(200);
    assert_ne!(
        h1.snapshots_json(),
        h2.snapshots_json(),
        "Different seeds should produce different results"
    );
}
