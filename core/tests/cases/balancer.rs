use crate::common::TestHarness;
use qsim_core::{
    ChoiceStrategy, Constant, Destination, RandomChoice, RoundRobinChoice, SimError,
};

#[test]
fn test_round_robin_fills_in_connection_order() {
    let mut h = TestHarness::new();
    h.timing(10.0, 40.0);
    let emitter = h.engine.new_emitter(Constant::new(10.0)).unwrap();
    let balancer = h.engine.new_balancer(RoundRobinChoice::new());
    let queues = [h.engine.new_queue(), h.engine.new_queue(), h.engine.new_queue()];
    h.engine.connect_to(emitter, balancer).unwrap();
    for q in queues {
        h.engine.connect_to(balancer, q).unwrap();
    }
    h.run();

    let nwait: Vec<u64> = queues.iter().map(|&q| h.nwait(q)).collect();
    assert_eq!(nwait, vec![2, 1, 1]);

    let per_tick: Vec<Vec<u64>> = (0..4)
        .map(|tick| {
            h.engine
                .samplers()
                .iter()
                .map(|s| s.samples()[tick].nwait)
                .collect::<Vec<u64>>()
        })
        .collect();
    assert_eq!(
        per_tick,
        vec![vec![1, 0, 0], vec![1, 1, 0], vec![1, 1, 1], vec![2, 1, 1]]
    );
}

#[test]
fn test_random_balancer_reaches_every_queue() {
    let mut h = TestHarness::new_with_seed(42);
    h.timing(100.0, 3000.0);
    let random = h.engine.random();
    let emitter = h.engine.new_emitter(Constant::new(10.0)).unwrap();
    let balancer = h.engine.new_balancer(RandomChoice::new(&random));
    let queues = [h.engine.new_queue(), h.engine.new_queue(), h.engine.new_queue()];
    h.engine.connect_to(emitter, balancer).unwrap();
    for q in queues {
        h.engine.connect_to(balancer, q).unwrap();
    }
    h.run();

    let counts: Vec<u64> = queues
        .iter()
        .map(|&q| h.engine.queue(q).unwrap().narrivals())
        .collect();
    assert_eq!(counts.iter().sum::<u64>(), 300);
    assert!(counts.iter().all(|&c| c > 50), "{counts:?}");
}

#[test]
fn test_balancer_without_destinations_aborts_run() {
    let mut h = TestHarness::new();
    let emitter = h.engine.new_emitter(Constant::new(10.0)).unwrap();
    let balancer = h.engine.new_balancer(RoundRobinChoice::new());
    h.engine.connect_to(emitter, balancer).unwrap();

    let err = h.engine.run().unwrap_err();
    assert!(matches!(err, SimError::NoDestination { .. }));
    assert!(h.engine.samplers().is_empty());
}

struct LastPlusOne;

impl ChoiceStrategy for LastPlusOne {
    fn choose(&mut self, destinations: &[Destination]) -> usize {
        destinations.len()
    }
}

#[test]
fn test_custom_strategy_out_of_range_aborts_run() {
    let mut h = TestHarness::new();
    let emitter = h.engine.new_emitter(Constant::new(10.0)).unwrap();
    let balancer = h.engine.new_balancer(LastPlusOne);
    let queue = h.engine.new_queue();
    h.engine.connect_to(emitter, balancer).unwrap();
    h.engine.connect_to(balancer, queue).unwrap();

    let err = h.engine.run().unwrap_err();
    assert!(matches!(err, SimError::ChoiceOutOfRange { index: 1, len: 1, .. }));
    assert_eq!(h.nwait(queue), 0);
}

#[test]
fn test_balancer_loop_is_rejected_at_wiring() {
    let mut h = TestHarness::new();
    let front = h.engine.new_balancer(RoundRobinChoice::new());
    let back = h.engine.new_balancer(RoundRobinChoice::new());
    h.engine.connect_to(front, back).unwrap();

    let err = h.engine.connect_to(back, front).unwrap_err();
    assert!(matches!(err, SimError::RoutingCycle { .. }));
}

#[test]
fn test_balanced_servers_conserve_items() {
    let mut h = TestHarness::new_with_seed(0);
    h.timing(1000.0, 60_000.0);
    let round = h.engine.new_balancer(RoundRobinChoice::new());
    h.balanced(round, 4, "round", 100.0);
    h.run();

    let names: Vec<&str> = h.engine.samplers().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["round0", "round1", "round2", "round3"]);

    let arrivals: Vec<u64> = h
        .engine
        .samplers()
        .iter()
        .map(|s| h.engine.queue(s.target()).unwrap().narrivals())
        .collect();
    let max = *arrivals.iter().max().unwrap();
    let min = *arrivals.iter().min().unwrap();
    assert!(max - min <= 1, "round robin should split evenly: {arrivals:?}");
}
