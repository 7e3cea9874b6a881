use crate::common::TestHarness;
use qsim_core::{Constant, ServerState};

#[test]
fn test_excess_arrivals_wait_in_queue() {
    let mut h = TestHarness::new();
    h.timing(10.0, 10.0);
    let p = h.pipeline(Constant::new(1.0), Constant::new(100.0));
    h.run();

    // ten pushes at t=1..=10: the first is in service, nine wait
    assert_eq!(h.nwait(p.queue), 9);
    assert_eq!(h.engine.server(p.server).unwrap().state(), ServerState::Busy);
    assert!(h.engine.queue(p.queue).unwrap().listeners().is_empty());
    assert_eq!(h.engine.scheduler().len(), 2);
}

#[test]
fn test_emitter_interval() {
    let mut h = TestHarness::new();
    h.timing(100.0, 400.0);
    let emitter = h.engine.new_emitter(Constant::new(100.0)).unwrap();
    let receiver = h.engine.new_receiver();
    h.engine.connect_to(emitter, receiver).unwrap();
    h.run();
    assert_eq!(h.received(receiver), 4);
}

#[test]
fn test_disconnected_emitter_drops_silently() {
    let mut h = TestHarness::new();
    let emitter = h.engine.new_emitter(Constant::new(10.0)).unwrap();
    h.run();
    assert_eq!(h.engine.emitter(emitter).unwrap().emitted(), 100);
}

#[test]
fn test_shared_queue_feeds_every_server() {
    let mut h = TestHarness::new();
    h.timing(10.0, 1000.0);
    let queue = h.engine.new_named_queue("fork");
    let receiver = h.engine.new_receiver();
    let mut emitters = Vec::new();
    let mut servers = Vec::new();
    for _ in 0..4 {
        let e = h.engine.new_emitter(Constant::new(10.0)).unwrap();
        let s = h.engine.new_server(Constant::new(35.0));
        h.engine.connect_to(e, queue).unwrap();
        h.engine.connect_queue(queue, s).unwrap();
        h.engine.connect_to(s, receiver).unwrap();
        emitters.push(e);
        servers.push(s);
    }
    h.run();

    let emitted: u64 = emitters
        .iter()
        .map(|&e| h.engine.emitter(e).unwrap().emitted())
        .sum();
    let busy = servers
        .iter()
        .filter(|&&s| h.engine.server(s).unwrap().state() == ServerState::Busy)
        .count() as u64;
    let served: u64 = servers.iter().map(|&s| h.engine.server(s).unwrap().served()).sum();

    assert!(servers.iter().all(|&s| h.engine.server(s).unwrap().served() > 0));
    assert_eq!(served, h.received(receiver));
    assert_eq!(emitted, h.received(receiver) + h.nwait(queue) + busy);
}
