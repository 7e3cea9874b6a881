#![allow(dead_code)]

use qsim_core::*;

pub struct TestHarness {
    pub engine: Engine,
}

/// Emitter -> Queue -> Server -> Receiver.
#[derive(Clone, Copy)]
pub struct Pipeline {
    pub emitter: EmitterId,
    pub queue: QueueId,
    pub server: ServerId,
    pub receiver: ReceiverId,
}

impl TestHarness {
    pub fn new() -> Self {
        Self { engine: Engine::new() }
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            engine: Engine::with_config(EngineConfig { seed, ..Default::default() }),
        }
    }

    pub fn timing(&mut self, resolution: f64, duration: f64) -> &mut Self {
        self.engine.set_resolution(resolution);
        self.engine.set_duration(duration);
        self
    }

    pub fn pipeline(
        &mut self,
        arrival: impl Distribution + 'static,
        service: impl Distribution + 'static,
    ) -> Pipeline {
        let emitter = self.engine.new_emitter(arrival).unwrap();
        let queue = self.engine.new_queue();
        let server = self.engine.new_server(service);
        let receiver = self.engine.new_receiver();
        self.engine.connect_to(emitter, queue).unwrap();
        self.engine.connect_queue(queue, server).unwrap();
        self.engine.connect_to(server, receiver).unwrap();
        Pipeline { emitter, queue, server, receiver }
    }

    /// `n` emitters feeding `balancer`, which spreads over `n` queue/server
    /// pairs named `<prefix><i>`.
    pub fn balanced(&mut self, balancer: BalancerId, n: usize, prefix: &str, mean: f64) {
        let random = self.engine.random();
        for i in 0..n {
            let emitter = self.engine.new_emitter(Exponential::new(mean, &random)).unwrap();
            let queue = self.engine.new_named_queue(format!("{prefix}{i}"));
            let server = self.engine.new_server(Exponential::new(mean, &random));
            let receiver = self.engine.new_receiver();
            self.engine.connect_to(emitter, balancer).unwrap();
            self.engine.connect_to(balancer, queue).unwrap();
            self.engine.connect_queue(queue, server).unwrap();
            self.engine.connect_to(server, receiver).unwrap();
        }
    }

    pub fn run(&mut self) {
        self.engine.run().unwrap();
    }

    pub fn nwait(&self, queue: QueueId) -> u64 {
        self.engine.queue(queue).unwrap().nwait()
    }

    pub fn received(&self, receiver: ReceiverId) -> u64 {
        self.engine.receiver(receiver).unwrap().received()
    }

    pub fn snapshots_json(&self) -> String {
        serde_json::to_string(&self.engine.results_json().unwrap()).unwrap()
    }
}
