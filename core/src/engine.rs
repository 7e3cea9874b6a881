use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analytics::{SampleField, Sampler, SamplerSummary, Table};
use crate::components::{Balancer, Emitter, Queue, Receiver, Server};
use crate::error::{Result, SimError};
use crate::logging::simulation_span;
use crate::network::{
    Action, BalancerId, Destination, EmitterId, Network, Origin, QueueId, ReceiverId, ServerId,
};
use crate::random::RandomSource;
use crate::scheduler::Scheduler;
use crate::traits::{ChoiceStrategy, Distribution, SimTime};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of one tick; every sampler is polled once per tick.
    pub resolution: SimTime,
    pub duration: SimTime,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { resolution: 10.0, duration: 1000.0, seed: 0 }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("resolution", self.resolution), ("duration", self.duration)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidConfiguration(format!(
                    "{field} must be positive and finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Owns the scheduler, the actor network and the sampler registry.
///
/// Build and wire every actor first, then call [`run`](Self::run) once.
pub struct Engine {
    config: EngineConfig,
    scheduler: Scheduler<Action>,
    network: Network,
    samplers: Vec<Sampler>,
    random: RandomSource,
    elapsed: SimTime,
    ticks: u64,
    has_run: bool,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let random = RandomSource::seeded(config.seed);
        Self {
            config,
            scheduler: Scheduler::new(),
            network: Network::new(),
            samplers: Vec::new(),
            random,
            elapsed: 0.0,
            ticks: 0,
            has_run: false,
        }
    }

    /// Handle to the engine's random stream, for building distributions
    /// and choice strategies.
    pub fn random(&self) -> RandomSource {
        self.random.clone()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn encode_config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }

    pub fn set_resolution(&mut self, resolution: SimTime) {
        self.config.resolution = resolution;
    }

    pub fn set_duration(&mut self, duration: SimTime) {
        self.config.duration = duration;
    }

    /// Creates an emitter and schedules its first emission.
    pub fn new_emitter(&mut self, interval: impl Distribution + 'static) -> Result<EmitterId> {
        let id = self.network.add_emitter(Box::new(interval));
        let delay = self.network.emitter(id)?.next_interval();
        self.scheduler.after(delay, Action::Emit(id))?;
        debug!(?id, first = delay, "emitter created");
        Ok(id)
    }

    /// Creates a queue sampled under the default name `q<index>`.
    pub fn new_queue(&mut self) -> QueueId {
        let name = format!("q{}", self.samplers.len());
        self.new_named_queue(name)
    }

    pub fn new_named_queue(&mut self, name: impl Into<String>) -> QueueId {
        let id = self.network.add_queue();
        self.samplers.push(Sampler::new(name, id));
        id
    }

    pub fn new_server(&mut self, service: impl Distribution + 'static) -> ServerId {
        self.network.add_server(Box::new(service))
    }

    pub fn new_balancer(&mut self, choice: impl ChoiceStrategy + 'static) -> BalancerId {
        self.network.add_balancer(Box::new(choice))
    }

    pub fn new_receiver(&mut self) -> ReceiverId {
        self.network.add_receiver()
    }

    pub fn connect_to(
        &mut self,
        from: impl Into<Origin>,
        to: impl Into<Destination>,
    ) -> Result<()> {
        self.network.connect_to(from.into(), to.into())
    }

    pub fn connect_from(&mut self, server: ServerId, queue: QueueId) -> Result<()> {
        self.network.connect_from(server, queue)
    }

    /// Same as [`connect_from`](Self::connect_from), read from the queue side.
    pub fn connect_queue(&mut self, queue: QueueId, server: ServerId) -> Result<()> {
        self.connect_from(server, queue)
    }

    pub fn run(&mut self) -> Result<()> {
        if self.has_run {
            return Err(SimError::AlreadyRun);
        }
        self.config.validate()?;
        self.has_run = true;

        let span = simulation_span("engine");
        let _guard = span.enter();
        info!(
            duration = self.config.duration,
            resolution = self.config.resolution,
            samplers = self.samplers.len(),
            actors = self.network.len(),
            "Simulation started"
        );

        // n-th tick ends at n * resolution
        while self.elapsed < self.config.duration {
            self.ticks += 1;
            self.elapsed = self.ticks as f64 * self.config.resolution;
            self.tick()?;
        }

        info!(
            final_time = self.scheduler.time(),
            ticks = self.ticks,
            events_fired = self.scheduler.fired(),
            pending = self.scheduler.len(),
            "Simulation completed"
        );
        Ok(())
    }

    fn tick(&mut self) -> Result<()> {
        let network = &mut self.network;
        self.scheduler
            .advance_to(self.elapsed, |sched, action| network.fire(sched, action))?;

        let now = self.scheduler.time();
        for sampler in &mut self.samplers {
            sampler.sample(now, self.network.queue(sampler.target())?);
        }
        debug!(time = now, "tick sampled");
        Ok(())
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    pub fn time(&self) -> SimTime {
        self.scheduler.time()
    }

    pub fn scheduler(&self) -> &Scheduler<Action> {
        &self.scheduler
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn samplers(&self) -> &[Sampler] {
        &self.samplers
    }

    pub fn sampler(&self, name: &str) -> Option<&Sampler> {
        self.samplers.iter().find(|s| s.name() == name)
    }

    pub fn table(&self, field: SampleField) -> Table {
        Table::build(&self.samplers, field)
    }

    pub fn averages(&self, field: SampleField) -> Vec<(String, f64)> {
        self.samplers
            .iter()
            .map(|s| (s.name().to_string(), s.average(field)))
            .collect()
    }

    pub fn summaries(&self) -> Result<Vec<SamplerSummary>> {
        self.samplers.iter().map(Sampler::summary).collect()
    }

    pub fn results_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(&self.samplers)?)
    }

    pub fn emitter(&self, id: EmitterId) -> Result<&Emitter> {
        self.network.emitter(id)
    }

    pub fn queue(&self, id: QueueId) -> Result<&Queue> {
        self.network.queue(id)
    }

    pub fn server(&self, id: ServerId) -> Result<&Server> {
        self.network.server(id)
    }

    pub fn balancer(&self, id: BalancerId) -> Result<&Balancer> {
        self.network.balancer(id)
    }

    pub fn receiver(&self, id: ReceiverId) -> Result<&Receiver> {
        self.network.receiver(id)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
