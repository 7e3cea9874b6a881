use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};

use crate::components::Queue;
use crate::error::Result;
use crate::network::QueueId;
use crate::traits::SimTime;

/// One observation of a queue, taken at the end of a tick.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Snapshot {
    pub time: SimTime,
    pub nwait: u64,
    /// Arrivals since the previous snapshot.
    pub arrival_rate: u64,
}

impl Snapshot {
    /// Mean sojourn time by Little's Law. Not finite on a tick without
    /// arrivals.
    pub fn staying(&self) -> f64 {
        self.nwait as f64 / self.arrival_rate as f64
    }

    pub fn value(&self, field: SampleField) -> f64 {
        match field {
            SampleField::Nwait => self.nwait as f64,
            SampleField::ArrivalRate => self.arrival_rate as f64,
            SampleField::Staying => self.staying(),
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SampleField {
    Nwait,
    ArrivalRate,
    Staying,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SamplerSummary {
    pub name: String,
    pub ticks: usize,
    pub total_arrivals: u64,
    pub mean_nwait: f64,
    pub max_nwait: u64,
    pub p50_nwait: u64,
    pub p99_nwait: u64,
}

/// Periodic observer of a queue's counters.
#[derive(Clone, Serialize, Debug)]
pub struct Sampler {
    name: String,
    target: QueueId,
    samples: Vec<Snapshot>,
    #[serde(skip)]
    last_narrivals: u64,
}

impl Sampler {
    pub fn new(name: impl Into<String>, target: QueueId) -> Self {
        Self {
            name: name.into(),
            target,
            samples: Vec::new(),
            last_narrivals: 0,
        }
    }

    pub fn sample(&mut self, time: SimTime, queue: &Queue) {
        let narrivals = queue.narrivals();
        let arrival_rate = narrivals - self.last_narrivals;
        self.last_narrivals = narrivals;
        self.samples.push(Snapshot {
            time,
            nwait: queue.nwait(),
            arrival_rate,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> QueueId {
        self.target
    }

    pub fn samples(&self) -> &[Snapshot] {
        &self.samples
    }

    /// Arithmetic mean of `field` over every snapshot; non-finite values
    /// propagate.
    pub fn average(&self, field: SampleField) -> f64 {
        let total: f64 = self.samples.iter().map(|s| s.value(field)).sum();
        total / self.samples.len() as f64
    }

    pub fn summary(&self) -> Result<SamplerSummary> {
        let mut hist = Histogram::<u64>::new(3)?;
        for s in &self.samples {
            hist.saturating_record(s.nwait);
        }
        Ok(SamplerSummary {
            name: self.name.clone(),
            ticks: self.samples.len(),
            total_arrivals: self.last_narrivals,
            mean_nwait: self.average(SampleField::Nwait),
            max_nwait: hist.max(),
            p50_nwait: hist.value_at_quantile(0.5),
            p99_nwait: hist.value_at_quantile(0.99),
        })
    }
}

/// Per-tick values of one field across samplers.
///
/// Rows are zipped by position, not matched by timestamp: every sampler is
/// polled once per tick so the n-th snapshots line up.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn build(samplers: &[Sampler], field: SampleField) -> Self {
        let header: Vec<String> = std::iter::once("time".to_string())
            .chain(samplers.iter().map(|s| s.name.clone()))
            .collect();

        let rows: Vec<Vec<f64>> = samplers
            .first()
            .map(|first| {
                first
                    .samples
                    .iter()
                    .enumerate()
                    .map(|(i, snap)| {
                        std::iter::once(snap.time)
                            .chain(samplers.iter().map(|s| {
                                s.samples.get(i).map_or(f64::NAN, |x| x.value(field))
                            }))
                            .collect::<Vec<f64>>()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { header, rows }
    }
}
