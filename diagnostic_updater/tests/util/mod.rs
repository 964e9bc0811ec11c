#![allow(dead_code)]

use crossbeam::channel::Receiver;
use diagnostic_updater::msg::{DiagnosticArray, DiagnosticStatus};
use diagnostic_updater::{ChannelSink, SimulatedClock, Time, Updater, UpdaterConfig};
use std::sync::Arc;

pub const START: f64 = 1_000.0;

pub fn clock() -> Arc<SimulatedClock> {
    Arc::new(SimulatedClock::new(Time::from_seconds(START)))
}

pub struct Harness {
    pub updater: Updater,
    pub clock: Arc<SimulatedClock>,
    pub published: Receiver<DiagnosticArray>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(UpdaterConfig {
            hardware_id: "test_hw".into(),
            ..Default::default()
        })
    }

    pub fn with_config(config: UpdaterConfig) -> Self {
        let clock = clock();
        let (sink, published) = ChannelSink::unbounded();
        let updater = Updater::with_clock(sink, config, clock.clone()).unwrap();
        Self {
            updater,
            clock,
            published,
        }
    }

    pub fn drain(&self) -> Vec<DiagnosticArray> {
        self.published.try_iter().collect()
    }

    pub fn force_update(&self) -> DiagnosticArray {
        self.updater.force_update().unwrap();
        let mut published = self.drain();
        assert_eq!(published.len(), 1, "Expected exactly one aggregate");
        published.remove(0)
    }
}

pub fn find<'a>(array: &'a DiagnosticArray, name: &str) -> &'a DiagnosticStatus {
    array
        .status
        .iter()
        .find(|status| status.name == name)
        .unwrap_or_else(|| panic!("No status named {:?} in {:?}", name, array))
}

pub fn value<'a>(status: &'a DiagnosticStatus, key: &str) -> &'a str {
    status
        .values
        .iter()
        .find(|item| item.key == key)
        .map(|item| item.value.as_str())
        .unwrap_or_else(|| panic!("No value {:?} in {:?}", key, status))
}
