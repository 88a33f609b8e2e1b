#![allow(dead_code)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use maser_front::{
    display::RawResult, maser_errors::MaserError, parameters::store::ParamStore,
    submission::SimulationService,
};

pub const SERIES: &str = "time (h),north,south\n0.0,1,0\n0.5,0,1\n";

pub fn figure(tag: &str) -> Vec<u8> {
    format!("\u{89}PNG {tag}").into_bytes()
}

pub fn raw_result(tag: &str) -> RawResult {
    RawResult::encode(&figure(tag), SERIES.as_bytes())
}

/// One scripted answer of the fake service.
pub struct Step {
    pub delay: Duration,
    pub reply: Result<RawResult, String>,
}

impl Step {
    pub fn ok(tag: &str, delay_ms: u64) -> Self {
        Step {
            delay: Duration::from_millis(delay_ms),
            reply: Ok(raw_result(tag)),
        }
    }

    pub fn fail(message: &str, delay_ms: u64) -> Self {
        Step {
            delay: Duration::from_millis(delay_ms),
            reply: Err(message.to_string()),
        }
    }
}

/// Simulation service answering from a script, then with `default` once the script is empty.
pub struct FakeService {
    calls: AtomicUsize,
    requests: Mutex<Vec<ParamStore>>,
    script: Mutex<VecDeque<Step>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::scripted(Vec::new())
    }

    pub fn scripted(steps: Vec<Step>) -> Self {
        FakeService {
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            script: Mutex::new(steps.into()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<ParamStore> {
        self.requests.lock().unwrap().clone()
    }
}

impl SimulationService for FakeService {
    async fn run_maser(&self, params: &ParamStore) -> Result<RawResult, MaserError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(params.clone());
        let step = self.script.lock().unwrap().pop_front();

        let Some(step) = step else {
            return Ok(raw_result("default"));
        };
        if !step.delay.is_zero() {
            tokio::time::sleep(step.delay).await;
        }
        step.reply.map_err(MaserError::Service)
    }
}
