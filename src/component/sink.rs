//! Sink：终点站

use super::id::ComponentId;
use crate::sim::{Event, Sequencer, SimTime};

#[derive(Debug, Default)]
pub struct Sink {
    clock: SimTime,
}

impl Sink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub(crate) fn simulate(&mut self, ev: &mut Event) {
        let t = ev.completed;
        ev.arrived = t;
        ev.started = t;
        self.clock = t;
        ev.component = None;
    }

    pub(crate) fn prioritize(&self, id: ComponentId, seq: &mut Sequencer, exploring: bool) {
        if exploring {
            seq.exclude(Some(id));
        } else {
            seq.clear_sources();
            seq.add_path(id);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.clock = SimTime::ZERO;
    }
}
