//! Channel for feeding observation sets into the heat map UI.
//!
//! The host creates a channel with [`channel`], hands the receiver to
//! [`crate::run_heatmap`] and keeps the [`HeatMapSink`]. Every command that
//! changes the observation sequence makes the UI rebuild its grid.

use std::sync::mpsc::{Receiver, SendError, Sender};

use crate::data::observation::Observation;

/// Messages sent over the channel to drive the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum HeatMapCommand {
    /// Replace the whole observation sequence.
    SetObservations(Vec<Observation>),
    /// Append to the end of the current sequence.
    AppendObservations(Vec<Observation>),
    /// Drop all observations.
    Clear,
}

/// Convenience sender for the heat map.
#[derive(Clone)]
pub struct HeatMapSink {
    tx: Sender<HeatMapCommand>,
}

pub fn channel() -> (HeatMapSink, Receiver<HeatMapCommand>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (HeatMapSink { tx }, rx)
}

impl HeatMapSink {
    pub fn set_observations<I>(&self, observations: I) -> Result<(), SendError<HeatMapCommand>>
    where
        I: Into<Vec<Observation>>,
    {
        self.tx
            .send(HeatMapCommand::SetObservations(observations.into()))
    }

    pub fn append_observations<I>(&self, observations: I) -> Result<(), SendError<HeatMapCommand>>
    where
        I: Into<Vec<Observation>>,
    {
        self.tx
            .send(HeatMapCommand::AppendObservations(observations.into()))
    }

    pub fn push(&self, observation: Observation) -> Result<(), SendError<HeatMapCommand>> {
        self.append_observations(vec![observation])
    }

    pub fn clear(&self) -> Result<(), SendError<HeatMapCommand>> {
        self.tx.send(HeatMapCommand::Clear)
    }
}

/// Apply one command to an observation sequence. Returns `true` if it changed.
pub fn apply_command(observations: &mut Vec<Observation>, cmd: HeatMapCommand) -> bool {
    match cmd {
        HeatMapCommand::SetObservations(obs) => {
            *observations = obs;
            true
        }
        HeatMapCommand::AppendObservations(obs) => {
            if obs.is_empty() {
                return false;
            }
            observations.extend(obs);
            true
        }
        HeatMapCommand::Clear => {
            let changed = !observations.is_empty();
            observations.clear();
            changed
        }
    }
}
