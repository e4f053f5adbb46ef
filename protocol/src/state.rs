use serde::{Deserialize, Serialize};

use crate::{Grid, GridChanges};

/// Win/lose classification reported with the `END` state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndType {
    Win,
    Lose,
}

/// Full game state as published by the state service, discriminated by the
/// `name` field on the wire. Exactly one variant is active at any time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    Start,
    WaitingToPlay {
        grid: Grid,
    },
    Playing {
        grid: Grid,
    },
    End {
        #[serde(rename = "endType")]
        end_type: EndType,
    },
}

/// Discriminant of [`GameState`], for logging and dispatch decisions that do
/// not need the payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StateName {
    Start,
    WaitingToPlay,
    Playing,
    End,
}

impl GameState {
    pub const fn name(&self) -> StateName {
        match self {
            Self::Start => StateName::Start,
            Self::WaitingToPlay { .. } => StateName::WaitingToPlay,
            Self::Playing { .. } => StateName::Playing,
            Self::End { .. } => StateName::End,
        }
    }

    pub const fn grid(&self) -> Option<&Grid> {
        match self {
            Self::WaitingToPlay { grid } | Self::Playing { grid } => Some(grid),
            Self::Start | Self::End { .. } => None,
        }
    }
}

/// One subscription payload: the new full state, plus the cell deltas that
/// produced it when the service has any to report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdate {
    pub state: GameState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_changes: Option<GridChanges>,
}

impl StateUpdate {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            grid_changes: None,
        }
    }

    pub fn with_changes(state: GameState, grid_changes: GridChanges) -> Self {
        Self {
            state,
            grid_changes: Some(grid_changes),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// A payload with a missing or unrecognized `name` tag fails here, at the
    /// boundary, and never reaches the render dispatch.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
