use estopim_protocol::{EndType, GameState, Grid};

/// The mutually exclusive top-level screens. Never more than one is rendered;
/// switching replaces the whole subtree.
#[derive(Debug, PartialEq)]
pub enum Screen<'a> {
    /// Nothing has arrived from the state service yet.
    Empty,
    Start,
    Board { grid: &'a Grid },
    End { end_type: EndType },
}

impl Screen<'_> {
    /// Total projection from the most recently received state.
    ///
    /// The `match` is the whole state machine: adding a `GameState` variant
    /// fails to compile here instead of falling through at run time.
    /// `WaitingToPlay` and `Playing` are rendering-equivalent.
    pub fn from_state(state: Option<&GameState>) -> Screen<'_> {
        match state {
            None => Screen::Empty,
            Some(GameState::Start) => Screen::Start,
            Some(GameState::WaitingToPlay { grid }) | Some(GameState::Playing { grid }) => {
                Screen::Board { grid }
            }
            Some(GameState::End { end_type }) => Screen::End {
                end_type: *end_type,
            },
        }
    }
}
