pub use cell::*;
pub use state::*;
pub use types::*;

mod cell;
mod state;
mod types;
