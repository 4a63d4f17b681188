//! Grid snake core.
//!
//! The simulation is a plain value: no globals, no I/O, no clock. A
//! front-end feeds at most one direction change per tick, calls
//! [`Session::tick`] (or drives [`Snake`] and [`Food`] directly), and reads the
//! body and food position back for display.

pub mod config;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;

pub use config::{ConfigError, GameConfig};
pub use food::{place, Food};
pub use grid::{Cell, Grid};
pub use session::{GameOverReason, Session, Status, TickOutcome};
pub use snake::{Direction, Snake, INITIAL_LENGTH};
