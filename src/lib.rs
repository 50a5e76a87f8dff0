#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod ai;
mod bitboard;
mod board;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
mod marks;
#[cfg(feature = "std")]
pub mod persistence;
pub mod prelude;
#[cfg(feature = "std")]
pub mod scheduler;
#[cfg(feature = "std")]
pub mod session;
mod ship;
pub mod sim;
#[cfg(feature = "std")]
pub mod store;
#[cfg(feature = "std")]
pub mod terminal;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, Cells};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use marks::*;
#[cfg(feature = "std")]
pub use persistence::{DecodeError, SaveRecord};
#[cfg(feature = "std")]
pub use scheduler::TurnScheduler;
#[cfg(feature = "std")]
pub use session::{Command, Session};
pub use ship::*;
#[cfg(feature = "std")]
pub use store::{FileStore, MemoryStore, SaveStore};
