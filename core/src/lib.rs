#![no_std]

extern crate alloc;

pub use color::*;
pub use controller::*;
pub use error::*;
pub use generator::*;
pub use presenter::*;
pub use progression::*;
pub use randomizer::*;
pub use round::*;
pub use score::*;
pub use tier::*;
pub use timer::*;
pub use types::*;

mod color;
mod controller;
mod error;
mod generator;
mod presenter;
mod progression;
mod randomizer;
mod round;
mod score;
mod tier;
mod timer;
mod types;
