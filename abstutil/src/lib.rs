//! Small utilities shared by the turn restriction editor crates: logging setup and JSON helpers.

#[macro_use]
extern crate log;

mod io;
pub mod logger;

pub use crate::io::{from_json, read_json, to_json, write_json};
