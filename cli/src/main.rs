//! Tools for poking at the turn restriction editor without a real map editor around it.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod describe;
mod replay;

use anyhow::Result;
use structopt::StructOpt;

use restriction_editor::{FieldOptions, ScreenDims};

#[derive(StructOpt)]
#[structopt(name = "restrictions", about = "Inspect and exercise the turn restriction editor")]
enum Command {
    /// Print the highways and turns at one intersection
    Describe {
        /// The path to a JSON graph
        #[structopt(long)]
        fixture: String,
        /// The vertex to describe, like n1. Defaults to every node shared by 3 or more highway
        /// ends.
        #[structopt(long)]
        vertex: Option<String>,
    },
    /// Print the intersection at one vertex as JSON
    DumpJSON {
        /// The path to a JSON graph
        #[structopt(long)]
        fixture: String,
        /// The vertex, like n1
        #[structopt(long)]
        vertex: String,
        /// Write to this file instead of STDOUT
        #[structopt(long)]
        output: Option<String>,
    },
    /// Play a script of clicks and other events against the editor, printing what happens after
    /// each one.
    Replay {
        /// The path to a JSON graph
        #[structopt(long)]
        fixture: String,
        /// The path to a JSON script
        #[structopt(long)]
        script: String,
        /// The path to JSON overriding some drawing options
        #[structopt(long)]
        options: Option<String>,
        #[structopt(long, default_value = "400")]
        width: f64,
        #[structopt(long, default_value = "300")]
        height: f64,
    },
}

fn main() -> Result<()> {
    let cmd = Command::from_args();

    // JSON goes to STDOUT, so keep logs out of the way
    if !matches!(cmd, Command::DumpJSON { .. }) {
        abstutil::logger::setup();
    }

    match cmd {
        Command::Describe { fixture, vertex } => describe::run(fixture, vertex)?,
        Command::DumpJSON {
            fixture,
            vertex,
            output,
        } => describe::dump_json(fixture, vertex, output)?,
        Command::Replay {
            fixture,
            script,
            options,
            width,
            height,
        } => {
            let opts = match options {
                Some(path) => FieldOptions::load(&path)?,
                None => FieldOptions::default(),
            };
            replay::run(fixture, script, opts, ScreenDims::new(width, height))?
        }
    }
    Ok(())
}
