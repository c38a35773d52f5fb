//! `state` commands.

use crate::cli::args::StateCommands;
use crate::cli::output::Output;
use crate::error::Result;
use crate::state::FilterStateStore;

pub fn run(store: &FilterStateStore, command: &StateCommands, output: &Output) -> Result<()> {
    match command {
        StateCommands::Show => output.print(&store.load()),
        StateCommands::Clear => {
            let state = store.clear();
            output.info("Filter state cleared.");
            output.print(&state)
        }
    }
}
