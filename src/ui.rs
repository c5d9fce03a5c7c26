pub mod cli;
pub mod io;

pub use cli::Cli;
pub use io::{IO, MenuOption, run};
