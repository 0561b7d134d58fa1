mod display;
mod interactive;
mod script;

pub use display::{DisplayError, TerminalDisplay};
pub use interactive::run_interactive_terminal;
pub use script::{ClickScript, ScriptError};
