//! Engine module: CLI, handlers, chooser, progress and path tools

pub mod arg_parser;
pub mod chooser;
pub mod cli;
pub mod handlers;
pub mod progress;
pub mod tools;

// Re-export commonly used items
pub use arg_parser::{CacheArgs, Cli, Commands};
pub use chooser::{Chooser, ChooserState, KeyAction, TerminalChooser, fuzzy_score};
pub use cli::handle_run;
pub use handlers::{handle_cache, handle_select};
pub use progress::{CounterRenderer, NoopRenderer, ProgressRenderer};
pub use tools::{glob_match, is_excluded, repo_root_from_git_dir};
