//! Scan pipeline: context, walk thread, collector loop, error handling.

pub mod collector;
pub mod context;
pub mod error_handler;
pub mod orchestrator;
pub mod walk;

pub use collector::{collect_emissions, next_event};
pub use context::{ScanChannels, ScanContext, ScanHandles, create_scan_channels};
pub use error_handler::check_for_initial_error_or_skipped_paths;
pub use orchestrator::{build_cache, collect_repositories, run_scan};
pub use walk::{run_walk_loop, spawn_walk_thread};
