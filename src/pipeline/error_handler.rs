use anyhow::Result;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::Opts;

/// Check scan result: if the walk recorded a terminal error, return it; otherwise log skipped paths.
/// Call after the finish signal and after joining the walk thread.
pub fn check_for_initial_error_or_skipped_paths(
    opts: &Opts,
    first_error: &Arc<Mutex<Option<String>>>,
    skipped_paths: &Arc<Mutex<Vec<(PathBuf, String)>>>,
) -> Result<()> {
    if let Some(msg) = first_error
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
    {
        return Err(anyhow::anyhow!("{}", msg));
    }
    let skipped = skipped_paths.lock().unwrap_or_else(PoisonError::into_inner);
    if !skipped.is_empty() {
        log::warn!(
            "Skipped {} paths due to permission errors or access issues",
            skipped.len()
        );
        if opts.verbose {
            for (p, msg) in skipped.iter() {
                eprintln!("  skipped: {} ({})", p.display(), msg);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_wins() {
        let first_error = Arc::new(Mutex::new(Some("root missing".to_string())));
        let skipped = Arc::new(Mutex::new(Vec::new()));
        let err = check_for_initial_error_or_skipped_paths(&Opts::default(), &first_error, &skipped)
            .unwrap_err();
        assert_eq!(err.to_string(), "root missing");
    }

    #[test]
    fn test_skipped_paths_are_not_fatal() {
        let first_error = Arc::new(Mutex::new(None));
        let skipped = Arc::new(Mutex::new(vec![(
            PathBuf::from("/src/locked"),
            "Permission denied".to_string(),
        )]));
        assert!(
            check_for_initial_error_or_skipped_paths(&Opts::default(), &first_error, &skipped)
                .is_ok()
        );
    }
}
