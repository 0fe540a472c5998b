//! Collector: drains scanner emissions until the finish signal, rendering progress as it goes.

use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, select_biased};
use log::debug;

use crate::engine::progress::ProgressRenderer;
use crate::{RepoPath, ScanEvent, ScanResult};

/// Wait for exactly one event. An emission that is ready always wins over the finish signal.
pub fn next_event(path_rx: &Receiver<RepoPath>, done_rx: &Receiver<usize>) -> ScanEvent {
    select_biased! {
        recv(path_rx) -> msg => match msg {
            Ok(path) => ScanEvent::Found(path),
            Err(_) => ScanEvent::Drained,
        },
        recv(done_rx) -> msg => match msg {
            Ok(count) => ScanEvent::Finished(count),
            Err(_) => ScanEvent::Abandoned,
        },
    }
}

fn accept<R: ProgressRenderer + ?Sized>(found: &mut ScanResult, path: RepoPath, renderer: &mut R) {
    found.push(path);
    if let Some(last) = found.last() {
        renderer.found(found.len(), last);
    }
}

/// Run the collector loop: append every emission in arrival order until the scanner signals
/// it is finished. Emissions still buffered when the finish signal is seen are drained before
/// returning, so nothing sent before the signal is lost.
///
/// Fails only if the scanner disappears without sending the finish signal.
pub fn collect_emissions<R: ProgressRenderer + ?Sized>(
    path_rx: &Receiver<RepoPath>,
    done_rx: &Receiver<usize>,
    renderer: &mut R,
) -> Result<ScanResult> {
    let mut found = ScanResult::new();
    let reported = loop {
        match next_event(path_rx, done_rx) {
            ScanEvent::Found(path) => accept(&mut found, path, renderer),
            ScanEvent::Finished(count) => break count,
            ScanEvent::Drained => match done_rx.recv() {
                Ok(count) => break count,
                Err(_) => return Err(anyhow!("scanner exited without signalling completion")),
            },
            ScanEvent::Abandoned => {
                return Err(anyhow!("scanner exited without signalling completion"));
            }
        }
    };
    for path in path_rx.try_iter() {
        accept(&mut found, path, renderer);
    }
    if reported != found.len() {
        debug!(
            "collector: scanner reported {} paths, received {}",
            reported,
            found.len()
        );
    }
    Ok(found)
}
