//! Per-document outlining session.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use super::debounce::Debouncer;
use crate::base::{SessionId, SnapshotVersion, TextRange, TextSnapshot};
use crate::classify::Classifier;
use crate::config::OutlineConfig;
use crate::ide::{self, HoverPreview};
use crate::outline::{self, Region, RegionList, TextEdit};

/// Notification that outlining changed within `range` of snapshot `version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionsChanged {
    pub session: SessionId,
    pub version: SnapshotVersion,
    pub range: TextRange,
}

#[derive(Debug)]
struct Pending {
    /// Edits since the current list was computed, oldest first
    edits: Vec<TextEdit>,
    debouncer: Debouncer,
}

/// Outlining state for one open document.
///
/// Readers always see a complete region list: a run builds the new list off
/// to the side and swaps it in under a short write lock. At most one run is
/// active at a time; a refresh requested during a run is skipped.
pub struct OutlineSession<C> {
    id: SessionId,
    classifier: C,
    config: OutlineConfig,
    current: RwLock<Arc<RegionList>>,
    running: AtomicBool,
    pending: Mutex<Pending>,
}

impl<C: Classifier> OutlineSession<C> {
    /// Create a session for a document at `snapshot`. No regions are known
    /// until the first [`refresh`](Self::refresh).
    pub fn new(classifier: C, config: OutlineConfig, snapshot: TextSnapshot) -> Self {
        let id = SessionId::fresh();
        let debouncer = Debouncer::new(config.debounce);
        Self {
            id,
            classifier,
            config,
            current: RwLock::new(Arc::new(RegionList::empty(id, snapshot))),
            running: AtomicBool::new(false),
            pending: Mutex::new(Pending {
                edits: Vec::new(),
                debouncer,
            }),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// The latest region list.
    pub fn regions(&self) -> Arc<RegionList> {
        self.current.read().clone()
    }

    /// Regions of the latest list whose lines intersect `first..=last`.
    pub fn regions_in_lines(&self, first: u32, last: u32) -> Vec<Region> {
        self.regions().overlapping(first, last).cloned().collect()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Record an edit made at `now` and restart the quiet period.
    pub fn edit(&self, edit: TextEdit, now: Instant) {
        let mut pending = self.pending.lock();
        pending.edits.push(edit);
        pending.debouncer.touch(now);
    }

    /// Re-run if the quiet period after the last edit has elapsed.
    ///
    /// While another run is active a due trigger stays armed, so a later
    /// poll picks it up.
    pub fn poll(&self, snapshot: &TextSnapshot, now: Instant) -> Option<RegionsChanged> {
        {
            let mut pending = self.pending.lock();
            if self.is_running() || !pending.debouncer.fire(now) {
                return None;
            }
        }
        match self.run(snapshot) {
            Run::Finished(changed) => changed,
            Run::Skipped => {
                // lost the race for the run flag after firing
                self.pending.lock().debouncer.touch(now);
                None
            }
        }
    }

    /// Re-outline `snapshot` now.
    ///
    /// Edits recorded since the previous run are consumed; they must take
    /// the previous list's text to `snapshot`. Returns the changed range, or
    /// `None` when nothing changed or another run is in progress.
    pub fn refresh(&self, snapshot: &TextSnapshot) -> Option<RegionsChanged> {
        match self.run(snapshot) {
            Run::Finished(changed) => changed,
            Run::Skipped => None,
        }
    }

    fn run(&self, snapshot: &TextSnapshot) -> Run {
        let Some(_guard) = RunGuard::acquire(&self.running) else {
            debug!(session = %self.id, "outline run already active, skipping");
            return Run::Skipped;
        };

        let edits = {
            let mut pending = self.pending.lock();
            pending.debouncer.cancel();
            std::mem::take(&mut pending.edits)
        };

        let tokens = self.classifier.classify(snapshot);
        let list = outline::outline(snapshot, &tokens, &self.config.parse, self.id);

        let old = self.regions();
        let changed = outline::diff(&old, &list, &edits);
        debug!(
            session = %self.id,
            version = %snapshot.version(),
            tokens = tokens.len(),
            regions = list.len(),
            ?changed,
            "outline run finished"
        );
        *self.current.write() = Arc::new(list);

        Run::Finished(changed.map(|range| RegionsChanged {
            session: self.id,
            version: snapshot.version(),
            range,
        }))
    }

    /// Hover preview for `region` of the latest list, falling back to the
    /// pinned text when `current` has moved on.
    pub fn hover(&self, region: &Region, current: &TextSnapshot) -> HoverPreview {
        ide::preview_or_fallback(&self.regions(), region, current, &self.config.preview)
    }
}

enum Run {
    Finished(Option<RegionsChanged>),
    /// Another run held the flag.
    Skipped,
}

/// Holds the session's run flag; clears it on drop.
struct RunGuard<'a>(&'a AtomicBool);

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| RunGuard(flag))
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
