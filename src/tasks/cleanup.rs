//! TTL Cleanup Worker
//!
//! Background thread that periodically removes expired cache entries.

use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, warn};

use crate::cache::CacheInner;
use crate::serializer::CacheValue;

/// How long a sweep waits for the cache lock before skipping its tick.
const WORKER_LOCK_TIMEOUT: Duration = Duration::from_millis(250);

// == Worker Shared State ==
/// Stop flag and wakeup signal shared between the cache handle and its
/// worker thread.
struct WorkerShared {
    stopped: Mutex<bool>,
    wakeup: Condvar,
}

// == Worker Handle ==
/// Owns the worker thread on behalf of the cache.
///
/// `stop` signals the worker through the condvar, so shutdown does not wait
/// out the remaining sleep interval.
pub(crate) struct WorkerHandle {
    shared: Arc<WorkerShared>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerHandle {
    /// Signals the worker to exit and joins it. Idempotent.
    pub(crate) fn stop(&self) {
        {
            let mut stopped = self.shared.stopped.lock();
            *stopped = true;
        }
        self.shared.wakeup.notify_all();

        if let Some(handle) = self.thread.lock().take() {
            if handle.join().is_err() {
                warn!("cleanup worker panicked before shutdown");
            } else {
                info!("cleanup worker stopped");
            }
        }
    }
}

// == Spawn ==
/// Spawns the background cleanup thread for a cache.
///
/// The worker holds only a `Weak` reference to the cache state: it exits on
/// its next tick once the cache is dropped and never keeps it alive. Each
/// tick waits out `interval` (or a stop signal), then attempts the cache
/// lock with a bounded wait; on contention the tick is skipped rather than
/// stalling writers.
pub(crate) fn spawn_cleanup_worker<V: CacheValue>(
    cache: Weak<Mutex<CacheInner<V>>>,
    interval: Duration,
) -> WorkerHandle {
    let shared = Arc::new(WorkerShared {
        stopped: Mutex::new(false),
        wakeup: Condvar::new(),
    });
    let worker_shared = Arc::clone(&shared);

    let handle = thread::spawn(move || {
        info!(
            interval_secs = interval.as_secs(),
            "cleanup worker started"
        );

        loop {
            {
                let mut stopped = worker_shared.stopped.lock();
                if *stopped {
                    break;
                }
                // Wakes early when stop() fires the condvar
                let _ = worker_shared.wakeup.wait_for(&mut stopped, interval);
                if *stopped {
                    break;
                }
            }

            let Some(inner) = cache.upgrade() else {
                debug!("cache dropped, cleanup worker exiting");
                break;
            };

            match inner.try_lock_for(WORKER_LOCK_TIMEOUT) {
                Some(mut guard) => {
                    let removed = guard.cleanup();
                    if removed > 0 {
                        info!(removed, "cleanup sweep removed expired entries");
                    } else {
                        debug!("cleanup sweep found no expired entries");
                    }
                }
                None => debug!("cache lock contended, skipping cleanup tick"),
            };
        }

        info!("cleanup worker shut down");
    });

    WorkerHandle {
        shared,
        thread: Mutex::new(Some(handle)),
    }
}
