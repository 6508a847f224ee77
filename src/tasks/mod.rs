//! Background Tasks Module
//!
//! Houses the TTL cleanup worker that runs alongside each cache.

mod cleanup;

pub(crate) use cleanup::{spawn_cleanup_worker, WorkerHandle};
