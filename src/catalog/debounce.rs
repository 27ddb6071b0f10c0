//! Search input debouncing.
//!
//! Each keystroke replaces the pending dispatch; only after the input has
//! been quiet for the delay does the search actually run. The pending task
//! is tracked explicitly so cancellation is a real abort, not a no-op.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        SearchDebouncer {
            delay,
            pending: None,
        }
    }

    /// Schedule `dispatch` to run after the delay, cancelling any dispatch
    /// still waiting from a previous call.
    pub fn submit<F>(&mut self, dispatch: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            dispatch.await;
        }));
    }

    /// Abort the pending dispatch, if any. Called on every resubmit and when
    /// the view goes away.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
