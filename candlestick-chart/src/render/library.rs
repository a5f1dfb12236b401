//! One-shot load signal of the external charting library

use tokio::sync::watch;
use tracing::{info, warn};

/// Load state of the charting library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryStatus {
    Loading,
    Loaded,
    Unavailable,
}

/// Create a linked loader/handle pair, starting in [`LibraryStatus::Loading`]
pub fn library_channel() -> (LibraryLoader, LibraryHandle) {
    let (tx, rx) = watch::channel(LibraryStatus::Loading);
    (LibraryLoader { tx }, LibraryHandle { rx })
}

/// Reports the outcome of the library load. Dropping it while the
/// library is still loading marks the library unavailable.
#[derive(Debug)]
pub struct LibraryLoader {
    tx: watch::Sender<LibraryStatus>,
}

impl LibraryLoader {
    /// Library finished loading
    pub fn loaded(self) {
        info!("charting library loaded");
        self.settle(LibraryStatus::Loaded);
    }

    /// Library could not be loaded
    pub fn failed(self, reason: &str) {
        warn!(%reason, "charting library failed to load");
        self.settle(LibraryStatus::Unavailable);
    }

    fn settle(&self, status: LibraryStatus) {
        self.tx.send_if_modified(|current| {
            if *current == LibraryStatus::Loading {
                *current = status;
                true
            } else {
                false
            }
        });
    }
}

impl Drop for LibraryLoader {
    fn drop(&mut self) {
        self.settle(LibraryStatus::Unavailable);
    }
}

/// Read side of the load signal; cheap to clone
#[derive(Debug, Clone)]
pub struct LibraryHandle {
    rx: watch::Receiver<LibraryStatus>,
}

impl LibraryHandle {
    /// Handle to a library that is already available
    pub fn ready_now() -> Self {
        let (loader, handle) = library_channel();
        loader.loaded();
        handle
    }

    /// Current status, without waiting
    pub fn status(&self) -> LibraryStatus {
        *self.rx.borrow()
    }

    /// Wait until the load settles and return its outcome
    pub async fn ready(&mut self) -> LibraryStatus {
        match self
            .rx
            .wait_for(|status| *status != LibraryStatus::Loading)
            .await
        {
            Ok(status) => *status,
            // sender gone without settling
            Err(_) => LibraryStatus::Unavailable,
        }
    }
}
