//! The popup window collaborator for the authorization handshake.
//!
//! The flow controller only knows the contract: open a window, point it at
//! the consent page, and watch for it to close. From a terminal there is no
//! real popup to own, so the production implementation hands the URL to the
//! system browser and reports closure through a completion flag the UI sets
//! when the user signals the consent window is done.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::PopupConfig;

/// Requested popup geometry and title.
#[derive(Debug, Clone)]
pub struct PopupRequest {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for PopupRequest {
    fn default() -> Self {
        Self::from_config(&PopupConfig::default())
    }
}

impl PopupRequest {
    /// Build a request from the popup configuration.
    pub fn from_config(config: &PopupConfig) -> Self {
        Self {
            title: config.title.clone(),
            width: config.width,
            height: config.height,
        }
    }
}

/// An open authorization popup.
pub trait AuthPopup: Send + Sync {
    /// Point the popup at the consent page.
    fn navigate(&self, url: &str) -> Result<()>;

    /// Whether the popup has been closed.
    fn is_closed(&self) -> bool;

    /// Close the popup.
    fn close(&self);
}

/// Creates popups on behalf of the flow controller.
pub trait PopupOpener: Send + Sync {
    /// Open a new popup. An `Err` means the popup was blocked.
    fn open(&self, request: &PopupRequest) -> Result<Box<dyn AuthPopup>>;
}

/// Browser-backed popup: navigation launches the system browser and
/// closure is whatever the completion flag says.
struct BrowserPopup {
    finished: Arc<AtomicBool>,
}

impl AuthPopup for BrowserPopup {
    fn navigate(&self, url: &str) -> Result<()> {
        open::that(url).context("Failed to open browser")
    }

    fn is_closed(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }

    fn close(&self) {
        // The browser tab belongs to the user; all we can drop is the flag.
        self.finished.store(true, Ordering::SeqCst);
    }
}

/// Opens authorization popups in the system browser.
///
/// The title and geometry in the request are advisory; a browser launched
/// from a terminal cannot honor them.
pub struct BrowserOpener {
    finished: Arc<AtomicBool>,
}

impl BrowserOpener {
    /// Create an opener together with its completion flag.
    ///
    /// The UI stores `true` into the flag when the user indicates the
    /// consent window is done; the current popup then reads as closed.
    pub fn new() -> (Self, Arc<AtomicBool>) {
        let finished = Arc::new(AtomicBool::new(false));
        let opener = Self {
            finished: finished.clone(),
        };
        (opener, finished)
    }
}

impl PopupOpener for BrowserOpener {
    fn open(&self, _request: &PopupRequest) -> Result<Box<dyn AuthPopup>> {
        // Each attempt starts with a fresh (unset) completion flag.
        self.finished.store(false, Ordering::SeqCst);
        Ok(Box::new(BrowserPopup {
            finished: self.finished.clone(),
        }))
    }
}
