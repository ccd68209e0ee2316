//! The authorization flow controller.
//!
//! Drives one popup-based handshake to completion: open the popup, fetch
//! the authorize URL, navigate, poll for closure, then fetch the connected
//! items and publish them. Progress surfaces to the UI as events over an
//! mpsc channel; connection state itself is always derived from the params
//! and the connecting flag, never stored on its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::backend::IntegrationApi;
use crate::config::Config;

use super::params::{IntegrationParams, SharedParams};
use super::popup::{AuthPopup, PopupOpener, PopupRequest};

/// Failure message when the popup cannot be created.
pub const POPUP_BLOCKED: &str = "Popup blocked. Please allow popups for this site.";

/// Failure message when the backend responds without an authorize URL.
pub const NO_AUTHORIZE_URL: &str = "No authorize URL from server";

/// Derived connection state of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Not connected, no attempt in progress.
    Idle,
    /// An authorization attempt is in progress.
    Connecting,
    /// The params count as connected. Terminal for this controller.
    Connected,
}

/// Events published by the flow controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowEvent {
    /// The params were replaced after a successful item fetch.
    Updated(IntegrationParams),
    /// The current attempt failed with a user-visible message.
    Failed(String),
}

/// Tunables for one controller instance.
#[derive(Debug, Clone)]
pub struct FlowSettings {
    /// Popup title and geometry.
    pub popup: PopupRequest,
    /// Popup-closure polling interval.
    pub poll_interval: Duration,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            popup: PopupRequest::default(),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl FlowSettings {
    /// Build settings from the application configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            popup: PopupRequest::from_config(&config.popup),
            poll_interval: Duration::from_millis(config.behavior.poll_interval_ms),
        }
    }
}

/// Clears the connecting flag on every exit path, including task abort.
struct ConnectingGuard(Arc<AtomicBool>);

impl Drop for ConnectingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Controller for the popup-based authorization handshake.
pub struct FlowController {
    api: Arc<dyn IntegrationApi>,
    opener: Arc<dyn PopupOpener>,
    params: SharedParams,
    settings: FlowSettings,
    connecting: Arc<AtomicBool>,
    alive: Arc<AtomicBool>,
    events: mpsc::Sender<FlowEvent>,
    task: Option<JoinHandle<()>>,
}

impl FlowController {
    /// Create a controller and the receiver for its events.
    pub fn new(
        api: Arc<dyn IntegrationApi>,
        opener: Arc<dyn PopupOpener>,
        params: SharedParams,
        settings: FlowSettings,
    ) -> (Self, mpsc::Receiver<FlowEvent>) {
        let (tx, rx) = mpsc::channel(32);
        let controller = Self {
            api,
            opener,
            params,
            settings,
            connecting: Arc::new(AtomicBool::new(false)),
            alive: Arc::new(AtomicBool::new(true)),
            events: tx,
            task: None,
        };
        (controller, rx)
    }

    /// The current state, derived from the params and the connecting flag.
    pub fn state(&self) -> FlowState {
        if self.params.is_connected() {
            FlowState::Connected
        } else if self.connecting.load(Ordering::SeqCst) {
            FlowState::Connecting
        } else {
            FlowState::Idle
        }
    }

    /// Whether an attempt is in progress.
    pub fn is_connecting(&self) -> bool {
        self.connecting.load(Ordering::SeqCst)
    }

    /// Start an authorization attempt.
    ///
    /// No-op unless the flow is `Idle`: re-entry while connecting and
    /// reconnecting once connected are both guarded out.
    pub fn connect(&mut self) {
        if self.state() != FlowState::Idle {
            return;
        }
        self.connecting.store(true, Ordering::SeqCst);

        let attempt = Attempt {
            api: self.api.clone(),
            opener: self.opener.clone(),
            params: self.params.clone(),
            connecting: self.connecting.clone(),
            alive: self.alive.clone(),
            events: self.events.clone(),
            settings: self.settings.clone(),
        };
        self.task = Some(tokio::spawn(attempt.run()));
    }

    /// Tear the controller down.
    ///
    /// Cancels any live polling task; completions from in-flight requests
    /// observed after this point are dropped without mutating state.
    pub fn teardown(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for FlowController {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// One authorization attempt, run as a spawned task.
struct Attempt {
    api: Arc<dyn IntegrationApi>,
    opener: Arc<dyn PopupOpener>,
    params: SharedParams,
    connecting: Arc<AtomicBool>,
    alive: Arc<AtomicBool>,
    events: mpsc::Sender<FlowEvent>,
    settings: FlowSettings,
}

impl Attempt {
    async fn run(self) {
        let _connecting = ConnectingGuard(self.connecting.clone());

        let popup = match self.opener.open(&self.settings.popup) {
            Ok(popup) => popup,
            Err(_) => {
                // Blocked popup aborts the attempt before any network call.
                self.fail(POPUP_BLOCKED).await;
                return;
            }
        };

        let authorize_url = match self.api.authorize_url().await {
            Ok(url) => url,
            Err(e) => {
                popup.close();
                self.fail(e.user_message()).await;
                return;
            }
        };
        let Some(authorize_url) = authorize_url else {
            popup.close();
            self.fail(NO_AUTHORIZE_URL).await;
            return;
        };

        if let Err(e) = popup.navigate(&authorize_url) {
            popup.close();
            self.fail(e.to_string()).await;
            return;
        }

        if self.poll_until_closed(popup.as_ref()).await {
            self.complete().await;
        }
    }

    fn alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    async fn fail(&self, message: impl Into<String>) {
        if self.alive() {
            let _ = self.events.send(FlowEvent::Failed(message.into())).await;
        }
    }

    /// Poll until the popup closes. Returns `false` on teardown.
    ///
    /// The ticker is dropped on return; this is the single cancellation
    /// point, so completion runs at most once per attempt. There is no
    /// timeout: the popup may stay open indefinitely.
    async fn poll_until_closed(&self, popup: &dyn AuthPopup) -> bool {
        let mut ticker = tokio::time::interval(self.settings.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; consume it so the popup
        // gets a full interval before the first closure check.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if !self.alive() {
                return false;
            }
            if popup.is_closed() {
                return true;
            }
        }
    }

    async fn complete(&self) {
        match self.api.items().await {
            Ok(items) => {
                if !self.alive() {
                    return;
                }
                let updated = self.params.apply_items(items);
                let _ = self.events.send(FlowEvent::Updated(updated)).await;
            }
            Err(e) => self.fail(e.user_message()).await,
        }
    }
}
