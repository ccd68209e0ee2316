use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ratatui::widgets::ScrollbarState;
use tokio::sync::mpsc;

use crate::backend::{HttpBackend, IntegrationApi};
use crate::config::Config;
use crate::integration::{
    BrowserOpener, FlowController, FlowEvent, FlowSettings, FlowState, IntegrationParams, Item,
    PopupOpener, SharedParams,
};
use crate::session::Session;
use crate::ui::ToastState;

/// Scroll state for the item list.
#[derive(Debug, Default)]
pub struct ScrollState {
    /// Current offset into the item list.
    pub offset: usize,
    /// Scrollbar state for ratatui.
    pub scrollbar: ScrollbarState,
}

impl ScrollState {
    /// Scroll up one row.
    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down one row, clamped to the last item.
    pub fn scroll_down(&mut self, max_offset: usize) {
        if self.offset < max_offset {
            self.offset += 1;
        }
    }

    /// Scroll up by one page.
    pub fn page_up(&mut self, page_size: usize) {
        self.offset = self.offset.saturating_sub(page_size);
    }

    /// Scroll down by one page, clamped to the last item.
    pub fn page_down(&mut self, max_offset: usize, page_size: usize) {
        self.offset = (self.offset + page_size).min(max_offset);
    }

    /// Sync the scrollbar with the list length and offset.
    pub fn update(&mut self, total_items: usize) {
        self.scrollbar = self.scrollbar.content_length(total_items);
        self.scrollbar = self.scrollbar.position(self.offset);
    }
}

/// Application state for the integration client.
pub struct App {
    /// The caller-owned integration params, shared with the flow.
    pub params: SharedParams,
    /// The authorization flow controller.
    pub flow: FlowController,
    /// Receiver for flow events.
    flow_rx: mpsc::Receiver<FlowEvent>,
    /// Toast notification state.
    pub toasts: ToastState,
    /// Item list scroll state.
    pub scroll: ScrollState,
    /// Completion flag for the browser-backed popup; set when the user
    /// signals the consent window is done.
    popup_finished: Arc<AtomicBool>,
}

impl App {
    /// Create an App wired to the HTTP backend and the system browser.
    pub fn new(config: &Config) -> Self {
        let session = Session::new(&config.session.user, &config.session.org);
        let api: Arc<dyn IntegrationApi> = Arc::new(HttpBackend::new(
            config.backend.base_url.clone(),
            session,
            Duration::from_secs(config.backend.timeout_secs),
        ));
        let (opener, popup_finished) = BrowserOpener::new();
        Self::with_collaborators(
            api,
            Arc::new(opener),
            popup_finished,
            IntegrationParams::default(),
            config,
        )
    }

    /// Create an App with explicit collaborators. Used by tests.
    pub fn with_collaborators(
        api: Arc<dyn IntegrationApi>,
        opener: Arc<dyn PopupOpener>,
        popup_finished: Arc<AtomicBool>,
        params: IntegrationParams,
        config: &Config,
    ) -> Self {
        let params = SharedParams::new(params);
        let (flow, flow_rx) = FlowController::new(
            api,
            opener,
            params.clone(),
            FlowSettings::from_config(config),
        );

        Self {
            params,
            flow,
            flow_rx,
            toasts: ToastState::new(),
            scroll: ScrollState::default(),
            popup_finished,
        }
    }

    /// The current connection state.
    pub fn state(&self) -> FlowState {
        self.flow.state()
    }

    /// Snapshot of the connected items for rendering.
    pub fn items(&self) -> Vec<Item> {
        self.params.snapshot().items.unwrap_or_default()
    }

    /// Start an authorization attempt. No-op while connecting or once
    /// connected; the flow enforces the same guard.
    pub fn connect(&mut self) {
        if self.flow.state() == FlowState::Idle {
            self.flow.connect();
            self.toasts.info("Opening HubSpot consent page...");
        }
    }

    /// Signal that the user finished (or abandoned) the consent window.
    pub fn finish_authorization(&mut self) {
        if self.flow.state() == FlowState::Connecting {
            self.popup_finished.store(true, Ordering::SeqCst);
            self.toasts.info("Checking connection...");
        }
    }

    /// Drain pending flow events into toasts. Call once per frame.
    pub fn process_flow(&mut self) {
        while let Ok(event) = self.flow_rx.try_recv() {
            match event {
                FlowEvent::Updated(params) => {
                    if params.is_connected() {
                        let count = params.items.as_ref().map_or(0, Vec::len);
                        self.toasts
                            .success(format!("HubSpot connected ({count} records)"));
                    } else {
                        self.toasts
                            .info("Authorization finished, but no records are connected yet");
                    }
                }
                FlowEvent::Failed(message) => self.toasts.error(message),
            }
        }
    }

    /// Expire old toasts. Call once per frame.
    pub fn tick_toasts(&mut self) {
        self.toasts.tick();
    }

    /// Tear down the flow controller before exit.
    pub fn teardown(&mut self) {
        self.flow.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use async_trait::async_trait;
    use serde_json::json;

    struct StubApi;

    #[async_trait]
    impl IntegrationApi for StubApi {
        async fn authorize_url(&self) -> Result<Option<String>, BackendError> {
            Ok(None)
        }

        async fn items(&self) -> Result<Vec<Item>, BackendError> {
            Ok(vec![])
        }
    }

    fn test_app(params: IntegrationParams) -> App {
        let (opener, popup_finished) = BrowserOpener::new();
        App::with_collaborators(
            Arc::new(StubApi),
            Arc::new(opener),
            popup_finished,
            params,
            &Config::default(),
        )
    }

    #[test]
    fn test_new_app_starts_idle() {
        let app = test_app(IntegrationParams::default());
        assert_eq!(app.state(), FlowState::Idle);
        assert!(app.items().is_empty());
    }

    #[test]
    fn test_app_with_credentials_starts_connected() {
        let params = IntegrationParams {
            credentials: Some(json!({"access_token": "tok"})),
            ..Default::default()
        };
        let app = test_app(params);
        assert_eq!(app.state(), FlowState::Connected);
    }

    #[test]
    fn test_finish_authorization_noop_while_idle() {
        let mut app = test_app(IntegrationParams::default());
        app.finish_authorization();
        assert!(!app.popup_finished.load(Ordering::SeqCst));
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn test_scroll_state_clamps() {
        let mut scroll = ScrollState::default();
        scroll.scroll_up();
        assert_eq!(scroll.offset, 0);

        scroll.scroll_down(2);
        scroll.scroll_down(2);
        scroll.scroll_down(2);
        assert_eq!(scroll.offset, 2);

        scroll.page_down(5, 10);
        assert_eq!(scroll.offset, 5);
        scroll.page_up(3);
        assert_eq!(scroll.offset, 2);
    }
}
