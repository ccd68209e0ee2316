//! HubSpot integration: connection flow, popup collaborator, and data model.

mod flow;
mod item;
mod params;
mod popup;

pub use flow::{
    FlowController, FlowEvent, FlowSettings, FlowState, NO_AUTHORIZE_URL, POPUP_BLOCKED,
};
pub use item::Item;
pub use params::{IntegrationParams, SharedParams, INTEGRATION_KIND};
pub use popup::{AuthPopup, BrowserOpener, PopupOpener, PopupRequest};
