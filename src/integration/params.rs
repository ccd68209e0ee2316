//! Caller-owned record capturing the result of one integration connection.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::item::Item;

/// Fixed integration name tagged onto the params after a successful fetch.
pub const INTEGRATION_KIND: &str = "HubSpot";

/// The connection status and result of one integration.
///
/// Owned by the host application; the flow controller only reads it and,
/// on a successful fetch, replaces `items` wholesale while preserving the
/// other fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationParams {
    /// Connected records from the most recent successful fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
    /// Opaque credentials, when the host already holds some.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
    /// Integration name tag, set to "HubSpot" on success.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl IntegrationParams {
    /// Whether the integration counts as connected.
    ///
    /// Derived, never stored: connected means a non-empty item list or
    /// present credentials.
    pub fn is_connected(&self) -> bool {
        let has_items = self.items.as_ref().is_some_and(|items| !items.is_empty());
        has_items || self.credentials.is_some()
    }

    /// Replace the item list wholesale and tag the integration name.
    pub fn apply_items(&mut self, items: Vec<Item>) {
        self.items = Some(items);
        self.kind = Some(INTEGRATION_KIND.to_string());
    }
}

/// Shared handle to the caller-owned [`IntegrationParams`].
///
/// The flow controller's only permitted mutation path is
/// [`SharedParams::apply_items`]; everything else is read-only snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedParams(Arc<Mutex<IntegrationParams>>);

impl SharedParams {
    /// Wrap an initial params value.
    pub fn new(params: IntegrationParams) -> Self {
        Self(Arc::new(Mutex::new(params)))
    }

    fn lock(&self) -> MutexGuard<'_, IntegrationParams> {
        // A panic while holding the lock leaves the data itself intact.
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A point-in-time copy of the params.
    pub fn snapshot(&self) -> IntegrationParams {
        self.lock().clone()
    }

    /// Whether the current params count as connected.
    pub fn is_connected(&self) -> bool {
        self.lock().is_connected()
    }

    /// Replace the item list and return the updated snapshot.
    pub(crate) fn apply_items(&self, items: Vec<Item>) -> IntegrationParams {
        let mut params = self.lock();
        params.apply_items(items);
        params.clone()
    }
}
