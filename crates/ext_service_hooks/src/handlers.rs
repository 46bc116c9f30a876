//! Handlers for the `_flutter.*` service extensions.

use tracing::{debug, warn};

use crate::bridge::ViewDirectoryBridge;
use crate::error::{HooksError, Result};
use crate::json;
use crate::params::ServiceRequest;
use crate::view_id::ViewId;

pub const LIST_VIEWS_EXTENSION_NAME: &str = "_flutter.listViews";
pub const SET_ASSET_BUNDLE_PATH_EXTENSION_NAME: &str = "_flutter.setAssetBundlePath";

/// A named, host-dispatched request handler.
///
/// Handlers run synchronously on the dispatcher's thread and return the JSON
/// response body; the caller owns the returned string.
pub trait ServiceExtension: Send + Sync {
    fn name(&self) -> &'static str;

    fn handle(&self, request: &ServiceRequest) -> Result<String>;
}

// ============================================================================
// _flutter.listViews
// ============================================================================

/// Lists every live view together with its bound isolate.
#[derive(Debug, Clone)]
pub struct ListViews {
    bridge: ViewDirectoryBridge,
}

impl ListViews {
    pub fn new(bridge: ViewDirectoryBridge) -> Self {
        Self { bridge }
    }
}

impl ServiceExtension for ListViews {
    fn name(&self) -> &'static str {
        LIST_VIEWS_EXTENSION_NAME
    }

    fn handle(&self, _request: &ServiceRequest) -> Result<String> {
        let views = self.bridge.snapshot()?;
        debug!(count = views.len(), "Listing views");
        Ok(json::view_list(&views))
    }
}

// ============================================================================
// _flutter.setAssetBundlePath
// ============================================================================

/// Targets one view for asset-bundle configuration.
///
/// Only the view lookup is performed; the bundle path itself is not applied.
#[derive(Debug, Clone)]
pub struct SetAssetBundlePath {
    bridge: ViewDirectoryBridge,
}

impl SetAssetBundlePath {
    pub fn new(bridge: ViewDirectoryBridge) -> Self {
        Self { bridge }
    }
}

impl ServiceExtension for SetAssetBundlePath {
    fn name(&self) -> &'static str {
        SET_ASSET_BUNDLE_PATH_EXTENSION_NAME
    }

    fn handle(&self, request: &ServiceRequest) -> Result<String> {
        let raw_id = request
            .get("viewId")
            .ok_or_else(|| HooksError::invalid_params("missing required parameter 'viewId'"))?;
        let view_id = ViewId::decode(raw_id)?;

        let views = self.bridge.snapshot()?;
        let Some(record) = views
            .iter()
            .find(|r| r.is_live() && r.view_id == view_id)
        else {
            warn!(view_id = %view_id, "setAssetBundlePath for unknown view");
            return Err(HooksError::view_not_found(view_id.encode()));
        };

        // TODO: apply assetDirectory to the view's isolate once the asset
        // bundle loader exposes a reload entry point.
        debug!(
            view_id = %view_id,
            asset_directory = request.get("assetDirectory").unwrap_or_default(),
            "Matched view for asset bundle path"
        );
        Ok(json::asset_bundle_success(Some(record)))
    }
}
