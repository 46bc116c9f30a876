//! Service-protocol hooks for view introspection
//!
//! Exposes the runtime's live views to debugging tools through two named
//! service extensions:
//! - `_flutter.listViews` - every live view and the isolate bound to it
//! - `_flutter.setAssetBundlePath` - targets one view by its `_flutterView/0x<hex>` id
//!
//! Requests run on the dispatcher's thread. View data is owned by the UI
//! context, so every request takes a snapshot through [`ViewDirectoryBridge`],
//! which blocks until the owner answers or the configured timeout elapses.
//!
//! Error codes: see [`HooksErrorCode`]

pub mod bridge;
pub mod config;
pub mod error;
pub mod handlers;
pub mod json;
pub mod logging;
pub mod params;
pub mod registry;
pub mod view;
pub mod view_id;

pub use bridge::{
    directory_channel, spawn_owner_thread, DirectoryQueue, DirectoryTask, ViewDirectory,
    ViewDirectoryBridge,
};
pub use config::HooksConfig;
pub use error::{HooksError, HooksErrorCode, Result};
pub use handlers::{
    ListViews, ServiceExtension, SetAssetBundlePath, LIST_VIEWS_EXTENSION_NAME,
    SET_ASSET_BUNDLE_PATH_EXTENSION_NAME,
};
pub use params::{value_for_key, ServiceRequest};
pub use registry::{register_hooks, ExtensionRegistry, ServiceDispatcher, ServiceResponse};
pub use view::{IsolateInfo, ViewRecord, ILLEGAL_PORT};
pub use view_id::{ViewId, VIEW_ID_PREFIX};

/// Register the view extensions with `dispatcher` using `config`'s timeout.
///
/// The returned queue must be served by the context that owns the views.
pub fn install(
    dispatcher: &mut dyn ServiceDispatcher,
    config: &HooksConfig,
    running_precompiled_code: bool,
) -> Result<DirectoryQueue> {
    let (bridge, queue) = directory_channel(config.snapshot_timeout());
    register_hooks(dispatcher, running_precompiled_code, bridge)?;
    Ok(queue)
}
