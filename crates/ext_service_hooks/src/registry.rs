//! Extension registration with the host's service-protocol dispatcher.
//!
//! This module provides:
//! - `ServiceDispatcher`: the seam through which the host binds extension names
//! - `ExtensionRegistry`: an in-process dispatcher mapping names to handlers
//! - `register_hooks`: start-up entry point binding the `_flutter.*` extensions

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::bridge::ViewDirectoryBridge;
use crate::error::{HooksError, Result};
use crate::handlers::{ListViews, ServiceExtension, SetAssetBundlePath};
use crate::params::ServiceRequest;

// ============================================================================
// Host Contract
// ============================================================================

/// Outcome handed back to the host; `json` is owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub success: bool,
    pub json: String,
}

impl ServiceResponse {
    pub fn from_result(result: Result<String>) -> Self {
        match result {
            Ok(json) => Self {
                success: true,
                json,
            },
            Err(e) => Self {
                success: false,
                json: e.to_json(),
            },
        }
    }
}

/// Host debug-protocol dispatcher that extensions are bound into.
pub trait ServiceDispatcher {
    /// Bind `extension` under its name. Each name may be bound only once.
    fn register_root_extension(&mut self, extension: Arc<dyn ServiceExtension>) -> Result<()>;
}

// ============================================================================
// Extension Registry
// ============================================================================

/// Name → handler map, written during start-up and read-only afterwards
#[derive(Default)]
pub struct ExtensionRegistry {
    extensions: HashMap<&'static str, Arc<dyn ServiceExtension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered extension names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.extensions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn count(&self) -> usize {
        self.extensions.len()
    }

    pub fn get(&self, method: &str) -> Option<&Arc<dyn ServiceExtension>> {
        self.extensions.get(method)
    }

    /// Dispatch a request arriving as the host's parallel key/value arrays.
    pub fn dispatch<K, V>(&self, method: &str, keys: &[K], values: &[V]) -> ServiceResponse
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.dispatch_request(&ServiceRequest::from_parallel(method, keys, values))
    }

    pub fn dispatch_request(&self, request: &ServiceRequest) -> ServiceResponse {
        trace!(method = %request.method, params = request.params.len(), "Dispatching extension request");

        let result = match self.extensions.get(request.method.as_str()) {
            Some(extension) => extension.handle(request),
            None => Err(HooksError::method_not_found(request.method.clone())),
        };
        if let Err(e) = &result {
            debug!(method = %request.method, error = %e, "Extension request failed");
        }
        ServiceResponse::from_result(result)
    }
}

impl ServiceDispatcher for ExtensionRegistry {
    fn register_root_extension(&mut self, extension: Arc<dyn ServiceExtension>) -> Result<()> {
        let name = extension.name();
        if self.extensions.contains_key(name) {
            return Err(HooksError::registration(name, "extension already registered"));
        }
        debug!("Registered service extension: {}", name);
        self.extensions.insert(name, extension);
        Ok(())
    }
}

// ============================================================================
// Start-up Registration
// ============================================================================

/// Bind the `_flutter.*` view extensions into `dispatcher`.
///
/// `running_precompiled_code` is reserved for registering a reduced set in
/// AOT builds; both extensions are registered either way. A registration
/// failure is a start-up fault and should abort the embedder.
pub fn register_hooks(
    dispatcher: &mut dyn ServiceDispatcher,
    running_precompiled_code: bool,
    bridge: ViewDirectoryBridge,
) -> Result<()> {
    debug!(
        precompiled = running_precompiled_code,
        "Registering view service extensions"
    );
    dispatcher.register_root_extension(Arc::new(ListViews::new(bridge.clone())))?;
    dispatcher.register_root_extension(Arc::new(SetAssetBundlePath::new(bridge)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{directory_channel, spawn_owner_thread};
    use crate::handlers::{LIST_VIEWS_EXTENSION_NAME, SET_ASSET_BUNDLE_PATH_EXTENSION_NAME};
    use crate::view::ViewRecord;
    use serde_json::Value;
    use std::time::Duration;

    fn sample() -> Vec<ViewRecord> {
        vec![
            ViewRecord::new(1),
            ViewRecord::new(2).with_isolate(7, "main"),
        ]
    }

    fn registry() -> ExtensionRegistry {
        let (bridge, queue) = directory_channel(Some(Duration::from_secs(5)));
        spawn_owner_thread(queue, sample).unwrap();
        let mut registry = ExtensionRegistry::new();
        register_hooks(&mut registry, false, bridge).unwrap();
        registry
    }

    #[test]
    fn test_register_hooks_binds_both_extensions() {
        let registry = registry();
        assert_eq!(registry.count(), 2);
        assert_eq!(
            registry.names(),
            vec![LIST_VIEWS_EXTENSION_NAME, SET_ASSET_BUNDLE_PATH_EXTENSION_NAME]
        );
    }

    #[test]
    fn test_precompiled_flag_registers_same_set() {
        let (bridge, _queue) = directory_channel(None);
        let mut registry = ExtensionRegistry::new();
        register_hooks(&mut registry, true, bridge).unwrap();
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let (bridge, _queue) = directory_channel(None);
        let mut registry = ExtensionRegistry::new();
        register_hooks(&mut registry, false, bridge.clone()).unwrap();
        let err = register_hooks(&mut registry, false, bridge).unwrap_err();
        assert!(matches!(err, HooksError::Registration { ref name, .. } if name == LIST_VIEWS_EXTENSION_NAME));
    }

    #[test]
    fn test_dispatch_list_views() {
        let registry = registry();
        let keys: [&str; 0] = [];
        let response = registry.dispatch(LIST_VIEWS_EXTENSION_NAME, &keys, &keys);
        assert!(response.success);
        let parsed: Value = serde_json::from_str(&response.json).unwrap();
        assert_eq!(parsed["type"], "FlutterViewList");
        assert_eq!(parsed["views"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_dispatch_set_asset_bundle_path() {
        let registry = registry();
        let response = registry.dispatch(
            SET_ASSET_BUNDLE_PATH_EXTENSION_NAME,
            &["viewId"],
            &["_flutterView/0x1"],
        );
        assert_eq!(
            response,
            ServiceResponse {
                success: true,
                json: r#"{"type":"Success","view":{"type":"FlutterView","id":"_flutterView/0x1"}}"#
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_dispatch_failures_are_well_formed() {
        let registry = registry();

        let missing = registry.dispatch_request(&ServiceRequest::new(
            SET_ASSET_BUNDLE_PATH_EXTENSION_NAME,
        ));
        assert!(!missing.success);
        let parsed: Value = serde_json::from_str(&missing.json).unwrap();
        assert_eq!(parsed["code"], -32602);

        let unknown = registry.dispatch(
            SET_ASSET_BUNDLE_PATH_EXTENSION_NAME,
            &["viewId"],
            &["_flutterView/0x3"],
        );
        assert!(!unknown.success);
        let parsed: Value = serde_json::from_str(&unknown.json).unwrap();
        assert_eq!(parsed["code"], -32000);
    }

    #[test]
    fn test_dispatch_unknown_method() {
        let registry = registry();
        let response = registry.dispatch_request(&ServiceRequest::new("_flutter.reassemble"));
        assert!(!response.success);
        let parsed: Value = serde_json::from_str(&response.json).unwrap();
        assert_eq!(parsed["code"], -32601);
    }
}
