//! Fixed-shape JSON responses consumed by debugging tools.
//!
//! Field order on each struct is the wire key order; do not reorder fields.

use serde::Serialize;

use crate::view::{IsolateInfo, ViewRecord};
use crate::view_id::ViewId;

/// `{"type":"@Isolate","fixedId":true,"id":"isolates/<id>","name":"<name>","number":"<id>"}`
#[derive(Debug, Serialize)]
pub struct IsolateRefJson<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(rename = "fixedId")]
    fixed_id: bool,
    id: String,
    name: &'a str,
    number: String,
}

impl<'a> IsolateRefJson<'a> {
    pub fn new(isolate: &'a IsolateInfo) -> Self {
        Self {
            kind: "@Isolate",
            fixed_id: true,
            id: format!("isolates/{}", isolate.id),
            name: &isolate.name,
            number: isolate.id.to_string(),
        }
    }
}

/// `{"type":"FlutterView","id":"_flutterView/0x<hex>"[,"isolate":{...}]}`
#[derive(Debug, Serialize)]
pub struct ViewJson<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: ViewId,
    #[serde(skip_serializing_if = "Option::is_none")]
    isolate: Option<IsolateRefJson<'a>>,
}

impl<'a> ViewJson<'a> {
    pub fn new(record: &'a ViewRecord) -> Self {
        Self {
            kind: "FlutterView",
            id: record.view_id,
            isolate: record.isolate.as_ref().map(IsolateRefJson::new),
        }
    }
}

#[derive(Debug, Serialize)]
struct ViewListJson<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    views: Vec<ViewJson<'a>>,
}

#[derive(Debug, Serialize)]
struct SuccessJson<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    view: Option<ViewJson<'a>>,
}

fn render<T: Serialize>(value: &T) -> String {
    // Only strings, integers and booleans reach here, which cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}

/// Render a single isolate reference.
pub fn isolate_ref(isolate: &IsolateInfo) -> String {
    render(&IsolateRefJson::new(isolate))
}

/// Render a single view fragment, including its isolate when one is bound.
pub fn view(record: &ViewRecord) -> String {
    render(&ViewJson::new(record))
}

/// Render the `FlutterViewList` response, skipping zero-handle placeholders.
pub fn view_list(records: &[ViewRecord]) -> String {
    render(&ViewListJson {
        kind: "FlutterViewList",
        views: records
            .iter()
            .filter(|r| r.is_live())
            .map(ViewJson::new)
            .collect(),
    })
}

/// Render the `Success` response for an asset-bundle request; a missing view
/// becomes `"view":null`.
pub fn asset_bundle_success(record: Option<&ViewRecord>) -> String {
    render(&SuccessJson {
        kind: "Success",
        view: record.map(ViewJson::new),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn sample() -> Vec<ViewRecord> {
        vec![
            ViewRecord::new(1),
            ViewRecord::new(2).with_isolate(7, "main"),
        ]
    }

    #[test]
    fn test_isolate_ref_literal() {
        let isolate = IsolateInfo {
            id: 7,
            name: "main".to_string(),
        };
        assert_eq!(
            isolate_ref(&isolate),
            r#"{"type":"@Isolate","fixedId":true,"id":"isolates/7","name":"main","number":"7"}"#
        );
    }

    #[test]
    fn test_view_without_isolate() {
        assert_eq!(
            view(&ViewRecord::new(0x1f)),
            r#"{"type":"FlutterView","id":"_flutterView/0x1f"}"#
        );
    }

    #[test]
    fn test_view_with_isolate() {
        assert_eq!(
            view(&ViewRecord::new(2).with_isolate(7, "main")),
            concat!(
                r#"{"type":"FlutterView","id":"_flutterView/0x2","isolate":"#,
                r#"{"type":"@Isolate","fixedId":true,"id":"isolates/7","name":"main","number":"7"}}"#
            )
        );
    }

    #[test]
    fn test_view_list_empty() {
        assert_eq!(view_list(&[]), r#"{"type":"FlutterViewList","views":[]}"#);
    }

    #[test]
    fn test_view_list_skips_zero_handles() {
        let records = vec![
            ViewRecord::new(0).with_isolate(9, "ghost"),
            ViewRecord::new(1),
            ViewRecord::new(0),
        ];
        assert_eq!(
            view_list(&records),
            r#"{"type":"FlutterViewList","views":[{"type":"FlutterView","id":"_flutterView/0x1"}]}"#
        );
    }

    #[test]
    fn test_view_list_two_views() {
        let json = view_list(&sample());
        let parsed: Value = serde_json::from_str(&json).unwrap();
        let views = parsed["views"].as_array().unwrap();
        assert_eq!(views.len(), 2);
        assert!(views[0].get("isolate").is_none());
        assert_eq!(views[1]["isolate"]["id"], "isolates/7");
        assert_eq!(views[1]["isolate"]["number"], "7");
    }

    #[test]
    fn test_asset_bundle_success() {
        let records = sample();
        assert_eq!(
            asset_bundle_success(Some(&records[0])),
            r#"{"type":"Success","view":{"type":"FlutterView","id":"_flutterView/0x1"}}"#
        );
        assert_eq!(
            asset_bundle_success(None),
            r#"{"type":"Success","view":null}"#
        );
    }

    #[test]
    fn test_isolate_name_is_escaped() {
        let record = ViewRecord::new(3).with_isolate(5, "say \"hi\"\n");
        let json = view(&record);
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["isolate"]["name"], "say \"hi\"\n");
    }

    #[test]
    fn test_output_is_stable() {
        let records = sample();
        assert_eq!(view_list(&records), view_list(&records));
    }
}
