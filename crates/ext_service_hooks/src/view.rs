//! Snapshot records describing live views.

use crate::view_id::ViewId;

/// Host sentinel meaning "no isolate bound to this view"
pub const ILLEGAL_PORT: i64 = 0;

/// Isolate bound to a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolateInfo {
    /// Main port of the isolate, used as its numeric id
    pub id: i64,
    pub name: String,
}

/// One view as seen by the owning context at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRecord {
    pub view_id: ViewId,
    pub isolate: Option<IsolateInfo>,
}

impl ViewRecord {
    pub fn new(view_id: u64) -> Self {
        Self {
            view_id: ViewId(view_id),
            isolate: None,
        }
    }

    pub fn with_isolate(mut self, id: i64, name: impl Into<String>) -> Self {
        self.isolate = Some(IsolateInfo {
            id,
            name: name.into(),
        });
        self
    }

    /// Build a record from the registry's raw triple, folding the
    /// [`ILLEGAL_PORT`] sentinel into `None`.
    pub fn from_raw(view_id: u64, isolate_id: i64, isolate_name: impl Into<String>) -> Self {
        let isolate = (isolate_id != ILLEGAL_PORT).then(|| IsolateInfo {
            id: isolate_id,
            name: isolate_name.into(),
        });
        Self {
            view_id: ViewId(view_id),
            isolate,
        }
    }

    /// Zero-handle records are placeholders and never reported.
    pub fn is_live(&self) -> bool {
        self.view_id.is_valid()
    }
}
