use crate::reporter::allure::model::{Label, Status, StatusDetails};
use mime::Mime;
use uuid::Uuid;

/// One reported test execution, owned by the listener while the test is open.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseRecord {
    pub id: Uuid,
    pub history_id: String,
    pub name: String,
    pub full_name: String,
    pub labels: Vec<Label>,
    pub status: Option<Status>,
    pub status_detail: Option<StatusDetails>,
}

impl CaseRecord {
    pub fn new(id: Uuid, history_id: String, name: String, full_name: String) -> Self {
        Self {
            id,
            history_id,
            name,
            full_name,
            labels: Vec::new(),
            status: None,
            status_detail: None,
        }
    }

    pub fn with_labels(mut self, labels: Vec<Label>) -> Self {
        self.labels = labels;
        self
    }
}

/// Artifact attached to a case. `payload` is `None` when the file could not be read.
#[derive(Debug, Clone, PartialEq)]
pub struct AttachmentRef {
    pub display_name: String,
    pub mime_type: Mime,
    pub payload: Option<Vec<u8>>,
}

impl AttachmentRef {
    pub fn new(display_name: &str, mime_type: Mime, payload: Option<Vec<u8>>) -> Self {
        Self {
            display_name: display_name.to_owned(),
            mime_type,
            payload,
        }
    }
}
