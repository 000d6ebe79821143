use mime::Mime;
use serde_derive::Serialize;

/// Reference from a test result to an attachment file stored next to it.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    name: String,
    #[serde(with = "crate::reporter::serialize::mime_type")]
    r#type: Mime,
    source: String,
}

impl Attachment {
    pub fn new(name: String, r#type: Mime, source: String) -> Self {
        Self {
            name,
            r#type,
            source,
        }
    }
}
