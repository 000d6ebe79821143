use serde_derive::Serialize;

#[derive(Debug, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusDetails {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace: Option<String>,
}

impl StatusDetails {
    pub fn new(message: String, trace: Option<String>) -> Self {
        Self { message, trace }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }
}

impl From<String> for StatusDetails {
    fn from(message: String) -> Self {
        Self {
            message,
            trace: None,
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Failed,
    Passed,
}

#[cfg(test)]
mod test {

    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serialized_in_lowercase() {
        assert_eq!(serde_json::to_value(Status::Failed).unwrap(), json!("failed"));
        assert_eq!(serde_json::to_value(Status::Passed).unwrap(), json!("passed"));
    }

    #[test]
    fn test_details_without_trace_skip_the_field() {
        let details = StatusDetails::from("boom".to_owned());

        assert_eq!(
            serde_json::to_value(&details).unwrap(),
            json!({ "message": "boom" })
        );
    }
}
