use serde_derive::Serialize;

pub const FEATURE: &str = "feature";
pub const STORY: &str = "story";
pub const HOST: &str = "host";
pub const THREAD: &str = "thread";
pub const FRAMEWORK: &str = "framework";

/// Classification label of a test case, rendered by the report in emission order.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    name: String,
    value: String,
}

impl Label {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn feature<V: Into<String>>(value: V) -> Self {
        Self::new(FEATURE, value)
    }

    pub fn story<V: Into<String>>(value: V) -> Self {
        Self::new(STORY, value)
    }

    pub fn host<V: Into<String>>(value: V) -> Self {
        Self::new(HOST, value)
    }

    pub fn thread<V: Into<String>>(value: V) -> Self {
        Self::new(THREAD, value)
    }

    pub fn framework<V: Into<String>>(value: V) -> Self {
        Self::new(FRAMEWORK, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
