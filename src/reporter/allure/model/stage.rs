use serde_derive::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Scheduled,
    Running,
    Finished,
}
