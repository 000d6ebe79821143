use serde_derive::Serialize;

use super::{
    attachment::Attachment,
    label::Label,
    stage::Stage,
    status::{Status, StatusDetails},
};

#[derive(Debug, Serialize, Clone, Builder)]
#[serde(rename_all = "camelCase")]
pub struct ExecutableItem {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default = "None")]
    status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default = "None")]
    status_details: Option<StatusDetails>,
    #[builder(default = "Stage::Scheduled")]
    stage: Stage,
    #[builder(default = "Vec::new()")]
    attachments: Vec<Attachment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default = "None")]
    start: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default = "None")]
    stop: Option<u128>,
}

impl ExecutableItem {
    pub fn builder() -> ExecutableItemBuilder {
        ExecutableItemBuilder::default()
    }
}

#[derive(Debug, Serialize, Clone, Builder)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    #[serde(flatten)]
    item: ExecutableItem,
    uuid: uuid::Uuid,
    history_id: String,
    full_name: String,
    #[builder(default = "Vec::new()")]
    labels: Vec<Label>,
}

impl TestResult {
    pub fn builder() -> TestResultBuilder {
        TestResultBuilder::default()
    }

    pub fn start(&mut self, at: u128) {
        self.item.stage = Stage::Running;
        self.item.start = Some(at);
    }

    pub fn stop(&mut self, at: u128) {
        self.item.stage = Stage::Finished;
        self.item.stop = Some(at);
    }

    pub fn update(&mut self, status: Status, details: Option<StatusDetails>) {
        self.item.status = Some(status);
        if details.is_some() {
            self.item.status_details = details;
        }
    }

    pub fn attach(&mut self, attachment: Attachment) {
        self.item.attachments.push(attachment);
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TestResultContainer {
    uuid: uuid::Uuid,
    name: String,
    children: Vec<uuid::Uuid>,
    start: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<u128>,
}

impl TestResultContainer {
    pub fn new(uuid: uuid::Uuid, name: String, start: u128) -> Self {
        Self {
            uuid,
            name,
            children: Vec::new(),
            start,
            stop: None,
        }
    }

    pub fn add_child(&mut self, child: uuid::Uuid) {
        self.children.push(child);
    }

    pub fn stop(&mut self, at: u128) {
        self.stop = Some(at);
    }
}
