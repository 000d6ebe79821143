use crate::reporter::allure::model::{Status, StatusDetails};
use crate::reporter::{AttachmentRef, CaseRecord, Lifecycle, LifecycleResult};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    StartContainer(Uuid, String),
    StopContainer(Uuid),
    WriteContainer(Uuid),
    Schedule(Uuid, CaseRecord),
    Start(Uuid),
    Update(Uuid, Status, Option<StatusDetails>),
    Stop(Uuid),
    Write(Uuid),
    Attach(Uuid, AttachmentRef),
}

/// Lifecycle double remembering every call in order.
#[derive(Debug, Default)]
pub struct Recording {
    calls: Mutex<Vec<Call>>,
}

impl Recording {
    pub fn calls(&self) -> Vec<Call> {
        lock!(self.calls).clone()
    }

    pub fn scheduled(&self) -> Vec<CaseRecord> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Schedule(_, case) => Some(case),
                _ => None,
            })
            .collect()
    }

    pub fn written_cases(&self) -> Vec<Uuid> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Write(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn started_containers(&self) -> Vec<(Uuid, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::StartContainer(id, name) => Some((id, name)),
                _ => None,
            })
            .collect()
    }

    pub fn written_containers(&self) -> Vec<Uuid> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::WriteContainer(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self, uuid: &Uuid) -> Vec<(Status, Option<StatusDetails>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(id, status, details) if &id == uuid => Some((status, details)),
                _ => None,
            })
            .collect()
    }

    pub fn attachments(&self, uuid: &Uuid) -> Vec<AttachmentRef> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Attach(id, attachment) if &id == uuid => Some(attachment),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) -> LifecycleResult {
        lock!(self.calls).push(call);
        Ok(())
    }
}

impl Lifecycle for Recording {
    fn start_container(&self, uuid: Uuid, name: &str, _start: u128) -> LifecycleResult {
        self.record(Call::StartContainer(uuid, name.to_owned()))
    }

    fn stop_container(&self, uuid: &Uuid) -> LifecycleResult {
        self.record(Call::StopContainer(*uuid))
    }

    fn write_container(&self, uuid: &Uuid) -> LifecycleResult {
        self.record(Call::WriteContainer(*uuid))
    }

    fn schedule_case(&self, container: &Uuid, case: &CaseRecord) -> LifecycleResult {
        self.record(Call::Schedule(*container, case.clone()))
    }

    fn start_case(&self, uuid: &Uuid) -> LifecycleResult {
        self.record(Call::Start(*uuid))
    }

    fn update_case(
        &self,
        uuid: &Uuid,
        status: Status,
        details: Option<StatusDetails>,
    ) -> LifecycleResult {
        self.record(Call::Update(*uuid, status, details))
    }

    fn stop_case(&self, uuid: &Uuid) -> LifecycleResult {
        self.record(Call::Stop(*uuid))
    }

    fn write_case(&self, uuid: &Uuid) -> LifecycleResult {
        self.record(Call::Write(*uuid))
    }

    fn add_attachment(&self, uuid: &Uuid, attachment: &AttachmentRef) -> LifecycleResult {
        self.record(Call::Attach(*uuid, attachment.clone()))
    }
}
