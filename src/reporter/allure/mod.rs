//! Allure 2 results directory backend.
//!
//! Every case is flushed as `<uuid>-result.json`, every container as
//! `<uuid>-container.json` and every attachment as `<uuid>-attachment.<ext>`.

pub mod model;

use self::model::{Attachment, ExecutableItem, Status, StatusDetails, TestResult, TestResultContainer};
use crate::reporter::{AttachmentRef, CaseRecord, Error, Lifecycle, LifecycleResult};
use mime::Mime;
use serde::Serialize;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug)]
pub struct AllureResults {
    directory: PathBuf,
    cases: Mutex<HashMap<Uuid, TestResult>>,
    containers: Mutex<HashMap<Uuid, TestResultContainer>>,
}

impl AllureResults {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Result<Self, Error> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(Error::io(&directory))?;
        info!("Writing allure results into '{}'", directory.display());
        Ok(Self {
            directory,
            cases: Mutex::new(HashMap::new()),
            containers: Mutex::new(HashMap::new()),
        })
    }

    fn write_json<T: Serialize>(&self, uuid: Uuid, suffix: &str, value: &T) -> LifecycleResult {
        let path = self.directory.join(format!("{}-{}.json", uuid, suffix));
        let file = File::create(&path).map_err(Error::io(&path))?;
        serde_json::to_writer(&file, value).map_err(|e| Error::Serialize(uuid, e))?;
        trace!("Flushed '{}'", path.display());
        Ok(())
    }

    fn with_case<F>(&self, uuid: &Uuid, f: F) -> LifecycleResult
    where
        F: FnOnce(&mut TestResult),
    {
        let mut cases = lock!(self.cases);
        match cases.get_mut(uuid) {
            Some(result) => {
                f(result);
                Ok(())
            }
            None => Err(Error::UnknownCase(*uuid)),
        }
    }
}

impl TryFrom<&CaseRecord> for TestResult {
    type Error = Error;

    fn try_from(case: &CaseRecord) -> Result<Self, Self::Error> {
        let item = ExecutableItem::builder()
            .name(case.name.clone())
            .status(case.status)
            .status_details(case.status_detail.clone())
            .build()
            .map_err(Error::Model)?;
        TestResult::builder()
            .item(item)
            .uuid(case.id)
            .history_id(case.history_id.clone())
            .full_name(case.full_name.clone())
            .labels(case.labels.clone())
            .build()
            .map_err(Error::Model)
    }
}

fn extension(mime: &Mime) -> &str {
    if mime.type_() == mime::TEXT && mime.subtype() == mime::PLAIN {
        "txt"
    } else {
        mime.subtype().as_str()
    }
}

impl Lifecycle for AllureResults {
    fn start_container(&self, uuid: Uuid, name: &str, start: u128) -> LifecycleResult {
        let container = TestResultContainer::new(uuid, name.to_owned(), start);
        lock!(self.containers).insert(uuid, container);
        Ok(())
    }

    fn stop_container(&self, uuid: &Uuid) -> LifecycleResult {
        match lock!(self.containers).get_mut(uuid) {
            Some(container) => {
                container.stop(crate::now!());
                Ok(())
            }
            None => Err(Error::UnknownContainer(*uuid)),
        }
    }

    fn write_container(&self, uuid: &Uuid) -> LifecycleResult {
        let container = lock!(self.containers).remove(uuid);
        match container {
            Some(container) => self.write_json(*uuid, "container", &container),
            None => Err(Error::UnknownContainer(*uuid)),
        }
    }

    fn schedule_case(&self, container: &Uuid, case: &CaseRecord) -> LifecycleResult {
        let result = TestResult::try_from(case)?;
        lock!(self.cases).insert(case.id, result);
        match lock!(self.containers).get_mut(container) {
            Some(parent) => parent.add_child(case.id),
            None => warn!("Case '{}' scheduled outside of a known container", case.full_name),
        }
        Ok(())
    }

    fn start_case(&self, uuid: &Uuid) -> LifecycleResult {
        self.with_case(uuid, |result| result.start(crate::now!()))
    }

    fn update_case(
        &self,
        uuid: &Uuid,
        status: Status,
        details: Option<StatusDetails>,
    ) -> LifecycleResult {
        self.with_case(uuid, |result| result.update(status, details))
    }

    fn stop_case(&self, uuid: &Uuid) -> LifecycleResult {
        self.with_case(uuid, |result| result.stop(crate::now!()))
    }

    fn write_case(&self, uuid: &Uuid) -> LifecycleResult {
        let result = lock!(self.cases).remove(uuid);
        match result {
            Some(result) => self.write_json(*uuid, "result", &result),
            None => Err(Error::UnknownCase(*uuid)),
        }
    }

    fn add_attachment(&self, uuid: &Uuid, attachment: &AttachmentRef) -> LifecycleResult {
        let mut cases = lock!(self.cases);
        let result = cases.get_mut(uuid).ok_or(Error::UnknownCase(*uuid))?;
        let source = format!(
            "{}-attachment.{}",
            Uuid::new_v4(),
            extension(&attachment.mime_type)
        );
        let path = self.directory.join(&source);
        let payload = attachment.payload.as_deref().unwrap_or_default();
        fs::write(&path, payload).map_err(Error::io(&path))?;
        result.attach(Attachment::new(
            attachment.display_name.clone(),
            attachment.mime_type.clone(),
            source,
        ));
        Ok(())
    }
}
