//! Outbound port towards the reporting backend.
//!
//! The listener only talks to [`Lifecycle`], so a backend with a different
//! storage or API generation is plugged in by implementing this trait.

pub mod allure;
pub mod error;
pub mod record;
pub mod serialize;
#[cfg(test)]
pub(crate) mod testing;

pub use self::error::Error;
pub use self::record::{AttachmentRef, CaseRecord};

use self::allure::model::{Status, StatusDetails};
use uuid::Uuid;

pub type LifecycleResult = Result<(), Error>;

pub trait Lifecycle: Send + Sync {
    /// Opens a container (suite) named `name`, started at `start` epoch millis.
    fn start_container(&self, uuid: Uuid, name: &str, start: u128) -> LifecycleResult;
    fn stop_container(&self, uuid: &Uuid) -> LifecycleResult;
    /// Flushes a stopped container. Called exactly once per container.
    fn write_container(&self, uuid: &Uuid) -> LifecycleResult;
    /// Registers a case as a child of `container` without starting it.
    fn schedule_case(&self, container: &Uuid, case: &CaseRecord) -> LifecycleResult;
    fn start_case(&self, uuid: &Uuid) -> LifecycleResult;
    fn update_case(
        &self,
        uuid: &Uuid,
        status: Status,
        details: Option<StatusDetails>,
    ) -> LifecycleResult;
    fn stop_case(&self, uuid: &Uuid) -> LifecycleResult;
    /// Flushes a stopped case. Called exactly once per case.
    fn write_case(&self, uuid: &Uuid) -> LifecycleResult;
    fn add_attachment(&self, uuid: &Uuid, attachment: &AttachmentRef) -> LifecycleResult;
}
