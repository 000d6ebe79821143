//! Translation of runner lifecycle notifications into report-model calls.

pub mod attachment;
pub mod context;
pub mod description;
pub mod identity;
pub mod labels;
pub mod page;
pub mod registry;
pub mod result_page;

pub use self::description::{Failure, TestDescription};
pub use self::page::{Page, PagePath};

use self::attachment::AttachmentExtractor;
use self::context::{Lane, OpenCases};
use self::identity::{history_id, new_case_id};
use self::labels::LabelDeriver;
use self::page::full_name;
use self::registry::SuiteRegistry;
use self::result_page::{copy_result_pages, result_page};
use crate::configuration::constants::attachments::RESULT_PAGE;
use crate::configuration::constants::pages::SPECIAL_PAGES;
use crate::configuration::settings::Settings;
use crate::reporter::allure::model::Status;
use crate::reporter::{AttachmentRef, CaseRecord, Lifecycle, LifecycleResult};
use derivative::*;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Stateful adapter between a test runner and a [`Lifecycle`] backend.
///
/// Every callback completes on the caller's thread and never fails: backend
/// errors are logged and the run goes on. The case opened by a start
/// notification is tracked per calling thread, so lanes running tests in
/// parallel do not see each other's cases.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Listener<L> {
    #[derivative(Debug = "ignore")]
    lifecycle: L,
    settings: Settings,
    registry: SuiteRegistry,
    open: OpenCases,
    labels: LabelDeriver,
    extractor: AttachmentExtractor,
    post_processed: AtomicBool,
}

fn report(action: &str, subject: &str, result: LifecycleResult) {
    if let Err(e) = result {
        error!("Failed to {} '{}': {}", action, subject, e);
    }
}

pub fn is_special_page(name: &str) -> bool {
    SPECIAL_PAGES.iter().any(|special| name.ends_with(special))
}

impl<L: Lifecycle> Listener<L> {
    pub fn new(lifecycle: L, settings: Settings) -> Self {
        let labels = LabelDeriver::new(settings.framework.as_deref());
        let extractor =
            AttachmentExtractor::with_defaults(&settings.pages_dir, &settings.attachment_patterns);
        Self {
            lifecycle,
            settings,
            registry: SuiteRegistry::default(),
            open: OpenCases::default(),
            labels,
            extractor,
            post_processed: AtomicBool::new(false),
        }
    }

    pub fn lifecycle(&self) -> &L {
        &self.lifecycle
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn suites(&self) -> &SuiteRegistry {
        &self.registry
    }

    pub fn suite_discovered(&self, name: &str) -> Uuid {
        self.suite_uid(name)
    }

    pub fn test_started<P: Page>(&self, description: &TestDescription<P>) {
        let suite = self.suite_uid(&description.suite);
        if self.is_suppressed(description) {
            debug!("Skipping special page '{}'", description.name());
            return;
        }
        let lane = Lane::current();
        let case = self.create_case(&lane, description);
        trace!("Starting case '{}' as {}", case.full_name, case.id);
        report(
            "schedule",
            &case.full_name,
            self.lifecycle.schedule_case(&suite, &case),
        );
        report("start", &case.full_name, self.lifecycle.start_case(&case.id));
        if let Some(stale) = self.open.open(lane, case) {
            warn!("Case '{}' was never finished, closing it", stale.full_name);
            self.finish_case(&stale);
        }
    }

    pub fn test_failed<P: Page>(&self, description: &TestDescription<P>, failure: &Failure) {
        if self.is_suppressed(description) {
            debug!("Ignoring failure of special page '{}'", description.name());
            return;
        }
        let open = if description.is_test() {
            self.open.take(&Lane::current())
        } else {
            None
        };
        let mut case = match open {
            Some(case) => case,
            None => self.start_fake_case(description),
        };
        if description.is_test() {
            for attachment in self.extractor.extract(failure.message.as_deref()) {
                self.attach(&case, &attachment);
            }
        }
        let details = failure.details();
        case.status = Some(Status::Failed);
        case.status_detail = Some(details.clone());
        report(
            "fail",
            &case.full_name,
            self.lifecycle
                .update_case(&case.id, Status::Failed, Some(details)),
        );
        if description.is_test() {
            self.attach_result_page(&case, description);
        }
        self.finish_case(&case);
    }

    pub fn test_assumption_failed<P: Page>(
        &self,
        description: &TestDescription<P>,
        failure: &Failure,
    ) {
        self.test_failed(description, failure)
    }

    pub fn test_finished<P: Page>(&self, description: &TestDescription<P>) {
        if self.is_suppressed(description) {
            return;
        }
        let mut case = match self.open.take(&Lane::current()) {
            Some(case) => case,
            None => {
                trace!("No open case for '{}', already closed", description.name());
                return;
            }
        };
        if case.status.is_none() {
            case.status = Some(Status::Passed);
            report(
                "pass",
                &case.full_name,
                self.lifecycle.update_case(&case.id, Status::Passed, None),
            );
        }
        self.attach_result_page(&case, description);
        self.finish_case(&case);
    }

    /// Closes leftover cases and every suite not yet closed, then runs the
    /// configured copy of result pages. Safe to call more than once.
    pub fn run_finished(&self) {
        for case in self.open.drain() {
            warn!("Case '{}' was never finished, closing it", case.full_name);
            self.finish_case(&case);
        }
        for suite in self.registry.close_all() {
            debug!("Closing suite '{}'", suite.name);
            report(
                "stop container",
                &suite.name,
                self.lifecycle.stop_container(&suite.id),
            );
            report(
                "write container",
                &suite.name,
                self.lifecycle.write_container(&suite.id),
            );
        }
        if self.post_processed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(target) = &self.settings.copy_pages_to {
            match copy_result_pages(&self.settings.pages_dir, target) {
                Ok(copied) => info!(
                    "Copied {} result pages into '{}'",
                    copied,
                    target.display()
                ),
                Err(e) => error!(
                    "Failed to copy result pages from '{}' into '{}': {}",
                    self.settings.pages_dir.display(),
                    target.display(),
                    e
                ),
            }
        }
    }

    fn suite_uid(&self, name: &str) -> Uuid {
        self.registry.suite_id(name, |record| {
            let display = self
                .settings
                .suite_name_override
                .as_deref()
                .unwrap_or(&record.name);
            info!("Starting suite '{}'", display);
            report(
                "start container",
                display,
                self.lifecycle
                    .start_container(record.id, display, record.start_time),
            );
        })
    }

    fn is_suppressed<P: Page>(&self, description: &TestDescription<P>) -> bool {
        self.settings.skip_special_pages && is_special_page(description.name())
    }

    fn create_case<P: Page>(&self, lane: &Lane, description: &TestDescription<P>) -> CaseRecord {
        let (name, full, suite_path, tags) = match &description.page {
            Some(page) => (
                page.name().to_owned(),
                full_name(page),
                page.parent()
                    .map(|parent| full_name(&parent))
                    .filter(|path| !path.is_empty())
                    .unwrap_or_else(|| description.suite.clone()),
                page.tags().or_else(|| description.tags.as_deref()),
            ),
            None => (
                description.name().to_owned(),
                description.qualified_name(),
                description.suite.clone(),
                description.tags.as_deref(),
            ),
        };
        let labels = self.labels.labels_on(lane, &suite_path, tags);
        CaseRecord::new(
            new_case_id(),
            history_id(&description.class_name, &full),
            name,
            full,
        )
        .with_labels(labels)
    }

    fn start_fake_case<P: Page>(&self, description: &TestDescription<P>) -> CaseRecord {
        let suite = self.suite_uid(&description.suite);
        let case = CaseRecord::new(
            new_case_id(),
            history_id(
                &description.class_name,
                description.method_name.as_deref().unwrap_or_default(),
            ),
            description.name().to_owned(),
            description.qualified_name(),
        );
        debug!("Reporting failure of '{}' as a separate case", case.full_name);
        report(
            "schedule",
            &case.full_name,
            self.lifecycle.schedule_case(&suite, &case),
        );
        report("start", &case.full_name, self.lifecycle.start_case(&case.id));
        case
    }

    fn attach(&self, case: &CaseRecord, attachment: &AttachmentRef) {
        report(
            "attach to",
            &case.full_name,
            self.lifecycle.add_attachment(&case.id, attachment),
        );
    }

    fn attach_result_page<P: Page>(&self, case: &CaseRecord, description: &TestDescription<P>) {
        let test = description
            .method_name
            .as_deref()
            .unwrap_or(&case.full_name);
        let page = result_page(&self.settings.result_page_prefix, test);
        let attachment = AttachmentRef::new(RESULT_PAGE, mime::TEXT_HTML, Some(page.into_bytes()));
        self.attach(case, &attachment);
    }

    fn finish_case(&self, case: &CaseRecord) {
        report("stop", &case.full_name, self.lifecycle.stop_case(&case.id));
        report("write", &case.full_name, self.lifecycle.write_case(&case.id));
    }
}
