use crate::app::page::{Page, PagePath};
use crate::reporter::allure::model::StatusDetails;

/// Identity of a test node as reported by the runner.
#[derive(Debug, Clone, PartialEq)]
pub struct TestDescription<P = PagePath> {
    pub class_name: String,
    /// `None` for structural nodes such as a whole suite.
    pub method_name: Option<String>,
    /// Runner suite the node belongs to.
    pub suite: String,
    pub tags: Option<String>,
    pub page: Option<P>,
}

impl<P: Page> TestDescription<P> {
    pub fn new(class_name: &str, method_name: Option<&str>, suite: &str) -> Self {
        Self {
            class_name: class_name.to_owned(),
            method_name: method_name.map(str::to_owned),
            suite: suite.to_owned(),
            tags: None,
            page: None,
        }
    }

    pub fn with_page(mut self, page: P) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_tags(mut self, tags: &str) -> Self {
        self.tags = Some(tags.to_owned());
        self
    }

    pub fn is_test(&self) -> bool {
        self.method_name.is_some()
    }

    /// Short name: the page name, else the method, else the class.
    pub fn name(&self) -> &str {
        match (&self.page, &self.method_name) {
            (Some(page), _) if !page.is_root() => page.name(),
            (_, Some(method)) => method.as_str(),
            _ => self.class_name.as_str(),
        }
    }

    /// `Class.method`, or just the class for structural nodes.
    pub fn qualified_name(&self) -> String {
        match &self.method_name {
            Some(method) => format!("{}.{}", self.class_name, method),
            None => self.class_name.clone(),
        }
    }
}

/// Failure notification payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Failure {
    pub message: Option<String>,
    pub trace: Option<String>,
}

impl Failure {
    pub fn new(message: Option<String>, trace: Option<String>) -> Self {
        Self { message, trace }
    }

    pub fn details(&self) -> StatusDetails {
        StatusDetails::new(self.message.clone().unwrap_or_default(), self.trace.clone())
    }
}
