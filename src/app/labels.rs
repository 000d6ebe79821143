use crate::app::context::Lane;
use crate::configuration::constants::labels::UNKNOWN_HOST;
use crate::reporter::allure::model::Label;

/// Computes the classification labels of a case.
///
/// Order is fixed: `feature`, one `story` per tag in input order, `host`,
/// `thread` and the optional `framework`. Nothing is deduplicated.
#[derive(Debug, Clone)]
pub struct LabelDeriver {
    host: Label,
    framework: Option<Label>,
}

impl LabelDeriver {
    pub fn new(framework: Option<&str>) -> Self {
        Self {
            host: Label::host(resolve_host()),
            framework: framework.map(Label::framework),
        }
    }

    pub fn labels(&self, suite_path: &str, raw_tags: Option<&str>) -> Vec<Label> {
        self.labels_on(&Lane::current(), suite_path, raw_tags)
    }

    pub fn labels_on(&self, lane: &Lane, suite_path: &str, raw_tags: Option<&str>) -> Vec<Label> {
        let feature = suite_path.rsplit('.').next().unwrap_or(suite_path);
        let mut labels = vec![Label::feature(feature)];
        if let Some(tags) = raw_tags {
            labels.extend(split_tags(tags).map(Label::story));
        }
        labels.push(self.host.clone());
        labels.push(Label::thread(lane.label_value()));
        labels.extend(self.framework.clone());
        labels
    }
}

fn split_tags(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|tag| !tag.is_empty())
}

/// Local host name, `unknown` when it cannot be resolved.
pub fn resolve_host() -> String {
    match hostname::get() {
        Ok(name) => name.into_string().unwrap_or_else(|_| UNKNOWN_HOST.to_owned()),
        Err(e) => {
            warn!("Cannot resolve host name: {}", e);
            UNKNOWN_HOST.to_owned()
        }
    }
}
