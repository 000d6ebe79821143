use crate::app::{Failure, Listener, PagePath, TestDescription};
use crate::reporter::Lifecycle;
use serde_derive::Deserialize;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};

/// Test node as recorded in the journal.
#[derive(Debug, Clone, Deserialize)]
pub struct TestEntry {
    pub class_name: String,
    #[serde(default)]
    pub method_name: Option<String>,
    pub suite: String,
    #[serde(default)]
    pub tags: Option<String>,
    /// Dotted page path below the root.
    #[serde(default, with = "crate::configuration::deserialize::page_path")]
    pub page: Option<PagePath>,
}

impl From<&TestEntry> for TestDescription {
    fn from(entry: &TestEntry) -> Self {
        TestDescription {
            class_name: entry.class_name.clone(),
            method_name: entry.method_name.clone(),
            suite: entry.suite.clone(),
            tags: entry.tags.clone(),
            page: entry
                .page
                .clone()
                .map(|page| page.with_tags(entry.tags.clone())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RunnerEvent {
    SuiteDiscovered {
        name: String,
    },
    TestStarted {
        test: TestEntry,
    },
    TestFailed {
        test: TestEntry,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        trace: Option<String>,
    },
    TestAssumptionFailed {
        test: TestEntry,
        #[serde(default)]
        message: Option<String>,
        #[serde(default)]
        trace: Option<String>,
    },
    TestFinished {
        test: TestEntry,
    },
    RunFinished,
}

fn description(entry: &TestEntry) -> TestDescription {
    TestDescription::from(entry)
}

impl RunnerEvent {
    pub fn dispatch<L: Lifecycle>(&self, listener: &Listener<L>) {
        match self {
            RunnerEvent::SuiteDiscovered { name } => {
                listener.suite_discovered(name);
            }
            RunnerEvent::TestStarted { test } => listener.test_started(&description(test)),
            RunnerEvent::TestFailed {
                test,
                message,
                trace,
            } => listener.test_failed(
                &description(test),
                &Failure::new(message.clone(), trace.clone()),
            ),
            RunnerEvent::TestAssumptionFailed {
                test,
                message,
                trace,
            } => listener.test_assumption_failed(
                &description(test),
                &Failure::new(message.clone(), trace.clone()),
            ),
            RunnerEvent::TestFinished { test } => {
                listener.test_finished(&description(test))
            }
            RunnerEvent::RunFinished => listener.run_finished(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ReplaySummary {
    pub events: usize,
    pub malformed: usize,
    pub finished: bool,
    pub interrupted: bool,
}

/// Feeds every JSON event of `reader` to `listener`.
///
/// Unparseable lines are logged and skipped. A journal without a
/// `run_finished` event is finished once input runs out.
pub fn replay<R: Read, L: Lifecycle>(reader: R, listener: &Listener<L>) -> ReplaySummary {
    replay_until(reader, listener, &AtomicBool::new(false))
}

/// Like [`replay`], but stops between two events once `stop` is raised.
///
/// The run is then finished on the calling thread, so no event is cut in half.
pub fn replay_until<R: Read, L: Lifecycle>(
    reader: R,
    listener: &Listener<L>,
    stop: &AtomicBool,
) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    let stream = serde_json::Deserializer::from_reader(reader).into_iter::<serde_json::Value>();
    for value in stream {
        if stop.load(Ordering::SeqCst) {
            summary.interrupted = true;
            break;
        }
        let event = match value {
            Ok(value) => serde_json::from_value::<RunnerEvent>(value),
            Err(e) => {
                error!("Journal is not valid JSON past event {}: {}", summary.events, e);
                break;
            }
        };
        match event {
            Ok(event) => {
                trace!("Replaying {:?}", event);
                event.dispatch(listener);
                summary.events += 1;
                if let RunnerEvent::RunFinished = event {
                    summary.finished = true;
                }
            }
            Err(e) => {
                warn!("Skipping unknown journal event: {}", e);
                summary.malformed += 1;
            }
        }
    }
    if !summary.interrupted && stop.load(Ordering::SeqCst) {
        summary.interrupted = true;
    }
    if !summary.finished {
        warn!("Journal ended before the run finished, closing open suites");
        listener.run_finished();
    }
    summary
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::configuration::settings::Settings;
    use crate::reporter::allure::model::Status;
    use crate::reporter::testing::Recording;

    const JOURNAL: &str = r#"
{"event":"suite_discovered","name":"MySuite"}
{"event":"test_started","test":{"class_name":"Runner","method_name":"MySuite.MyTest","suite":"MySuite","tags":"smoke, login","page":"MySuite.MyTest"}}
{"event":"test_finished","test":{"class_name":"Runner","method_name":"MySuite.MyTest","suite":"MySuite","page":"MySuite.MyTest"}}
{"event":"test_started","test":{"class_name":"Runner","method_name":"MySuite.Broken","suite":"MySuite","page":"MySuite.Broken"}}
{"event":"test_failed","test":{"class_name":"Runner","method_name":"MySuite.Broken","suite":"MySuite","page":"MySuite.Broken"},"message":"expected 1 but was 2"}
{"event":"test_finished","test":{"class_name":"Runner","method_name":"MySuite.Broken","suite":"MySuite","page":"MySuite.Broken"}}
{"event":"run_finished"}
"#;

    #[test]
    fn test_replay_journal() {
        let listener = Listener::new(Recording::default(), Settings::default());

        let summary = replay(JOURNAL.as_bytes(), &listener);

        assert_eq!(
            summary,
            ReplaySummary {
                events: 7,
                malformed: 0,
                finished: true,
                interrupted: false,
            }
        );
        let scheduled = listener.lifecycle().scheduled();
        assert_eq!(scheduled.len(), 2);
        assert_eq!(scheduled[0].labels[1].value(), "smoke");
        assert_eq!(scheduled[0].labels[2].value(), "login");
        assert_eq!(
            listener.lifecycle().updates(&scheduled[1].id)[0].0,
            Status::Failed
        );
        assert_eq!(listener.lifecycle().written_cases().len(), 2);
        assert_eq!(listener.lifecycle().written_containers().len(), 1);
    }

    #[test]
    fn test_unfinished_journal_is_closed() {
        let listener = Listener::new(Recording::default(), Settings::default());
        let journal = r#"{"event":"test_started","test":{"class_name":"Runner","method_name":"A.B","suite":"A","page":"A.B"}}
{"event":"no_such_event"}"#;

        let summary = replay(journal.as_bytes(), &listener);

        assert_eq!(summary.events, 1);
        assert_eq!(summary.malformed, 1);
        assert!(!summary.finished);
        assert_eq!(listener.lifecycle().written_cases().len(), 1);
        assert_eq!(listener.lifecycle().written_containers().len(), 1);
    }

    #[test]
    fn test_raised_stop_finishes_run_on_caller() {
        let listener = Listener::new(Recording::default(), Settings::default());
        let stop = AtomicBool::new(false);
        let journal = r#"{"event":"test_started","test":{"class_name":"Runner","method_name":"A.B","suite":"A","page":"A.B"}}
{"event":"test_finished","test":{"class_name":"Runner","method_name":"A.B","suite":"A","page":"A.B"}}"#;

        stop.store(true, Ordering::SeqCst);
        let summary = replay_until(journal.as_bytes(), &listener, &stop);

        assert!(summary.interrupted);
        assert!(!summary.finished);
        assert_eq!(summary.events, 0);
        assert!(listener.lifecycle().scheduled().is_empty());
        assert!(listener.lifecycle().written_containers().is_empty());
    }

    /// Reader raising `stop` once the first journal line has been handed out.
    struct StopAfterFirstLine<'a> {
        data: &'a [u8],
        stop: &'a AtomicBool,
    }

    impl Read for StopAfterFirstLine<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let line = self
                .data
                .iter()
                .position(|b| *b == b'\n')
                .map_or(self.data.len(), |end| end + 1);
            let n = line.min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            if self.data[..n].contains(&b'\n') {
                self.stop.store(true, Ordering::SeqCst);
            }
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    #[test]
    fn test_stop_between_events_closes_open_case() {
        let listener = Listener::new(Recording::default(), Settings::default());
        let stop = AtomicBool::new(false);
        let journal = r#"{"event":"test_started","test":{"class_name":"Runner","method_name":"A.B","suite":"A","page":"A.B"}}
{"event":"test_failed","test":{"class_name":"Runner","method_name":"A.B","suite":"A","page":"A.B"},"message":"late"}
{"event":"run_finished"}"#;
        let reader = StopAfterFirstLine {
            data: journal.as_bytes(),
            stop: &stop,
        };

        let summary = replay_until(reader, &listener, &stop);

        assert!(summary.interrupted);
        assert!(!summary.finished);
        assert_eq!(summary.events, 1);
        let scheduled = listener.lifecycle().scheduled();
        assert_eq!(scheduled.len(), 1);
        assert!(listener.lifecycle().updates(&scheduled[0].id).is_empty());
        assert_eq!(listener.lifecycle().written_cases(), vec![scheduled[0].id]);
        assert_eq!(listener.lifecycle().written_containers().len(), 1);
    }

    #[test]
    fn test_entry_without_page() {
        let entry: TestEntry =
            serde_json::from_str(r#"{"class_name":"Runner","suite":"MySuite"}"#).unwrap();
        let description: TestDescription = TestDescription::from(&entry);

        assert!(description.page.is_none());
        assert!(!description.is_test());
    }
}
