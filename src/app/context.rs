use crate::reporter::CaseRecord;
use std::collections::HashMap;
use std::sync::Mutex;
use std::thread::{self, ThreadId};

/// Execution lane a lifecycle notification arrives on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lane {
    id: ThreadId,
    name: Option<String>,
}

impl Lane {
    pub fn current() -> Self {
        let current = thread::current();
        Self {
            id: current.id(),
            name: current.name().map(str::to_owned),
        }
    }

    /// Value of the `thread` label of cases opened on this lane.
    pub fn label_value(&self) -> String {
        match &self.name {
            Some(name) => format!("{}.{}({:?})", std::process::id(), name, self.id),
            None => format!("{}.{:?}", std::process::id(), self.id),
        }
    }
}

/// Cases started but not yet stopped, at most one per lane.
#[derive(Debug, Default)]
pub struct OpenCases {
    cases: Mutex<HashMap<Lane, CaseRecord>>,
}

impl OpenCases {
    /// Opens `case` on `lane`, handing back whatever case was still open there.
    pub fn open(&self, lane: Lane, case: CaseRecord) -> Option<CaseRecord> {
        lock!(self.cases).insert(lane, case)
    }

    pub fn take(&self, lane: &Lane) -> Option<CaseRecord> {
        lock!(self.cases).remove(lane)
    }

    pub fn drain(&self) -> Vec<CaseRecord> {
        lock!(self.cases).drain().map(|(_, case)| case).collect()
    }

    pub fn len(&self) -> usize {
        lock!(self.cases).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::app::identity::new_case_id;
    use std::sync::Arc;

    fn case(name: &str) -> CaseRecord {
        CaseRecord::new(new_case_id(), String::new(), name.to_owned(), name.to_owned())
    }

    #[test]
    fn test_lane_of_named_thread() {
        let lane = thread::Builder::new()
            .name("worker-1".to_owned())
            .spawn(Lane::current)
            .unwrap()
            .join()
            .unwrap();

        assert!(lane.label_value().contains(".worker-1(ThreadId("));
        assert_ne!(lane, Lane::current());
    }

    #[test]
    fn test_reopen_returns_stale_case() {
        let cases = OpenCases::default();
        let lane = Lane::current();

        assert!(cases.open(lane.clone(), case("first")).is_none());
        let stale = cases.open(lane.clone(), case("second")).unwrap();

        assert_eq!(stale.name, "first");
        assert_eq!(cases.take(&lane).unwrap().name, "second");
        assert!(cases.take(&lane).is_none());
    }

    #[test]
    fn test_lanes_do_not_share_cases() {
        let cases = Arc::new(OpenCases::default());
        cases.open(Lane::current(), case("main"));

        let worker = {
            let cases = Arc::clone(&cases);
            thread::spawn(move || {
                let lane = Lane::current();
                assert!(cases.take(&lane).is_none());
                cases.open(lane, case("worker"));
            })
        };
        worker.join().unwrap();

        assert_eq!(cases.len(), 2);
        assert_eq!(cases.take(&Lane::current()).unwrap().name, "main");
        assert_eq!(cases.drain().len(), 1);
        assert!(cases.is_empty());
    }
}
