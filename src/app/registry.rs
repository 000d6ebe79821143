use crate::app::identity::new_case_id;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct SuiteRecord {
    pub id: Uuid,
    pub name: String,
    pub start_time: u128,
    pub closed: bool,
}

#[derive(Debug, Default)]
struct Suites {
    index: HashMap<String, usize>,
    records: Vec<SuiteRecord>,
}

/// Suites seen during the run, in the order they were first referenced.
#[derive(Debug, Default)]
pub struct SuiteRegistry {
    suites: Mutex<Suites>,
}

impl SuiteRegistry {
    /// Returns the id of suite `name`, creating it on first reference.
    ///
    /// Lookup and creation happen under one lock, and `on_create` runs before
    /// the lock is released, so a suite is announced exactly once.
    pub fn suite_id<F>(&self, name: &str, on_create: F) -> Uuid
    where
        F: FnOnce(&SuiteRecord),
    {
        let mut suites = lock!(self.suites);
        if let Some(&position) = suites.index.get(name) {
            return suites.records[position].id;
        }
        let record = SuiteRecord {
            id: new_case_id(),
            name: name.to_owned(),
            start_time: crate::now!(),
            closed: false,
        };
        debug!("Registered suite '{}' as {}", record.name, record.id);
        on_create(&record);
        let id = record.id;
        let position = suites.records.len();
        suites.records.push(record);
        suites.index.insert(name.to_owned(), position);
        id
    }

    pub fn all_suite_ids(&self) -> Vec<Uuid> {
        lock!(self.suites).records.iter().map(|r| r.id).collect()
    }

    /// Marks every open suite closed, returning those closed by this call.
    pub fn close_all(&self) -> Vec<SuiteRecord> {
        let mut suites = lock!(self.suites);
        suites
            .records
            .iter_mut()
            .filter(|record| !record.closed)
            .map(|record| {
                record.closed = true;
                record.clone()
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        lock!(self.suites).records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
