//! Adapter turning test-runner lifecycle notifications into an Allure report.

#[macro_use]
extern crate log;

#[macro_use]
extern crate derive_builder;

macro_rules! lock {
    ($name: expr) => {
        match $name.lock() {
            Ok(locked) => locked,
            Err(poisoned) => poisoned.into_inner(),
        }
    };
}

pub mod time;

pub mod app;
pub mod configuration;
pub mod reporter;

pub use self::app::{Failure, Listener, Page, PagePath, TestDescription};
pub use self::configuration::settings::Settings;
pub use self::reporter::allure::AllureResults;
pub use self::reporter::Lifecycle;
