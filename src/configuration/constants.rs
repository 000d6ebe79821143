pub mod cargo_env {
    pub const CARGO_PKG_NAME: &'static str = env!("CARGO_PKG_NAME");
}

pub mod env {
    /// Prefix of environment variables overriding settings, e.g. `ALLURE_SKIP_SPECIAL_PAGES`.
    pub const PREFIX: &'static str = "ALLURE";
}

pub mod defaults {
    pub const RESULTS_DIR: &'static str = "allure-results";
    pub const PAGES_DIR: &'static str = "fitnesse-results";
    pub const RESULT_PAGE_PREFIX: &'static str = "../../../fitnesse-results";
}

pub mod pages {
    /// Suite machinery pages, never reported as cases when suppression is on.
    pub const SPECIAL_PAGES: [&'static str; 2] = ["SuiteSetUp", "SuiteTearDown"];
}

pub mod attachments {
    pub const SCREENSHOT_EXT: &'static str = "png";
    pub const PAGE_SOURCE_EXT: &'static str = "html";
    pub const PAGE_SCREENSHOT: &'static str = "Page Screenshot";
    pub const PAGE_SOURCE: &'static str = "Page Source";
    pub const ATTACHMENT: &'static str = "Attachment";
    pub const RESULT_PAGE: &'static str = "FitNesse Result page";
}

pub mod labels {
    pub const UNKNOWN_HOST: &'static str = "unknown";
}
