pub mod page_path {
    use crate::app::PagePath;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<PagePath>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)
            .map(|v| v.map(|path| PagePath::from_dotted(path.as_str())))
    }
}
