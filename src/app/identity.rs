use uuid::Uuid;

/// Fresh random handle for a case or a suite.
pub fn new_case_id() -> Uuid {
    Uuid::new_v4()
}

/// Deterministic fingerprint tying reruns of one logical test together.
///
/// Lowercase hex MD5 of `scope` followed by `full_name`, always 32 characters.
pub fn history_id(scope: &str, full_name: &str) -> String {
    let mut source = String::with_capacity(scope.len() + full_name.len());
    source.push_str(scope);
    source.push_str(full_name);
    format!("{:x}", md5::compute(source.as_bytes()))
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_case_ids_are_unique() {
        let first = new_case_id();
        let second = new_case_id();

        assert_ne!(first, second);
        assert_eq!(first.get_version_num(), 4);
    }

    #[test]
    fn test_history_id_is_stable() {
        let first = history_id("fitnesse.junit.Runner", "FrontPage.MySuite.MyTest");
        let second = history_id("fitnesse.junit.Runner", "FrontPage.MySuite.MyTest");

        assert_eq!(first, second);
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_history_id_differs_between_tests() {
        let first = history_id("Runner", "MySuite.FirstTest");
        let second = history_id("Runner", "MySuite.SecondTest");
        let other_scope = history_id("OtherRunner", "MySuite.FirstTest");

        assert_ne!(first, second);
        assert_ne!(first, other_scope);
    }

    #[test]
    fn test_history_id_of_empty_input() {
        assert_eq!(history_id("", ""), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
