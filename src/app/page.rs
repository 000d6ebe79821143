/// Node of a hierarchical test-page tree.
///
/// The root is synthetic: it never contributes a segment to names.
pub trait Page: Sized {
    fn name(&self) -> &str;
    fn parent(&self) -> Option<Self>;

    fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Raw comma-separated tag property of the page, if declared.
    fn tags(&self) -> Option<&str> {
        None
    }
}

/// Dot-joined names from the first page below the root down to `page`.
pub fn full_name<P: Page>(page: &P) -> String {
    if page.is_root() {
        return String::new();
    }
    let mut names = vec![page.name().to_owned()];
    let mut current = page.parent();
    while let Some(ancestor) = current {
        if ancestor.is_root() {
            break;
        }
        names.push(ancestor.name().to_owned());
        current = ancestor.parent();
    }
    names.reverse();
    names.join(".")
}

/// Page addressed by its dotted path below the root, e.g. `MySuite.MyTest`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PagePath {
    segments: Vec<String>,
    tags: Option<String>,
}

impl PagePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_dotted(path: &str) -> Self {
        Self {
            segments: path
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_owned)
                .collect(),
            tags: None,
        }
    }

    pub fn with_tags(mut self, tags: Option<String>) -> Self {
        self.tags = tags;
        self
    }
}

impl Page for PagePath {
    fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    fn parent(&self) -> Option<Self> {
        match self.segments.split_last() {
            Some((_, ancestors)) => Some(Self {
                segments: ancestors.to_vec(),
                tags: None,
            }),
            None => None,
        }
    }

    fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_full_name_skips_root() {
        let page = PagePath::from_dotted("FrontPage.MySuite.MyTest");

        assert_eq!(full_name(&page), "FrontPage.MySuite.MyTest");
        assert_eq!(full_name(&PagePath::root()), "");
    }

    #[test]
    fn test_parent_walks_up_to_root() {
        let page = PagePath::from_dotted("MySuite.MyTest").with_tags(Some("smoke".to_owned()));
        let parent = page.parent().unwrap();

        assert_eq!(page.name(), "MyTest");
        assert_eq!(page.tags(), Some("smoke"));
        assert_eq!(parent.name(), "MySuite");
        assert_eq!(parent.tags(), None);
        assert!(parent.parent().unwrap().is_root());
        assert!(PagePath::root().parent().is_none());
    }

    #[test]
    fn test_empty_segments_are_ignored() {
        let page = PagePath::from_dotted(".MySuite..MyTest.");

        assert_eq!(full_name(&page), "MySuite.MyTest");
    }

    struct Chain<'a> {
        names: &'a [&'a str],
    }

    impl<'a> Page for Chain<'a> {
        fn name(&self) -> &str {
            self.names[0]
        }

        fn parent(&self) -> Option<Self> {
            if self.names.len() > 1 {
                Some(Chain {
                    names: &self.names[1..],
                })
            } else {
                None
            }
        }
    }

    #[test]
    fn test_full_name_over_custom_tree() {
        // leaf first, last element stands for the root
        let chain = Chain {
            names: &["MyTest", "MySuite", "root"],
        };

        assert_eq!(full_name(&chain), "MySuite.MyTest");
    }
}
