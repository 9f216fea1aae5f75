//! The process-wide list of registered test cases.

use std::collections::HashSet;

use crate::runner::{TestContext, TestResult};

/// A registered test body.
pub type TestFn = Box<dyn Fn(&TestContext<'_>) -> TestResult>;

/// A named test case. Created once at registration time and immutable
/// afterwards.
pub struct TestCase {
    name: String,
    body: TestFn,
}

impl TestCase {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn body(&self) -> &(dyn Fn(&TestContext<'_>) -> TestResult) {
        &*self.body
    }
}

/// Registering two tests under the same name is a programming error; the
/// registry rejects the second registration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("\"{0}\" has already been registered")]
pub struct DuplicateName(pub String);

/// Append-only collection of test cases. Insertion order is preserved and
/// defines run order.
#[derive(Default)]
pub struct Registry {
    cases: Vec<TestCase>,
    seen_names: HashSet<String>,
}

impl Registry {
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        body: impl Fn(&TestContext<'_>) -> TestResult + 'static,
    ) -> Result<(), DuplicateName> {
        let name = name.into();
        debug_assert!(!name.is_empty(), "test names must be non-empty");
        if !self.seen_names.insert(name.clone()) {
            return Err(DuplicateName(name));
        }
        self.cases.push(TestCase {
            name,
            body: Box::new(body),
        });
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCase> {
        self.cases.iter()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::Registry;

    #[test]
    fn distinct_names_register_in_order() {
        let mut registry = Registry::default();
        registry.insert("first", |_| Ok(())).unwrap();
        registry.insert("second", |_| Ok(())).unwrap();
        registry.insert("third", |_| Ok(())).unwrap();

        let names: Vec<_> = registry.iter().map(|case| case.name().to_string()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry = Registry::default();
        registry.insert("dup", |_| Ok(())).unwrap();

        let err = registry.insert("dup", |_| Ok(())).unwrap_err();
        assert_eq!(err.0, "dup");
        // The first registration is untouched.
        assert_eq!(registry.len(), 1);
    }
}
