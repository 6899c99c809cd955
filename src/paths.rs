//! Facilities for working with paths within validated instances.
use std::fmt;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// JSON Pointer as a wrapper around individual path components.
pub struct JSONPointer(Vec<PathChunk>);

impl JSONPointer {
    /// JSON pointer as a vector of strings. Each component is casted to `String`.
    /// Components are returned unescaped. Consumes `JSONPointer`.
    pub fn into_vec(self) -> Vec<String> {
        self.0
            .into_iter()
            .map(|item| match item {
                PathChunk::Name(value) => value,
                PathChunk::Index(idx) => idx.to_string(),
            })
            .collect()
    }

    pub(crate) fn as_slice(&self) -> &[PathChunk] {
        &self.0
    }
}

impl fmt::Display for JSONPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.0 {
            f.write_str("/")?;
            match chunk {
                // `~` and `/` inside property names are escaped per RFC 6901
                PathChunk::Name(value) => {
                    for ch in value.chars() {
                        match ch {
                            '~' => f.write_str("~0")?,
                            '/' => f.write_str("~1")?,
                            _ => fmt::Write::write_char(f, ch)?,
                        }
                    }
                }
                PathChunk::Index(idx) => write!(f, "{}", idx)?,
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PathChunk {
    Name(String),
    Index(usize),
}

/// A linked list of path components used during validation to avoid cloning
/// the whole path on every descent. Composite errors store their location as
/// an owned `JSONPointer`; re-validating their branches starts a fresh list
/// based on that pointer.
#[derive(Debug)]
pub(crate) struct InstancePath<'a> {
    chunk: Option<PathChunk>,
    parent: Option<&'a InstancePath<'a>>,
    base: Option<&'a JSONPointer>,
}

impl<'a> InstancePath<'a> {
    pub(crate) const fn new() -> Self {
        InstancePath {
            chunk: None,
            parent: None,
            base: None,
        }
    }

    pub(crate) const fn with_base(base: &'a JSONPointer) -> Self {
        InstancePath {
            chunk: None,
            parent: None,
            base: Some(base),
        }
    }

    pub(crate) fn push(&'a self, chunk: impl Into<PathChunk>) -> Self {
        InstancePath {
            chunk: Some(chunk.into()),
            parent: Some(self),
            base: None,
        }
    }

    pub(crate) fn to_vec(&'a self) -> Vec<PathChunk> {
        // The path capacity should be the average depth so we avoid extra allocations
        let mut result = Vec::with_capacity(6);
        let mut current = self;
        loop {
            if let Some(chunk) = &current.chunk {
                result.push(chunk.clone())
            }
            match current.parent {
                Some(parent) => current = parent,
                None => break,
            }
        }
        // Only the root node may carry a base pointer
        if let Some(base) = current.base {
            result.extend(base.as_slice().iter().rev().cloned());
        }
        result.reverse();
        result
    }
}

impl From<String> for PathChunk {
    #[inline]
    fn from(value: String) -> Self {
        PathChunk::Name(value)
    }
}
impl From<&str> for PathChunk {
    #[inline]
    fn from(value: &str) -> Self {
        PathChunk::Name(value.to_string())
    }
}
impl From<usize> for PathChunk {
    #[inline]
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

impl<'a> From<&'a InstancePath<'a>> for JSONPointer {
    #[inline]
    fn from(path: &'a InstancePath<'a>) -> Self {
        JSONPointer(path.to_vec())
    }
}

impl From<&[&str]> for JSONPointer {
    #[inline]
    fn from(path: &[&str]) -> Self {
        JSONPointer(
            path.iter()
                .map(|item| PathChunk::Name((*item).to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{InstancePath, JSONPointer};

    #[test]
    fn empty_pointer() {
        let path = InstancePath::new();
        assert_eq!(JSONPointer::from(&path).to_string(), "");
    }

    #[test]
    fn nested_pointer() {
        let path = InstancePath::new();
        let path = path.push("foo");
        let path = path.push(42_usize);
        assert_eq!(JSONPointer::from(&path).to_string(), "/foo/42");
    }

    #[test]
    fn tokens_are_escaped() {
        let path = InstancePath::new();
        let path = path.push("a/b~c");
        assert_eq!(JSONPointer::from(&path).to_string(), "/a~1b~0c");
    }

    #[test]
    fn into_vec_is_unescaped() {
        let path = InstancePath::new();
        let path = path.push("a/b");
        assert_eq!(JSONPointer::from(&path).into_vec(), vec!["a/b".to_string()]);
    }

    #[test]
    fn based_path_prepends_base() {
        let base: JSONPointer = (&["one", "two"][..]).into();
        let path = InstancePath::with_base(&base);
        let path = path.push("three");
        assert_eq!(JSONPointer::from(&path).to_string(), "/one/two/three");
    }
}
