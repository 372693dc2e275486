//! Domain paths and the flag naming convention
//!
//! A domain path runs from the root callable's name through nested parameter
//! names down to a leaf parameter. Flags are named from that path: the root
//! segment is dropped, interior segments ending in `_` are left out (their
//! children are flattened into the parent level) and a trailing `_` on the leaf
//! is stripped.

use std::fmt;

/// Path of names from the root callable to a parameter
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DomainPath(Vec<String>);

impl DomainPath {
    /// Path of a root callable
    pub fn root(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Path of a parameter nested under this one
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// All segments, root first
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Last segment
    pub fn leaf(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or_default()
    }

    /// Dash-joined flag name for this path
    pub fn flag_name(&self) -> String {
        flag_name(&self.0)
    }
}

impl fmt::Display for DomainPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl<S: Into<String>> FromIterator<S> for DomainPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Whether a segment asks for its level to be flattened
pub fn is_flattened(segment: &str) -> bool {
    segment.len() > 1 && segment.ends_with('_')
}

/// Join segments (root first) into a flag name
pub fn flag_name(segments: &[String]) -> String {
    let Some((_, rest)) = segments.split_first() else {
        return String::new();
    };
    let last = rest.len().saturating_sub(1);
    rest.iter()
        .enumerate()
        .filter_map(|(i, segment)| {
            if i == last {
                Some(
                    segment
                        .strip_suffix('_')
                        .filter(|s| !s.is_empty())
                        .unwrap_or(segment.as_str()),
                )
            } else if is_flattened(segment) {
                None
            } else {
                Some(segment.as_str())
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}
