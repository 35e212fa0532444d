use std::fmt;

use serde::{Serialize, Serializer};
use smol_str::SmolStr;

/// A simple (unqualified) Java identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Name(SmolStr);

impl Name {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(SmolStr::new(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A dotted package name. The unnamed (default) package has no segments.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName {
    segments: Vec<Name>,
}

impl PackageName {
    #[must_use]
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Parse `com.example.app`. Empty segments are dropped, so `""` is the
    /// unnamed package.
    #[must_use]
    pub fn from_dotted(text: &str) -> Self {
        Self {
            segments: text
                .split('.')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Name::new)
                .collect(),
        }
    }

    #[must_use]
    pub fn is_unnamed(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Debug for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PackageName({:?})", self.to_string())
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}

/// A fully qualified class name split into its package and its chain of
/// simple names (outermost first), e.g. `com.example` + `[R, styleable]`.
///
/// The chain is never empty.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    package: PackageName,
    simple_names: Vec<Name>,
}

impl ClassName {
    pub fn new(package: PackageName, top_level: impl Into<Name>) -> Self {
        Self {
            package,
            simple_names: vec![top_level.into()],
        }
    }

    /// Returns the class nested directly inside `self` named `name`.
    #[must_use]
    pub fn nested(&self, name: impl Into<Name>) -> Self {
        let mut simple_names = self.simple_names.clone();
        simple_names.push(name.into());
        Self {
            package: self.package.clone(),
            simple_names,
        }
    }

    #[must_use]
    pub fn simple_name(&self) -> &Name {
        // `simple_names` is constructed non-empty and only ever grows.
        &self.simple_names[self.simple_names.len() - 1]
    }

    #[must_use]
    pub fn top_level(&self) -> &Name {
        &self.simple_names[0]
    }

    #[must_use]
    pub fn enclosing(&self) -> Option<ClassName> {
        if self.simple_names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            simple_names: self.simple_names[..self.simple_names.len() - 1].to_vec(),
        })
    }

    /// The source-level spelling, `com.example.R.styleable`.
    #[must_use]
    pub fn canonical_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassName({:?})", self.to_string())
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.package.is_unnamed() {
            write!(f, "{}.", self.package)?;
        }
        for (idx, name) in self.simple_names.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            f.write_str(name.as_str())?;
        }
        Ok(())
    }
}

impl Serialize for ClassName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
