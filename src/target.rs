//! Resolved target descriptions consumed by the emitters.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Compile rule selector.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// C compiler, rule `cc`
    Cc,
    /// C++ compiler, rule `cxx`
    Cxx,
}

impl Tool {
    pub fn rule(&self) -> &'static str {
        match self {
            Tool::Cc => "cc",
            Tool::Cxx => "cxx",
        }
    }

    /// Guess the rule from a source file's extension.
    ///
    /// Only `.c` goes to the C compiler; assembly and Objective-C++ sources
    /// are fed to the C++ driver.
    pub fn for_source(path: &str) -> Tool {
        match path.rsplit_once('.') {
            Some((_, "c")) => Tool::Cc,
            _ => Tool::Cxx,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    StaticLibrary,
    Executable,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::StaticLibrary => f.write_str("static library"),
            TargetKind::Executable => f.write_str("executable"),
        }
    }
}

/// One buildable target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    pub name: String,
    pub kind: TargetKind,
    pub sources: Vec<String>,
    /// Declared compile rule; inferred per source when `None`.
    pub tool: Option<Tool>,
    pub include_dirs: Vec<String>,
    pub cflags: Vec<String>,
    pub cflags_cc: Vec<String>,
    /// Static libraries to link, in link order. Executables only.
    pub libs: Vec<String>,
}

impl TargetSpec {
    pub fn new(name: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            sources: Vec::new(),
            tool: None,
            include_dirs: Vec::new(),
            cflags: Vec::new(),
            cflags_cc: Vec::new(),
            libs: Vec::new(),
        }
    }

    pub fn with_sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    pub fn with_tool(mut self, tool: Tool) -> Self {
        self.tool = Some(tool);
        self
    }

    pub fn with_libs<I, S>(mut self, libs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.libs.extend(libs.into_iter().map(Into::into));
        self
    }

    /// Compile rule for one of this target's sources.
    pub fn tool_for(&self, source: &str) -> Tool {
        self.tool.unwrap_or_else(|| Tool::for_source(source))
    }
}

/// Every target of one generation run plus the generation-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    pub static_libraries: BTreeMap<String, TargetSpec>,
    pub executables: BTreeMap<String, TargetSpec>,

    /// Prefixed onto every source path used as a compile input.
    pub source_root: Option<PathBuf>,
    pub include_dirs: Vec<String>,
    pub cflags: Vec<String>,
    pub cflags_cc: Vec<String>,
    pub ldflags: Vec<String>,
}

impl TargetSet {
    /// Insert a target into the mapping of its kind, replacing any
    /// same-named target of that kind.
    pub fn insert(&mut self, target: TargetSpec) {
        let map = match target.kind {
            TargetKind::StaticLibrary => &mut self.static_libraries,
            TargetKind::Executable => &mut self.executables,
        };
        map.insert(target.name.clone(), target);
    }

    /// All targets, libraries first, each group ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &TargetSpec> {
        self.static_libraries
            .values()
            .chain(self.executables.values())
    }

    pub fn source_count(&self) -> usize {
        self.iter().map(|t| t.sources.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_inference() {
        assert_eq!(Tool::for_source("base/b.c"), Tool::Cc);
        assert_eq!(Tool::for_source("a.cc"), Tool::Cxx);
        assert_eq!(Tool::for_source("x.cpp"), Tool::Cxx);
        assert_eq!(Tool::for_source("mac/util.mm"), Tool::Cxx);
        assert_eq!(Tool::for_source("noext"), Tool::Cxx);
    }

    #[test]
    fn test_declared_tool_wins() {
        let t = TargetSpec::new("ev", TargetKind::StaticLibrary).with_tool(Tool::Cxx);
        assert_eq!(t.tool_for("buffer.c"), Tool::Cxx);
    }

    #[test]
    fn test_iter_order() {
        let mut set = TargetSet::default();
        set.insert(TargetSpec::new("zeta", TargetKind::Executable).with_sources(["z.cc"]));
        set.insert(TargetSpec::new("beta", TargetKind::StaticLibrary).with_sources(["b.cc"]));
        set.insert(
            TargetSpec::new("alpha", TargetKind::StaticLibrary).with_sources(["a.cc", "a2.cc"]),
        );

        let names: Vec<_> = set.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "zeta"]);
        assert_eq!(set.source_count(), 4);
    }

    #[test]
    fn test_same_name_different_kinds() {
        let mut set = TargetSet::default();
        set.insert(TargetSpec::new("gn", TargetKind::StaticLibrary));
        set.insert(TargetSpec::new("gn", TargetKind::Executable));
        assert_eq!(set.static_libraries.len(), 1);
        assert_eq!(set.executables.len(), 1);
    }
}
