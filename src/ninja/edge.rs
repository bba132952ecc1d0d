use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Compile,
    Archive,
    Link,
}

/// One `build` statement.
///
/// Paths stored here are already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEdge {
    pub kind: EdgeKind,
    pub output: String,
    pub rule: &'static str,
    pub inputs: Vec<String>,
    /// Rebuild triggers listed after `|`.
    pub implicit_inputs: Vec<String>,
    /// Edge-scoped variables, written in order.
    pub bindings: Vec<(&'static str, String)>,
}

impl BuildEdge {
    pub fn new(kind: EdgeKind, output: String, rule: &'static str) -> Self {
        Self {
            kind,
            output,
            rule,
            inputs: Vec::new(),
            implicit_inputs: Vec::new(),
            bindings: Vec::new(),
        }
    }

    pub fn bind(&mut self, key: &'static str, values: &[String]) {
        self.bindings.push((key, values.join(" ")));
    }

    pub fn binding(&self, key: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for BuildEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "build {}: {}", self.output, self.rule)?;
        for input in &self.inputs {
            write!(f, " {}", input)?;
        }
        if !self.implicit_inputs.is_empty() {
            f.write_str(" |")?;
            for input in &self.implicit_inputs {
                write!(f, " {}", input)?;
            }
        }
        for (key, value) in &self.bindings {
            write!(f, "\n  {} = {}", key, value)?;
        }
        Ok(())
    }
}
