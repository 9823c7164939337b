//! Indented multi-line text, used by the tree dump.

use std::fmt;

/// A block of lines, each with its own indentation depth.
///
/// Indentation is stored as a column count and only turned into spaces when
/// the region is written, so nesting a region ten levels deep costs one
/// integer add per line and level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    lines: Vec<(usize, String)>,
}

impl Region {
    pub fn new() -> Self {
        Region::default()
    }

    pub fn push_back_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push((0, line.into()));
        self
    }

    pub fn push_front_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.insert(0, (0, line.into()));
        self
    }

    /// Move the lines of `other` to the end, keeping their indentation.
    pub fn append(&mut self, other: Region) -> &mut Self {
        self.lines.extend(other.lines);
        self
    }

    pub fn indent_each_line(&mut self, n: usize) -> &mut Self {
        for (depth, _) in &mut self.lines {
            *depth += n;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Every line followed by `\n`.
    pub fn apply(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, line) in &self.lines {
            writeln!(f, "{:depth$}{}", "", line, depth = *depth)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_indentation_accumulates() {
        let mut leaf = Region::new();
        leaf.push_back_line("a");
        leaf.indent_each_line(4);

        let mut inner = Region::new();
        inner.push_back_line("b").append(leaf);
        inner.indent_each_line(2);

        let mut r = Region::new();
        r.push_back_line("x {");
        r.append(inner);
        r.push_back_line("}");
        assert_eq!(r.apply(), "x {\n  b\n      a\n}\n");
        assert_eq!(r.len(), 4);
    }

    #[test]
    fn push_front_and_back() {
        let mut r = Region::new();
        assert!(r.is_empty());
        r.push_back_line("tail");
        r.push_front_line(String::from("head"));
        assert_eq!(r.apply(), "head\ntail\n");
    }
}
