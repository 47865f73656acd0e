use std::fmt;

/// Text snapshot handed to the display: status lines followed by the map rows.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TextFrame {
    pub header: Vec<String>,
    pub rows: Vec<String>,
}

impl TextFrame {
    /// Iterates over every line, header first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .chain(self.rows.iter())
            .map(String::as_str)
    }
}

impl fmt::Display for TextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
