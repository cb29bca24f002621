//! Quotation records and the sections that group them

use serde::{Deserialize, Serialize};

/// Author used when a line carries no `(Author)` annotation
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// A single quotation from a prcd file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Moccolo {
    /// Author of the quotation
    pub author: String,

    /// Quotation text, possibly spanning several lines
    pub text: String,

    /// Section the moccolo was drawn from; only set by random-section picks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Moccolo {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            section: None,
        }
    }

    /// Moccolo with the `unknown` author
    pub fn anonymous(text: impl Into<String>) -> Self {
        Self::new(UNKNOWN_AUTHOR, text)
    }

    /// Append a continuation line to the text
    pub fn continue_with(&mut self, line: &str) {
        self.text.push('\n');
        self.text.push_str(line);
    }

    /// Tag with the section it came from
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

impl std::fmt::Display for Moccolo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.text, self.author)?;
        if let Some(section) = &self.section {
            write!(f, " [{}]", section)?;
        }
        Ok(())
    }
}

/// A named, ordered sequence of moccoli loaded from one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub entries: Vec<Moccolo>,
}

impl Section {
    pub fn new(name: impl Into<String>, entries: Vec<Moccolo>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
