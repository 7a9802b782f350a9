use serde::{Deserialize, Serialize};

/// Bind-parameter syntax of the target SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// PostgreSQL numbered parameters: `$1`, `$2`, ...
    #[default]
    Dollar,
    /// Positional parameters: `?`
    Question,
}

/// Hands out placeholders in bind order and collects the matching values
#[derive(Debug)]
pub struct Placeholders {
    style: PlaceholderStyle,
    params: Vec<super::SqlValue>,
}

impl Placeholders {
    pub fn new(style: PlaceholderStyle) -> Self {
        Self {
            style,
            params: Vec::new(),
        }
    }

    /// Record `value` as the next parameter and return its placeholder text
    pub fn bind(&mut self, value: super::SqlValue) -> String {
        self.params.push(value);
        match self.style {
            PlaceholderStyle::Dollar => format!("${}", self.params.len()),
            PlaceholderStyle::Question => "?".to_string(),
        }
    }

    pub fn into_params(self) -> Vec<super::SqlValue> {
        self.params
    }
}
