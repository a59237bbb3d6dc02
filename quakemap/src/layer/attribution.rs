//! Credits for the data a layer shows.

/// Attribution text of a layer with an optional link to the source's terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    text: String,
    url: Option<String>,
}

impl Attribution {
    /// Creates a new attribution.
    pub fn new(text: impl Into<String>, url: Option<&str>) -> Self {
        Self {
            text: text.into(),
            url: url.map(str::to_owned),
        }
    }

    /// Text shown to the user.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Link to the source, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}
