use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ListSlug(String);

impl ListSlug {
    pub fn parse(s: String) -> Result<Self, String> {
        let is_empty_or_whitespace = s.trim().is_empty();
        let is_too_long = s.graphemes(true).count() > 255;
        let contains_invalid_chars = !s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

        if is_empty_or_whitespace || is_too_long || contains_invalid_chars {
            Err(format!("{} is not a valid newsletter list slug.", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ListSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ListSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for ListSlug {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        ListSlug::parse(value)
    }
}
