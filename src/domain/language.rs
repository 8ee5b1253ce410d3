/// Languages a list, newsletter or subscriber may declare.
pub const ALLOWED_LANGUAGES: [&str; 7] = ["en", "fr", "de", "es", "it", "nl", "pt"];

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Language(String);

impl Language {
    pub fn parse(s: String) -> Result<Self, String> {
        let tag = s.trim().to_lowercase();

        if ALLOWED_LANGUAGES.contains(&tag.as_str()) {
            Ok(Self(tag))
        } else {
            Err(format!("{} is not an allowed newsletter language.", s))
        }
    }
}

impl AsRef<str> for Language {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Language {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Language::parse(value)
    }
}
