use uuid::Uuid;

/// Typed replacement for a polymorphic content pointer: the kind tag and the
/// referenced object id are stored as a column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ContentRef {
    Article(Uuid),
    Page(Uuid),
    Product(Uuid),
}

impl ContentRef {
    pub fn from_parts(kind: &str, object_id: Uuid) -> Result<Self, String> {
        match kind {
            "article" => Ok(Self::Article(object_id)),
            "page" => Ok(Self::Page(object_id)),
            "product" => Ok(Self::Product(object_id)),
            other => Err(format!("{} is not a known item content kind.", other)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Article(_) => "article",
            Self::Page(_) => "page",
            Self::Product(_) => "product",
        }
    }

    pub fn object_id(&self) -> Uuid {
        match self {
            Self::Article(id) | Self::Page(id) | Self::Product(id) => *id,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct NewsletterItem {
    pub id: Uuid,
    pub newsletter_id: Uuid,
    pub description: String,
    pub image: Option<String>,
    pub url: Option<String>,
    pub content: Option<ContentRef>,
}
