use uuid::Uuid;

use super::{Language, SubscriberEmail};

pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub lang: Option<Language>,
    pub user_id: Option<Uuid>,
}

impl NewSubscriber {
    pub fn parse(
        email: String,
        lang: Option<String>,
        user_id: Option<Uuid>,
    ) -> Result<Self, String> {
        let email = SubscriberEmail::parse(email)?;
        let lang = lang.map(Language::parse).transpose()?;
        Ok(Self {
            email,
            lang,
            user_id,
        })
    }
}
