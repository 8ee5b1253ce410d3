mod language;
mod list_slug;
mod new_subscriber;
mod newsletter;
mod newsletter_item;
mod newsletter_list;
mod subscriber;
mod subscriber_email;

pub use language::Language;
pub use list_slug::ListSlug;
pub use new_subscriber::NewSubscriber;
pub use newsletter::{Newsletter, NewsletterStatus};
pub use newsletter_item::{ContentRef, NewsletterItem};
pub use newsletter_list::NewsletterList;
pub use subscriber::NewsletterSubscriber;
pub use subscriber_email::SubscriberEmail;
