mod health_check;
mod helpers;
mod newsletter_lists;
mod newsletters;
mod subscriptions;
mod unsubscribe;

pub use health_check::health_check;
pub use helpers::{e404, e500, error_chain_fmt};
pub use newsletter_lists::newsletter_list_display;
pub use newsletters::{newsletter_detail, newsletter_raw_detail};
pub use subscriptions::{SubscribeError, subscribe};
pub use unsubscribe::{UnsubscribeError, unsubscribe, unsubscribe_all};
