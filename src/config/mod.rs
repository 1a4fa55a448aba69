//! Configuration module

mod env;
mod site;

pub use env::Env;
pub use env::{BASE_URL_VAR, CMS_TOKEN_VAR, CMS_URL_VAR, CONTACT_ENDPOINT_VAR};
pub use site::AvailabilityConfig;
pub use site::SiteConfig;
pub use site::SocialLink;
