//! Configuration module

mod site;

pub(crate) use site::extension_suffix;
pub use site::ErrorPolicy;
pub use site::SiteConfig;
