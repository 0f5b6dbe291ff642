pub mod models;
pub mod resolver;
pub mod server;

pub use models::{CdnEntry, IndirectionDocument, ManifestChannel, UNKNOWN_VERSION};
pub use resolver::ManifestResolver;
pub use server::{
    DEFAULT_INDIRECTION_URL, DISCOVERY_CHANNEL, ServerOption, UNAVAILABLE_VERSION, VersionInfo,
    default_servers, select_version,
};
