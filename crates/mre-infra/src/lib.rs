pub mod fs;
pub mod http;
pub mod i18n;
pub mod notify;
pub mod object_url;

pub use fs::DownloadDirFileSaver;
pub use http::HttpDocumentClient;
pub use i18n::CatalogTranslator;
pub use notify::ChannelNotifier;
pub use object_url::InMemoryObjectUrlRegistry;
