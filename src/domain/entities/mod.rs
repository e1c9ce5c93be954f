//! Domain entities.

pub mod short_link;
pub mod url_record;

pub use short_link::ShortLink;
pub use url_record::UrlRecord;
