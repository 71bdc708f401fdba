pub mod model;
pub mod service;
pub mod validate;

pub use model::{Content, ContentDetail, ContentInput, ContentSummary, NewContent};
pub use service::ContentService;
