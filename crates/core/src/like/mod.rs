pub mod model;
pub mod service;

pub use model::{Like, LikeId};
pub use service::LikeService;
