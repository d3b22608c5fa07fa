mod movies_get;
mod movies_post;
mod title_delete;
mod title_get;
mod title_put;
pub mod types;

pub use movies_get::movies_get;
pub use movies_post::movies_post;
pub use title_delete::title_delete;
pub use title_get::title_get;
pub use title_put::title_put;
