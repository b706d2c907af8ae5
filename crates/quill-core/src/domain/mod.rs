//! Domain entities - the core business objects.

mod category;
mod post;
pub mod slug;
mod user;

pub use category::Category;
pub use post::{MAX_TITLE_LEN, Post, PostPatch};
pub use user::{Role, User};
