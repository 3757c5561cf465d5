/// HTTP surface: page rendering, audio path resolution, and the axum router.

pub mod media;
pub mod page;
pub mod server;
