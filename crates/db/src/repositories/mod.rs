//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod change_request_repo;
pub mod service_repo;
pub mod title_repo;
pub mod user_repo;
pub mod watch_history_repo;

pub use change_request_repo::ChangeRequestRepo;
pub use service_repo::ServiceRepo;
pub use title_repo::TitleRepo;
pub use user_repo::UserRepo;
pub use watch_history_repo::WatchHistoryRepo;
