//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod answer_repo;
pub mod comment_repo;
pub mod question_repo;
pub mod tag_repo;
pub mod user_repo;

pub use answer_repo::AnswerRepo;
pub use comment_repo::CommentRepo;
pub use question_repo::QuestionRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
