//! Wire types and the canonical internal shapes built from them.

pub mod auth;
pub mod errors;
pub mod import;
pub mod timestamp;
pub mod user;

pub use auth::{LoginReply, LoginRequest, RegisterRequest, Session};
pub use errors::ErrorResponse;
pub use import::{
    DecimalSeparator, HistoryEntry, ImportConfig, ImportError, ImportResult, ImportStatus,
    progress_percent,
};
pub use timestamp::Timestamp;
pub use user::{
    AuthUser, CreateUserRequest, SortOrder, UpdateUserRequest, UserListQuery, UserListReply,
    UserRecord, UserRole,
};
