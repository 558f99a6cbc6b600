//! User model and DTOs.
//!
//! Users are credential-free identities: the surrounding service owns
//! authentication and hands this crate nothing but ids and emails.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quanda_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// Lightweight user reference embedded in aggregated questions, answers,
/// and comments. Avoids exposing the email where only a display name is
/// needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    pub id: DbId,
    pub username: String,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    /// Unique; the boundary key the edge service resolves identities by.
    pub email: String,
}
