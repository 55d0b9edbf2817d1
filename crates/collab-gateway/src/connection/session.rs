//! Session identity
//!
//! Sessions are purely transient: they exist from accept to close and carry
//! no server-side state beyond the connection's room binding.

/// Session helper
pub struct Session;

impl Session {
    /// Generate a new session ID
    #[must_use]
    pub fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
