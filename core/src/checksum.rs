//! Request checksum for `/users`.

use sha2::{Digest, Sha256};

use crate::types::AuthToken;

/// Path the checksum binds the token to.
pub const USERS_PATH: &str = "/users";

/// Lowercase hex SHA-256 of `token + "/users"`. A missing token hashes as
/// the empty string.
pub fn request_checksum(token: Option<&AuthToken>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.map(AuthToken::as_str).unwrap_or_default());
    hasher.update(USERS_PATH);
    hex::encode(hasher.finalize())
}
