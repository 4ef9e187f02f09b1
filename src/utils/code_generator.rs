//! Short code generation.
//!
//! Codes are drawn from a cryptographically secure RNG, base64
//! URL-safe encoded, then reduced to plain alphanumerics so a code never
//! needs percent-encoding in a URL path segment.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Generates a random alphanumeric code of exactly `length` characters.
///
/// `-` and `_` produced by the URL-safe alphabet are dropped rather than
/// substituted, so the RNG is re-drawn until enough characters survive.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code(length: usize) -> String {
    let mut code = String::with_capacity(length);

    while code.len() < length {
        let mut buffer = [0u8; 16];
        getrandom::fill(&mut buffer).expect("system RNG failure");

        let encoded = URL_SAFE_NO_PAD.encode(buffer);
        code.extend(
            encoded
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .take(length - code.len()),
        );
    }

    code
}
