//! Short code generation and validation.
//!
//! Codes are the human-typeable handle for an artifact: 4 characters from
//! `[A-Z0-9]`, read out loud or typed into a headset. They are not unique
//! identifiers; the timestamped storage filename disambiguates collisions.

/// Alphabet codes are drawn from (36 symbols, uniform).
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a scenedrop code.
pub const CODE_LENGTH: usize = 4;

/// Generate a code of `length` characters drawn uniformly from the alphabet.
///
/// Uses the thread-local CSPRNG, so codes are not guessable from earlier
/// outputs. No uniqueness check against existing codes is performed.
pub fn generate_code(length: usize) -> String {
    use rand::Rng;

    let mut rng = rand::rng();
    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// True when `code` is exactly [`CODE_LENGTH`] ASCII uppercase alphanumerics.
///
/// Lowercase input is rejected rather than normalized; callers that want to
/// accept lowercase must uppercase before validating.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH
        && code
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}
