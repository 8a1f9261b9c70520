//! Error taxonomy for the RSA engine.
//!
//! All public operations return [`Result<T, RsaError>`](RsaError). Padding
//! errors are deliberately collapsed: OAEP and PSS failures never reveal
//! *which* check failed through the returned variant, only that decoding or
//! verification failed. The specific cause is logged at `debug` level so it
//! can still be diagnosed locally without turning into a padding oracle for
//! a remote caller.

use thiserror::Error;

/// Errors produced by key generation, encryption/decryption, and signing.
#[derive(Debug, Error)]
pub enum RsaError {
    /// Plaintext exceeds the OAEP capacity `k - 2*hLen - 2`, or an integer
    /// representation is not smaller than the modulus.
    #[error("input too large for this key size")]
    InputTooLarge,

    /// OAEP decoding failed. The specific cause (bad leading byte, label
    /// hash mismatch, missing `0x01` separator) is intentionally not part
    /// of this variant; see the module docs.
    #[error("OAEP decoding failed")]
    Oaep,

    /// PSS verification failed (trailer byte, salt length, or hash
    /// mismatch). `verify` returns `false` for this rather than
    /// propagating it as an error; the variant exists for callers that
    /// drive PSS through the `Result`-returning internals directly.
    #[error("PSS verification failed")]
    Pss,

    /// Safe-prime search exceeded its attempt budget.
    #[error("prime generation exhausted after {attempts} attempts")]
    PrimeGenerationExhausted {
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// The private-exponent hardening loop could not find an acceptable
    /// `d` within its rejection-sampling budget.
    #[error("key hardening exhausted after {attempts} attempts")]
    KeyHardeningExhausted {
        /// Number of `(p, q)` draws attempted before giving up.
        attempts: u32,
    },

    /// A serialized key blob was malformed (bad base64, bad JSON, or a
    /// tagged-bigint field that didn't parse).
    #[error("malformed key encoding: {0}")]
    Decoding(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RsaError>;
