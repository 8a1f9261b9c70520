//! The entropy oracle contract: a host-provided source of
//! cryptographically strong random bytes. Everything downstream — BBS
//! seeding, per-operation blinding factors — draws from this trait rather
//! than calling an RNG directly, so callers can substitute their own source
//! (a hardware RNG, a test-fixed source for regression vectors) without
//! touching the rest of the crate.

use rand::rngs::OsRng;
use rand::RngCore;

/// A source of cryptographically secure random bytes.
///
/// Implementations must block until `buf` is completely filled; they must
/// never return early or silently fill with weak randomness.
pub trait EntropySource {
    /// Fill `buf` with random bytes.
    fn fill(&self, buf: &mut [u8]);

    /// Convenience wrapper returning a freshly-allocated buffer of `n`
    /// random bytes.
    fn bytes(&self, n: usize) -> Vec<u8> {
        let mut buf = vec![0_u8; n];
        self.fill(&mut buf);
        buf
    }
}

/// The default entropy oracle, backed by the operating system's CSPRNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) {
        OsRng.fill_bytes(buf);
    }
}
