//! [Message digest](https://en.wikipedia.org/wiki/Message_digest)
//! implementations, hand-rolled from scratch rather than delegated to an
//! existing crypto library.

pub mod sha256;
pub mod sha512;

pub use sha256::Sha256;
pub use sha512::Sha512;

/// Trait for message digest implementations.
pub trait Digest: Default {
    /// Output digest size, in bytes.
    const OUTPUT_LENGTH: usize;

    /// Internal compression block size, in bytes.
    const BLOCK_LENGTH: usize;

    /// The digest's fixed-size output type.
    type Output: AsRef<[u8]>;

    /// Feed more bytes into the running digest.
    fn update(&mut self, message: &[u8]);

    /// Consume the digest and produce its final value.
    fn finalize(self) -> Self::Output;

    /// One-shot convenience: hash `message` in a single call.
    fn digest(message: &[u8]) -> Self::Output
    where
        Self: Sized,
    {
        let mut d = Self::default();
        d.update(message);
        d.finalize()
    }

    /// Chainable convenience: feed `message` and return `self`.
    fn chain(mut self, message: &[u8]) -> Self
    where
        Self: Sized,
    {
        self.update(message);
        self
    }
}
