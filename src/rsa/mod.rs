//! [RSA](https://en.wikipedia.org/wiki/RSA_(cryptosystem)) public-key
//! cryptosystem: safe-prime key generation, OAEP encryption, PSS
//! signatures, and four private-operation variants trading off speed
//! against side-channel resistance.

pub mod codec;
pub mod core;
pub mod key;
pub mod oaep;
pub mod pss;

use crate::digest::{Digest, Sha256};
use crate::entropy::EntropySource;
use crate::error::RsaError;
use crate::rsa::core::to_fixed_width_bytes;
pub use crate::rsa::key::{generate_keypair, KeyPair, PrivateKey, PublicKey};
use num_bigint::BigUint;

/// Which private-key operation to use when decrypting or signing.
///
/// All four produce the same result; they differ only in speed and
/// resistance to timing side channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrivateOp {
    /// `m = c^d mod n`. Simplest, and the most exposed to timing attacks.
    Naive,
    /// Exponent-blinded: `m = c^(d + r*phi) mod n` for a fresh random `r`.
    Blinded,
    /// Chinese Remainder Theorem: ~4x faster than naive.
    Crt,
    /// CRT with independent exponent blinding on each branch.
    BlindedCrt,
}

fn modulus_byte_len(n: &BigUint) -> usize {
    ((n.bits() + 7) / 8) as usize
}

/// Encrypt `plaintext` under `public_key` using OAEP padding with an empty
/// label, returning a `k`-byte ciphertext.
pub fn encrypt(
    public_key: &PublicKey,
    plaintext: &[u8],
    entropy: &dyn EntropySource,
) -> Result<Vec<u8>, RsaError> {
    let k = modulus_byte_len(&public_key.n);

    let encoded = oaep::encode(plaintext, b"", k, entropy)?;
    let m = BigUint::from_bytes_be(&encoded);
    let c = core::public_op(public_key, &m)?;

    Ok(to_fixed_width_bytes(&c, k))
}

/// Decrypt a `k`-byte ciphertext produced by [`encrypt`], using the given
/// private-operation variant.
pub fn decrypt(
    private_key: &PrivateKey,
    ciphertext: &[u8],
    variant: PrivateOp,
    entropy: &dyn EntropySource,
) -> Result<Vec<u8>, RsaError> {
    let k = modulus_byte_len(&private_key.n);
    let c = BigUint::from_bytes_be(ciphertext);

    let m = match variant {
        PrivateOp::Naive => core::private_op_naive(private_key, &c)?,
        PrivateOp::Blinded => core::private_op_blinded(private_key, &c, entropy)?,
        PrivateOp::Crt => core::private_op_crt(private_key, &c)?,
        PrivateOp::BlindedCrt => core::private_op_blinded_crt(private_key, &c, entropy)?,
    };

    let encoded = to_fixed_width_bytes(&m, k);
    oaep::decode(&encoded, b"")
}

/// Sign `message` under `private_key` with PSS padding over SHA-256,
/// returning a `k`-byte signature.
pub fn sign(
    private_key: &PrivateKey,
    message: &[u8],
    entropy: &dyn EntropySource,
) -> Result<Vec<u8>, RsaError> {
    let k = modulus_byte_len(&private_key.n);
    let em_bits = private_key.n.bits() - 1;
    let em_len = ((em_bits + 7) / 8) as usize;

    let m_hash = Sha256::digest(message);
    let em = pss::encode(&m_hash, em_len, em_bits, entropy)?;

    let m = BigUint::from_bytes_be(&em);
    let s = core::private_op_naive(private_key, &m)?;

    Ok(to_fixed_width_bytes(&s, k))
}

/// Verify a `k`-byte signature produced by [`sign`] against `message` and
/// `public_key`. Returns `false` on any failure rather than propagating an
/// error.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
    let em_bits = public_key.n.bits() - 1;
    let em_len = ((em_bits + 7) / 8) as usize;

    let s = BigUint::from_bytes_be(signature);
    let m = match core::public_op(public_key, &s) {
        Ok(m) => m,
        Err(_) => return false,
    };

    if m.bits() as usize > em_len * 8 {
        log::debug!("PSS verify: recovered integer does not fit in em_len bytes");
        return false;
    }

    let em = to_fixed_width_bytes(&m, em_len);
    let m_hash = Sha256::digest(message);

    pss::verify(&m_hash, &em, em_bits)
}
