//! Modular arithmetic helpers and the RSA public/private operations
//! themselves: plain exponentiation, blinded exponentiation, CRT, and
//! blinded CRT.
//!
//! `gcd`/`egcd`/`mod_inverse` generalize the teacher's `rsa::util`
//! (`egcd`/`inv_mod`), dropping its `assert!(a < n)` precondition since key
//! generation here calls them on values that aren't guaranteed ordered that
//! way. The blinding and CRT combination is grounded on `BHouwens-cryptofun`'s
//! `RSA::use_private_key`, the closest reference in the retrieval pack for
//! combining the two in one operation.

use crate::bbs::BlumBlumShub;
use crate::entropy::EntropySource;
use crate::error::RsaError;
use crate::rsa::key::{PrivateKey, PublicKey};
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// Binary Euclidean GCD.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    let mut a = a.clone();
    let mut b = b.clone();

    while !b.is_zero() {
        let t = b.clone();
        b = &a % &b;
        a = t;
    }

    a
}

/// Extended Euclidean algorithm: returns `(g, x, y)` such that
/// `a*x + b*y = g = gcd(a, b)`.
#[allow(clippy::many_single_char_names)]
pub fn egcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        return (b.clone(), BigInt::zero(), BigInt::one());
    }

    let (g, x1, y1) = egcd(&(b % a), a);
    let x = y1 - (b / a) * &x1;

    (g, x, x1)
}

/// Modular multiplicative inverse of `a` modulo `n`, or `None` if
/// `gcd(a, n) != 1`.
pub fn mod_inverse(a: &BigUint, n: &BigUint) -> Option<BigUint> {
    let (g, x, _) = egcd(&BigInt::from(a.clone()), &BigInt::from(n.clone()));

    if !g.is_one() {
        return None;
    }

    let n_signed = BigInt::from(n.clone());
    let result = ((x % &n_signed) + &n_signed) % &n_signed;

    result.to_biguint()
}

/// `base^exp mod modulus` (thin, named wrapper around `BigUint::modpow` so
/// call sites read the same way across this module regardless of whether
/// the underlying bignum crate exposes it as a method or a free function).
pub fn modpow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// Reduce a possibly-negative `BigInt` into `[0, n)`.
fn normalize_positive(x: &BigInt, n: &BigUint) -> BigUint {
    let n_signed = BigInt::from(n.clone());
    let reduced = ((x % &n_signed) + &n_signed) % &n_signed;
    reduced.to_biguint().expect("reduced value is non-negative by construction")
}

/// `c = m^e mod n`. Used both for encryption and signature verification.
pub fn public_op(public_key: &PublicKey, m: &BigUint) -> Result<BigUint, RsaError> {
    if m >= &public_key.n {
        return Err(RsaError::InputTooLarge);
    }

    Ok(modpow(m, &public_key.e, &public_key.n))
}

/// Naive private-key operation: `m = c^d mod n`.
pub fn private_op_naive(private_key: &PrivateKey, c: &BigUint) -> Result<BigUint, RsaError> {
    if c >= &private_key.n {
        return Err(RsaError::InputTooLarge);
    }

    Ok(modpow(c, &private_key.d, &private_key.n))
}

/// Blinded private-key operation: draws a 16-bit blinding factor `r` from a
/// fresh BBS stream and computes `c^(d + r*phi) mod n`, which equals
/// `c^d mod n` for any `c` coprime to `n` but randomizes the exponent's
/// timing profile.
///
/// The 16-bit blinding factor matches the source spec exactly; production
/// deployments should use 64-128 bits (see module docs on `RsaError`).
pub fn private_op_blinded(
    private_key: &PrivateKey,
    c: &BigUint,
    entropy: &dyn EntropySource,
) -> Result<BigUint, RsaError> {
    if c >= &private_key.n {
        return Err(RsaError::InputTooLarge);
    }

    let r = draw_blinding_factor(entropy);
    let blinded_exponent = &private_key.d + &r * &private_key.phi;

    Ok(modpow(c, &blinded_exponent, &private_key.n))
}

/// CRT private-key operation: roughly 4x faster than the naive form.
pub fn private_op_crt(private_key: &PrivateKey, c: &BigUint) -> Result<BigUint, RsaError> {
    if c >= &private_key.n {
        return Err(RsaError::InputTooLarge);
    }

    let mp = modpow(c, &private_key.dp, &private_key.p);
    let mq = modpow(c, &private_key.dq, &private_key.q);

    Ok(crt_combine(&mp, &mq, private_key))
}

/// Blinded CRT private-key operation: independent 16-bit blinding factors
/// `rp, rq` (both non-zero) hide the timing profile of each CRT branch
/// separately.
pub fn private_op_blinded_crt(
    private_key: &PrivateKey,
    c: &BigUint,
    entropy: &dyn EntropySource,
) -> Result<BigUint, RsaError> {
    if c >= &private_key.n {
        return Err(RsaError::InputTooLarge);
    }

    let rp = draw_nonzero_blinding_factor(entropy);
    let rq = draw_nonzero_blinding_factor(entropy);

    let p_minus_one = &private_key.p - BigUint::one();
    let q_minus_one = &private_key.q - BigUint::one();

    let dp_prime = &private_key.dp + &rp * p_minus_one;
    let dq_prime = &private_key.dq + &rq * q_minus_one;

    let mp = modpow(c, &dp_prime, &private_key.p);
    let mq = modpow(c, &dq_prime, &private_key.q);

    Ok(crt_combine(&mp, &mq, private_key))
}

fn crt_combine(mp: &BigUint, mq: &BigUint, private_key: &PrivateKey) -> BigUint {
    let mp_signed = BigInt::from(mp.clone());
    let mq_signed = BigInt::from(mq.clone());
    let diff = mp_signed - mq_signed;

    let h_signed = diff * BigInt::from(private_key.qinv.clone());
    let h = normalize_positive(&h_signed, &private_key.p);

    mq + h * &private_key.q
}

fn draw_blinding_factor(entropy: &dyn EntropySource) -> BigUint {
    let seed_bytes = entropy.bytes(8);
    let seed = BigUint::from_bytes_be(&seed_bytes);

    let mut bbs = BlumBlumShub::new(&seed, &BigUint::from(499_u32), &BigUint::from(547_u32));
    let raw = bbs.next_bits(16);

    &raw % (BigUint::one() << 16_u32)
}

fn draw_nonzero_blinding_factor(entropy: &dyn EntropySource) -> BigUint {
    loop {
        let r = draw_blinding_factor(entropy);
        if !r.is_zero() {
            return r;
        }
    }
}

/// Render an RSA integer as a big-endian byte string of exactly `k` bytes,
/// left-padded with zeros. Truncation here would silently corrupt OAEP/PSS
/// decoding, so this always pads up to `k` rather than trimming leading
/// zeros away.
pub fn to_fixed_width_bytes(value: &BigUint, k: usize) -> Vec<u8> {
    let raw = value.to_bytes_be();
    assert!(raw.len() <= k, "integer does not fit in {} bytes", k);

    let mut out = vec![0_u8; k - raw.len()];
    out.extend_from_slice(&raw);
    out
}
