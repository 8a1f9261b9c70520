//! Key material: [`PublicKey`], [`PrivateKey`], and the safe-prime key
//! generator with its private-exponent hardening gate.
//!
//! Generalizes the teacher's `RSAPublicKey`/`RSAPrivateKey`/
//! `generate_rsa_keypair` (a bare `{e, n}` / `{d, n}` pair over
//! Fermat-plus-Rabin-Miller primes) into full CRT key material over safe
//! primes, with the hardening rejection loop the teacher's cryptopals
//! exercises never needed.

use crate::entropy::EntropySource;
use crate::error::RsaError;
use crate::primes::{find_safe_prime, integer_root};
use crate::rsa::core::{gcd, mod_inverse};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Fixed public exponent used throughout this crate.
pub const PUBLIC_EXPONENT: u32 = 65537;

const MAX_KEYGEN_TRIES: u32 = 1000;
const MAX_HARDENING_TRIES: u32 = 1000;

/// An RSA public key: `(n, e)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub n: BigUint,
    pub e: BigUint,
}

/// An RSA private key, carrying the full CRT parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    pub p: BigUint,
    pub q: BigUint,
    pub n: BigUint,
    pub e: BigUint,
    pub d: BigUint,
    pub phi: BigUint,
    pub dp: BigUint,
    pub dq: BigUint,
    pub qinv: BigUint,
}

/// A generated key pair, bundled together because the private key alone
/// can't round-trip through the codec without its public counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl KeyPair {
    /// Generate a fresh key pair of the given modulus bit length.
    pub fn generate(bits: u64, entropy: &dyn EntropySource) -> Result<KeyPair, RsaError> {
        let (public, private) = generate_keypair(bits, entropy)?;
        Ok(KeyPair { public, private })
    }
}

fn seed_from_entropy(entropy: &dyn EntropySource) -> BigUint {
    let bytes = entropy.bytes(64);
    BigUint::from_bytes_be(&bytes)
}

/// Generate an RSA key pair of `bits` total modulus bits.
///
/// Follows the procedure: draw safe primes `p, q` rejecting near-equal
/// pairs, compute `n`/`phi`/`d`, then reject and restart whenever `d` fails
/// the hardening gate in [`is_hardened`].
pub fn generate_keypair(
    bits: u64,
    entropy: &dyn EntropySource,
) -> Result<(PublicKey, PrivateKey), RsaError> {
    let half_bits = bits / 2;
    let e = BigUint::from(PUBLIC_EXPONENT);
    let closeness_floor = BigUint::one() << (bits / 4);

    for _ in 0..MAX_HARDENING_TRIES {
        let seed = seed_from_entropy(entropy);
        let p = find_safe_prime(&seed, half_bits)?;

        let (q, n, phi, d) = loop {
            let mut found = None;

            for attempt in 0..MAX_KEYGEN_TRIES {
                let q_seed = &seed + BigUint::from(attempt) * BigUint::from(7_919_u32);
                let q = find_safe_prime(&q_seed, half_bits)?;

                if q == p {
                    continue;
                }

                let diff = if q > p { &q - &p } else { &p - &q };
                if diff < closeness_floor {
                    continue;
                }

                let p_minus_one = &p - BigUint::one();
                let q_minus_one = &q - BigUint::one();
                let phi = &p_minus_one * &q_minus_one;

                if gcd(&e, &phi) != BigUint::one() {
                    continue;
                }

                let n = &p * &q;
                let d = match mod_inverse(&e, &phi) {
                    Some(d) => d,
                    None => continue,
                };

                found = Some((q, n, phi, d));
                break;
            }

            match found {
                Some(result) => break result,
                None => return Err(RsaError::PrimeGenerationExhausted { attempts: MAX_KEYGEN_TRIES }),
            }
        };

        if !is_hardened(&d, &n) {
            continue;
        }

        let dp = &d % (&p - BigUint::one());
        let dq = &d % (&q - BigUint::one());
        let qinv = mod_inverse(&q, &p).expect("p, q coprime by construction");

        let public = PublicKey { n: n.clone(), e: e.clone() };
        let private = PrivateKey { p, q, n, e, d, phi, dp, dq, qinv };

        return Ok((public, private));
    }

    Err(RsaError::KeyHardeningExhausted { attempts: MAX_HARDENING_TRIES })
}

/// Gate a private exponent `d` against the heuristics in the hardening
/// step. Returns `true` when `d` is acceptable.
///
/// The palindrome and repeating-pattern checks in particular have no
/// recognized cryptographic literature backing; they're preserved here for
/// behavioral compatibility with the source this crate is built from, not
/// because they defend against a known attack.
fn is_hardened(d: &BigUint, n: &BigUint) -> bool {
    let n_bits = n.bits();

    // Wiener bound: d > n^(1/4) / 3
    let wiener_bound = &integer_root(n, 4) / BigUint::from(3_u32);
    if d <= &wiener_bound {
        return false;
    }

    // Lower-bound safety margin: d > 2^(floor(bitlen(n)/2))
    let margin = BigUint::one() << (n_bits / 2);
    if d <= &margin {
        return false;
    }

    if hamming_weight_ratio(d) < 0.25 {
        return false;
    }

    // Boneh-Durfee bound: d > n^0.3, computed as (n^(1/10))^3.
    let boneh_durfee_bound = integer_root(n, 10).pow(3);
    if d <= &boneh_durfee_bound {
        return false;
    }

    if is_palindrome(&d.to_str_radix(10)) || is_palindrome(&d.to_str_radix(2)) {
        return false;
    }

    if has_repeating_pattern(&d.to_str_radix(10)) || has_repeating_pattern(&d.to_str_radix(2)) {
        return false;
    }

    if is_near_power_of_two(d) {
        return false;
    }

    if has_low_entropy_tail(d) {
        return false;
    }

    true
}

fn hamming_weight_ratio(d: &BigUint) -> f64 {
    let bit_len = d.bits();
    if bit_len == 0 {
        return 0.0;
    }

    let ones = (0..bit_len).filter(|&i| d.bit(i)).count();
    ones as f64 / bit_len as f64
}

fn is_palindrome(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    chars.iter().eq(chars.iter().rev())
}

/// True if `s` is made up of some prefix of length `L >= 2` tiled at least
/// three times starting at position 0.
fn has_repeating_pattern(s: &str) -> bool {
    let len = s.len();

    for period in 2..=(len / 3) {
        if len % period != 0 {
            continue;
        }

        let pattern = &s[..period];
        let tiles = len / period;

        if tiles >= 3 && s == pattern.repeat(tiles) {
            return true;
        }
    }

    false
}

fn is_near_power_of_two(d: &BigUint) -> bool {
    let bit_len = d.bits();
    let threshold = BigUint::from(1_u32 << 16);

    for k in bit_len.saturating_sub(1)..=(bit_len + 1) {
        let power = BigUint::one() << k;
        let diff = if power > *d { &power - d } else { d - &power };

        if diff < threshold {
            return true;
        }
    }

    false
}

fn has_low_entropy_tail(d: &BigUint) -> bool {
    let mask = BigUint::from(0xFFFF_u32);
    let low = d & &mask;

    low.is_zero() || low == mask
}

#[cfg(test)]
mod test {
    use super::{generate_keypair, has_repeating_pattern, is_hardened, is_palindrome};
    use crate::entropy::OsEntropy;
    use crate::rsa::core::gcd;
    use num_bigint::BigUint;
    use num_traits::One;

    #[test]
    fn generated_key_satisfies_rsa_invariants() {
        let (public, private) = generate_keypair(512, &OsEntropy).unwrap();

        assert_eq!(private.n, public.n);
        assert_eq!(gcd(&public.e, &private.phi), BigUint::one());

        let check = (&private.e * &private.d) % &private.phi;
        assert_eq!(check, BigUint::one());

        assert_eq!(private.dp, &private.d % (&private.p - BigUint::one()));
        assert_eq!(private.dq, &private.d % (&private.q - BigUint::one()));

        let q_qinv = (&private.q * &private.qinv) % &private.p;
        assert_eq!(q_qinv, BigUint::one());

        assert!(is_hardened(&private.d, &private.n));
    }

    #[test]
    fn hardening_rejects_trivially_small_d() {
        let n = BigUint::parse_bytes(&b"F".repeat(64), 16).unwrap();
        assert!(!is_hardened(&BigUint::from(3_u32), &n));
    }

    #[test]
    fn palindrome_detector_matches_known_cases() {
        assert!(is_palindrome("12321"));
        assert!(is_palindrome("1001"));
        assert!(!is_palindrome("12345"));
    }

    #[test]
    fn repeating_pattern_detector_matches_known_cases() {
        assert!(has_repeating_pattern("101010"));
        assert!(has_repeating_pattern("abcabcabc"));
        assert!(!has_repeating_pattern("1234567887654321"));
    }
}
