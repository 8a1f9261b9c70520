//! Primality testing and prime generation.
//!
//! Generalizes the teacher's sieve-plus-Rabin-Miller prime finder
//! (`rsa::primes` before this rework) from a `thread_rng`-backed search into
//! one driven entirely by a seeded [`BlumBlumShub`] stream, constrained to
//! the 3-mod-4 / safe-prime shapes this engine requires.

use crate::bbs::BlumBlumShub;
use crate::error::RsaError;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Fixed, deterministic Miller-Rabin witnesses.
const WITNESSES: [u32; 9] = [2, 3, 5, 7, 11, 13, 17, 19, 23];

/// The two small 3-mod-4 primes used to drive every BBS stream in this
/// crate's prime search.
const BBS_P: u32 = 499;
const BBS_Q: u32 = 547;

const DEFAULT_MAX_TRIES: u32 = 1000;

/// Write `n = 2^r * d` with `d` odd.
fn rewrite(mut d: BigUint) -> (u64, BigUint) {
    let mut r = 0_u64;

    while d.is_even() {
        d >>= 1_u32;
        r += 1;
    }

    (r, d)
}

/// Miller-Rabin primality test with fixed, deterministic witnesses drawn
/// cyclically from `{2, 3, 5, 7, 11, 13, 17, 19, 23}`.
pub fn is_prime(n: &BigUint, rounds: usize) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2_u32);
    let three = BigUint::from(3_u32);

    if n < &two {
        return false;
    } else if n == &two || n == &three {
        return true;
    } else if n.is_even() {
        return false;
    }

    let n_minus_one = n - &one;
    let (r, d) = rewrite(n_minus_one.clone());

    for round in 0..rounds {
        let witness = WITNESSES[round % WITNESSES.len()];
        let a = BigUint::from(witness);

        // Witnesses at or above n-2 aren't meaningful candidates; skip them
        // rather than reducing them mod n.
        if a >= n - &two {
            continue;
        }

        let mut x = a.modpow(&d, n);

        if x == one || x == n_minus_one {
            continue;
        }

        let mut composite = true;
        for _ in 0..r.saturating_sub(1) {
            x = x.modpow(&two, n);

            if x == n_minus_one {
                composite = false;
                break;
            }
            if x == one {
                break;
            }
        }

        if composite {
            return false;
        }
    }

    true
}

/// Default round count for [`is_prime`] as used throughout this crate.
pub const DEFAULT_ROUNDS: usize = 16;

/// Binary search for `floor(n^(1/k))`, the integer `k`-th root of `n`.
///
/// Used by the key-hardening bounds in [`crate::rsa::key`] (Wiener and
/// Boneh-Durfee), which need `n^(1/4)` and `n^(1/10)` without floating
/// point.
pub fn integer_root(n: &BigUint, k: u32) -> BigUint {
    if n.is_zero() || k == 0 {
        return BigUint::zero();
    }
    if k == 1 {
        return n.clone();
    }

    let mut lo = BigUint::zero();
    let mut hi = n.clone() + BigUint::one();

    while &lo + BigUint::one() < hi {
        let mid = (&lo + &hi) >> 1_u32;
        if mid.pow(k) <= *n {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    lo
}

/// Generate a prime `p ≡ 3 (mod 4)` of exactly `bits` bits, driven by a
/// fresh [`BlumBlumShub`] stream for each attempt.
///
/// `seed` is combined with the attempt index so that retries explore a
/// distinct region of the stream rather than repeating the same candidate.
pub fn generate_prime_3_mod_4(seed: &BigUint, bits: u64) -> Result<BigUint, RsaError> {
    generate_prime_3_mod_4_with_tries(seed, bits, DEFAULT_MAX_TRIES)
}

fn generate_prime_3_mod_4_with_tries(
    seed: &BigUint,
    bits: u64,
    max_tries: u32,
) -> Result<BigUint, RsaError> {
    let bbs_p = BigUint::from(BBS_P);
    let bbs_q = BigUint::from(BBS_Q);

    for attempt in 0..max_tries {
        let attempt_seed = seed + BigUint::from(attempt);
        let mut bbs = BlumBlumShub::new(&attempt_seed, &bbs_p, &bbs_q);
        let candidate = bbs.next_bits(bits);

        // The BBS shaping already guarantees this, but the spec treats the
        // check as a defensive belt-and-braces pass.
        let candidate_mod_4 = &candidate % 4_u32;
        if candidate_mod_4 != BigUint::from(3_u32) {
            continue;
        }

        if is_prime(&candidate, DEFAULT_ROUNDS) {
            return Ok(candidate);
        }
    }

    Err(RsaError::PrimeGenerationExhausted { attempts: max_tries })
}

/// Generate a safe prime `q = 2p' + 1` of `bits` bits, where `p'` is itself
/// prime.
pub fn find_safe_prime(seed: &BigUint, bits: u64) -> Result<BigUint, RsaError> {
    find_safe_prime_with_tries(seed, bits, DEFAULT_MAX_TRIES)
}

fn find_safe_prime_with_tries(
    seed: &BigUint,
    bits: u64,
    max_tries: u32,
) -> Result<BigUint, RsaError> {
    let two = BigUint::from(2_u32);

    for attempt in 0..max_tries {
        let attempt_seed = seed + BigUint::from(attempt) * BigUint::from(1_000_003_u32);
        let p_prime = generate_prime_3_mod_4_with_tries(&attempt_seed, bits - 1, max_tries)?;
        let q = &two * &p_prime + BigUint::one();

        if is_prime(&q, DEFAULT_ROUNDS) {
            return Ok(q);
        }
    }

    Err(RsaError::PrimeGenerationExhausted { attempts: max_tries })
}

#[cfg(test)]
mod test {
    use super::{find_safe_prime, generate_prime_3_mod_4, integer_root, is_prime};
    use num_bigint::BigUint;
    use num_integer::Integer;

    fn sieve(limit: u64) -> Vec<bool> {
        let mut composite = vec![false; limit as usize + 1];
        composite[0] = true;
        if limit >= 1 {
            composite[1] = true;
        }

        let mut i = 2_u64;
        while i * i <= limit {
            if !composite[i as usize] {
                let mut j = i * i;
                while j <= limit {
                    composite[j as usize] = true;
                    j += i;
                }
            }
            i += 1;
        }

        composite.into_iter().map(|c| !c).collect()
    }

    #[test]
    fn matches_sieve_for_first_1000_integers() {
        let truth = sieve(1000);

        for n in 0..=1000_u64 {
            assert_eq!(
                is_prime(&BigUint::from(n), 16),
                truth[n as usize],
                "mismatch at {}",
                n
            );
        }
    }

    #[test]
    fn small_known_primes_and_composites() {
        for p in [2_u32, 3, 5, 7, 11, 104729] {
            assert!(is_prime(&BigUint::from(p), 16));
        }
        for c in [4_u32, 9, 100, 104730] {
            assert!(!is_prime(&BigUint::from(c), 16));
        }
    }

    #[test]
    fn integer_root_matches_known_values() {
        assert_eq!(integer_root(&BigUint::from(16_u32), 2), BigUint::from(4_u32));
        assert_eq!(integer_root(&BigUint::from(26_u32), 2), BigUint::from(5_u32));
        assert_eq!(integer_root(&BigUint::from(1000_u32), 3), BigUint::from(10_u32));
        assert_eq!(integer_root(&BigUint::from(0_u32), 5), BigUint::from(0_u32));
    }

    #[test]
    fn generated_prime_is_3_mod_4_and_prime() {
        let seed = BigUint::from(42_u32);
        let p = generate_prime_3_mod_4(&seed, 64).unwrap();

        assert!(is_prime(&p, 16));
        assert_eq!(p.mod_floor(&BigUint::from(4_u32)), BigUint::from(3_u32));
        assert!(p.bits() <= 64);
    }

    #[test]
    fn safe_prime_has_prime_sophie_germain_companion() {
        let seed = BigUint::from(7_u32);
        let q = find_safe_prime(&seed, 64).unwrap();

        assert!(is_prime(&q, 16));

        let p_prime = (&q - BigUint::from(1_u32)) / BigUint::from(2_u32);
        assert!(is_prime(&p_prime, 16));
    }
}
