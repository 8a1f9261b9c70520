//! [Blum Blum Shub](https://en.wikipedia.org/wiki/Blum_Blum_Shub) — a
//! squaring-modulo-`m` pseudo-random stream, seeded once from the external
//! entropy oracle and then drawn from deterministically for the rest of a
//! key-generation or padding operation.
//!
//! Unlike [`crate::rand::MT19937`]-style generators this isn't a general
//! `RngCore`: every draw of `n` bits is shaped into an odd, top-bit-set
//! integer congruent to 3 mod 4, which is exactly the candidate shape the
//! prime finder needs and nothing else.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// A Blum Blum Shub generator over `m = p_bbs * q_bbs`.
///
/// `p_bbs` and `q_bbs` are small primes congruent to 3 mod 4, used only to
/// drive this stream — they are unrelated to the RSA modulus produced
/// downstream.
#[derive(Clone)]
pub struct BlumBlumShub {
    m: BigUint,
    x: BigUint,
}

impl BlumBlumShub {
    /// Construct a stream from a seed and the two BBS primes.
    ///
    /// The initial state is `x0 = max(seed mod m, 1)`, so a seed that's an
    /// exact multiple of `m` doesn't collapse the stream to a fixed point
    /// at zero.
    pub fn new(seed: &BigUint, p_bbs: &BigUint, q_bbs: &BigUint) -> BlumBlumShub {
        let m = p_bbs * q_bbs;
        let x0 = seed % &m;
        let x = if x0.is_zero() { BigUint::one() } else { x0 };

        BlumBlumShub { m, x }
    }

    /// Advance the state and return its low bit.
    pub fn next_bit(&mut self) -> bool {
        self.x = (&self.x * &self.x) % &self.m;
        self.x.bit(0)
    }

    /// Draw `width` bits MSB-first, then force the three shape bits
    /// required of a safe-prime candidate: the top bit, the low (oddness)
    /// bit, and finally `r mod 4 == 3`.
    pub fn next_bits(&mut self, width: u64) -> BigUint {
        assert!(width >= 2, "BBS output width must allow a 3-mod-4 residue");

        let mut r = BigUint::zero();
        for _ in 0..width {
            r <<= 1_u32;
            if self.next_bit() {
                r.set_bit(0, true);
            }
        }

        r.set_bit(width - 1, true);
        r.set_bit(0, true);

        let residue = &r % 4_u32;
        r -= residue;
        r += 3_u32;

        r
    }
}
