//! [SHA-512](https://en.wikipedia.org/wiki/SHA-2) hash function, per
//! FIPS 180-4. Included for completeness; the RSA core (OAEP/PSS/MGF1) only
//! ever reaches for [`super::Sha256`].

use crate::digest::Digest;
use byteorder::{BigEndian, ByteOrder};

const K: [u64; 80] = [
    0x428a2f98d728ae22, 0x7137449123ef65cd, 0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
    0x3956c25bf348b538, 0x59f111f1b605d019, 0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
    0xd807aa98a3030242, 0x12835b0145706fbe, 0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f, 0x80deb1fe3b1696b1, 0x9bdc06a725c71235, 0xc19bf174cf692694,
    0xe49b69c19ef14ad2, 0xefbe4786384f25e3, 0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
    0x2de92c6f592b0275, 0x4a7484aa6ea6e483, 0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
    0x983e5152ee66dfab, 0xa831c66d2db43210, 0xb00327c898fb213f, 0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2, 0xd5a79147930aa725, 0x06ca6351e003826f, 0x142929670a0e6e70,
    0x27b70a8546d22ffc, 0x2e1b21385c26c926, 0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
    0x650a73548baf63de, 0x766a0abb3c77b2a8, 0x81c2c92e47edaee6, 0x92722c851482353b,
    0xa2bfe8a14cf10364, 0xa81a664bbc423001, 0xc24b8b70d0f89791, 0xc76c51a30654be30,
    0xd192e819d6ef5218, 0xd69906245565a910, 0xf40e35855771202a, 0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8, 0x1e376c085141ab53, 0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb, 0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc, 0x78a5636f43172f60, 0x84c87814a1f0ab72, 0x8cc702081a6439ec,
    0x90befffa23631e28, 0xa4506cebde82bde9, 0xbef9a3f7b2c67915, 0xc67178f2e372532b,
    0xca273eceea26619c, 0xd186b8c721c0c207, 0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
    0x06f067aa72176fba, 0x0a637dc5a2c898a6, 0x113f9804bef90dae, 0x1b710b35131c471b,
    0x28db77f523047d84, 0x32caab7b40c72493, 0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6, 0x597f299cfc657e2a, 0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

/// [SHA-512](https://en.wikipedia.org/wiki/SHA-2) hash implementation.
pub struct Sha512 {
    h: [u64; 8],
    block_count: u64,
    current_block: Vec<u8>,
}

impl Sha512 {
    /// Create a reset instance (the FIPS 180-4 initial hash values).
    pub const fn new() -> Sha512 {
        Sha512 {
            h: [
                0x6a09e667f3bcc908,
                0xbb67ae8584caa73b,
                0x3c6ef372fe94f82b,
                0xa54ff53a5f1d36f1,
                0x510e527fade682d1,
                0x9b05688c2b3e6c1f,
                0x1f83d9abfb41bd6b,
                0x5be0cd19137e2179,
            ],
            block_count: 0,
            current_block: vec![],
        }
    }
}

impl Default for Sha512 {
    fn default() -> Self {
        Sha512::new()
    }
}

impl Digest for Sha512 {
    const OUTPUT_LENGTH: usize = 64;
    const BLOCK_LENGTH: usize = 128;

    type Output = [u8; Self::OUTPUT_LENGTH];

    #[allow(clippy::many_single_char_names)]
    fn update(&mut self, message: &[u8]) {
        let blocks = [&self.current_block, message].concat();

        self.current_block = vec![];

        for chunk in blocks.chunks(Self::BLOCK_LENGTH) {
            if chunk.len() != Self::BLOCK_LENGTH {
                self.current_block = chunk.to_vec();
                break;
            }

            let mut w = [0_u64; 80];

            for i in 0..16 {
                w[i] = BigEndian::read_u64(&chunk[8 * i..8 * (i + 1)]);
            }

            for i in 16..80 {
                let s0 = w[i - 15].rotate_right(1) ^ w[i - 15].rotate_right(8) ^ (w[i - 15] >> 7);
                let s1 = w[i - 2].rotate_right(19) ^ w[i - 2].rotate_right(61) ^ (w[i - 2] >> 6);

                w[i] = w[i - 16]
                    .wrapping_add(s0)
                    .wrapping_add(w[i - 7])
                    .wrapping_add(s1);
            }

            let mut a = self.h[0];
            let mut b = self.h[1];
            let mut c = self.h[2];
            let mut d = self.h[3];
            let mut e = self.h[4];
            let mut f = self.h[5];
            let mut g = self.h[6];
            let mut h = self.h[7];

            for i in 0..80 {
                let s1 = e.rotate_right(14) ^ e.rotate_right(18) ^ e.rotate_right(41);
                let ch = (e & f) ^ ((!e) & g);
                let temp1 = h
                    .wrapping_add(s1)
                    .wrapping_add(ch)
                    .wrapping_add(K[i])
                    .wrapping_add(w[i]);
                let s0 = a.rotate_right(28) ^ a.rotate_right(34) ^ a.rotate_right(39);
                let maj = (a & b) ^ (a & c) ^ (b & c);
                let temp2 = s0.wrapping_add(maj);

                h = g;
                g = f;
                f = e;
                e = d.wrapping_add(temp1);
                d = c;
                c = b;
                b = a;
                a = temp1.wrapping_add(temp2);
            }

            self.h[0] = self.h[0].wrapping_add(a);
            self.h[1] = self.h[1].wrapping_add(b);
            self.h[2] = self.h[2].wrapping_add(c);
            self.h[3] = self.h[3].wrapping_add(d);
            self.h[4] = self.h[4].wrapping_add(e);
            self.h[5] = self.h[5].wrapping_add(f);
            self.h[6] = self.h[6].wrapping_add(g);
            self.h[7] = self.h[7].wrapping_add(h);
            self.block_count += 1;
        }
    }

    fn finalize(mut self) -> Self::Output {
        let message_len =
            self.block_count * Self::BLOCK_LENGTH as u64 + self.current_block.len() as u64;

        // SHA-512 uses a 128-bit length field; the high 64 bits are always
        // zero for any message this crate could plausibly hash.
        let mut ml = [0; 16];
        BigEndian::write_u64(&mut ml[8..16], 8 * message_len);

        self.update(&[0x80]);

        let padding_len = Self::BLOCK_LENGTH
            - ((1 + ml.len() as u64 + message_len) % Self::BLOCK_LENGTH as u64) as usize;
        self.update(&vec![0; padding_len]);

        self.update(&ml);

        assert_eq!(self.current_block, &[]);

        let mut hh = [0; Self::OUTPUT_LENGTH];
        for (i, word) in self.h.iter().enumerate() {
            BigEndian::write_u64(&mut hh[8 * i..8 * (i + 1)], *word);
        }

        hh
    }
}

#[cfg(test)]
mod test {
    use crate::digest::{Digest, Sha512};

    const EMPTY_STRING_SHA512: [u8; 64] = [
        0xcf, 0x83, 0xe1, 0x35, 0x7e, 0xef, 0xb8, 0xbd, 0xf1, 0x54, 0x28, 0x50, 0xd6, 0x6d, 0x80,
        0x07, 0xd6, 0x20, 0xe4, 0x05, 0x0b, 0x57, 0x15, 0xdc, 0x83, 0xf4, 0xa9, 0x21, 0xd3, 0x6c,
        0xe9, 0xce, 0x47, 0xd0, 0xd1, 0x3c, 0x5d, 0x85, 0xf2, 0xb0, 0xff, 0x83, 0x18, 0xd2, 0x87,
        0x7e, 0xec, 0x2f, 0x63, 0xb9, 0x31, 0xbd, 0x47, 0x41, 0x7a, 0x81, 0xa5, 0x38, 0x32, 0x7a,
        0xf9, 0x27, 0xda, 0x3e,
    ];

    const ABC_STRING_SHA512: [u8; 64] = [
        0xdd, 0xaf, 0x35, 0xa1, 0x93, 0x61, 0x7a, 0xba, 0xcc, 0x41, 0x73, 0x49, 0xae, 0x20, 0x41,
        0x31, 0x12, 0xe6, 0xfa, 0x4e, 0x89, 0xa9, 0x7e, 0xa2, 0x0a, 0x9e, 0xee, 0xe6, 0x4b, 0x55,
        0xd3, 0x9a, 0x21, 0x92, 0x99, 0x2a, 0x27, 0x4f, 0xc1, 0xa8, 0x36, 0xba, 0x3c, 0x23, 0xa3,
        0xfe, 0xeb, 0xbd, 0x45, 0x4d, 0x44, 0x23, 0x64, 0x3c, 0xe8, 0x0e, 0x2a, 0x9a, 0xc9, 0x4f,
        0xa5, 0x4c, 0xa4, 0x9f,
    ];

    #[test]
    fn empty_string() {
        assert_eq!(Sha512::new().finalize(), EMPTY_STRING_SHA512);
        assert_eq!(Sha512::digest(b""), EMPTY_STRING_SHA512);
    }

    #[test]
    fn abc_string() {
        assert_eq!(Sha512::digest(b"abc"), ABC_STRING_SHA512);
    }

    #[test]
    fn multi_block_message() {
        let long = vec![0x61_u8; 1000];

        let mut whole = Sha512::new();
        whole.update(&long);

        let mut piecewise = Sha512::new();
        for chunk in long.chunks(23) {
            piecewise.update(chunk);
        }

        assert_eq!(whole.finalize(), piecewise.finalize());
    }
}
