//! PSS signature padding (RFC 8017 §8.1).
//!
//! Grounded on the teacher's `rsa::padding::SignaturePadding` trait shape
//! (`hash_pad` / `unpad_verify`), generalized from PKCS#1 v1.5's
//! deterministic padding to PSS's encode/verify-with-salt construction.

use crate::bbs::BlumBlumShub;
use crate::digest::{Digest, Sha256};
use crate::entropy::EntropySource;
use crate::error::RsaError;
use crate::rsa::oaep::mgf1;
use num_bigint::BigUint;

fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}

fn draw_salt(len: usize, entropy: &dyn EntropySource) -> Vec<u8> {
    let bbs_seed_bytes = entropy.bytes(64);
    let bbs_seed = BigUint::from_bytes_be(&bbs_seed_bytes);

    let mut bbs = BlumBlumShub::new(&bbs_seed, &BigUint::from(499_u32), &BigUint::from(547_u32));

    let mut salt = Vec::with_capacity(len);
    while salt.len() < len {
        let chunk = bbs.next_bits(64);
        salt.extend_from_slice(&chunk.to_bytes_be());
    }
    salt.truncate(len);
    salt
}

/// Zero the top `8*em_len - em_bits` bits of the leftmost byte of `buf`.
fn mask_unused_bits(buf: &mut [u8], em_len: usize, em_bits: u64) {
    let unused_bits = 8 * em_len as u64 - em_bits;
    if unused_bits > 0 && !buf.is_empty() {
        buf[0] &= 0xFF_u8 >> unused_bits;
    }
}

/// PSS-encode a message digest `m_hash` into an `em_len`-byte block with
/// `em_bits` significant bits.
pub fn encode(
    m_hash: &[u8],
    em_len: usize,
    em_bits: u64,
    entropy: &dyn EntropySource,
) -> Result<Vec<u8>, RsaError> {
    let h_len = Sha256::OUTPUT_LENGTH;
    let s_len = h_len;

    if em_len < h_len + s_len + 2 {
        return Err(RsaError::InputTooLarge);
    }

    let salt = draw_salt(s_len, entropy);

    let mut m_prime = Vec::with_capacity(8 + h_len + s_len);
    m_prime.extend(std::iter::repeat(0_u8).take(8));
    m_prime.extend_from_slice(m_hash);
    m_prime.extend_from_slice(&salt);

    let h = Sha256::digest(&m_prime);

    let ps_len = em_len - s_len - h_len - 2;
    let mut db = Vec::with_capacity(em_len - h_len - 1);
    db.extend(std::iter::repeat(0_u8).take(ps_len));
    db.push(0x01);
    db.extend_from_slice(&salt);

    let db_mask = mgf1(&h, db.len());
    let mut masked_db = xor(&db, &db_mask);
    mask_unused_bits(&mut masked_db, em_len, em_bits);

    let mut em = Vec::with_capacity(em_len);
    em.extend_from_slice(&masked_db);
    em.extend_from_slice(&h);
    em.push(0xBC);

    Ok(em)
}

/// Verify a PSS-encoded block `em` against a message digest `m_hash`.
///
/// Returns `false` on any mismatch rather than propagating an error, per
/// the padding-oracle note in the crate's error taxonomy.
pub fn verify(m_hash: &[u8], em: &[u8], em_bits: u64) -> bool {
    let h_len = Sha256::OUTPUT_LENGTH;
    let s_len = h_len;
    let em_len = em.len();

    if em_len < h_len + s_len + 2 {
        return false;
    }

    if em[em_len - 1] != 0xBC {
        log::debug!("PSS verify: trailer byte was {:#x}, expected 0xBC", em[em_len - 1]);
        return false;
    }

    let db_len = em_len - h_len - 1;
    let masked_db = &em[..db_len];
    let h = &em[db_len..db_len + h_len];

    let unused_bits = 8 * em_len as u64 - em_bits;
    if unused_bits > 0 {
        let top_mask = 0xFF_u8 << (8 - unused_bits);
        if masked_db[0] & top_mask != 0 {
            log::debug!("PSS verify: unused leading bits were not zero");
            return false;
        }
    }

    let db_mask = mgf1(h, db_len);
    let mut db = xor(masked_db, &db_mask);
    mask_unused_bits(&mut db, em_len, em_bits);

    let ps_len = db_len.saturating_sub(s_len + 1);
    if db[..ps_len].iter().any(|&b| b != 0x00) {
        log::debug!("PSS verify: leading padding not all zero");
        return false;
    }
    if db[ps_len] != 0x01 {
        log::debug!("PSS verify: separator byte was not 0x01");
        return false;
    }

    let salt = &db[ps_len + 1..];
    if salt.len() != s_len {
        log::debug!("PSS verify: salt length mismatch");
        return false;
    }

    let mut m_prime = Vec::with_capacity(8 + h_len + s_len);
    m_prime.extend(std::iter::repeat(0_u8).take(8));
    m_prime.extend_from_slice(m_hash);
    m_prime.extend_from_slice(salt);

    let h_prime = Sha256::digest(&m_prime);

    h == h_prime.as_ref()
}

#[cfg(test)]
mod test {
    use super::{encode, verify};
    use crate::digest::{Digest, Sha256};
    use crate::entropy::OsEntropy;

    #[test]
    fn encode_then_verify_succeeds() {
        let m_hash = Sha256::digest(b"Ceci est un message a signer");
        let em_bits = 1023_u64;
        let em_len = ((em_bits + 7) / 8) as usize;

        let em = encode(&m_hash, em_len, em_bits, &OsEntropy).unwrap();
        assert!(verify(&m_hash, &em, em_bits));
    }

    #[test]
    fn verify_fails_on_trailer_corruption() {
        let m_hash = Sha256::digest(b"message");
        let em_bits = 1023_u64;
        let em_len = ((em_bits + 7) / 8) as usize;

        let mut em = encode(&m_hash, em_len, em_bits, &OsEntropy).unwrap();
        let last = em.len() - 1;
        em[last] = 0xBB;

        assert!(!verify(&m_hash, &em, em_bits));
    }

    #[test]
    fn verify_fails_on_wrong_message() {
        let m_hash = Sha256::digest(b"message");
        let other_hash = Sha256::digest(b"different message");
        let em_bits = 1023_u64;
        let em_len = ((em_bits + 7) / 8) as usize;

        let em = encode(&m_hash, em_len, em_bits, &OsEntropy).unwrap();
        assert!(!verify(&other_hash, &em, em_bits));
    }

    #[test]
    fn encode_rejects_too_short_em_len() {
        let m_hash = Sha256::digest(b"message");
        assert!(encode(&m_hash, 10, 79, &OsEntropy).is_err());
    }
}
