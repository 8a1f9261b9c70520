//! The key wire format: a JSON document whose big-integer fields are
//! tagged decimal strings (`"12345n"`), itself base64-encoded.
//!
//! New module; grounded on the `serde` + `serde_json` + `base64` export
//! pattern used by other RSA crates in the retrieval pack (e.g.
//! `akda007-rsa-rust`'s `RSAPublicKeyExport`/`RSAPrivateKeyExport`), adapted
//! here to the tagged-bigint scheme this crate's wire format requires
//! instead of that example's plain base64-of-bytes fields.

use crate::error::RsaError;
use crate::rsa::key::{PrivateKey, PublicKey};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct PublicKeyDoc {
    n: String,
    e: String,
}

#[derive(Serialize, Deserialize)]
struct PrivateKeyDoc {
    p: String,
    q: String,
    e: String,
    d: String,
    n: String,
    phi: String,
    dp: String,
    dq: String,
    qinv: String,
}

fn tag(x: &BigUint) -> String {
    format!("{}n", x.to_str_radix(10))
}

/// Parse a tagged (`"123n"`) or plain (`"123"`) decimal string back into a
/// big integer.
fn untag(s: &str) -> Result<BigUint, RsaError> {
    let digits = s.strip_suffix('n').unwrap_or(s);

    BigUint::parse_bytes(digits.as_bytes(), 10)
        .ok_or_else(|| RsaError::Decoding(format!("not a decimal integer: {:?}", s)))
}

/// Serialize a public key as base64-encoded tagged-bigint JSON.
pub fn encode_public_key(key: &PublicKey) -> String {
    let doc = PublicKeyDoc { n: tag(&key.n), e: tag(&key.e) };
    let json = serde_json::to_string(&doc).expect("PublicKeyDoc serialization cannot fail");

    base64::encode(json)
}

/// Parse a public key from its base64-encoded tagged-bigint JSON form.
pub fn decode_public_key(blob: &str) -> Result<PublicKey, RsaError> {
    let json_bytes = base64::decode(blob).map_err(|e| RsaError::Decoding(e.to_string()))?;
    let json = String::from_utf8(json_bytes).map_err(|e| RsaError::Decoding(e.to_string()))?;
    let doc: PublicKeyDoc =
        serde_json::from_str(&json).map_err(|e| RsaError::Decoding(e.to_string()))?;

    Ok(PublicKey { n: untag(&doc.n)?, e: untag(&doc.e)? })
}

/// Serialize a private key as base64-encoded tagged-bigint JSON.
pub fn encode_private_key(key: &PrivateKey) -> String {
    let doc = PrivateKeyDoc {
        p: tag(&key.p),
        q: tag(&key.q),
        e: tag(&key.e),
        d: tag(&key.d),
        n: tag(&key.n),
        phi: tag(&key.phi),
        dp: tag(&key.dp),
        dq: tag(&key.dq),
        qinv: tag(&key.qinv),
    };
    let json = serde_json::to_string(&doc).expect("PrivateKeyDoc serialization cannot fail");

    base64::encode(json)
}

/// Parse a private key from its base64-encoded tagged-bigint JSON form.
pub fn decode_private_key(blob: &str) -> Result<PrivateKey, RsaError> {
    let json_bytes = base64::decode(blob).map_err(|e| RsaError::Decoding(e.to_string()))?;
    let json = String::from_utf8(json_bytes).map_err(|e| RsaError::Decoding(e.to_string()))?;
    let doc: PrivateKeyDoc =
        serde_json::from_str(&json).map_err(|e| RsaError::Decoding(e.to_string()))?;

    Ok(PrivateKey {
        p: untag(&doc.p)?,
        q: untag(&doc.q)?,
        e: untag(&doc.e)?,
        d: untag(&doc.d)?,
        n: untag(&doc.n)?,
        phi: untag(&doc.phi)?,
        dp: untag(&doc.dp)?,
        dq: untag(&doc.dq)?,
        qinv: untag(&doc.qinv)?,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::entropy::OsEntropy;
    use crate::rsa::key::generate_keypair;

    #[test]
    fn public_key_round_trips() {
        let (public, _) = generate_keypair(512, &OsEntropy).unwrap();

        let blob = encode_public_key(&public);
        let decoded = decode_public_key(&blob).unwrap();

        assert_eq!(decoded, public);
    }

    #[test]
    fn private_key_round_trips() {
        let (_, private) = generate_keypair(512, &OsEntropy).unwrap();

        let blob = encode_private_key(&private);
        let decoded = decode_private_key(&blob).unwrap();

        assert_eq!(decoded, private);
    }

    #[test]
    fn untag_accepts_both_tagged_and_plain_forms() {
        assert_eq!(untag("123n").unwrap(), BigUint::from(123_u32));
        assert_eq!(untag("123").unwrap(), BigUint::from(123_u32));
    }

    #[test]
    fn decode_rejects_malformed_base64() {
        assert!(decode_public_key("not valid base64!!!").is_err());
    }
}
