//! End-to-end key generation, encryption and signature scenarios.

use rsa_forge::entropy::OsEntropy;
use rsa_forge::primes::is_prime;
use rsa_forge::rsa::codec::{decode_private_key, decode_public_key, encode_private_key, encode_public_key};
use rsa_forge::rsa::{decrypt, encrypt, sign, verify, KeyPair, PrivateOp};

#[test]
fn generated_key_has_expected_bit_length_and_safe_primes() {
    let keypair = KeyPair::generate(1024, &OsEntropy).unwrap();

    let n_bits = keypair.public.n.bits();
    assert!(n_bits == 1023 || n_bits == 1024, "n has {} bits", n_bits);

    for prime in [&keypair.private.p, &keypair.private.q] {
        assert!(is_prime(prime, 16));

        let sophie_germain = (prime - 1_u32) / 2_u32;
        assert!(is_prime(&sophie_germain, 16));
    }
}

#[test]
fn key_survives_codec_round_trip() {
    let keypair = KeyPair::generate(1024, &OsEntropy).unwrap();

    let public_blob = encode_public_key(&keypair.public);
    let private_blob = encode_private_key(&keypair.private);

    assert_eq!(decode_public_key(&public_blob).unwrap(), keypair.public);
    assert_eq!(decode_private_key(&private_blob).unwrap(), keypair.private);
}

#[test]
fn encrypt_decrypt_round_trips_across_all_private_op_variants() {
    let keypair = KeyPair::generate(1024, &OsEntropy).unwrap();
    let message = "Message \u{e0} chiffrer".as_bytes();

    let ciphertext = encrypt(&keypair.public, message, &OsEntropy).unwrap();

    for variant in [PrivateOp::Naive, PrivateOp::Blinded, PrivateOp::Crt, PrivateOp::BlindedCrt] {
        let recovered = decrypt(&keypair.private, &ciphertext, variant, &OsEntropy).unwrap();
        assert_eq!(recovered, message, "{:?} failed to recover the plaintext", variant);
    }
}

#[test]
fn sign_and_verify_with_tamper_detection() {
    let keypair = KeyPair::generate(1024, &OsEntropy).unwrap();
    let message = "Ceci est un message \u{e0} signer".as_bytes();

    let mut signature = sign(&keypair.private, message, &OsEntropy).unwrap();
    assert!(verify(&keypair.public, message, &signature));

    let last = signature.len() - 1;
    signature[last] ^= 0x01;
    assert!(!verify(&keypair.public, message, &signature));

    let mut tampered_message = message.to_vec();
    tampered_message[0] ^= 0x01;
    let original_signature = sign(&keypair.private, message, &OsEntropy).unwrap();
    assert!(!verify(&keypair.public, &tampered_message, &original_signature));
}

#[test]
fn encrypt_rejects_message_one_byte_over_capacity() {
    let keypair = KeyPair::generate(1024, &OsEntropy).unwrap();
    let k = ((keypair.public.n.bits() + 7) / 8) as usize;
    let h_len = 32;

    let max_len = k - 2 * h_len - 2;
    let too_long = vec![0x41_u8; max_len + 1];

    assert!(encrypt(&keypair.public, &too_long, &OsEntropy).is_err());
}
