//! Known-answer vectors and cross-module truth-table checks that don't
//! belong to any single module's own unit tests.

use num_bigint::BigUint;
use rsa_forge::digest::{Digest, Sha256};
use rsa_forge::primes::is_prime;

#[test]
fn sha256_matches_known_vectors() {
    assert_eq!(
        hex(&Sha256::digest(b"")),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        hex(&Sha256::digest(b"abc")),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[test]
fn miller_rabin_matches_sieve_truth_table_for_first_1000_integers() {
    let limit = 1000_u64;
    let mut composite = vec![false; limit as usize + 1];
    composite[0] = true;
    composite[1] = true;

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

    for n in 0..=limit {
        let expected = !composite[n as usize];
        assert_eq!(is_prime(&BigUint::from(n), 16), expected, "mismatch at {}", n);
    }
}
