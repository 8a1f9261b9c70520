//! A from-scratch RSA cryptosystem: safe-prime key generation, a hand-rolled
//! SHA-256/SHA-512, a Blum Blum Shub random stream, Miller-Rabin primality
//! testing, OAEP encryption padding and PSS signature padding, and four
//! private-key operation variants (naive, blinded, CRT, blinded CRT).
//!
//! Nothing here delegates hashing, randomness, or primality testing to an
//! existing cryptography crate; only arbitrary-precision integer
//! arithmetic is external.

#![warn(clippy::style)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]

pub mod bbs;
pub mod digest;
pub mod entropy;
pub mod error;
pub mod primes;
pub mod rsa;
