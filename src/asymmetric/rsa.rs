//! Textbook RSA over a fixed table of small primes.
//!
//! This engine is deliberately weak and kept that way: the primes are tiny
//! and public, the private exponent is found by brute-force search over
//! `[1, phi)` (tractable only because phi is tiny), and each byte is
//! encrypted on its own with no packing or padding. It demonstrates the
//! modular arithmetic, nothing more — an attacker recovers the key by
//! trying the 45 possible prime pairs.

use num::{BigUint, ToPrimitive};
use rand::Rng;

use crate::error::{CipherError, Result};

/// Every modulus this table can produce exceeds 255, so any byte value is
/// representable.
const PRIMES: [u64; 10] = [53, 59, 61, 67, 71, 73, 79, 83, 89, 97];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyPair {
    modulus: u64,
    public_exponent: u64,
    private_exponent: u64,
    totient: u64,
}

impl RsaKeyPair {
    /// Picks two distinct primes uniformly from the fixed table and derives
    /// the exponent pair.
    pub fn generate(rng: &mut impl Rng) -> Result<Self> {
        let p_index = rng.gen_range(0..PRIMES.len());
        let mut q_index = rng.gen_range(0..PRIMES.len());
        while q_index == p_index {
            q_index = rng.gen_range(0..PRIMES.len());
        }
        Self::from_primes(PRIMES[p_index], PRIMES[q_index])
    }

    fn from_primes(p: u64, q: u64) -> Result<Self> {
        let modulus = p * q;
        let totient = (p - 1) * (q - 1);
        // smallest exponent >= 2 coprime to both the totient and the modulus
        let mut public_exponent = 2;
        while public_exponent < totient {
            if gcd(public_exponent, totient) == 1 && gcd(public_exponent, modulus) == 1 {
                break;
            }
            public_exponent += 1;
        }
        let private_exponent =
            mod_inverse(public_exponent, totient).ok_or_else(|| {
                CipherError::KeySchedule(format!(
                    "no modular inverse of {public_exponent} mod {totient}"
                ))
            })?;
        Ok(Self {
            modulus,
            public_exponent,
            private_exponent,
            totient,
        })
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    pub fn public_exponent(&self) -> u64 {
        self.public_exponent
    }

    /// One integer per input byte; no packing, no padding.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u64> {
        plaintext
            .iter()
            .map(|&byte| self.modpow(u64::from(byte), self.public_exponent))
            .collect()
    }

    pub fn decrypt(&self, ciphertext: &[u64]) -> Result<Vec<u8>> {
        ciphertext
            .iter()
            .map(|&value| {
                let plain = self.modpow(value, self.private_exponent);
                u8::try_from(plain).map_err(|_| {
                    CipherError::CorruptCiphertext(format!(
                        "rsa residue {plain} does not fit a byte"
                    ))
                })
            })
            .collect()
    }

    fn modpow(&self, base: u64, exponent: u64) -> u64 {
        BigUint::from(base)
            .modpow(&BigUint::from(exponent), &BigUint::from(self.modulus))
            .to_u64()
            .unwrap_or(0)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Exhaustive search for x with a·x ≡ 1 (mod m).
fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    (1..m).find(|&x| (a % m) * (x % m) % m == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponents_are_inverses_mod_totient() {
        let keys = RsaKeyPair::from_primes(61, 53).unwrap();
        assert_eq!(keys.modulus, 3233);
        assert_eq!(
            keys.public_exponent * keys.private_exponent % keys.totient,
            1
        );
    }

    #[test]
    fn every_byte_value_round_trips() {
        let keys = RsaKeyPair::from_primes(53, 59).unwrap();
        let all_bytes: Vec<u8> = (0..=255).collect();
        let encrypted = keys.encrypt(&all_bytes);
        assert_eq!(keys.decrypt(&encrypted).unwrap(), all_bytes);
    }

    #[test]
    fn generated_pairs_round_trip_text() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let keys = RsaKeyPair::generate(&mut rng).unwrap();
            let message = b"Hello, World!";
            let decrypted = keys.decrypt(&keys.encrypt(message)).unwrap();
            assert_eq!(decrypted, message);
        }
    }

    #[test]
    fn out_of_range_residue_is_corrupt() {
        let keys = RsaKeyPair::from_primes(53, 59).unwrap();
        // decrypting garbage may land on a residue no byte maps to
        let garbage: Vec<u64> = (256..300).collect();
        let outcome = keys.decrypt(&garbage);
        if let Err(err) = outcome {
            assert!(matches!(err, CipherError::CorruptCiphertext(_)));
        }
    }

    #[test]
    fn modular_inverse_search() {
        assert_eq!(mod_inverse(7, 40), Some(23));
        assert_eq!(mod_inverse(2, 4), None);
    }
}
