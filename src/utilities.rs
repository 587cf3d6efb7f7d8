//! One-shot helpers that sit beside the generators.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

pub const DEFAULT_PASSWORD_LEN: usize = 16;
pub const MIN_PASSWORD_LEN: usize = 4;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()-_=+[]{};:,.?";

/// Shape of a generated password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub length: usize,
    pub symbols: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LEN,
            symbols: true,
        }
    }
}

/// Generate a password containing at least one character of every enabled
/// class, in shuffled order.
pub fn generate_password<R: Rng + ?Sized>(rng: &mut R, policy: PasswordPolicy) -> String {
    let mut classes = vec![LOWERCASE, UPPERCASE, DIGITS];
    if policy.symbols {
        classes.push(SYMBOLS);
    }

    let length = policy.length.max(MIN_PASSWORD_LEN).max(classes.len());
    let pool = classes.concat();

    let mut chars: Vec<u8> = classes
        .iter()
        .filter_map(|class| class.choose(rng).copied())
        .collect();
    for _ in chars.len()..length {
        if let Some(&b) = pool.choose(rng) {
            chars.push(b);
        }
    }
    chars.shuffle(rng);

    chars.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn has_requested_length_and_every_class() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..50 {
            let password = generate_password(&mut rng, PasswordPolicy::default());
            assert_eq!(password.len(), DEFAULT_PASSWORD_LEN);
            assert!(password.bytes().any(|b| LOWERCASE.contains(&b)));
            assert!(password.bytes().any(|b| UPPERCASE.contains(&b)));
            assert!(password.bytes().any(|b| DIGITS.contains(&b)));
            assert!(password.bytes().any(|b| SYMBOLS.contains(&b)));
        }
    }

    #[test]
    fn symbols_can_be_turned_off() {
        let mut rng = StdRng::seed_from_u64(5);
        let policy = PasswordPolicy {
            length: 32,
            symbols: false,
        };
        let password = generate_password(&mut rng, policy);
        assert_eq!(password.len(), 32);
        assert!(password.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn tiny_lengths_are_raised() {
        let mut rng = StdRng::seed_from_u64(5);
        let policy = PasswordPolicy {
            length: 1,
            symbols: true,
        };
        assert_eq!(generate_password(&mut rng, policy).len(), MIN_PASSWORD_LEN);
    }
}
