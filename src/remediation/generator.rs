//! Replacement credential generation.

use rand::rngs::OsRng;
use rand::Rng;

use crate::secrets::SecretString;

/// Length of every generated credential, in characters.
pub const GENERATED_SECRET_LENGTH: usize = 32;

/// ASCII letters, digits and punctuation: the 94 printable non-space characters.
pub const SECRET_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz\
ABCDEFGHIJKLMNOPQRSTUVWXYZ\
0123456789\
!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Source of replacement values for rotated secrets.
pub trait SecretGenerator: Send + Sync {
    fn generate(&self) -> SecretString;
}

/// Draws each character uniformly from [`SECRET_ALPHABET`] using the operating
/// system's CSPRNG. Holds no state and cannot be seeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngSecretGenerator;

impl SecretGenerator for OsRngSecretGenerator {
    fn generate(&self) -> SecretString {
        let mut rng = OsRng;
        let value: String = (0..GENERATED_SECRET_LENGTH)
            .map(|_| SECRET_ALPHABET[rng.gen_range(0..SECRET_ALPHABET.len())] as char)
            .collect();
        SecretString::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_is_printable_ascii_without_space() {
        assert_eq!(SECRET_ALPHABET.len(), 94);
        let distinct: HashSet<u8> = SECRET_ALPHABET.iter().copied().collect();
        assert_eq!(distinct.len(), 94);
        assert!(SECRET_ALPHABET.iter().all(|b| b.is_ascii_graphic()));
    }

    #[test]
    fn test_generated_length_and_charset() {
        let generator = OsRngSecretGenerator;
        for _ in 0..200 {
            let secret = generator.generate();
            assert_eq!(secret.char_len(), GENERATED_SECRET_LENGTH);
            assert!(secret.expose_secret().bytes().all(|b| SECRET_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_consecutive_values_differ() {
        let generator = OsRngSecretGenerator;
        let values: HashSet<String> =
            (0..1000).map(|_| generator.generate().expose_secret().to_string()).collect();
        assert_eq!(values.len(), 1000);
    }

    #[test]
    fn test_every_character_class_appears() {
        let generator = OsRngSecretGenerator;
        let joined: String =
            (0..200).map(|_| generator.generate().expose_secret().to_string()).collect();

        assert!(joined.chars().any(|c| c.is_ascii_lowercase()));
        assert!(joined.chars().any(|c| c.is_ascii_uppercase()));
        assert!(joined.chars().any(|c| c.is_ascii_digit()));
        assert!(joined.chars().any(|c| c.is_ascii_punctuation()));
    }
}
