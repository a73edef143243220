//! Convenience password generator.
//!
//! Draws from `rand`'s thread RNG, uniformly and independently per
//! character. Good enough to fill a form field, not a security primitive.

use rand::Rng;

/// `A-Z a-z 0-9 !@#$%^&*`
pub const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

pub const DEFAULT_PASSWORD_LENGTH: usize = 16;

pub fn generate_password() -> String {
    generate_password_of_length(DEFAULT_PASSWORD_LENGTH)
}

pub fn generate_password_of_length(length: usize) -> String {
    generate_password_with(&mut rand::thread_rng(), length)
}

pub fn generate_password_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn charset_has_seventy_distinct_symbols() {
        let mut sorted = PASSWORD_CHARSET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 70);
    }

    #[test]
    fn default_password_is_sixteen_charset_chars() {
        let password = generate_password();
        assert_eq!(password.len(), 16);
        assert!(password.bytes().all(|b| PASSWORD_CHARSET.contains(&b)));
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_password_with(&mut StdRng::seed_from_u64(7), 24);
        let b = generate_password_with(&mut StdRng::seed_from_u64(7), 24);
        assert_eq!(a, b);
        assert_eq!(a.len(), 24);
    }

    #[test]
    fn draws_cover_the_whole_charset() {
        let mut rng = StdRng::seed_from_u64(42);
        let sample = generate_password_with(&mut rng, 10_000);
        for symbol in PASSWORD_CHARSET {
            assert!(sample.as_bytes().contains(symbol), "missing {}", *symbol as char);
        }
    }
}
