use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::Rng;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const SALT_LENGTH: usize = 16;
const KEY_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Invalid hash format")]
    Format,

    #[error("PBKDF2 failed: {0}")]
    Pbkdf2(String),
}

/// Hashes PBKDF2-HMAC-SHA256 au format `pbkdf2:sha256:iterations$salt$hash`.
/// Le nombre d'itérations ne sert qu'aux nouveaux hashes ; la vérification
/// le relit dans le hash stocké.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    iterations: u32,
}

impl PasswordHasher {
    pub fn new(iterations: u32) -> Self {
        PasswordHasher { iterations }
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LENGTH];
        rand::thread_rng().fill(&mut salt);

        let mut key = [0u8; KEY_LENGTH];
        derive(password, &salt, self.iterations, &mut key)?;

        Ok(format!(
            "pbkdf2:sha256:{}${}${}",
            self.iterations,
            URL_SAFE_NO_PAD.encode(salt),
            URL_SAFE_NO_PAD.encode(key)
        ))
    }

    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parts: Vec<&str> = stored_hash.split('$').collect();
        if parts.len() != 3 {
            return Err(PasswordError::Format);
        }

        let iterations = match parts[0].split(':').collect::<Vec<_>>().as_slice() {
            ["pbkdf2", "sha256", n] => n.parse::<u32>().map_err(|_| PasswordError::Format)?,
            _ => return Err(PasswordError::Format),
        };

        let salt = URL_SAFE_NO_PAD.decode(parts[1]).map_err(|_| PasswordError::Format)?;
        let expected = URL_SAFE_NO_PAD.decode(parts[2]).map_err(|_| PasswordError::Format)?;

        let mut computed = vec![0u8; expected.len()];
        derive(password, &salt, iterations, &mut computed)?;

        Ok(constant_time_eq(&computed, &expected))
    }
}

fn derive(password: &str, salt: &[u8], iterations: u32, out: &mut [u8]) -> Result<(), PasswordError> {
    pbkdf2::<HmacSha256>(password.as_bytes(), salt, iterations, out)
        .map_err(|e| PasswordError::Pbkdf2(e.to_string()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITERATIONS: u32 = 1_000;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(ITERATIONS);
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hash.starts_with("pbkdf2:sha256:1000$"));
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new(ITERATIONS);
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_verify_uses_stored_iterations() {
        let hash = PasswordHasher::new(2_000).hash("pw").unwrap();
        assert!(PasswordHasher::new(ITERATIONS).verify("pw", &hash).unwrap());
    }

    #[test]
    fn test_invalid_format() {
        let hasher = PasswordHasher::new(ITERATIONS);
        assert!(matches!(hasher.verify("pw", "plaintext"), Err(PasswordError::Format)));
        assert!(matches!(hasher.verify("pw", "md5:x:1$a$b"), Err(PasswordError::Format)));
    }
}
