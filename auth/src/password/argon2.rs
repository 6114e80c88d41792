use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Memory cost in KiB used for new hashes.
pub const MEMORY_COST_KIB: u32 = 19 * 1024;

/// Number of Argon2 passes used for new hashes.
pub const TIME_COST: u32 = 2;

/// Degree of parallelism used for new hashes.
pub const PARALLELISM: u32 = 1;

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// The cost parameters only apply to hashes produced by this instance;
/// verification always reads the parameters embedded in the stored hash,
/// so raising the cost keeps existing hashes valid.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    /// Hash of a fixed password under this instance's parameters, verified
    /// against when no stored hash exists.
    decoy_hash: String,
}

impl PasswordHasher {
    /// Create a password hasher with the default cost constants.
    pub fn new() -> Self {
        let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None)
            .unwrap_or_default();
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        // Valid parameters always hash.
        let decoy_hash = hash_decoy(&argon2).unwrap_or_default();

        Self { argon2, decoy_hash }
    }

    /// Create a password hasher with explicit cost parameters.
    ///
    /// # Arguments
    /// * `memory_cost_kib` - Memory size in KiB
    /// * `time_cost` - Number of passes
    /// * `parallelism` - Degree of parallelism
    ///
    /// # Errors
    /// * `InvalidParameters` - Parameters are outside the ranges Argon2 accepts
    pub fn with_params(
        memory_cost_kib: u32,
        time_cost: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordError> {
        let params = Params::new(memory_cost_kib, time_cost, parallelism, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let decoy_hash = hash_decoy(&argon2)?;

        Ok(Self { argon2, decoy_hash })
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated on every call, so hashing the same
    /// password twice never yields the same string. Empty passwords are hashed
    /// like any other input; callers reject them before reaching this point.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_with(&self.argon2, password)
    }

    /// Verify a password against a stored hash.
    ///
    /// Returns `false` for a wrong password as well as for a stored hash that
    /// is malformed, truncated or produced by another algorithm.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend the work of a verification when no stored hash exists.
    ///
    /// Always returns `false`. Lets callers answer "unknown user" in about the
    /// same time as "wrong password", so timing does not reveal which
    /// usernames are registered.
    pub fn verify_absent(&self, password: &str) -> bool {
        self.verify(password, &self.decoy_hash);
        false
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

fn hash_decoy(argon2: &Argon2<'_>) -> Result<String, PasswordError> {
    hash_with(argon2, "decoy")
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1, 1).expect("Failed to build hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();

        let first = hasher.hash("correct-horse").expect("Failed to hash password");
        let second = hasher.hash("correct-horse").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("correct-horse", &first));
        assert!(hasher.verify("correct-horse", &second));
    }

    #[test]
    fn test_default_hash_embeds_cost_constants() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("password").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$v=19$"));
        assert!(hash.contains(&format!(
            "m={},t={},p={}",
            MEMORY_COST_KIB, TIME_COST, PARALLELISM
        )));
    }

    #[test]
    fn test_cost_constants_meet_minimum() {
        assert!(MEMORY_COST_KIB >= 19 * 1024);
        assert!(TIME_COST >= 2);
        assert!(PARALLELISM >= 1);
    }

    #[test]
    fn test_verify_uses_parameters_from_hash() {
        let old = fast_hasher();
        let hash = old.hash("password").expect("Failed to hash password");

        // A hasher configured with different costs still verifies old hashes.
        let current = PasswordHasher::with_params(2048, 2, 1).expect("Failed to build hasher");
        assert!(current.verify("password", &hash));
        assert!(!current.verify("Password", &hash));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
        assert!(!hasher.verify("password", "$argon2id$v=19$m=1024"));
    }

    #[test]
    fn test_verify_truncated_hash() {
        let hasher = fast_hasher();
        let hash = hasher.hash("password").expect("Failed to hash password");

        let truncated = &hash[..hash.len() - 10];
        assert!(!hasher.verify("password", truncated));
    }

    #[test]
    fn test_verify_unsupported_algorithm() {
        let hasher = fast_hasher();
        let bcrypt = "$2b$14$C6UzMDM.H6dfI/f/IKxGhu2ZUzHLuBZHc5F4XdEC0zyJhHSn3nB5m";
        let scrypt = "$scrypt$ln=16,r=8,p=1$aM15713r3Xsvxbi31lqr1Q$nFNh2CVHVjNldFVKDHDlm4CbdRSCdEBsjjJxD+iCs5E";

        assert!(!hasher.verify("password", bcrypt));
        assert!(!hasher.verify("password", scrypt));
    }

    #[test]
    fn test_decoy_hash_built_with_instance_params() {
        let hasher = fast_hasher();

        assert!(hasher.decoy_hash.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));
        assert!(hasher.verify("decoy", &hasher.decoy_hash));

        let default = PasswordHasher::new();
        assert!(default.decoy_hash.contains(&format!(
            "m={},t={},p={}",
            MEMORY_COST_KIB, TIME_COST, PARALLELISM
        )));
    }

    #[test]
    fn test_verify_absent_never_matches() {
        let hasher = fast_hasher();

        assert!(!hasher.verify_absent("decoy"));
        assert!(!hasher.verify_absent("anything"));
    }

    #[test]
    fn test_with_params_rejects_invalid_cost() {
        let result = PasswordHasher::with_params(0, 0, 0);
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }

    #[test]
    fn test_empty_password_round_trip() {
        let hasher = fast_hasher();
        let hash = hasher.hash("").expect("Failed to hash password");

        assert!(hasher.verify("", &hash));
        assert!(!hasher.verify(" ", &hash));
    }
}
