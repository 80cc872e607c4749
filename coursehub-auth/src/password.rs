use std::str::FromStr;

use crate::PasswordError;

/// Lowest and highest cost factors bcrypt accepts.
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;
/// Salt (22) plus checksum (31) in bcrypt's base64 alphabet.
const BCRYPT_PAYLOAD_LEN: usize = 53;
/// Identifier written for new hashes.
const CURRENT_IDENT: &str = "2b";

/// Hash schemes the context can recognise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Bcrypt,
}

/// When a stored hash is considered due for an upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeprecatedPolicy {
    /// Anything not produced by the current settings (older ident or different cost).
    #[default]
    Auto,
    /// Never flag hashes.
    None,
}

impl FromStr for DeprecatedPolicy {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "none" => Ok(Self::None),
            other => Err(PasswordError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Process-wide password hashing settings.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordContext {
    bcrypt_cost: u32,
    deprecated: DeprecatedPolicy,
}

impl Default for PasswordContext {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
            deprecated: DeprecatedPolicy::Auto,
        }
    }
}

/// The parts of a modular-crypt bcrypt string the context cares about.
#[derive(Debug)]
struct ParsedHash<'a> {
    ident: &'a str,
    cost: u32,
}

fn parse_bcrypt(stored: &str) -> Option<ParsedHash<'_>> {
    let mut parts = stored.strip_prefix('$')?.splitn(3, '$');
    let ident = parts.next()?;
    let cost = parts.next()?;
    let payload = parts.next()?;

    if !matches!(ident, "2a" | "2b" | "2x" | "2y") {
        return None;
    }
    if cost.len() != 2 || payload.len() != BCRYPT_PAYLOAD_LEN {
        return None;
    }
    let cost = cost.parse().ok()?;
    Some(ParsedHash { ident, cost })
}

impl PasswordContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the cost used for new hashes.
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost(cost));
        }
        self.bcrypt_cost = cost;
        Ok(self)
    }

    pub fn with_deprecated(mut self, policy: DeprecatedPolicy) -> Self {
        self.deprecated = policy;
        self
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost
    }

    pub fn deprecated(&self) -> DeprecatedPolicy {
        self.deprecated
    }

    /// Only bcrypt is configured.
    pub fn schemes(&self) -> &'static [Scheme] {
        &[Scheme::Bcrypt]
    }

    /// Hash a password with the configured cost and a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch yields `VerificationFailed`; a stored value that is not a bcrypt
    /// hash yields `InvalidHashFormat`. Other bcrypt failures are `HashingFailed`.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<(), PasswordError> {
        if self.identify(stored_hash).is_none() {
            return Err(PasswordError::InvalidHashFormat);
        }
        match bcrypt::verify(password, stored_hash) {
            Ok(true) => Ok(()),
            Ok(false) => Err(PasswordError::VerificationFailed),
            Err(
                bcrypt::BcryptError::InvalidHash(_)
                | bcrypt::BcryptError::InvalidPrefix(_)
                | bcrypt::BcryptError::InvalidCost(_)
                | bcrypt::BcryptError::InvalidBase64(_),
            ) => Err(PasswordError::InvalidHashFormat),
            Err(e) => Err(PasswordError::HashingFailed(e.to_string())),
        }
    }

    /// Recognise which configured scheme produced `stored_hash`, if any.
    pub fn identify(&self, stored_hash: &str) -> Option<Scheme> {
        parse_bcrypt(stored_hash).map(|_| Scheme::Bcrypt)
    }

    /// Whether `stored_hash` should be replaced by a hash made with the current settings.
    ///
    /// Unrecognised hashes always need an update.
    pub fn needs_update(&self, stored_hash: &str) -> bool {
        let Some(parsed) = parse_bcrypt(stored_hash) else {
            return true;
        };
        match self.deprecated {
            DeprecatedPolicy::None => false,
            DeprecatedPolicy::Auto => {
                parsed.ident != CURRENT_IDENT || parsed.cost != self.bcrypt_cost
            }
        }
    }
}
