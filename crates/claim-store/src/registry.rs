//! The persisted claim collection.

use claim_core::{Claim, MAX_CLAIM_AREA, PlayerId};
use hashbrown::HashSet;
use tracing::{debug, info};

use crate::{KvStore, StoreError, StoreResult};

/// Key the claim document is stored under.
pub const DEFAULT_CLAIMS_KEY: &str = "protectedAreas";

/// Literal written when no claim document exists yet.
const EMPTY_DOCUMENT: &str = "[]";

/// In-memory claim collection mirrored to a [`KvStore`].
///
/// Holds at most one claim per owner. The stored document is rewritten in
/// full on every [`replace`](Self::replace) and only read once, in
/// [`load`](Self::load).
pub struct ClaimRegistry {
    store: Box<dyn KvStore>,
    key: String,
    claims: Vec<Claim>,
}

impl ClaimRegistry {
    /// Load the claim collection, writing an empty document first if the key
    /// has never been set.
    ///
    /// Stored claims are checked against [`MAX_CLAIM_AREA`].
    ///
    /// # Errors
    /// See [`load_with_limit`](Self::load_with_limit).
    pub fn load(store: Box<dyn KvStore>, key: impl Into<String>) -> StoreResult<Self> {
        Self::load_with_limit(store, key, MAX_CLAIM_AREA)
    }

    /// Like [`load`](Self::load), with claims allowed to cover up to `max_area`.
    ///
    /// # Errors
    /// Returns [`StoreError::Malformed`] if the stored document is not a claim
    /// list and [`StoreError::InvalidClaim`] if a stored claim has inverted
    /// bounds, is larger than `max_area`, or shares its owner with another
    /// claim. The stored value is left untouched in both cases.
    pub fn load_with_limit(
        store: Box<dyn KvStore>,
        key: impl Into<String>,
        max_area: i64,
    ) -> StoreResult<Self> {
        let key = key.into();

        let document = match store.get(&key)? {
            Some(document) => document,
            None => {
                info!("No claim document under {key}, initializing");
                store.set(&key, EMPTY_DOCUMENT)?;
                EMPTY_DOCUMENT.to_string()
            }
        };

        let claims: Vec<Claim> =
            serde_json::from_str(&document).map_err(|source| StoreError::Malformed {
                key: key.clone(),
                source,
            })?;

        check_claims(&key, &claims, max_area)?;

        info!("Loaded {} claim(s) from {key}", claims.len());
        Ok(Self { store, key, claims })
    }

    /// Make `claim` its owner's only claim and persist the whole collection.
    ///
    /// The in-memory collection only changes once the write has succeeded.
    ///
    /// # Errors
    /// Returns an error if encoding or the store write fails.
    pub fn replace(&mut self, claim: Claim) -> StoreResult<()> {
        let mut next: Vec<Claim> = self
            .claims
            .iter()
            .filter(|existing| existing.owner != claim.owner)
            .cloned()
            .collect();
        next.push(claim);

        let document = serde_json::to_string(&next).map_err(StoreError::Encode)?;
        self.store.set(&self.key, &document)?;

        debug!(
            "Persisted {} claim(s) ({} bytes) under {}",
            next.len(),
            document.len(),
            self.key
        );
        self.claims = next;
        Ok(())
    }

    /// Claims as of the last successful [`replace`](Self::replace).
    #[must_use]
    pub fn snapshot(&self) -> &[Claim] {
        &self.claims
    }

    /// The claim owned by `owner`, if any.
    #[must_use]
    pub fn claim_of(&self, owner: &PlayerId) -> Option<&Claim> {
        self.claims.iter().find(|claim| claim.is_owned_by(owner))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Key the collection is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

fn check_claims(key: &str, claims: &[Claim], max_area: i64) -> StoreResult<()> {
    let mut owners = HashSet::with_capacity(claims.len());

    for claim in claims {
        let reason = if !claim.bounds.is_ordered() {
            Some("bounds are inverted")
        } else if claim.bounds.area() > max_area {
            Some("area exceeds the limit")
        } else if !owners.insert(&claim.owner) {
            Some("owner has more than one claim")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(StoreError::InvalidClaim {
                key: key.to_string(),
                owner: claim.owner.clone(),
                reason,
            });
        }
    }
    Ok(())
}

impl core::fmt::Debug for ClaimRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ClaimRegistry")
            .field("key", &self.key)
            .field("claims", &self.claims.len())
            .finish_non_exhaustive()
    }
}
