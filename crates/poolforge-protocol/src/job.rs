use crate::params::{PoolParams, ScoringWeights, SearchParams};
use crate::primer::Primer;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct JobIdentifier {
    pub hash: String,
}

impl JobIdentifier {
    /// Generates a deterministic hash over everything that defines the
    /// search landscape, so the host service can de-duplicate submissions.
    pub fn from_parts(
        primers: &[Primer],
        pool: &PoolParams,
        search: &SearchParams,
        weights: &ScoringWeights,
    ) -> Self {
        let mut hasher = Sha256::new();

        // 1. Primer set (ids + sequences define the interaction landscape)
        let primers_json = serde_json::to_string(primers).unwrap();
        hasher.update(primers_json.as_bytes());

        // 2. Partition shape
        let pool_json = serde_json::to_string(pool).unwrap();
        hasher.update(pool_json.as_bytes());

        // 3. Search parameters (including the seed)
        let search_json = serde_json::to_string(search).unwrap();
        hasher.update(search_json.as_bytes());

        // 4. Objective weights
        let weights_json = serde_json::to_string(weights).unwrap();
        hasher.update(weights_json.as_bytes());

        let result = hasher.finalize();
        Self {
            hash: hex::encode(result),
        }
    }
}
