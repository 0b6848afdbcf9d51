use serde::{Deserialize, Serialize};

/// One primer pair as submitted by the host service: a forward and a
/// reverse oligo targeting the same amplicon.
///
/// Sequences are ASCII and case-insensitive; the engine normalizes them
/// before encoding. `id` must be unique within a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Primer {
    pub id: String,
    #[serde(default)]
    pub gene: String,
    pub forward: String,
    pub reverse: String,
}

impl Primer {
    pub fn new(
        id: impl Into<String>,
        gene: impl Into<String>,
        forward: impl Into<String>,
        reverse: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            gene: gene.into(),
            forward: forward.into(),
            reverse: reverse.into(),
        }
    }
}
