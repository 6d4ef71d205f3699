use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlates progress events of one evaluation when several run concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationId(Uuid);

impl EvaluationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EvaluationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::EvaluationId;

    #[test]
    fn evaluation_ids_are_unique() {
        assert_ne!(EvaluationId::new(), EvaluationId::new());
    }

    #[test]
    fn evaluation_id_serializes_as_a_bare_uuid() {
        let id = EvaluationId::new();

        let encoded = serde_json::to_string(&id).expect("id should serialize");
        assert_eq!(encoded, format!("\"{id}\""));

        let decoded: EvaluationId = serde_json::from_str(&encoded).expect("id should deserialize");
        assert_eq!(decoded, id);
    }
}
