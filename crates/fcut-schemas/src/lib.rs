use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Current layout of [`PlanEnvelope`].
pub const PLAN_SCHEMA_VERSION: i32 = 1;

/// Wrapper written around every emitted plan (or drift report) so the output
/// names the exact inputs that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanEnvelope<T> {
    pub schema_version: i32,
    pub plan_id: Uuid,
    pub created_at_utc: DateTime<Utc>,
    /// SHA-256 of the observation document as read from disk.
    pub observed_hash: String,
    /// SHA-256 of the desired-state document as read from disk.
    pub desired_hash: String,
    /// Layered config hash, when a config was supplied.
    pub config_hash: Option<String>,
    pub payload: T,
}

impl<T> PlanEnvelope<T> {
    pub fn new(
        observed_hash: impl Into<String>,
        desired_hash: impl Into<String>,
        config_hash: Option<String>,
        payload: T,
    ) -> Self {
        Self {
            schema_version: PLAN_SCHEMA_VERSION,
            plan_id: Uuid::new_v4(),
            created_at_utc: Utc::now(),
            observed_hash: observed_hash.into(),
            desired_hash: desired_hash.into(),
            config_hash,
            payload,
        }
    }

    /// `true` if both envelopes were computed from the same inputs and config.
    pub fn same_inputs<U>(&self, other: &PlanEnvelope<U>) -> bool {
        self.observed_hash == other.observed_hash
            && self.desired_hash == other.desired_hash
            && self.config_hash == other.config_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_round_trips_through_json() {
        let env = PlanEnvelope::new("aa", "bb", None, vec!["0xa9059cbb".to_string()]);
        let json = serde_json::to_string(&env).unwrap();
        let back: PlanEnvelope<Vec<String>> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.plan_id, env.plan_id);
        assert_eq!(back.schema_version, PLAN_SCHEMA_VERSION);
        assert_eq!(back.payload, env.payload);
        assert!(back.same_inputs(&env));
    }

    #[test]
    fn fresh_envelopes_get_distinct_ids() {
        let a = PlanEnvelope::new("aa", "bb", Some("cc".into()), ());
        let b = PlanEnvelope::new("aa", "bb", Some("cc".into()), ());
        assert_ne!(a.plan_id, b.plan_id);
        assert!(a.same_inputs(&b));
        assert!(!a.same_inputs(&PlanEnvelope::new("aa", "bb", None, ())));
    }
}
