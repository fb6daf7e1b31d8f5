use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of bits a "tight 10" is asked to contain.
pub const EXPECTED_BIT_COUNT: usize = 10;

/// One joke unit of the routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComedyBit {
    pub id: i64,
    pub title: String,
    pub setup: String,
    pub punchline: String,
    /// Stage direction: physical comedy, voices, movement.
    pub act_out: String,
    pub coaching_tip: String,
}

/// The full set returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRoutine {
    pub opener: String,
    pub bits: Vec<ComedyBit>,
    pub closer: String,
}

/// Something off about a routine that does not stop it being shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineAnomaly {
    BitCount { expected: usize, actual: usize },
    DuplicateBitId(i64),
}

impl fmt::Display for RoutineAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutineAnomaly::BitCount { expected, actual } => {
                write!(f, "expected {expected} bits, got {actual}")
            }
            RoutineAnomaly::DuplicateBitId(id) => write!(f, "bit id {id} appears more than once"),
        }
    }
}

impl GeneratedRoutine {
    pub fn anomalies(&self) -> Vec<RoutineAnomaly> {
        let mut anomalies = Vec::new();

        if self.bits.len() != EXPECTED_BIT_COUNT {
            anomalies.push(RoutineAnomaly::BitCount {
                expected: EXPECTED_BIT_COUNT,
                actual: self.bits.len(),
            });
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for bit in &self.bits {
            if !seen.insert(bit.id) && reported.insert(bit.id) {
                anomalies.push(RoutineAnomaly::DuplicateBitId(bit.id));
            }
        }

        anomalies
    }
}
