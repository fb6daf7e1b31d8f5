pub mod profile;
pub mod routine;

pub use profile::{ComedyStyle, ProfileField, UserProfile, MAX_INFLUENCES};
pub use routine::{ComedyBit, GeneratedRoutine, RoutineAnomaly, EXPECTED_BIT_COUNT};
