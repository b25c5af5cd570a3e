//! Person — an actor or director credited on content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A credited person, keyed by name. The same row serves both starring and
/// directing links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub id:         i64,
  pub name:       String,
  pub first_seen: DateTime<Utc>,
}
