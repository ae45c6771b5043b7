use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::dlog;
use crate::storage::StorageBackend;
use crate::types::Workout;

pub const DEFAULT_KEY: &str = "workouts";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    workouts: &'a [Workout],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    workouts: Vec<JsonValue>,
}

/// Either the versioned envelope or the bare array older saves wrote.
/// Records stay untyped here so one bad entry does not sink the rest.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Versioned(Envelope),
    Legacy(Vec<JsonValue>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored under the key.
    Absent,
    /// The collection was replaced with this many records. Unreadable
    /// entries next to them were skipped.
    Restored(usize),
    /// A record was present but nothing in it was readable; it was ignored.
    Discarded,
}

/// Insertion-ordered workouts plus the single storage record that mirrors them.
pub struct WorkoutStore<S> {
    backend: S,
    key: String,
    workouts: Vec<Workout>,
}

impl<S: StorageBackend> WorkoutStore<S> {
    /// Empty store bound to `key`; nothing is read yet.
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            workouts: Vec::new(),
        }
    }

    /// Load-or-empty initialisation.
    pub fn open(backend: S, key: impl Into<String>) -> Result<Self> {
        let mut store = Self::new(backend, key);
        store.load()?;
        Ok(store)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    /// Append and persist the whole collection. If saving fails the workout
    /// stays in memory and the error is returned.
    pub fn add(&mut self, workout: Workout) -> Result<()> {
        tracing::info!(id = %workout.id, kind = %workout.kind(), "adding workout");
        self.workouts.push(workout);
        self.save()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id == id)
    }

    /// Overwrite the stored record with the full collection.
    pub fn save(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&EnvelopeRef {
            version: SCHEMA_VERSION,
            workouts: &self.workouts,
        })
        .context("Serializing workouts")?;
        self.backend.set(&self.key, &payload)?;
        dlog!("saved key={} count={} bytes={}", self.key, self.workouts.len(), payload.len());
        Ok(())
    }

    /// Replace the in-memory collection with the stored one, if any.
    ///
    /// An absent or unreadable record leaves the collection as it is. Single
    /// unreadable entries are skipped. Only backend failures are errors.
    pub fn load(&mut self) -> Result<LoadOutcome> {
        let Some(raw) = self.backend.get(&self.key)? else {
            dlog!("load key={} absent", self.key);
            return Ok(LoadOutcome::Absent);
        };

        let records = match serde_json::from_str::<Payload>(&raw) {
            Ok(Payload::Versioned(env)) if env.version == SCHEMA_VERSION => env.workouts,
            Ok(Payload::Versioned(env)) => {
                tracing::warn!(
                    key = %self.key,
                    version = env.version,
                    "unsupported workouts schema version; ignoring stored record"
                );
                return Ok(LoadOutcome::Discarded);
            }
            Ok(Payload::Legacy(list)) => {
                dlog!("load key={} legacy array format", self.key);
                list
            }
            Err(e) => {
                tracing::warn!(key = %self.key, err = %e, "unreadable workouts record; ignoring");
                return Ok(LoadOutcome::Discarded);
            }
        };

        let total = records.len();
        let mut workouts = Vec::with_capacity(total);
        for (idx, record) in records.into_iter().enumerate() {
            let w = match serde_json::from_value::<Workout>(record) {
                Ok(w) => w,
                Err(e) => {
                    dlog!("load key={} skipping record idx={idx} err={e}", self.key);
                    continue;
                }
            };
            workouts.push(w);
        }

        let skipped = total - workouts.len();
        if total > 0 && workouts.is_empty() {
            tracing::warn!(key = %self.key, skipped, "no readable workouts in stored record");
            return Ok(LoadOutcome::Discarded);
        }
        if skipped > 0 {
            tracing::warn!(key = %self.key, skipped, "skipped unreadable workouts");
        }

        let n = workouts.len();
        self.workouts = workouts;
        tracing::info!(key = %self.key, count = n, "restored workouts");
        Ok(LoadOutcome::Restored(n))
    }

    /// Drop the stored record. The in-memory collection is not touched.
    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove(&self.key)?;
        tracing::info!(key = %self.key, "cleared stored workouts");
        Ok(())
    }

    /// Whether the backend holds anything at all; drives the reset affordance.
    pub fn has_persisted_entries(&self) -> Result<bool> {
        Ok(!self.backend.is_empty()?)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }
}
