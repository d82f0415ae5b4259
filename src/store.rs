use crate::db;
use crate::error::SchoolResult;
use crate::model::{Class, Dataset, Homework, Identity, Parent, Schedule, Student, Teacher};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

pub const CURRENT_USER_KEY: &str = "currentUser";
pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";
pub const SCHEMA_VERSION: &str = "2";

/// Flat key/value storage. Each value is a complete JSON document.
pub trait KvBackend {
    fn get(&self, key: &str) -> SchoolResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> SchoolResult<()>;
    fn remove(&mut self, key: &str) -> SchoolResult<()>;
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> SchoolResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> SchoolResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SchoolResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl KvBackend for SqliteBackend {
    fn get(&self, key: &str) -> SchoolResult<Option<String>> {
        Ok(db::kv_get(&self.conn, key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> SchoolResult<()> {
        Ok(db::kv_set(&self.conn, key, value)?)
    }

    fn remove(&mut self, key: &str) -> SchoolResult<()> {
        Ok(db::kv_remove(&self.conn, key)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Classes,
    Students,
    Teachers,
    Parents,
    Schedules,
    Homeworks,
}

impl Collection {
    pub fn key(self) -> &'static str {
        match self {
            Collection::Classes => "classes",
            Collection::Students => "students",
            Collection::Teachers => "teachers",
            Collection::Parents => "parents",
            Collection::Schedules => "schedules",
            Collection::Homeworks => "homeworks",
        }
    }
}

/// An entity stored as one element of a collection.
pub trait Record: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($ty:ty, $collection:expr) => {
        impl Record for $ty {
            const COLLECTION: Collection = $collection;

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

impl_record!(Class, Collection::Classes);
impl_record!(Student, Collection::Students);
impl_record!(Teacher, Collection::Teachers);
impl_record!(Parent, Collection::Parents);
impl_record!(Schedule, Collection::Schedules);
impl_record!(Homework, Collection::Homeworks);

pub struct RecordStore {
    backend: Box<dyn KvBackend>,
}

impl RecordStore {
    pub fn new(backend: Box<dyn KvBackend>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()))
    }

    /// Loads a whole collection. Missing keys, unreadable storage and
    /// malformed JSON all yield an empty collection.
    pub fn load<T: Record>(&self) -> Vec<T> {
        self.read_json(T::COLLECTION.key()).unwrap_or_default()
    }

    pub fn save<T: Record>(&mut self, records: &[T]) -> SchoolResult<()> {
        let key = T::COLLECTION.key();
        let raw = serde_json::to_string(records)?;
        debug!(key, count = records.len(), "saving collection");
        self.backend.set(key, &raw)
    }

    pub fn load_dataset(&self) -> Dataset {
        Dataset {
            classes: self.load(),
            students: self.load(),
            teachers: self.load(),
            parents: self.load(),
            schedules: self.load(),
            homeworks: self.load(),
        }
    }

    pub fn load_current_user(&self) -> Option<Identity> {
        self.read_json(CURRENT_USER_KEY)
    }

    pub fn save_current_user(&mut self, identity: &Identity) -> SchoolResult<()> {
        let raw = serde_json::to_string(identity)?;
        self.backend.set(CURRENT_USER_KEY, &raw)
    }

    pub fn clear_current_user(&mut self) -> SchoolResult<()> {
        self.backend.remove(CURRENT_USER_KEY)
    }

    /// Drops account collections written before credentials were part of the
    /// record shape. Those records are not migrated.
    pub fn ensure_schema(&mut self) -> SchoolResult<()> {
        if self.backend.get(SCHEMA_VERSION_KEY)?.as_deref() == Some(SCHEMA_VERSION) {
            return Ok(());
        }

        let mut dropped = false;
        for collection in [
            Collection::Students,
            Collection::Teachers,
            Collection::Parents,
        ] {
            let key = collection.key();
            let Some(raw) = self.backend.get(key)? else {
                continue;
            };
            if lacks_credentials(&raw) {
                warn!(key, "dropping collection without login/password fields");
                self.backend.remove(key)?;
                dropped = true;
            }
        }
        if dropped {
            self.prune_dangling()?;
        }

        self.backend.set(SCHEMA_VERSION_KEY, SCHEMA_VERSION)
    }

    /// Removes references to accounts that no longer exist from class rosters,
    /// parents' children and students' parent links. Only rewrites the
    /// collections that changed.
    fn prune_dangling(&mut self) -> SchoolResult<()> {
        let mut data = self.load_dataset();
        let student_ids: HashSet<String> = data.students.iter().map(|s| s.id.clone()).collect();
        let parent_ids: HashSet<String> = data.parents.iter().map(|p| p.id.clone()).collect();
        let teacher_ids: HashSet<String> = data.teachers.iter().map(|t| t.id.clone()).collect();

        let mut classes_changed = false;
        for class in data.classes.iter_mut() {
            let before = class.students.len();
            class.students.retain(|id| student_ids.contains(id));
            if class
                .teacher_id
                .as_ref()
                .is_some_and(|id| !teacher_ids.contains(id))
            {
                class.teacher_id = None;
                classes_changed = true;
            }
            classes_changed |= class.students.len() != before;
        }

        let mut parents_changed = false;
        for parent in data.parents.iter_mut() {
            let before = parent.children_ids.len();
            parent.children_ids.retain(|id| student_ids.contains(id));
            parents_changed |= parent.children_ids.len() != before;
        }

        let mut students_changed = false;
        for student in data.students.iter_mut() {
            if student
                .parent_id
                .as_ref()
                .is_some_and(|id| !parent_ids.contains(id))
            {
                student.parent_id = None;
                students_changed = true;
            }
        }

        if classes_changed {
            debug!(count = data.classes.len(), "pruned class references");
            self.save(&data.classes)?;
        }
        if parents_changed {
            self.save(&data.parents)?;
        }
        if students_changed {
            self.save(&data.students)?;
        }
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read key");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "ignoring malformed stored value");
                None
            }
        }
    }
}

fn lacks_credentials(raw: &str) -> bool {
    let Ok(serde_json::Value::Array(items)) = serde_json::from_str::<serde_json::Value>(raw)
    else {
        return false;
    };
    items.iter().any(|item| {
        item.get("login").and_then(|v| v.as_str()).is_none()
            || item.get("password").and_then(|v| v.as_str()).is_none()
    })
}
