//! Configuration store: named key/value bags with path-style lookup.
//!
//! Each bag is a JSON object registered under a name. A bag can be attached
//! under a key of another bag, so `GlobalConfig/GameConfig/IsDebug` walks
//! from `GlobalConfig` into the attached `GameConfig` bag.
//!
//! ```
//! use mystery_guess::config::ConfigStore;
//!
//! let store = ConfigStore::with_defaults();
//! assert_eq!(store.get_bool("GameConfig/IsDebug").unwrap(), true);
//! assert_eq!(
//!     store.resolve("config://GlobalConfig/GameConfig/SQLConfig/ExpensiveTask").unwrap(),
//!     serde_json::Value::Bool(false),
//! );
//! ```

use rustc_hash::FxHashMap;
use serde_json::{json, Map, Value as Json};
use thiserror::Error;

/// URL scheme understood by [`ConfigStore::resolve`].
pub const CONFIG_SCHEME: &str = "config";

/// Attached bags are followed at most this deep when materialized.
const MAX_NESTING: usize = 16;

/// Configuration lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("[{0}] no such configuration bag")]
    UnknownBag(String),

    #[error("no value at '{0}'")]
    MissingPath(String),

    /// A path segment tried to index into a scalar.
    #[error("'{key}' in '{path}' is not a mapping")]
    NotAMapping { key: String, path: String },

    #[error("expected a 'config://' url, got '{0}'")]
    BadScheme(String),

    #[error("config url '{0}' must not start with a slash after the scheme")]
    LeadingSlash(String),

    #[error("path to a variable is needed in '{0}'")]
    EmptyPath(String),

    #[error("value at '{path}' is not a {expected}")]
    WrongType { path: String, expected: &'static str },
}

#[derive(Clone, Debug, Default)]
struct Bags {
    values: FxHashMap<String, Map<String, Json>>,
    /// (parent bag, key) -> child bag
    links: FxHashMap<(String, String), String>,
}

/// Named configuration bags with commit/rollback.
#[derive(Clone, Debug, Default)]
pub struct ConfigStore {
    current: Bags,
    backup: Option<Bags>,
}

enum Cursor<'a> {
    Bag(&'a str),
    Json(&'a Json),
}

impl ConfigStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the game's standard bags.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.register("GlobalConfig", Map::new());
        store.register(
            "GameConfig",
            object(json!({
                "DataPath": "project:///game.db",
                "LogPath": "project:///logs/",
                "CrashLogPath": "project:///crash/",
                "PluginPath": "project:///plugins/",
                "DownloadPath": "project:///downloads/",
                "IsDebug": true,
                "Level": 5,
                "LevelBase": 5
            })),
        );
        store.register(
            "SQLConfig",
            object(json!({
                "ChangeInner": false,
                "ExpensiveTask": false
            })),
        );
        store.attach("GlobalConfig", "GameConfig", "GameConfig");
        store.attach("GameConfig", "SQLConfig", "SQLConfig");
        store
    }

    /// Register (or replace) a bag.
    pub fn register(&mut self, name: impl Into<String>, values: Map<String, Json>) {
        self.current.values.insert(name.into(), values);
    }

    /// Make `child` reachable as `parent/key`.
    pub fn attach(&mut self, parent: &str, key: &str, child: &str) {
        self.current
            .links
            .insert((parent.to_string(), key.to_string()), child.to_string());
    }

    /// Whether a bag with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.current.values.contains_key(name)
    }

    /// Borrow a bag's own values (attached bags are not included).
    pub fn bag(&self, name: &str) -> Result<&Map<String, Json>, ConfigError> {
        self.current
            .values
            .get(name)
            .ok_or_else(|| ConfigError::UnknownBag(name.to_string()))
    }

    /// Set one key of a bag.
    pub fn set(&mut self, bag: &str, key: &str, value: impl Into<Json>) -> Result<(), ConfigError> {
        let values = self
            .current
            .values
            .get_mut(bag)
            .ok_or_else(|| ConfigError::UnknownBag(bag.to_string()))?;
        values.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Merge `updates` into a bag.
    pub fn update(&mut self, bag: &str, updates: Map<String, Json>) -> Result<(), ConfigError> {
        let values = self
            .current
            .values
            .get_mut(bag)
            .ok_or_else(|| ConfigError::UnknownBag(bag.to_string()))?;
        values.extend(updates);
        Ok(())
    }

    /// Look up `Bag/key/key...`.
    ///
    /// A path naming only a bag returns the whole bag, attached bags included.
    pub fn get(&self, path: &str) -> Result<Json, ConfigError> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let root = segments
            .next()
            .ok_or_else(|| ConfigError::EmptyPath(path.to_string()))?;
        if !self.contains(root) {
            return Err(ConfigError::UnknownBag(root.to_string()));
        }

        let mut cursor = Cursor::Bag(root);
        let mut last = root;
        for segment in segments {
            cursor = match cursor {
                Cursor::Bag(name) => {
                    if let Some(child) = self.current.links.get(&(name.to_string(), segment.to_string())) {
                        Cursor::Bag(child)
                    } else {
                        let value = self.current.values.get(name).and_then(|m| m.get(segment));
                        Cursor::Json(value.ok_or_else(|| ConfigError::MissingPath(path.to_string()))?)
                    }
                }
                Cursor::Json(Json::Object(map)) => Cursor::Json(
                    map.get(segment)
                        .ok_or_else(|| ConfigError::MissingPath(path.to_string()))?,
                ),
                Cursor::Json(_) => {
                    return Err(ConfigError::NotAMapping {
                        key: last.to_string(),
                        path: path.to_string(),
                    })
                }
            };
            last = segment;
        }

        match cursor {
            Cursor::Bag(name) => Ok(self.materialize(name, 0)),
            Cursor::Json(value) => Ok(value.clone()),
        }
    }

    /// Resolve a `config://Bag/key...` url.
    pub fn resolve(&self, url: &str) -> Result<Json, ConfigError> {
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| ConfigError::BadScheme(url.to_string()))?;
        if scheme != CONFIG_SCHEME {
            return Err(ConfigError::BadScheme(url.to_string()));
        }
        if rest.starts_with('/') {
            return Err(ConfigError::LeadingSlash(url.to_string()));
        }

        let mut parts = rest.splitn(2, '/');
        let bag = parts.next().unwrap_or_default();
        if !self.contains(bag) {
            return Err(ConfigError::UnknownBag(bag.to_string()));
        }
        match parts.next() {
            Some(keys) if !keys.is_empty() => self.get(rest),
            _ => Err(ConfigError::EmptyPath(url.to_string())),
        }
    }

    pub fn get_bool(&self, path: &str) -> Result<bool, ConfigError> {
        self.get(path)?.as_bool().ok_or_else(|| ConfigError::WrongType {
            path: path.to_string(),
            expected: "bool",
        })
    }

    pub fn get_u64(&self, path: &str) -> Result<u64, ConfigError> {
        self.get(path)?.as_u64().ok_or_else(|| ConfigError::WrongType {
            path: path.to_string(),
            expected: "unsigned integer",
        })
    }

    pub fn get_str(&self, path: &str) -> Result<String, ConfigError> {
        match self.get(path)? {
            Json::String(s) => Ok(s),
            _ => Err(ConfigError::WrongType {
                path: path.to_string(),
                expected: "string",
            }),
        }
    }

    /// Snapshot the current bags so a later [`rollback`](Self::rollback)
    /// can restore them.
    pub fn commit(&mut self) {
        self.backup = Some(self.current.clone());
    }

    /// Restore the last committed state. Returns false if nothing was committed.
    pub fn rollback(&mut self) -> bool {
        match self.backup.clone() {
            Some(saved) => {
                self.current = saved;
                true
            }
            None => false,
        }
    }

    fn materialize(&self, name: &str, depth: usize) -> Json {
        let mut out = self.current.values.get(name).cloned().unwrap_or_default();
        if depth < MAX_NESTING {
            for ((parent, key), child) in &self.current.links {
                if parent == name {
                    out.insert(key.clone(), self.materialize(child, depth + 1));
                }
            }
        }
        Json::Object(out)
    }
}

fn object(value: Json) -> Map<String, Json> {
    match value {
        Json::Object(map) => map,
        _ => Map::new(),
    }
}
