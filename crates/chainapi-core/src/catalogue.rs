//! Operation records and the cross-chain catalogue.
//!
//! Every per-chain field of an [`OperationRecord`] is a map keyed by chain
//! name, so one operation identifier can describe the same endpoint on several
//! chains at once. All maps preserve insertion order.

// Internal imports (std, crate)
use std::fmt;

// External imports (alphabetized)
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Values keyed by chain name
pub type ChainMap<T> = IndexMap<String, T>;

/// HTTP method of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One chain's endpoint for an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    /// Path with path parameters replaced by `${type}` interpolations
    pub template: String,
    /// The literal path from the document
    pub path: String,
}

/// Per-chain parameter types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Params {
    pub path: ChainMap<String>,
    pub query: ChainMap<String>,
    pub body: ChainMap<String>,
}

/// Per-chain response types
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Responses {
    pub success: ChainMap<String>,
    pub error: ChainMap<String>,
}

/// Everything known about one operation identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationRecord {
    pub method: HttpMethod,
    /// The operation summary
    pub comment: Option<String>,
    pub endpoint: ChainMap<Endpoint>,
    pub params: Params,
    pub response: Responses,
}

impl OperationRecord {
    /// Fold another record for the same identifier into this one.
    ///
    /// The existing method and first non-empty comment are kept; per-chain entries are unioned
    /// with the existing entry winning when both records name the same chain.
    fn absorb(&mut self, operation_id: &str, other: OperationRecord) {
        if self.method != other.method {
            log::warn!(
                "Operation '{}' is '{}' on some chains and '{}' on others; keeping '{}'",
                operation_id,
                self.method,
                other.method,
                self.method
            );
        }
        if self.comment.as_deref().map_or(true, str::is_empty) {
            if let Some(comment) = other.comment.filter(|c| !c.is_empty()) {
                self.comment = Some(comment);
            }
        }
        union_into(&mut self.endpoint, other.endpoint);
        union_into(&mut self.params.path, other.params.path);
        union_into(&mut self.params.query, other.params.query);
        union_into(&mut self.params.body, other.params.body);
        union_into(&mut self.response.success, other.response.success);
        union_into(&mut self.response.error, other.response.error);
    }
}

fn union_into<T>(existing: &mut ChainMap<T>, incoming: ChainMap<T>) {
    for (chain, value) in incoming {
        existing.entry(chain).or_insert(value);
    }
}

/// Operation identifier -> record, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalogue {
    operations: IndexMap<String, OperationRecord>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, keeping an existing record with the same identifier.
    ///
    /// Returns `false` when the identifier was already present.
    pub fn insert(&mut self, operation_id: impl Into<String>, record: OperationRecord) -> bool {
        match self.operations.entry(operation_id.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    pub fn get(&self, operation_id: &str) -> Option<&OperationRecord> {
        self.operations.get(operation_id)
    }

    pub fn contains(&self, operation_id: &str) -> bool {
        self.operations.contains_key(operation_id)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, OperationRecord> {
        self.operations.iter()
    }

    /// Operation identifiers in catalogue order
    pub fn operation_ids(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Every distinct chain name, in first-seen order
    pub fn chain_names(&self) -> Vec<&str> {
        let mut names = IndexSet::new();
        for record in self.operations.values() {
            names.extend(record.endpoint.keys().map(String::as_str));
        }
        names.into_iter().collect()
    }

    /// Merge `incoming` into this catalogue.
    ///
    /// New identifiers are appended in `incoming` order. For identifiers
    /// present in both, the existing comment is kept unless it is absent or empty, and
    /// every per-chain map becomes the union of both, existing entries winning.
    pub fn merge(mut self, incoming: Catalogue) -> Catalogue {
        for (operation_id, record) in incoming.operations {
            match self.operations.get_mut(&operation_id) {
                Some(existing) => existing.absorb(&operation_id, record),
                None => {
                    self.operations.insert(operation_id, record);
                }
            }
        }
        self
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = (&'a String, &'a OperationRecord);
    type IntoIter = indexmap::map::Iter<'a, String, OperationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn chain_map<T>(chain: &str, value: T) -> ChainMap<T> {
        let mut map = ChainMap::new();
        map.insert(chain.to_string(), value);
        map
    }

    fn record(chain: &str, comment: Option<&str>, path: &str) -> OperationRecord {
        OperationRecord {
            method: HttpMethod::Get,
            comment: comment.map(String::from),
            endpoint: chain_map(
                chain,
                Endpoint {
                    template: path.to_string(),
                    path: path.to_string(),
                },
            ),
            params: Params {
                path: chain_map(chain, "undefined".to_string()),
                query: chain_map(chain, "undefined".to_string()),
                body: chain_map(chain, "undefined".to_string()),
            },
            response: Responses {
                success: chain_map(chain, format!("{}-ok", chain)),
                error: chain_map(chain, "{}".to_string()),
            },
        }
    }

    fn single(operation_id: &str, record: OperationRecord) -> Catalogue {
        let mut catalogue = Catalogue::new();
        catalogue.insert(operation_id, record);
        catalogue
    }

    fn chain_sets(catalogue: &Catalogue) -> Vec<(String, BTreeSet<String>)> {
        let mut sets: Vec<_> = catalogue
            .iter()
            .map(|(id, r)| (id.clone(), r.endpoint.keys().cloned().collect()))
            .collect();
        sets.sort();
        sets
    }

    #[test]
    fn test_merge_unions_chains() {
        let merged = Catalogue::new()
            .merge(single("balance", record("osmosis", Some("Balance"), "/a")))
            .merge(single("balance", record("kyve", Some("Other"), "/b")));

        assert_eq!(merged.len(), 1);
        let balance = merged.get("balance").unwrap();
        assert_eq!(balance.comment.as_deref(), Some("Balance"));
        assert_eq!(
            balance.endpoint.keys().collect::<Vec<_>>(),
            vec!["osmosis", "kyve"]
        );
        assert_eq!(balance.response.success["kyve"], "kyve-ok");
        assert_eq!(balance.params.body.len(), 2);
        assert_eq!(merged.chain_names(), vec!["osmosis", "kyve"]);
    }

    #[test]
    fn test_merge_fills_missing_comment() {
        let merged = single("x", record("a", None, "/x")).merge(single("x", record("b", Some("late"), "/x")));
        assert_eq!(merged.get("x").unwrap().comment.as_deref(), Some("late"));

        let merged = single("x", record("a", Some(""), "/x"))
            .merge(single("x", record("b", Some(""), "/x")))
            .merge(single("x", record("c", Some("late"), "/x")))
            .merge(single("x", record("d", Some("later"), "/x")));
        assert_eq!(merged.get("x").unwrap().comment.as_deref(), Some("late"));
    }

    #[test]
    fn test_merge_existing_wins_on_collision() {
        let merged = single("x", record("a", None, "/first")).merge(single("x", record("a", None, "/second")));
        assert_eq!(merged.get("x").unwrap().endpoint["a"].path, "/first");
    }

    #[test]
    fn test_merge_appends_new_operations_in_order() {
        let mut incoming = Catalogue::new();
        incoming.insert("c", record("b", None, "/c"));
        incoming.insert("a", record("b", None, "/a"));
        let merged = single("b", record("a", None, "/b")).merge(incoming);
        assert_eq!(merged.operation_ids().collect::<Vec<_>>(), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_merge_is_associative_over_chain_sets() {
        let one = || {
            let mut c = Catalogue::new();
            c.insert("balance", record("osmosis", None, "/o"));
            c.insert("health", record("osmosis", None, "/h"));
            c
        };
        let two = || single("balance", record("kyve", None, "/k"));
        let three = || {
            let mut c = Catalogue::new();
            c.insert("health", record("evmos", None, "/h"));
            c.insert("supply", record("evmos", None, "/s"));
            c
        };

        let left = one().merge(two()).merge(three());
        let right = one().merge(two().merge(three()));
        let reordered = three().merge(one()).merge(two());

        assert_eq!(chain_sets(&left), chain_sets(&right));
        assert_eq!(chain_sets(&left), chain_sets(&reordered));
    }

    #[test]
    fn test_insert_keeps_first() {
        let mut catalogue = Catalogue::new();
        assert!(catalogue.insert("x", record("a", Some("first"), "/x")));
        assert!(!catalogue.insert("x", record("a", Some("second"), "/x")));
        assert_eq!(catalogue.get("x").unwrap().comment.as_deref(), Some("first"));
    }
}
