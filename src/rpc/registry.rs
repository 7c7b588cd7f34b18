//! Method registry
//!
//! Maps wire method names to tagged handler variants. The registry is
//! built once at startup from the configured collection list, so an
//! unknown method is a lookup miss rather than a conditional chain, and
//! the set of registered methods is independently inspectable.

use std::collections::HashMap;

/// Tagged handler variant for one registered method
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodKind {
    /// Similarity search against one named collection
    Search { collection: String },

    /// Append an entry to a session's memory
    InsertMemory,

    /// Fetch a session's memory entries
    FetchMemory,

    /// Log a response-confidence record
    InsertConfidence,

    /// Log a user-feedback record
    InsertFeedback,
}

/// Static mapping from method name to handler variant
pub struct MethodRegistry {
    methods: HashMap<String, MethodKind>,
}

impl MethodRegistry {
    /// Build the registry for a deployment's collection list
    ///
    /// Registers one `search_<collection>` method per collection plus
    /// the four fixed memory/telemetry methods.
    pub fn new(collections: &[String]) -> Self {
        let mut methods = HashMap::new();

        for collection in collections {
            methods.insert(
                format!("search_{collection}"),
                MethodKind::Search {
                    collection: collection.clone(),
                },
            );
        }

        methods.insert("insert_memory".to_string(), MethodKind::InsertMemory);
        methods.insert("fetch_memory".to_string(), MethodKind::FetchMemory);
        methods.insert("insert_confidence".to_string(), MethodKind::InsertConfidence);
        methods.insert("insert_feedback".to_string(), MethodKind::InsertFeedback);

        Self { methods }
    }

    /// Resolve a method name to its handler variant
    pub fn resolve(&self, method: &str) -> Option<&MethodKind> {
        self.methods.get(method)
    }

    /// Sorted list of registered method names
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.methods.keys().cloned().collect();
        names.sort();
        names
    }
}
