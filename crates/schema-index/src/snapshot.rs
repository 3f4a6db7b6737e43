//! One immutable generation of the field index.
//!
//! A snapshot is built completely before it is published, so readers never
//! observe a partially indexed schema.

use crate::definition::render_type_definition;
use crate::field::{FieldDescriptor, SearchResult};
use crate::keywords::{description_words, type_name_words};
use crate::{IndexError, Result};
use mcp_graphql_introspect::{OperationKind, SchemaDescriptor, TypeDefinition};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

/// Nested fields are indexed down to this many steps below a root type.
pub const MAX_INDEX_DEPTH: u32 = 3;

const EXACT_NAME_SCORE: f64 = 10.0;
const PARTIAL_NAME_SCORE: f64 = 5.0;
const DESCRIPTION_SCORE: f64 = 3.0;
const DEPTH_PENALTY: f64 = 0.5;
const FUZZY_FACTOR: f64 = 0.7;

struct IndexedField {
    descriptor: FieldDescriptor,
    name_lower: String,
    description_lower: Option<String>,
}

/// A keyword and the fields filed under it, in insertion order. The same
/// field may be listed more than once.
struct IndexEntry {
    keyword: String,
    fields: Vec<usize>,
}

/// Counters reported after a rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub generation: u64,
    pub fields: usize,
    pub keywords: usize,
    /// `false` when a newer rebuild had already been published and this one
    /// was discarded.
    pub published: bool,
}

pub struct IndexSnapshot {
    generation: u64,
    schema: SchemaDescriptor,
    fields: Vec<IndexedField>,
    entries: Vec<IndexEntry>,
    lookup: HashMap<String, usize>,
    type_cache: Mutex<HashMap<(String, usize), String>>,
}

impl IndexSnapshot {
    pub(crate) fn build(schema: SchemaDescriptor, generation: u64) -> Result<Self> {
        let mut builder = Builder::default();
        let mut indexed = 0;

        for operation in OperationKind::ALL {
            let Some(root) = schema
                .root_type(operation)
                .and_then(|name| schema.get(name))
            else {
                tracing::debug!(%operation, "Root type not present");
                continue;
            };
            let count = builder.index_type(
                &schema,
                root,
                operation.label(),
                0,
                operation.label(),
                &HashSet::new(),
            );
            tracing::debug!(%operation, fields = count, "Indexed root type");
            indexed += count;
        }

        if indexed == 0 {
            return Err(IndexError::EmptyIndex);
        }

        tracing::info!(
            generation,
            fields = indexed,
            keywords = builder.entries.len(),
            sample = %builder
                .entries
                .iter()
                .take(10)
                .map(|e| e.keyword.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            "Schema indexing complete"
        );

        Ok(Self {
            generation,
            schema,
            fields: builder.fields,
            entries: builder.entries,
            lookup: builder.lookup,
            type_cache: Mutex::new(HashMap::new()),
        })
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }

    /// Number of field occurrences indexed.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of distinct keywords.
    #[must_use]
    pub fn keyword_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn cached_type_count(&self) -> usize {
        self.type_cache.lock().len()
    }

    /// Every indexed field occurrence in discovery order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().map(|f| &f.descriptor)
    }

    pub(crate) fn stats(&self, published: bool) -> IndexStats {
        IndexStats {
            generation: self.generation,
            fields: self.fields.len(),
            keywords: self.entries.len(),
            published,
        }
    }

    /// Ranked keyword search; see [`crate::SchemaIndex::search_fields`].
    #[must_use]
    pub fn search<S: AsRef<str>>(&self, keywords: &[S], max_results: usize) -> Vec<SearchResult> {
        let mut ranked: Vec<(usize, f64)> = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();

        let mut keep_best = |id: usize, relevance: f64| {
            let path = self.fields[id].descriptor.path.as_str();
            match slots.get(path) {
                Some(&slot) => {
                    if ranked[slot].1 < relevance {
                        ranked[slot] = (id, relevance);
                    }
                }
                None => {
                    slots.insert(path, ranked.len());
                    ranked.push((id, relevance));
                }
            }
        };

        for keyword in keywords {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if keyword.is_empty() {
                continue;
            }

            let direct = self.lookup.get(&keyword).map_or(0, |&entry| {
                let ids = &self.entries[entry].fields;
                for &id in ids {
                    keep_best(id, self.relevance(id, &keyword));
                }
                ids.len()
            });

            let mut fuzzy = 0;
            for entry in &self.entries {
                if entry.keyword.contains(&keyword) || keyword.contains(&entry.keyword) {
                    fuzzy += entry.fields.len();
                    for &id in &entry.fields {
                        keep_best(id, self.relevance(id, &keyword) * FUZZY_FACTOR);
                    }
                }
            }

            tracing::debug!(%keyword, direct, fuzzy, "Keyword matches");
        }

        // Stable sort: equal scores keep discovery order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(max_results);

        ranked
            .into_iter()
            .map(|(id, relevance)| SearchResult {
                field: self.fields[id].descriptor.clone(),
                relevance,
            })
            .collect()
    }

    fn relevance(&self, id: usize, keyword: &str) -> f64 {
        let field = &self.fields[id];
        let mut score = 0.0;

        if field.name_lower == keyword {
            score += EXACT_NAME_SCORE;
        } else if field.name_lower.contains(keyword) {
            score += PARTIAL_NAME_SCORE;
        }

        if field
            .description_lower
            .as_deref()
            .is_some_and(|d| d.contains(keyword))
        {
            score += DESCRIPTION_SCORE;
        }

        score - f64::from(field.descriptor.depth) * DEPTH_PENALTY
    }

    /// Renders `type_name`, serving repeated requests from this snapshot's
    /// cache.
    pub fn type_definition(&self, type_name: &str, max_depth: usize) -> Result<String> {
        let key = (type_name.to_string(), max_depth);
        if let Some(cached) = self.type_cache.lock().get(&key) {
            return Ok(cached.clone());
        }

        let type_def = self
            .schema
            .get(type_name)
            .ok_or_else(|| IndexError::TypeNotFound(type_name.to_string()))?;
        let definition = render_type_definition(&self.schema, type_def, max_depth);

        self.type_cache.lock().insert(key, definition.clone());
        Ok(definition)
    }
}

#[derive(Default)]
struct Builder {
    fields: Vec<IndexedField>,
    entries: Vec<IndexEntry>,
    lookup: HashMap<String, usize>,
}

impl Builder {
    fn add(&mut self, keyword: String, id: usize) {
        if let Some(&entry) = self.lookup.get(&keyword) {
            self.entries[entry].fields.push(id);
        } else {
            self.lookup.insert(keyword.clone(), self.entries.len());
            self.entries.push(IndexEntry {
                keyword,
                fields: vec![id],
            });
        }
    }

    /// Indexes the fields of `type_def` and recurses into object and
    /// interface field types. `visited` holds the types on the current
    /// branch only; each child receives its own copy.
    fn index_type(
        &mut self,
        schema: &SchemaDescriptor,
        type_def: &TypeDefinition,
        parent_label: &str,
        depth: u32,
        path: &str,
        visited: &HashSet<String>,
    ) -> usize {
        if depth > MAX_INDEX_DEPTH || visited.contains(&type_def.name) {
            tracing::trace!(type_name = %type_def.name, depth, "Skipping type");
            return 0;
        }
        let Some(fields) = type_def.fields() else {
            return 0;
        };

        let mut visited = visited.clone();
        visited.insert(type_def.name.clone());

        let mut count = 0;
        for field in fields {
            let type_name = field.ty.named_type();
            let target = schema.get(type_name);
            let field_path = format!("{path}.{}", field.name);

            let id = self.fields.len();
            self.fields.push(IndexedField {
                name_lower: field.name.to_lowercase(),
                description_lower: field.description.as_deref().map(str::to_lowercase),
                descriptor: FieldDescriptor {
                    name: field.name.clone(),
                    type_name: type_name.to_string(),
                    type_category: target.map(TypeDefinition::category),
                    parent_type: parent_label.to_string(),
                    description: field.description.clone(),
                    depth,
                    path: field_path.clone(),
                },
            });
            count += 1;

            self.add(field.name.to_lowercase(), id);
            for word in type_name_words(type_name) {
                self.add(word, id);
            }
            if let Some(description) = &field.description {
                for word in description_words(description) {
                    self.add(word, id);
                }
            }

            if let Some(target) = target.filter(|t| t.category().has_fields()) {
                count += self.index_type(
                    schema,
                    target,
                    &target.name,
                    depth + 1,
                    &field_path,
                    &visited,
                );
            }
        }
        count
    }
}
