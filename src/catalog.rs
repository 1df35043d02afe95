//! Vocabulary catalog - the fixed set of translation entries

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// One source/target vocabulary pair with a category tag
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub source_text: String,
    pub target_text: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl CatalogEntry {
    pub fn new(
        id: impl Into<String>,
        source_text: impl Into<String>,
        target_text: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source_text: source_text.into(),
            target_text: target_text.into(),
            category: category.into(),
            difficulty: None,
        }
    }
}

/// Category name with its entry count
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: String,
    pub entry_count: usize,
}

/// Immutable, ordered list of catalog entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

// (id, spanish, english, category)
const BUILTIN: &[(&str, &str, &str, &str)] = &[
    ("food-1", "La manzana", "Apple", "Food"),
    ("food-2", "El plátano", "Banana", "Food"),
    ("food-3", "La naranja", "Orange", "Food"),
    ("food-4", "El pan", "Bread", "Food"),
    ("food-5", "La leche", "Milk", "Food"),
    ("food-6", "El queso", "Cheese", "Food"),
    ("food-7", "El arroz", "Rice", "Food"),
    ("food-8", "La carne", "Meat", "Food"),
    ("food-9", "El pescado", "Fish", "Food"),
    ("food-10", "El agua", "Water", "Food"),
    ("animal-1", "El perro", "Dog", "Animals"),
    ("animal-2", "El gato", "Cat", "Animals"),
    ("animal-3", "El pájaro", "Bird", "Animals"),
    ("animal-4", "El caballo", "Horse", "Animals"),
    ("animal-5", "La vaca", "Cow", "Animals"),
    ("animal-6", "El cerdo", "Pig", "Animals"),
    ("animal-7", "El conejo", "Rabbit", "Animals"),
    ("animal-8", "El elefante", "Elephant", "Animals"),
    ("animal-9", "El león", "Lion", "Animals"),
    ("animal-10", "El tigre", "Tiger", "Animals"),
    ("verb-1", "Correr", "To run", "Verbs"),
    ("verb-2", "Caminar", "To walk", "Verbs"),
    ("verb-3", "Comer", "To eat", "Verbs"),
    ("verb-4", "Beber", "To drink", "Verbs"),
    ("verb-5", "Dormir", "To sleep", "Verbs"),
    ("verb-6", "Leer", "To read", "Verbs"),
    ("verb-7", "Escribir", "To write", "Verbs"),
    ("verb-8", "Hablar", "To speak", "Verbs"),
    ("verb-9", "Escuchar", "To listen", "Verbs"),
    ("verb-10", "Estudiar", "To study", "Verbs"),
];

impl Catalog {
    /// The built-in Spanish/English vocabulary.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(id, source, target, category)| CatalogEntry::new(*id, *source, *target, *category))
            .collect();
        Self { entries }
    }

    /// Build a catalog from arbitrary entries.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the list is empty, an id repeats, or an
    /// entry has an empty id, text or category.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            let fields = [
                &entry.id,
                &entry.source_text,
                &entry.target_text,
                &entry.category,
            ];
            if fields.iter().any(|f| f.trim().is_empty()) {
                return Err(CatalogError::MissingField(entry.id.clone()));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// Full catalog in stable order
    pub fn list(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries of one category, in catalog order
    pub fn by_category(&self, category: &str) -> Vec<&CatalogEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Categories with entry counts, in order of first appearance
    pub fn categories(&self) -> Vec<CategoryInfo> {
        let mut categories: Vec<CategoryInfo> = Vec::new();
        for entry in &self.entries {
            match categories.iter_mut().find(|c| c.name == entry.category) {
                Some(info) => info.entry_count += 1,
                None => categories.push(CategoryInfo {
                    name: entry.category.clone(),
                    entry_count: 1,
                }),
            }
        }
        categories
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed catalog; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_thirty_entries_in_three_categories() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 30);

        let categories = catalog.categories();
        let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Food", "Animals", "Verbs"]);
        assert!(categories.iter().all(|c| c.entry_count == 10));
    }

    #[test]
    fn builtin_ids_are_unique_and_slugged() {
        let catalog = Catalog::builtin();
        let ids: HashSet<&str> = catalog.list().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());

        for entry in catalog.list() {
            let (slug, n) = entry.id.rsplit_once('-').unwrap();
            assert!(!slug.is_empty());
            assert!(n.parse::<u32>().is_ok(), "bad id {}", entry.id);
            assert!(!entry.category.is_empty());
        }
    }

    #[test]
    fn by_category_keeps_catalog_order() {
        let catalog = Catalog::builtin();
        let verbs: Vec<&str> = catalog
            .by_category("Verbs")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        let expected: Vec<String> = (1..=10).map(|n| format!("verb-{n}")).collect();
        assert_eq!(verbs, expected);
        assert!(catalog.by_category("Colors").is_empty());
    }

    #[test]
    fn get_finds_entry_by_id() {
        let catalog = Catalog::builtin();
        let entry = catalog.get("animal-9").unwrap();
        assert_eq!(entry.source_text, "El león");
        assert_eq!(entry.target_text, "Lion");
        assert!(catalog.get("animal-11").is_none());
    }

    #[test]
    fn from_entries_rejects_invalid_input() {
        assert_eq!(Catalog::from_entries(vec![]), Err(CatalogError::Empty));

        let dup = vec![
            CatalogEntry::new("a-1", "uno", "one", "A"),
            CatalogEntry::new("a-1", "dos", "two", "A"),
        ];
        assert_eq!(
            Catalog::from_entries(dup),
            Err(CatalogError::DuplicateId("a-1".to_string()))
        );

        let blank = vec![CatalogEntry::new("a-1", "uno", "one", " ")];
        assert_eq!(
            Catalog::from_entries(blank),
            Err(CatalogError::MissingField("a-1".to_string()))
        );
    }

    #[test]
    fn entry_serializes_with_camel_case_fields() {
        let entry = CatalogEntry::new("food-1", "La manzana", "Apple", "Food");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["sourceText"], "La manzana");
        assert_eq!(json["targetText"], "Apple");
        assert!(json.get("difficulty").is_none());
    }
}
