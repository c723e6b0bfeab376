use std::collections::HashMap;

/// An append-only string table handing out stable integer ids.
///
/// Interning an equal value twice returns the id assigned on first sight;
/// ids are dense and follow insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternTable {
    ids: HashMap<String, usize>,
    values: Vec<String>,
}

impl InternTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, value: &str) -> usize {
        if let Some(&id) = self.ids.get(value) {
            return id;
        }
        let id = self.values.len();
        self.values.push(value.to_string());
        self.ids.insert(value.to_string(), id);
        id
    }

    pub fn id_of(&self, value: &str) -> Option<usize> {
        self.ids.get(value).copied()
    }

    pub fn get(&self, id: usize) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.values.iter().map(String::as_str).enumerate()
    }
}
