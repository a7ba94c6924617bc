//! Header-label to column-position resolution.
//!
//! Each table kind declares the labels it understands once, as a static
//! table of `(label, role)` pairs. A [`FieldMap`] is resolved from a table's
//! header row and then applied to every data row of that table.

use std::collections::HashMap;
use std::hash::Hash;

/// A field a table column (or a labelled line) can fill.
pub trait FieldRole: Copy + Eq + Hash + 'static {
    /// Recognised labels and the role each one fills.
    const LABELS: &'static [(&'static str, Self)];

    /// Look up the role for an exact label.
    fn from_label(label: &str) -> Option<Self> {
        Self::LABELS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, role)| *role)
    }

    /// The label this role is recognised by.
    fn label(self) -> &'static str {
        Self::LABELS
            .iter()
            .find(|(_, role)| *role == self)
            .map(|(label, _)| *label)
            .unwrap_or_default()
    }
}

/// Column positions resolved from one table's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap<R: FieldRole> {
    positions: HashMap<R, usize>,
}

impl<R: FieldRole> FieldMap<R> {
    /// Resolve role positions from header texts.
    ///
    /// Unrecognised headers are ignored. When a label occurs more than once,
    /// the last occurrence wins.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut positions = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(role) = R::from_label(header.as_ref().trim()) {
                positions.insert(role, index);
            }
        }
        Self { positions }
    }

    /// Zero-based column of `role`, if its label was in the header row.
    #[must_use]
    pub fn position(&self, role: R) -> Option<usize> {
        self.positions.get(&role).copied()
    }

    /// Cell of `row` filling `role`.
    ///
    /// `None` when the role was not resolved or the row is too short.
    pub fn cell<'a, S: AsRef<str>>(&self, row: &'a [S], role: R) -> Option<&'a str> {
        self.position(role)
            .and_then(|index| row.get(index))
            .map(AsRef::as_ref)
    }

    /// Owned copy of [`cell`](Self::cell).
    pub fn text<S: AsRef<str>>(&self, row: &[S], role: R) -> Option<String> {
        self.cell(row, role).map(str::to_string)
    }

    /// Labels known for this table kind that the header row did not contain.
    pub fn missing_labels(&self) -> Vec<&'static str> {
        R::LABELS
            .iter()
            .filter(|(_, role)| !self.positions.contains_key(role))
            .map(|(label, _)| *label)
            .collect()
    }
}
