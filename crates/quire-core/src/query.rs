//! Query parameter types for [`crate::store::PaperStore`].
//!
//! Sort columns and search fields are closed enums. Caller-supplied names
//! enter only through the coercing `from_name` constructors, and reach SQL
//! only through the fixed `as_sql` strings — an unrecognised name can change
//! which allow-listed template runs, never the structure of the query.

use serde::{Deserialize, Serialize};

// ─── Sort column ─────────────────────────────────────────────────────────────

/// The columns [`crate::store::PaperStore::list`] may order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
  #[default]
  Id,
  Title,
  Author,
  Year,
  CreatedAt,
  UpdatedAt,
}

impl SortColumn {
  /// Coerce a caller-supplied column name. Anything outside the allow-list
  /// falls back to `Id`.
  pub fn from_name(name: &str) -> Self {
    match name {
      "id" => Self::Id,
      "title" => Self::Title,
      "author" => Self::Author,
      "year" => Self::Year,
      "created_at" => Self::CreatedAt,
      "updated_at" => Self::UpdatedAt,
      _ => Self::Id,
    }
  }

  /// The column identifier as it appears in query text.
  pub fn as_sql(self) -> &'static str {
    match self {
      Self::Id => "id",
      Self::Title => "title",
      Self::Author => "author",
      Self::Year => "year",
      Self::CreatedAt => "created_at",
      Self::UpdatedAt => "updated_at",
    }
  }
}

// ─── Search field ────────────────────────────────────────────────────────────

/// The fields [`crate::store::PaperStore::search`] may match against.
/// `All` is the OR-union over title, author and memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
  #[default]
  Title,
  Author,
  Memo,
  All,
}

impl SearchField {
  /// Coerce a caller-supplied field name. Anything outside the allow-list
  /// falls back to `Title`.
  pub fn from_name(name: &str) -> Self {
    match name {
      "title" => Self::Title,
      "author" => Self::Author,
      "memo" => Self::Memo,
      "all" => Self::All,
      _ => Self::Title,
    }
  }
}

// ─── Advanced query ──────────────────────────────────────────────────────────

/// Parameters for [`crate::store::PaperStore::advanced_search`].
///
/// Active predicates are AND-conjoined. A text predicate that is `None` or
/// the empty string is inactive; with no active predicate the search
/// degenerates to the unfiltered listing.
#[derive(Debug, Clone, Default)]
pub struct AdvancedQuery {
  /// Substring match on title.
  pub title:     Option<String>,
  /// Substring match on author.
  pub author:    Option<String>,
  /// Substring match on memo.
  pub memo:      Option<String>,
  /// Inclusive lower bound on year.
  pub year_from: Option<i32>,
  /// Inclusive upper bound on year.
  pub year_to:   Option<i32>,
}

impl AdvancedQuery {
  /// The title predicate, if active.
  pub fn title_term(&self) -> Option<&str> {
    self.title.as_deref().filter(|t| !t.is_empty())
  }

  /// The author predicate, if active.
  pub fn author_term(&self) -> Option<&str> {
    self.author.as_deref().filter(|t| !t.is_empty())
  }

  /// The memo predicate, if active.
  pub fn memo_term(&self) -> Option<&str> {
    self.memo.as_deref().filter(|t| !t.is_empty())
  }

  /// True when no predicate is active.
  pub fn is_unconstrained(&self) -> bool {
    self.title_term().is_none()
      && self.author_term().is_none()
      && self.memo_term().is_none()
      && self.year_from.is_none()
      && self.year_to.is_none()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sort_column_coerces_unknown_names_to_id() {
    assert_eq!(SortColumn::from_name("year"), SortColumn::Year);
    assert_eq!(SortColumn::from_name("updated_at"), SortColumn::UpdatedAt);
    assert_eq!(SortColumn::from_name("memo"), SortColumn::Id);
    assert_eq!(
      SortColumn::from_name("id; DROP TABLE papers--"),
      SortColumn::Id
    );
  }

  #[test]
  fn search_field_coerces_unknown_names_to_title() {
    assert_eq!(SearchField::from_name("all"), SearchField::All);
    assert_eq!(SearchField::from_name("year"), SearchField::Title);
    assert_eq!(SearchField::from_name(""), SearchField::Title);
  }

  #[test]
  fn empty_string_predicates_are_inactive() {
    let q = AdvancedQuery {
      title: Some(String::new()),
      author: Some(String::new()),
      ..Default::default()
    };
    assert!(q.is_unconstrained());

    let q = AdvancedQuery {
      year_from: Some(2016),
      ..Default::default()
    };
    assert!(!q.is_unconstrained());
  }
}
