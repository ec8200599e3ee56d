//! Query expression evaluation for in-memory document filtering.
//!
//! This module provides the evaluation engine for query expressions,
//! enabling filtering and comparison operations on BSON documents.

use std::cmp::Ordering;
use bson::{Bson, datetime::DateTime, oid::ObjectId};

use subdex_core::{
    query::{QueryVisitor, Expr, FieldOp},
    error::{DocumentStoreError, DocumentStoreResult},
};


/// Type-erased, comparable representation of BSON values.
///
/// Normalizes numeric types to f64 so mixed integer widths compare equal.
#[derive(Debug)]
pub(crate) enum Comparable<'a> {
    /// Null or missing value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (all integers and floats normalized to f64)
    Number(f64),
    /// DateTime value
    DateTime(DateTime),
    /// ObjectId value
    ObjectId(ObjectId),
    /// String value
    String(&'a str),
    /// Array of comparable values
    Array(Vec<Comparable<'a>>),
    /// Embedded document, in field order
    Map(Vec<(&'a str, Comparable<'a>)>),
}

impl<'a> From<&'a Bson> for Comparable<'a> {
    fn from(bson: &'a Bson) -> Self {
        match bson {
            Bson::Null => Comparable::Null,
            Bson::Boolean(value) => Comparable::Bool(*value),
            Bson::Int32(value) => Comparable::Number(*value as f64),
            Bson::Int64(value) => Comparable::Number(*value as f64),
            Bson::Double(value) => Comparable::Number(*value),
            Bson::DateTime(value) => Comparable::DateTime(*value),
            Bson::ObjectId(value) => Comparable::ObjectId(*value),
            Bson::String(value) => Comparable::String(value),
            Bson::Array(arr) => Comparable::Array(
                arr
                    .iter()
                    .map(Comparable::from)
                    .collect::<Vec<_>>()
            ),
            Bson::Document(doc) => Comparable::Map(
                doc
                    .iter()
                    .map(|(k, v)| (k.as_str(), Comparable::from(v)))
                    .collect::<Vec<_>>()
            ),
            _ => Comparable::Null,
        }
    }
}

impl<'a> Comparable<'a> {
    /// Rank of the value's type in MongoDB's cross-type sort order.
    fn type_rank(&self) -> u8 {
        match self {
            Comparable::Null => 0,
            Comparable::Number(_) => 1,
            Comparable::String(_) => 2,
            Comparable::Map(_) => 3,
            Comparable::Array(_) => 4,
            Comparable::ObjectId(_) => 5,
            Comparable::Bool(_) => 6,
            Comparable::DateTime(_) => 7,
        }
    }

    /// Total order used for sorting.
    ///
    /// Values of different types order by type rank (null < numbers < strings < documents
    /// < arrays < ObjectId < booleans < dates); doubles order with [`f64::total_cmp`].
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => Ordering::Equal,
            (Comparable::Number(a), Comparable::Number(b)) => a.total_cmp(b),
            // Byte order of UTF-8 is code point order.
            (Comparable::String(a), Comparable::String(b)) => a.cmp(b),
            (Comparable::Map(a), Comparable::Map(b)) => a
                .iter()
                .zip(b.iter())
                .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| va.total_cmp(vb)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Comparable::Array(a), Comparable::Array(b)) => a
                .iter()
                .zip(b.iter())
                .map(|(va, vb)| va.total_cmp(vb))
                .find(|ordering| ordering.is_ne())
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a.cmp(b),
            (Comparable::Bool(a), Comparable::Bool(b)) => a.cmp(b),
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl<'a> PartialEq for Comparable<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Comparable::Null, Comparable::Null) => true,
            (Comparable::Bool(a), Comparable::Bool(b)) => a == b,
            (Comparable::Number(a), Comparable::Number(b)) => a == b,
            (Comparable::DateTime(a), Comparable::DateTime(b)) => a == b,
            (Comparable::ObjectId(a), Comparable::ObjectId(b)) => a == b,
            (Comparable::String(a), Comparable::String(b)) => a == b,
            (Comparable::Array(a), Comparable::Array(b)) => a == b,
            (Comparable::Map(a), Comparable::Map(b)) => a == b,
            _ => false,
        }
    }
}


pub(crate) struct DocumentEvaluator<'a> {
    document: &'a Bson,
}

impl<'a> DocumentEvaluator<'a> {
    pub fn new(document: &'a Bson) -> Self {
        Self { document }
    }

    pub fn evaluate(&mut self, expr: &Expr) -> DocumentStoreResult<bool> {
        self.visit_expr(expr)
    }

    pub fn filter_documents(
        documents: impl IntoIterator<Item = &'a Bson>,
        expr: &Expr,
    ) -> DocumentStoreResult<Vec<Bson>> {
        let mut matched = Vec::new();

        for doc in documents {
            if DocumentEvaluator::new(doc).evaluate(expr)? {
                matched.push(doc.clone());
            }
        }

        Ok(matched)
    }

    fn lookup(&self, field: &str) -> DocumentStoreResult<Option<&'a Bson>> {
        Ok(
            self.document
                .as_document()
                .ok_or_else(|| DocumentStoreError::InvalidDocument("expected document".into()))?
                .get(field)
        )
    }
}

impl<'a> QueryVisitor for DocumentEvaluator<'a> {
    type Output = bool;
    type Error = DocumentStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if !self.visit_expr(expr)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        for expr in exprs {
            if self.visit_expr(expr)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(!self.visit_expr(expr)?)
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        let Some(field_value) = self.lookup(field)? else {
            return Ok(false);
        };

        match op {
            FieldOp::Eq => Ok(Comparable::from(field_value) == Comparable::from(value)),
            FieldOp::EqIgnoreCase => match (field_value, value) {
                (Bson::String(left), Bson::String(right)) => Ok(left.to_lowercase() == right.to_lowercase()),
                _ => Ok(false),
            },
            FieldOp::Contains => match (field_value, value) {
                (Bson::String(left), Bson::String(right)) => Ok(left.contains(right.as_str())),
                _ => Ok(false),
            },
            FieldOp::ContainsIgnoreCase => match (field_value, value) {
                (Bson::String(left), Bson::String(right)) => Ok(
                    left.to_lowercase().contains(&right.to_lowercase())
                ),
                _ => Ok(false),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use subdex_core::query::Filter;

    fn matches(document: Bson, expr: Expr) -> bool {
        DocumentEvaluator::new(&document).evaluate(&expr).unwrap()
    }

    #[test]
    fn eq_is_case_sensitive() {
        let lsd = Bson::Document(doc! { "name": "LSD" });

        assert!(matches(lsd.clone(), Filter::eq("name", "LSD")));
        assert!(!matches(lsd, Filter::eq("name", "lsd")));
    }

    #[test]
    fn eq_ignore_case_requires_full_match() {
        let lsd = Bson::Document(doc! { "name": "LSD" });

        assert!(matches(lsd.clone(), Filter::eq_ignore_case("name", "lsd")));
        assert!(!matches(lsd.clone(), Filter::eq_ignore_case("name", "ls")));
        assert!(!matches(lsd, Filter::eq_ignore_case("name", "1p-lsd")));
    }

    #[test]
    fn contains_ignore_case_matches_substrings() {
        let doc = Bson::Document(doc! { "name": "Caffeine" });

        assert!(matches(doc.clone(), Filter::contains_ignore_case("name", "FFEI")));
        assert!(matches(doc.clone(), Filter::contains_ignore_case("name", "")));
        assert!(!matches(doc.clone(), Filter::contains("name", "FFEI")));
        assert!(matches(doc, Filter::contains("name", "ffei")));
    }

    #[test]
    fn pattern_characters_are_literal() {
        let doc = Bson::Document(doc! { "name": "2C-B" });

        assert!(!matches(doc.clone(), Filter::contains_ignore_case("name", "2.-B")));
        assert!(matches(doc, Filter::contains_ignore_case("name", "c-b")));
    }

    #[test]
    fn missing_or_mistyped_field_never_matches() {
        let doc = Bson::Document(doc! { "summary": "no name", "name": 7 });

        assert!(!matches(doc.clone(), Filter::eq("url", "x")));
        assert!(!matches(doc, Filter::contains_ignore_case("name", "7")));
    }

    #[test]
    fn numbers_compare_across_widths() {
        let doc = Bson::Document(doc! { "rank": 3_i64 });

        assert!(matches(doc, Filter::eq("rank", 3_i32)));
    }

    #[test]
    fn logical_operators_compose() {
        let doc = Bson::Document(doc! { "name": "Caffeine", "featured": true });

        assert!(matches(
            doc.clone(),
            Filter::and([Filter::eq("featured", true), Filter::contains_ignore_case("name", "caf")]),
        ));
        assert!(matches(
            doc.clone(),
            Filter::or([Filter::eq("name", "LSD"), Filter::eq("featured", true)]),
        ));
        assert!(!matches(doc, Filter::not(Filter::eq("featured", true))));
    }

    #[test]
    fn non_document_is_an_error() {
        let value = Bson::String("Caffeine".into());
        let result = DocumentEvaluator::new(&value).evaluate(&Filter::eq("name", "Caffeine"));

        assert!(matches!(result, Err(DocumentStoreError::InvalidDocument(_))));
    }

    #[test]
    fn null_sorts_before_strings() {
        let name = Bson::String("A".into());

        assert_eq!(Comparable::Null.total_cmp(&Comparable::from(&name)), Ordering::Less);
        assert_eq!(
            Comparable::from(&Bson::String("B".into())).total_cmp(&Comparable::from(&Bson::String("a".into()))),
            Ordering::Less
        );
    }

    #[test]
    fn mixed_types_order_by_type_rank() {
        let values = [
            Bson::DateTime(DateTime::from_millis(0)),
            Bson::Boolean(false),
            Bson::ObjectId(ObjectId::new()),
            Bson::Array(vec![Bson::Int32(1)]),
            Bson::Document(doc! { "a": 1 }),
            Bson::String("LSD".into()),
            Bson::Int32(7),
            Bson::Null,
        ];

        for (i, left) in values.iter().enumerate() {
            for (j, right) in values.iter().enumerate() {
                // `values` is listed in descending rank
                assert_eq!(
                    Comparable::from(left).total_cmp(&Comparable::from(right)),
                    j.cmp(&i),
                    "{left:?} vs {right:?}"
                );
            }
        }
    }

    #[test]
    fn doubles_order_totally() {
        let nan = Bson::Double(f64::NAN);
        let one = Bson::Double(1.0);

        assert_eq!(Comparable::from(&nan).total_cmp(&Comparable::from(&nan)), Ordering::Equal);
        assert_eq!(Comparable::from(&one).total_cmp(&Comparable::from(&nan)), Ordering::Less);
        assert_eq!(
            Comparable::from(&Bson::Int64(2)).total_cmp(&Comparable::from(&Bson::Double(1.5))),
            Ordering::Greater
        );
    }
}
