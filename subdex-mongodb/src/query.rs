//! Query translation from the subdex filter AST to MongoDB query syntax.
//!
//! This module translates abstract query expressions into MongoDB BSON documents
//! for execution by the MongoDB query engine. String operands of the pattern-based
//! operators are regex-escaped, so every term is matched literally.

use bson::{Document, Bson, doc};

use subdex_core::{
    query::{QueryVisitor, Expr, FieldOp, Query, SortDirection},
    error::DocumentStoreError,
};


/// Translates filter expressions into MongoDB query documents.
pub(crate) struct MongoQueryTranslator;

impl MongoQueryTranslator {
    /// Translates an optional filter; no filter matches every document.
    pub(crate) fn filter(expr: Option<&Expr>) -> Result<Document, DocumentStoreError> {
        match expr {
            Some(expr) => MongoQueryTranslator.visit_expr(expr),
            None => Ok(doc! {}),
        }
    }

    /// Builds the projection document for a query, excluding `_id` unless it is requested.
    pub(crate) fn projection(query: &Query) -> Option<Document> {
        query.projection.as_ref().map(|fields| {
            let mut projection = fields
                .iter()
                .map(|field| (field.clone(), Bson::Int32(1)))
                .collect::<Document>();

            if !fields.iter().any(|field| field == "_id") {
                projection.insert("_id", 0);
            }

            projection
        })
    }

    /// Builds the sort document for a query.
    pub(crate) fn sort(query: &Query) -> Option<Document> {
        query.sort.as_ref().map(|sort| doc! {
            sort.field.clone(): match sort.direction {
                SortDirection::Asc => 1,
                SortDirection::Desc => -1,
            }
        })
    }
}

fn string_operand<'a>(op: &str, value: &'a Bson) -> Result<&'a str, DocumentStoreError> {
    value
        .as_str()
        .ok_or_else(|| DocumentStoreError::Backend(format!("{op} operator requires a string value")))
}

impl QueryVisitor for MongoQueryTranslator {
    type Output = Document;
    type Error = DocumentStoreError;

    fn visit_and(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$and": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_or(&mut self, exprs: &[Expr]) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$or": exprs
                .iter()
                .map(|expr| self.visit_expr(expr))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    fn visit_not(&mut self, expr: &Expr) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            "$nor": [self.visit_expr(expr)?],
        })
    }

    fn visit_field(&mut self, field: &str, op: &FieldOp, value: &Bson) -> Result<Self::Output, Self::Error> {
        Ok(doc! {
            field: match op {
                FieldOp::Eq => doc! { "$eq": value },
                FieldOp::EqIgnoreCase => doc! {
                    "$regex": format!("\\A{}\\z", regex::escape(string_operand("EqIgnoreCase", value)?)),
                    "$options": "i",
                },
                FieldOp::Contains => doc! {
                    "$regex": regex::escape(string_operand("Contains", value)?),
                },
                FieldOp::ContainsIgnoreCase => doc! {
                    "$regex": regex::escape(string_operand("ContainsIgnoreCase", value)?),
                    "$options": "i",
                },
            }
        })
    }
}
