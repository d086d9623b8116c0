use std::collections::HashMap;

use async_graphql::Value;
use async_graphql::dynamic::FieldValue;

use super::binding::Bindings;
use super::context::RequestContext;
use crate::datamodel::{Book, Record, find_author_by_id, find_book_by_id};
use crate::error::{ConfigError, ResolveError};

/// The value a resolver produces for its field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved {
    Text(String),
    Record(Record),
}

impl From<&'static str> for Resolved {
    fn from(text: &'static str) -> Self {
        Resolved::Text(text.to_owned())
    }
}

impl<'a> From<Resolved> for FieldValue<'a> {
    fn from(resolved: Resolved) -> Self {
        match resolved {
            Resolved::Text(text) => FieldValue::value(Value::String(text)),
            Resolved::Record(record) => FieldValue::owned_any(record),
        }
    }
}

pub type Resolution = Result<Option<Resolved>, ResolveError>;

/// Call-site arguments of a field, keyed by argument name.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    values: HashMap<String, Value>,
}

impl Arguments {
    pub fn string(&self, name: &'static str) -> Result<Option<&str>, ResolveError> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(ResolveError::InvalidArgument(name)),
        }
    }

    pub fn required_string(&self, name: &'static str) -> Result<&str, ResolveError> {
        self.string(name)?.ok_or(ResolveError::MissingArgument(name))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// How a field computes its value, by the inputs it needs.
#[derive(Clone, Copy, Debug)]
pub enum Resolver {
    Static(&'static str),
    /// Looks something up by the field's own arguments, ignoring the parent.
    Argument(fn(&Arguments) -> Resolution),
    /// Projects from the parent's resolved value.
    Source(fn(Record) -> Resolution),
    SourceWithContext(fn(Record, &RequestContext) -> Resolution),
    Context(fn(&RequestContext) -> Resolution),
}

impl Resolver {
    pub fn resolve(
        &self,
        args: &Arguments,
        source: Option<&Record>,
        context: &RequestContext,
    ) -> Resolution {
        match *self {
            Resolver::Static(value) => Ok(Some(value.into())),
            Resolver::Argument(resolve) => resolve(args),
            Resolver::Source(resolve) => resolve(require_source(source)?),
            Resolver::SourceWithContext(resolve) => resolve(require_source(source)?, context),
            Resolver::Context(resolve) => resolve(context),
        }
    }
}

fn require_source(source: Option<&Record>) -> Result<Record, ResolveError> {
    source.copied().ok_or(ResolveError::UnexpectedSource {
        expected: "record",
    })
}

fn expect_book(source: Record) -> Result<&'static Book, ResolveError> {
    match source {
        Record::Book(book) => Ok(book),
        Record::Author(_) => Err(ResolveError::UnexpectedSource { expected: "Book" }),
    }
}

/// The fallback for every unbound field: read the same-named property off the parent.
pub fn property(source: Option<&Record>, field_name: &str) -> Resolution {
    Ok(source
        .and_then(|record| record.field(field_name))
        .map(Resolved::from))
}

pub fn book_by_id(args: &Arguments) -> Resolution {
    let id = args.required_string("id")?;
    Ok(find_book_by_id(id).map(|book| Resolved::Record(Record::Book(book))))
}

pub fn book_author(source: Record) -> Resolution {
    let book = expect_book(source)?;
    Ok(find_author_by_id(book.author_id).map(|author| Resolved::Record(Record::Author(author))))
}

pub fn book_page_count(source: Record, context: &RequestContext) -> Resolution {
    let book = expect_book(source)?;
    tracing::info!(user_id = ?context.user_id, book = book.id, "got pageCount request from user");
    Ok(Some(book.page_count.into()))
}

pub fn book_user(context: &RequestContext) -> Resolution {
    Ok(context.user_id.clone().map(Resolved::Text))
}

pub fn library_bindings() -> Result<Bindings, ConfigError> {
    let mut bindings = Bindings::new();
    bindings
        .bind("Query", "hello", Resolver::Static("world"))?
        .bind("Query", "banana", Resolver::Static("eat me"))?
        .bind("Query", "bookById", Resolver::Argument(book_by_id))?
        .bind("Book", "author", Resolver::Source(book_author))?
        .bind("Book", "pageCount", Resolver::SourceWithContext(book_page_count))?
        .bind("Book", "user", Resolver::Context(book_user))?;
    Ok(bindings)
}
