//! Object queries.
//!
//! An [`ObjectQuery`] is an insertion-ordered set of [`Restriction`]s combined
//! with AND. Restrictions scoped to a class only take part when objects of
//! that class are evaluated, so one query can carry filters for several
//! classes at once:
//!
//! ```
//! # use wikimodel::{ClassReference, query::{ObjectQuery, Restriction}};
//! let posts = ClassReference::new("Blog", "PostClass");
//! let tags = ClassReference::new("Blog", "TagClass");
//! let query = ObjectQuery::new()
//!     .with_restriction(Restriction::Class(posts.clone()))
//!     .with_restriction(Restriction::Class(tags.clone()))
//!     .with_restriction(Restriction::Number(0));
//! assert_eq!(query.class_refs().len(), 2);
//! ```

use std::collections::BTreeSet;

use indexmap::IndexSet;

use crate::{
    accessor::FieldAccessor,
    field::FieldDef,
    object::PropertyObject,
    reference::ClassReference,
    value::Value,
};

mod restriction;
pub use restriction::Restriction;

/// A set of restrictions combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectQuery {
    restrictions: IndexSet<Restriction>,
}

impl ObjectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a restriction; returns `false` if an equal one was already present.
    pub fn add(&mut self, restriction: Restriction) -> bool {
        self.restrictions.insert(restriction)
    }

    pub fn with_restriction(mut self, restriction: Restriction) -> Self {
        self.add(restriction);
        self
    }

    /// Adds every restriction of `other`.
    pub fn merge(&mut self, other: &ObjectQuery) {
        self.restrictions.extend(other.restrictions.iter().cloned());
    }

    /// The predicate for objects of `class_ref`, reading fields through `accessor`.
    ///
    /// Restrictions scoped to another class are ignored.
    pub fn predicate<'q>(
        &'q self,
        class_ref: &ClassReference,
        accessor: &'q dyn FieldAccessor<PropertyObject>,
    ) -> impl Fn(&PropertyObject) -> bool + use<'q> {
        let scoped: Vec<&'q Restriction> = self
            .restrictions
            .iter()
            .filter(|r| r.scope().is_none_or(|scope| scope == class_ref))
            .collect();
        move |object| scoped.iter().all(|r| r.apply(object, accessor))
    }

    /// Distinct classes referenced by the restrictions, in insertion order.
    pub fn class_refs(&self) -> IndexSet<&ClassReference> {
        self.restrictions.iter().filter_map(Restriction::scope).collect()
    }

    /// Field restrictions scoped to `class_ref`.
    pub fn field_restrictions<'q>(
        &'q self,
        class_ref: &ClassReference,
    ) -> impl Iterator<Item = (&'q FieldDef, &'q BTreeSet<Value>)> + use<'q> {
        let class_ref = class_ref.clone();
        self.restrictions.iter().filter_map(move |r| match r {
            Restriction::Field { field, values } if *field.class_ref() == class_ref => {
                Some((field, values))
            }
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Restriction> {
        self.restrictions.iter()
    }

    pub fn len(&self) -> usize {
        self.restrictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restrictions.is_empty()
    }
}

impl FromIterator<Restriction> for ObjectQuery {
    fn from_iter<I: IntoIterator<Item = Restriction>>(iter: I) -> Self {
        Self {
            restrictions: iter.into_iter().collect(),
        }
    }
}

/// Incremental construction of an [`ObjectQuery`].
///
/// Implemented by the fetcher and the editor so both share one filter vocabulary.
pub trait QueryBuilder: Sized {
    fn query_mut(&mut self) -> &mut ObjectQuery;

    fn filter(mut self, restriction: Restriction) -> Self {
        self.query_mut().add(restriction);
        self
    }

    fn filter_class(self, class_ref: ClassReference) -> Self {
        self.filter(Restriction::Class(class_ref))
    }

    /// Objects whose `field` equals `value`.
    fn filter_field(self, field: &FieldDef, value: impl Into<Value>) -> Self {
        self.filter(Restriction::field(field, [value.into()]))
    }

    /// Objects whose `field` equals any of `values`.
    fn filter_field_any<I, V>(self, field: &FieldDef, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter(Restriction::field(field, values.into_iter().map(Into::into)))
    }

    fn filter_present(self, field: &FieldDef) -> Self {
        self.filter(Restriction::FieldPresent(field.clone()))
    }

    fn filter_absent(self, field: &FieldDef) -> Self {
        self.filter(Restriction::FieldAbsent(field.clone()))
    }

    /// Exactly `object`.
    fn filter_object(self, object: &PropertyObject) -> Self {
        self.filter_class(object.class_ref().clone())
            .filter(Restriction::identity([object]))
    }

    /// Exactly the given objects.
    fn filter_objects<'a, I>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = &'a PropertyObject>,
    {
        let objects: Vec<&PropertyObject> = objects.into_iter().collect();
        for object in &objects {
            self.query_mut().add(Restriction::Class(object.class_ref().clone()));
        }
        self.filter(Restriction::identity(objects))
    }

    fn filter_number(self, number: u32) -> Self {
        self.filter(Restriction::Number(number))
    }

    /// Adds every restriction of `query`.
    fn with(mut self, query: &ObjectQuery) -> Self {
        self.query_mut().merge(query);
        self
    }
}

impl QueryBuilder for ObjectQuery {
    fn query_mut(&mut self) -> &mut ObjectQuery {
        self
    }
}
