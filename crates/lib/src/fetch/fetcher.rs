use std::sync::LazyLock;

use indexmap::IndexMap;

use crate::{
    Result,
    bridge::{EmptyBridge, ObjectBridge},
    convert::BeanObjectConverter,
    fetch::FetchError,
    field::FieldDef,
    object::{Document, PropertyObject},
    query::{ObjectQuery, QueryBuilder},
    reference::{ClassReference, DocumentReference},
    value::Value,
};

static EMPTY_BRIDGE: LazyLock<EmptyBridge> = LazyLock::new(EmptyBridge::new);
static EMPTY_DOCUMENT: LazyLock<Document> =
    LazyLock::new(|| Document::new(DocumentReference::new("", "", "")));

/// Read-only evaluation of a query over one document.
///
/// ```
/// # use std::sync::Arc;
/// # use wikimodel::{ClassReference, DocumentReference, class::{ClassDefinition, ClassRegistry},
/// #     bridge::DocumentBridge, fetch::ObjectFetcher, field::{FieldDef, FieldKind}, object::Document,
/// #     query::QueryBuilder};
/// let class_ref = ClassReference::new("Blog", "TagClass");
/// let mut registry = ClassRegistry::new();
/// let class = registry
///     .register(ClassDefinition::new(class_ref.clone(), |c| vec![FieldDef::new(c, "tag", FieldKind::text())]))
///     .unwrap();
/// let bridge = DocumentBridge::new(Arc::new(registry));
///
/// let mut doc = Document::new(DocumentReference::new("xwiki", "Blog", "Post"));
/// doc.add_object(&class);
/// doc.add_object(&class);
///
/// let fetcher = ObjectFetcher::new(&bridge, &doc).filter_class(class_ref).filter_number(1);
/// assert_eq!(fetcher.count().unwrap(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ObjectFetcher<'a> {
    bridge: &'a dyn ObjectBridge,
    doc: &'a Document,
    query: ObjectQuery,
}

impl<'a> ObjectFetcher<'a> {
    pub fn new(bridge: &'a dyn ObjectBridge, doc: &'a Document) -> Self {
        Self {
            bridge,
            doc,
            query: ObjectQuery::new(),
        }
    }

    /// A fetcher that never matches anything and never touches a document.
    pub fn empty() -> ObjectFetcher<'static> {
        ObjectFetcher::new(&*EMPTY_BRIDGE, &EMPTY_DOCUMENT)
    }

    pub fn query(&self) -> &ObjectQuery {
        &self.query
    }

    pub fn doc(&self) -> &'a Document {
        self.doc
    }

    /// Matching objects grouped by class; classes without matches are left out.
    pub fn map(&self) -> Result<IndexMap<ClassReference, Vec<&'a PropertyObject>>> {
        let mut matches = IndexMap::new();
        for class_ref in scanned_classes(self.bridge, self.doc, &self.query) {
            let predicate = self
                .query
                .predicate(&class_ref, self.bridge.object_field_accessor());
            let objects: Vec<&'a PropertyObject> = self
                .bridge
                .get_objects(self.doc, &class_ref)?
                .into_iter()
                .filter(|object| predicate(*object))
                .collect();
            if !objects.is_empty() {
                matches.insert(class_ref, objects);
            }
        }
        Ok(matches)
    }

    /// All matching objects, class by class.
    pub fn list(&self) -> Result<Vec<&'a PropertyObject>> {
        Ok(self.map()?.into_values().flatten().collect())
    }

    pub fn exists(&self) -> Result<bool> {
        Ok(self.first()?.is_some())
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.list()?.len())
    }

    pub fn first(&self) -> Result<Option<&'a PropertyObject>> {
        Ok(self.list()?.into_iter().next())
    }

    /// The single match, `None` without matches; several matches are an error.
    pub fn unique(&self) -> Result<Option<&'a PropertyObject>> {
        let mut objects = self.list()?;
        match objects.len() {
            0 | 1 => Ok(objects.pop()),
            count => Err(FetchError::NotUnique { count }.into()),
        }
    }

    /// Values of `field` on the matching objects of its class; unset values are skipped.
    pub fn fetch_field(&self, field: &FieldDef) -> Result<Vec<Value>> {
        let accessor = self.bridge.object_field_accessor();
        let mut values = Vec::new();
        for object in self.list()? {
            if object.class_ref() != field.class_ref() {
                continue;
            }
            if let Some(value) = accessor.get(object, field)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Converts the matching objects of the converter's class.
    pub fn convert<B>(&self, converter: &BeanObjectConverter<B>) -> Result<Vec<B>> {
        let class_ref = converter.class_def()?.class_ref();
        self.list()?
            .into_iter()
            .filter(|object| object.class_ref() == class_ref)
            .map(|object| converter.to_bean(object).map_err(Into::into))
            .collect()
    }
}

impl QueryBuilder for ObjectFetcher<'_> {
    fn query_mut(&mut self) -> &mut ObjectQuery {
        &mut self.query
    }
}

/// Classes named by `query`, or every class of `doc` when it names none.
pub(super) fn scanned_classes(
    bridge: &dyn ObjectBridge,
    doc: &Document,
    query: &ObjectQuery,
) -> Vec<ClassReference> {
    let named = query.class_refs();
    if named.is_empty() {
        bridge.get_doc_classes(doc)
    } else {
        named.into_iter().cloned().collect()
    }
}
