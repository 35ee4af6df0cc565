use std::collections::HashSet;

use crate::{
    Result,
    bridge::ObjectBridge,
    fetch::{FetchError, ObjectFetcher, fetcher::scanned_classes},
    field::FieldDef,
    id::IdComputer,
    object::{Document, PropertyObject},
    query::{ObjectQuery, QueryBuilder},
    reference::ClassReference,
    value::Value,
};

/// Query-driven creation, editing and deletion of the objects of one document.
///
/// Created objects take the first candidate value of every field restriction
/// of their class, so `filter_field(title, "x").create_if_not_exists()`
/// yields an object the same query matches.
#[derive(Debug)]
pub struct ObjectEditor<'a> {
    bridge: &'a dyn ObjectBridge,
    doc: &'a mut Document,
    query: ObjectQuery,
    id_computer: Option<IdComputer>,
}

impl<'a> ObjectEditor<'a> {
    pub fn new(bridge: &'a dyn ObjectBridge, doc: &'a mut Document) -> Self {
        Self {
            bridge,
            doc,
            query: ObjectQuery::new(),
            id_computer: None,
        }
    }

    /// Assigns a packed identifier to every object this editor creates.
    pub fn with_id_computer(mut self, id_computer: IdComputer) -> Self {
        self.id_computer = Some(id_computer);
        self
    }

    pub fn query(&self) -> &ObjectQuery {
        &self.query
    }

    /// A fetcher over the current document state with this editor's query.
    pub fn fetch(&self) -> ObjectFetcher<'_> {
        ObjectFetcher::new(self.bridge, &*self.doc).with(&self.query)
    }

    /// Creates one object for every class named by the query.
    pub fn create(&mut self) -> Result<Vec<(ClassReference, u32)>> {
        let classes = self.named_classes()?;
        let mut created = Vec::with_capacity(classes.len());
        for class_ref in classes {
            let number = self.create_in(&class_ref)?.number();
            created.push((class_ref, number));
        }
        Ok(created)
    }

    /// Creates an object of the first class named by the query.
    pub fn create_first(&mut self) -> Result<&mut PropertyObject> {
        let class_ref = self
            .named_classes()?
            .into_iter()
            .next()
            .ok_or(FetchError::NoClass)?;
        self.create_in(&class_ref)
    }

    /// Creates objects only for the named classes without any match.
    pub fn create_if_not_exists(&mut self) -> Result<Vec<(ClassReference, u32)>> {
        let classes = self.named_classes()?;
        let existing: HashSet<ClassReference> = self.fetch().map()?.into_keys().collect();
        let mut created = Vec::new();
        for class_ref in classes {
            if existing.contains(&class_ref) {
                continue;
            }
            let number = self.create_in(&class_ref)?.number();
            created.push((class_ref, number));
        }
        Ok(created)
    }

    /// Edits `field` on the matching objects.
    pub fn edit_field<'e>(&'e mut self, field: &'e FieldDef) -> FieldEditor<'e, 'a> {
        FieldEditor {
            editor: self,
            field,
        }
    }

    /// Deletes the first matching object; returns whether one was deleted.
    pub fn delete_first(&mut self) -> Result<bool> {
        let first = self
            .fetch()
            .first()?
            .map(|object| (object.class_ref().clone(), object.number()));
        match first {
            Some((class_ref, number)) => {
                Ok(self.bridge.delete_object(self.doc, &class_ref, number)?.is_some())
            }
            None => Ok(false),
        }
    }

    /// Deletes every matching object; returns how many were deleted.
    pub fn delete_all(&mut self) -> Result<usize> {
        let keys: Vec<(ClassReference, u32)> = self
            .fetch()
            .list()?
            .into_iter()
            .map(|object| (object.class_ref().clone(), object.number()))
            .collect();
        let mut deleted = 0;
        for (class_ref, number) in keys {
            if self.bridge.delete_object(self.doc, &class_ref, number)?.is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    fn named_classes(&self) -> Result<Vec<ClassReference>> {
        let classes: Vec<ClassReference> = self.query.class_refs().into_iter().cloned().collect();
        if classes.is_empty() {
            return Err(FetchError::NoClass.into());
        }
        Ok(classes)
    }

    fn create_in(&mut self, class_ref: &ClassReference) -> Result<&mut PropertyObject> {
        let bridge = self.bridge;
        let id = match self.id_computer {
            Some(computer) => Some((computer.compute_next_object_id(self.doc)?, computer.version())),
            None => None,
        };
        let initial: Vec<(FieldDef, Value)> = self
            .query
            .field_restrictions(class_ref)
            .filter_map(|(field, values)| values.first().map(|v| (field.clone(), v.clone())))
            .collect();

        let object = bridge.create_object(self.doc, class_ref)?;
        if let Some((id, version)) = id {
            object.set_id(id, version);
        }
        let accessor = bridge.object_field_accessor();
        for (field, value) in initial {
            accessor.set(object, &field, Some(value))?;
        }
        Ok(object)
    }

    /// Applies `edit` to matching objects of `class_ref`, stopping after the first when `first_only`.
    fn apply<F>(&mut self, class_ref: &ClassReference, first_only: bool, mut edit: F) -> Result<bool>
    where
        F: FnMut(&dyn ObjectBridge, &mut PropertyObject) -> Result<bool>,
    {
        let bridge = self.bridge;
        if !scanned_classes(bridge, self.doc, &self.query).contains(class_ref) {
            return Ok(false);
        }
        let predicate = self.query.predicate(class_ref, bridge.object_field_accessor());
        let mut changed = false;
        for object in bridge.get_objects_mut(self.doc, class_ref)? {
            if !predicate(&*object) {
                continue;
            }
            changed |= edit(bridge, object)?;
            if first_only {
                break;
            }
        }
        Ok(changed)
    }
}

impl QueryBuilder for ObjectEditor<'_> {
    fn query_mut(&mut self) -> &mut ObjectQuery {
        &mut self.query
    }
}

/// Sets one field on the objects matched by an [`ObjectEditor`].
#[derive(Debug)]
pub struct FieldEditor<'e, 'a> {
    editor: &'e mut ObjectEditor<'a>,
    field: &'e FieldDef,
}

impl FieldEditor<'_, '_> {
    /// Sets the field on every match; returns whether any object changed.
    pub fn all(self, value: Option<Value>) -> Result<bool> {
        self.set(false, value)
    }

    /// Sets the field on the first match only.
    pub fn first(self, value: Option<Value>) -> Result<bool> {
        self.set(true, value)
    }

    fn set(self, first_only: bool, value: Option<Value>) -> Result<bool> {
        let field = self.field;
        self.editor.apply(field.class_ref(), first_only, |bridge, object| {
            Ok(bridge.object_field_accessor().set(object, field, value.clone())?)
        })
    }
}
