//! Literal terms
//!
//! A literal keeps the lexical form it was built from; that text is its
//! identity. Rendering goes through the owning storage's datatype registry, so
//! for registered datatypes the output reflects the registered `to_string`.

use super::{expect_record, node_facade, Iri, Node};
use crate::datatypes::{xsd, Datatype, DatatypeResult, DatatypeValue};
use crate::storage::{BackendNodeHandle, LiteralBackend, NodeId, NodeKind, NodeResult, NodeStorage};
use std::sync::Arc;

/// Literal term
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(Node);

node_facade!(Literal, NodeKind::Literal);

impl Literal {
    /// `xsd:string` literal in the primary storage
    pub fn new_simple(lexical_form: &str) -> Self {
        Self::new_simple_in(lexical_form, NodeStorage::primary_instance())
    }

    pub fn new_simple_in(lexical_form: &str, storage: &NodeStorage) -> Self {
        let (_, id) = storage.intern_typed_literal(lexical_form, xsd::XSD_STRING);
        Self::from_id(id, storage)
    }

    /// Language-tagged literal in the primary storage
    pub fn new_lang(lexical_form: &str, language_tag: &str) -> Self {
        Self::new_lang_in(lexical_form, language_tag, NodeStorage::primary_instance())
    }

    pub fn new_lang_in(lexical_form: &str, language_tag: &str, storage: &NodeStorage) -> Self {
        let (_, id) = storage.get_lang_literal(lexical_form, language_tag);
        Self::from_id(id, storage)
    }

    /// Typed literal in the primary storage
    pub fn new_typed(lexical_form: &str, datatype: &str) -> NodeResult<Self> {
        Self::new_typed_in(lexical_form, datatype, NodeStorage::primary_instance())
    }

    /// Typed literal; fails for `rdf:langString`, which needs [`Literal::new_lang_in`]
    pub fn new_typed_in(lexical_form: &str, datatype: &str, storage: &NodeStorage) -> NodeResult<Self> {
        let (_, id) = storage.get_typed_literal(lexical_form, datatype)?;
        Ok(Self::from_id(id, storage))
    }

    /// Literal holding a native value, rendered with `T::to_lexical`
    pub fn from_value<T: Datatype>(value: &T, storage: &NodeStorage) -> NodeResult<Self> {
        Self::new_typed_in(&value.to_lexical(), T::IRI, storage)
    }

    pub fn backend(&self) -> Arc<LiteralBackend> {
        expect_record(self.0.backend_handle().literal_backend())
    }

    /// Lexical form as given at construction
    pub fn lexical_form(&self) -> String {
        self.backend().lexical_form().to_string()
    }

    /// Lexical form as rendered by the owning storage
    pub fn canonical_lexical_form(&self) -> String {
        let record = self.backend();
        self.storage().canonical_lexical_form(&record).into_owned()
    }

    /// Datatype IRI, as a term in the same storage
    pub fn datatype(&self) -> Iri {
        let record = self.backend();
        let handle = BackendNodeHandle::new(record.datatype_id(), self.storage());
        Iri::from_node_unchecked(Node::from_handle(handle))
    }

    pub fn datatype_iri(&self) -> String {
        self.backend().datatype().to_string()
    }

    pub fn language_tag(&self) -> Option<String> {
        self.backend().language_tag().map(str::to_string)
    }

    pub fn is_lang_tagged(&self) -> bool {
        self.backend().language_tag().is_some()
    }

    /// Native value built by the registered factory.
    ///
    /// `Ok(None)` when the datatype is not registered with this storage's registry.
    pub fn value(&self) -> DatatypeResult<Option<DatatypeValue>> {
        let record = self.backend();
        match self.storage().registry().get_factory(record.datatype()) {
            Some(factory) => factory(record.lexical_form()).map(Some),
            None => Ok(None),
        }
    }

    /// Native value as `T`. `Ok(None)` when the literal is not of datatype `T::IRI`.
    pub fn value_as<T: Datatype>(&self) -> DatatypeResult<Option<T>> {
        let record = self.backend();
        if record.datatype() != T::IRI {
            return Ok(None);
        }
        T::from_lexical(record.lexical_form()).map(Some)
    }
}

impl Literal {
    fn from_id(id: NodeId, storage: &NodeStorage) -> Self {
        Self(Node::from_handle(BackendNodeHandle::new(id, storage)))
    }
}
