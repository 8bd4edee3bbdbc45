use super::{expect_record, node_facade, Node};
use crate::storage::{BackendNodeHandle, IriBackend, NodeError, NodeKind, NodeResult, NodeStorage};
use std::sync::Arc;

/// IRI term
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Iri(Node);

node_facade!(Iri, NodeKind::Iri);

impl Iri {
    /// Intern `iri` in the primary storage
    pub fn new(iri: &str) -> Self {
        Self::new_in(iri, NodeStorage::primary_instance())
    }

    /// Intern `iri` in `storage`. The text is taken as is.
    pub fn new_in(iri: &str, storage: &NodeStorage) -> Self {
        let (_, id) = storage.get_iri(iri);
        Self(Node::from_handle(BackendNodeHandle::new(id, storage)))
    }

    /// Like [`Iri::new_in`], but rejects text that is not an absolute IRI
    pub fn try_new_in(iri: &str, storage: &NodeStorage) -> NodeResult<Self> {
        oxiri::Iri::parse(iri).map_err(|e| NodeError::InvalidIri(format!("<{}>: {}", iri, e)))?;
        Ok(Self::new_in(iri, storage))
    }

    pub fn backend(&self) -> Arc<IriBackend> {
        expect_record(self.0.backend_handle().iri_backend())
    }

    pub fn identifier(&self) -> String {
        self.backend().identifier().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_storage_default() {
        let iri = Iri::new("http://example.org/primary");
        assert_eq!(iri.storage(), NodeStorage::primary_instance());
        assert_eq!(iri.to_string(), "<http://example.org/primary>");
    }

    #[test]
    fn test_validation() {
        let storage = NodeStorage::new();
        assert!(Iri::try_new_in("http://example.org/ok", &storage).is_ok());
        assert!(matches!(
            Iri::try_new_in("not an iri", &storage),
            Err(NodeError::InvalidIri(_))
        ));
    }

    #[test]
    fn test_same_text_same_id() {
        let storage = NodeStorage::new();
        let a = Iri::new_in("http://example.org/a", &storage);
        let b = Iri::new_in("http://example.org/a", &storage);
        assert_eq!(a.id(), b.id());
    }
}
