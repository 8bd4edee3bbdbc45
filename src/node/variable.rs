use super::{expect_record, node_facade, Node};
use crate::storage::{BackendNodeHandle, NodeKind, NodeStorage, VariableBackend};
use std::sync::Arc;

/// Query variable
///
/// Anonymous variables render as `_:name`, named ones as `?name`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(Node);

node_facade!(Variable, NodeKind::Variable);

impl Variable {
    pub fn new(name: &str, anonymous: bool) -> Self {
        Self::new_in(name, anonymous, NodeStorage::primary_instance())
    }

    pub fn new_in(name: &str, anonymous: bool, storage: &NodeStorage) -> Self {
        let (_, id) = storage.get_variable(name, anonymous);
        Self(Node::from_handle(BackendNodeHandle::new(id, storage)))
    }

    pub fn backend(&self) -> Arc<VariableBackend> {
        expect_record(self.0.backend_handle().variable_backend())
    }

    pub fn name(&self) -> String {
        self.backend().name().to_string()
    }

    pub fn is_anonymous(&self) -> bool {
        self.backend().is_anonymous()
    }
}
