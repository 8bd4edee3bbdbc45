//! Conversions to and from `oxrdf` terms
//!
//! Used by the parsing and serialization layers, which speak `oxrdf`.

use super::{expect_record, Node};
use crate::storage::{BackendNodeHandle, NodeError, NodeKind, NodeResult, NodeStorage};
use oxrdf::{BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode, Term as OxTerm};

impl Node {
    /// Convert to an `oxrdf` term. Variables and the null term have no counterpart.
    pub fn to_oxrdf(&self) -> NodeResult<OxTerm> {
        let handle = self.backend_handle();
        match self.kind() {
            NodeKind::Iri => {
                let iri = expect_record(handle.iri_backend());
                Ok(OxNamedNode::new_unchecked(iri.identifier()).into())
            }
            NodeKind::BlankNode => {
                let bnode = expect_record(handle.bnode_backend());
                Ok(OxBlankNode::new_unchecked(bnode.identifier()).into())
            }
            NodeKind::Literal => {
                let literal = expect_record(handle.literal_backend());
                let converted = match literal.language_tag() {
                    Some(tag) => OxLiteral::new_language_tagged_literal_unchecked(
                        literal.lexical_form(),
                        tag,
                    ),
                    None => OxLiteral::new_typed_literal(
                        literal.lexical_form(),
                        OxNamedNode::new_unchecked(literal.datatype()),
                    ),
                };
                Ok(converted.into())
            }
            kind @ (NodeKind::Variable | NodeKind::Null) => Err(NodeError::NotAnRdfTerm(kind)),
        }
    }

    /// Intern an `oxrdf` term in `storage`.
    ///
    /// Quoted triples have no counterpart and are rejected.
    pub fn from_oxrdf(term: &OxTerm, storage: &NodeStorage) -> NodeResult<Node> {
        let id = match term {
            OxTerm::NamedNode(iri) => storage.get_iri(iri.as_str()).1,
            OxTerm::BlankNode(bnode) => storage.get_bnode(bnode.as_str()).1,
            OxTerm::Literal(literal) => match literal.language() {
                Some(tag) => storage.get_lang_literal(literal.value(), tag).1,
                None => {
                    storage
                        .get_typed_literal(literal.value(), literal.datatype().as_str())?
                        .1
                }
            },
            #[allow(unreachable_patterns)]
            other => return Err(NodeError::UnsupportedTerm(other.to_string())),
        };
        Ok(Node::from_handle(BackendNodeHandle::new(id, storage)))
    }
}
