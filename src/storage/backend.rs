//! Interned term records
//!
//! Records are immutable once a storage has interned them. Each one knows how to
//! render itself in N-Triples style via `n_string()`.

use super::id::NodeId;
use crate::datatypes::xsd;
use std::cmp::Ordering;
use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};

/// IRI record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IriBackend {
    iri: String,
}

impl IriBackend {
    pub fn new(iri: impl Into<String>) -> Self {
        Self { iri: iri.into() }
    }

    pub fn identifier(&self) -> &str {
        &self.iri
    }

    pub fn n_string(&self) -> String {
        format!("<{}>", self.iri)
    }
}

/// Blank node record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlankNodeBackend {
    label: String,
}

impl BlankNodeBackend {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.label
    }

    pub fn n_string(&self) -> String {
        format!("_:{}", self.label)
    }
}

/// Query variable record
///
/// Ordered by name first, then anonymity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableBackend {
    name: String,
    anonymous: bool,
}

impl VariableBackend {
    pub fn new(name: impl Into<String>, anonymous: bool) -> Self {
        Self {
            name: name.into(),
            anonymous,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn n_string(&self) -> String {
        if self.anonymous {
            format!("_:{}", self.name)
        } else {
            format!("?{}", self.name)
        }
    }
}

/// Literal record
///
/// `datatype_id` points at the datatype IRI inside the owning storage. It is not
/// part of equality, hashing or ordering: two literal records are the same term
/// when lexical form, datatype IRI and language tag agree, whichever storage
/// they live in.
#[derive(Debug, Clone)]
pub struct LiteralBackend {
    lexical_form: String,
    datatype: String,
    language_tag: Option<String>,
    datatype_id: NodeId,
}

impl LiteralBackend {
    pub(crate) fn new(
        lexical_form: impl Into<String>,
        datatype: impl Into<String>,
        language_tag: Option<String>,
        datatype_id: NodeId,
    ) -> Self {
        Self {
            lexical_form: lexical_form.into(),
            datatype: datatype.into(),
            language_tag,
            datatype_id,
        }
    }

    pub fn lexical_form(&self) -> &str {
        &self.lexical_form
    }

    pub fn datatype(&self) -> &str {
        &self.datatype
    }

    pub fn language_tag(&self) -> Option<&str> {
        self.language_tag.as_deref()
    }

    pub fn datatype_id(&self) -> NodeId {
        self.datatype_id
    }

    /// Rendering of the stored lexical form
    pub fn n_string(&self) -> String {
        self.n_string_with(&self.lexical_form)
    }

    /// Rendering with `lexical_form` in place of the stored one
    pub fn n_string_with(&self, lexical_form: &str) -> String {
        let mut out = String::with_capacity(lexical_form.len() + self.datatype.len() + 6);
        out.push('"');
        escape_lexical(lexical_form, &mut out);
        out.push('"');

        if let Some(tag) = &self.language_tag {
            out.push('@');
            out.push_str(tag);
        } else if self.datatype != xsd::XSD_STRING {
            // Writing into a String never fails.
            let _ = write!(out, "^^<{}>", self.datatype);
        }
        out
    }

    fn key(&self) -> (&str, &str, Option<&str>) {
        (
            &self.lexical_form,
            &self.datatype,
            self.language_tag.as_deref(),
        )
    }
}

impl PartialEq for LiteralBackend {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for LiteralBackend {}

impl Hash for LiteralBackend {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for LiteralBackend {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LiteralBackend {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for LiteralBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.n_string())
    }
}

fn escape_lexical(lexical: &str, out: &mut String) {
    for c in lexical.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
}
