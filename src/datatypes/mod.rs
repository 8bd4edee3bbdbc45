//! Literal datatype registry
//!
//! Maps datatype IRIs to a parse/render pair for the native type that represents
//! the datatype's value space. Storages consult the registry when rendering typed
//! literals; the registry itself knows nothing about storages.
//!
//! New datatypes are added by implementing [`Datatype`] and registering the type
//! during startup:
//!
//! ```rust
//! use rdf_termstore::datatypes::{Datatype, DatatypeError, DatatypeRegistry, DatatypeResult};
//!
//! struct Celsius(f64);
//!
//! impl Datatype for Celsius {
//!     const IRI: &'static str = "http://example.org#Celsius";
//!
//!     fn from_lexical(lexical: &str) -> DatatypeResult<Self> {
//!         lexical
//!             .trim()
//!             .parse()
//!             .map(Celsius)
//!             .map_err(|e| DatatypeError::parse(Self::IRI, lexical, e))
//!     }
//!
//!     fn to_lexical(&self) -> String {
//!         format!("{:.1}", self.0)
//!     }
//! }
//!
//! let registry = DatatypeRegistry::with_xsd_datatypes();
//! registry.add_type::<Celsius>();
//! assert!(registry.get_factory("http://example.org#Celsius").is_some());
//! ```

mod registry;
pub mod xsd;

pub use registry::{
    Datatype, DatatypeEntry, DatatypeRegistry, DatatypeValue, FactoryFn, ToStringFn,
};

use thiserror::Error;

/// Datatype errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatatypeError {
    /// Lexical form is not in the datatype's lexical space
    #[error("Invalid lexical form {lexical:?} for datatype <{datatype}>: {reason}")]
    Parse {
        datatype: String,
        lexical: String,
        reason: String,
    },

    /// A renderer was handed a value of a different native type
    #[error("Value for datatype <{datatype}> is not a {expected}")]
    ValueTypeMismatch {
        datatype: String,
        expected: &'static str,
    },
}

impl DatatypeError {
    pub fn parse(datatype: &str, lexical: &str, reason: impl ToString) -> Self {
        DatatypeError::Parse {
            datatype: datatype.to_string(),
            lexical: lexical.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type DatatypeResult<T> = Result<T, DatatypeError>;
