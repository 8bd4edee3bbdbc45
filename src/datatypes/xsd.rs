//! Built-in XSD datatypes
//!
//! Nothing here registers itself. Call [`register_all`] (or use
//! [`DatatypeRegistry::with_xsd_datatypes`]) while building a registry.

use super::{Datatype, DatatypeError, DatatypeRegistry, DatatypeResult};

pub const RDF_LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_INT: &str = "http://www.w3.org/2001/XMLSchema#int";
pub const XSD_DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
pub const XSD_FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

/// Register every built-in datatype with `registry`
pub fn register_all(registry: &DatatypeRegistry) {
    registry.add_type::<String>();
    registry.add_type::<bool>();
    registry.add_type::<i64>();
    registry.add_type::<i32>();
    registry.add_type::<f64>();
    registry.add_type::<f32>();
}

impl Datatype for String {
    const IRI: &'static str = XSD_STRING;

    fn from_lexical(lexical: &str) -> DatatypeResult<Self> {
        Ok(lexical.to_string())
    }

    fn to_lexical(&self) -> String {
        self.clone()
    }
}

impl Datatype for bool {
    const IRI: &'static str = XSD_BOOLEAN;

    fn from_lexical(lexical: &str) -> DatatypeResult<Self> {
        match lexical.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(DatatypeError::parse(
                Self::IRI,
                lexical,
                "expected one of true, false, 1, 0",
            )),
        }
    }

    fn to_lexical(&self) -> String {
        self.to_string()
    }
}

macro_rules! integer_datatype {
    ($ty:ty, $iri:expr) => {
        impl Datatype for $ty {
            const IRI: &'static str = $iri;

            fn from_lexical(lexical: &str) -> DatatypeResult<Self> {
                let trimmed = lexical.trim();
                // `str::parse` accepts a leading '+' already.
                trimmed
                    .parse::<$ty>()
                    .map_err(|e| DatatypeError::parse(Self::IRI, lexical, e))
            }

            fn to_lexical(&self) -> String {
                self.to_string()
            }
        }
    };
}

integer_datatype!(i64, XSD_INTEGER);
integer_datatype!(i32, XSD_INT);

macro_rules! float_datatype {
    ($ty:ty, $iri:expr) => {
        impl Datatype for $ty {
            const IRI: &'static str = $iri;

            fn from_lexical(lexical: &str) -> DatatypeResult<Self> {
                match lexical.trim() {
                    "INF" | "+INF" => Ok(<$ty>::INFINITY),
                    "-INF" => Ok(<$ty>::NEG_INFINITY),
                    "NaN" => Ok(<$ty>::NAN),
                    // Rust would also accept "inf"/"nan"; XSD does not.
                    other
                        if other
                            .chars()
                            .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') =>
                    {
                        Err(DatatypeError::parse(
                            Self::IRI,
                            lexical,
                            "not a decimal or scientific number",
                        ))
                    }
                    other => other
                        .parse::<$ty>()
                        .map_err(|e| DatatypeError::parse(Self::IRI, lexical, e)),
                }
            }

            fn to_lexical(&self) -> String {
                if self.is_nan() {
                    "NaN".to_string()
                } else if self.is_infinite() {
                    let spelled = if self.is_sign_positive() { "INF" } else { "-INF" };
                    spelled.to_string()
                } else {
                    self.to_string()
                }
            }
        }
    };
}

float_datatype!(f64, XSD_DOUBLE);
float_datatype!(f32, XSD_FLOAT);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all() {
        let registry = DatatypeRegistry::new();
        register_all(&registry);
        assert_eq!(registry.len(), 6);
        for iri in [XSD_STRING, XSD_BOOLEAN, XSD_INTEGER, XSD_INT, XSD_DOUBLE, XSD_FLOAT] {
            assert!(registry.contains(iri), "missing {}", iri);
        }
        assert!(!registry.contains(RDF_LANG_STRING));
    }

    #[test]
    fn test_boolean() {
        assert!(bool::from_lexical("1").unwrap());
        assert!(!bool::from_lexical(" false ").unwrap());
        assert!(bool::from_lexical("yes").is_err());
        assert_eq!(true.to_lexical(), "true");
    }

    #[test]
    fn test_integer() {
        assert_eq!(i64::from_lexical("+042").unwrap(), 42);
        assert_eq!(i64::from_lexical("-7").unwrap().to_lexical(), "-7");
        assert!(i64::from_lexical("4.2").is_err());
        assert!(i32::from_lexical("99999999999").is_err());
    }

    #[test]
    fn test_double_special_values() {
        assert_eq!(f64::from_lexical("INF").unwrap(), f64::INFINITY);
        assert_eq!(f64::from_lexical("-INF").unwrap().to_lexical(), "-INF");
        assert!(f64::from_lexical("NaN").unwrap().is_nan());
        assert!(f64::from_lexical("inf").is_err());
        assert!(f64::from_lexical("nan").is_err());
    }

    #[test]
    fn test_double_canonical_form() {
        assert_eq!(f64::from_lexical("1.50").unwrap().to_lexical(), "1.5");
        assert_eq!(f64::from_lexical("1e3").unwrap().to_lexical(), "1000");
        assert_eq!(f32::from_lexical("0.25").unwrap().to_lexical(), "0.25");
    }
}
