//! Datatype registry implementation

use super::{xsd, DatatypeError, DatatypeResult};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, info};

/// Native value type backing a literal datatype
///
/// `to_lexical` must produce a string that `from_lexical` accepts.
pub trait Datatype: Sized + Send + Sync + 'static {
    /// Datatype IRI, the registry key
    const IRI: &'static str;

    /// Parse a lexical form into a native value
    fn from_lexical(lexical: &str) -> DatatypeResult<Self>;

    /// Canonical lexical form of a native value
    fn to_lexical(&self) -> String;
}

/// Type-erased literal value produced by a registered factory
pub struct DatatypeValue {
    datatype_iri: String,
    value: Box<dyn Any + Send + Sync>,
}

impl DatatypeValue {
    pub fn new<T: Any + Send + Sync>(datatype_iri: impl Into<String>, value: T) -> Self {
        Self {
            datatype_iri: datatype_iri.into(),
            value: Box::new(value),
        }
    }

    /// IRI of the datatype whose factory produced this value
    pub fn datatype_iri(&self) -> &str {
        &self.datatype_iri
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Take the native value out, or get `self` back if `T` is the wrong type
    pub fn downcast<T: Any>(self) -> Result<T, Self> {
        let Self {
            datatype_iri,
            value,
        } = self;
        match value.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(value) => Err(Self {
                datatype_iri,
                value,
            }),
        }
    }
}

impl fmt::Debug for DatatypeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatatypeValue")
            .field("datatype_iri", &self.datatype_iri)
            .finish_non_exhaustive()
    }
}

/// Builds a value from its lexical form
pub type FactoryFn = Arc<dyn Fn(&str) -> DatatypeResult<DatatypeValue> + Send + Sync>;

/// Renders a value to its canonical lexical form
pub type ToStringFn = Arc<dyn Fn(&DatatypeValue) -> DatatypeResult<String> + Send + Sync>;

/// One registered datatype
#[derive(Clone)]
pub struct DatatypeEntry {
    pub datatype_iri: String,
    pub factory: FactoryFn,
    pub to_string: ToStringFn,
}

impl fmt::Debug for DatatypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatatypeEntry")
            .field("datatype_iri", &self.datatype_iri)
            .finish_non_exhaustive()
    }
}

/// Table of datatype IRI -> (factory, to_string), sorted by IRI
///
/// Registration is explicit: build a registry at startup, add every supported
/// datatype, then hand it (as an `Arc`) to the storages that need it. Lookups
/// take a read lock and clone the function handles out, so factories run
/// without any registry lock held.
pub struct DatatypeRegistry {
    entries: RwLock<Vec<DatatypeEntry>>,
}

impl DatatypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Create a registry holding the built-in XSD datatypes
    pub fn with_xsd_datatypes() -> Self {
        let registry = Self::new();
        xsd::register_all(&registry);
        registry
    }

    /// Process-wide registry with the built-in XSD datatypes, built on first use
    pub fn shared() -> Arc<DatatypeRegistry> {
        static SHARED: OnceLock<Arc<DatatypeRegistry>> = OnceLock::new();
        SHARED
            .get_or_init(|| {
                let registry = DatatypeRegistry::with_xsd_datatypes();
                info!(
                    "Shared datatype registry initialized with {} datatypes",
                    registry.len()
                );
                Arc::new(registry)
            })
            .clone()
    }

    /// Register a datatype, replacing any existing entry for the same IRI
    pub fn add(&self, datatype_iri: impl Into<String>, factory: FactoryFn, to_string: ToStringFn) {
        let datatype_iri = datatype_iri.into();
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        match entries.binary_search_by(|entry| entry.datatype_iri.as_str().cmp(&datatype_iri)) {
            Ok(pos) => {
                let entry = &mut entries[pos];
                entry.factory = factory;
                entry.to_string = to_string;
                debug!("Replaced datatype <{}>", datatype_iri);
            }
            Err(pos) => {
                debug!("Registered datatype <{}>", datatype_iri);
                entries.insert(
                    pos,
                    DatatypeEntry {
                        datatype_iri,
                        factory,
                        to_string,
                    },
                );
            }
        }
    }

    /// Register native type `T` under `T::IRI`
    pub fn add_type<T: Datatype>(&self) {
        let factory: FactoryFn = Arc::new(|lexical: &str| {
            T::from_lexical(lexical).map(|value| DatatypeValue::new(T::IRI, value))
        });
        let to_string: ToStringFn = Arc::new(|value: &DatatypeValue| {
            value
                .downcast_ref::<T>()
                .map(T::to_lexical)
                .ok_or_else(|| DatatypeError::ValueTypeMismatch {
                    datatype: T::IRI.to_string(),
                    expected: type_name::<T>(),
                })
        });
        self.add(T::IRI, factory, to_string);
    }

    /// Snapshot of every entry, sorted by datatype IRI
    pub fn registered_datatypes(&self) -> Vec<DatatypeEntry> {
        self.read_entries().clone()
    }

    pub fn get_factory(&self, datatype_iri: &str) -> Option<FactoryFn> {
        self.find(datatype_iri).map(|entry| entry.factory)
    }

    pub fn get_to_string(&self, datatype_iri: &str) -> Option<ToStringFn> {
        self.find(datatype_iri).map(|entry| entry.to_string)
    }

    pub fn contains(&self, datatype_iri: &str) -> bool {
        self.find(datatype_iri).is_some()
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    /// Build a value from a lexical form. `None` if the datatype is not registered.
    pub fn parse(&self, datatype_iri: &str, lexical: &str) -> Option<DatatypeResult<DatatypeValue>> {
        self.get_factory(datatype_iri).map(|factory| factory(lexical))
    }

    /// Render a value with the renderer of its own datatype. `None` if the
    /// datatype is not registered.
    pub fn render(&self, value: &DatatypeValue) -> Option<DatatypeResult<String>> {
        self.get_to_string(value.datatype_iri())
            .map(|to_string| to_string(value))
    }

    /// Parse then re-render a lexical form. `None` if the datatype is not registered.
    pub fn canonicalize(&self, datatype_iri: &str, lexical: &str) -> Option<DatatypeResult<String>> {
        let entry = self.find(datatype_iri)?;
        Some((entry.factory)(lexical).and_then(|value| (entry.to_string)(&value)))
    }

    fn find(&self, datatype_iri: &str) -> Option<DatatypeEntry> {
        let entries = self.read_entries();
        entries
            .binary_search_by(|entry| entry.datatype_iri.as_str().cmp(datatype_iri))
            .ok()
            .map(|pos| entries[pos].clone())
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, Vec<DatatypeEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DatatypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DatatypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.read_entries();
        f.debug_list()
            .entries(entries.iter().map(|entry| entry.datatype_iri.as_str()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Celsius(f64);

    impl Datatype for Celsius {
        const IRI: &'static str = "http://example.org#Celsius";

        fn from_lexical(lexical: &str) -> DatatypeResult<Self> {
            lexical
                .trim()
                .parse()
                .map(Celsius)
                .map_err(|e| DatatypeError::parse(Self::IRI, lexical, e))
        }

        fn to_lexical(&self) -> String {
            format!("{:.1}", self.0)
        }
    }

    fn constant_factory(tag: &'static str) -> FactoryFn {
        Arc::new(move |_: &str| Ok(DatatypeValue::new("urn:example:dt", tag)))
    }

    fn identity_to_string() -> ToStringFn {
        Arc::new(|value: &DatatypeValue| {
            Ok(value.downcast_ref::<&'static str>().copied().unwrap_or_default().to_string())
        })
    }

    #[test]
    fn test_empty_registry() {
        let registry = DatatypeRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get_factory("urn:example:dt").is_none());
        assert!(registry.get_to_string("urn:example:dt").is_none());
    }

    #[test]
    fn test_entries_stay_sorted() {
        let registry = DatatypeRegistry::new();
        for iri in ["urn:c", "urn:a", "urn:b"] {
            registry.add(iri, constant_factory("x"), identity_to_string());
        }
        let names: Vec<String> = registry
            .registered_datatypes()
            .into_iter()
            .map(|entry| entry.datatype_iri)
            .collect();
        assert_eq!(names, vec!["urn:a", "urn:b", "urn:c"]);
    }

    #[test]
    fn test_upsert_replaces_functions() {
        let registry = DatatypeRegistry::new();
        registry.add("urn:example:dt", constant_factory("first"), identity_to_string());
        registry.add("urn:example:dt", constant_factory("second"), identity_to_string());

        assert_eq!(registry.len(), 1);
        let value = registry.parse("urn:example:dt", "ignored").unwrap().unwrap();
        assert_eq!(value.downcast_ref::<&'static str>(), Some(&"second"));
    }

    #[test]
    fn test_add_type_roundtrip() {
        let registry = DatatypeRegistry::new();
        registry.add_type::<Celsius>();

        let value = registry.parse(Celsius::IRI, "36.60").unwrap().unwrap();
        assert_eq!(value.datatype_iri(), Celsius::IRI);
        assert!(value.is::<Celsius>());
        assert_eq!(registry.render(&value).unwrap().unwrap(), "36.6");
    }

    #[test]
    fn test_render_wrong_value_type() {
        let registry = DatatypeRegistry::new();
        registry.add_type::<Celsius>();

        let bogus = DatatypeValue::new(Celsius::IRI, 12u8);
        let err = registry.render(&bogus).unwrap().unwrap_err();
        assert!(matches!(err, DatatypeError::ValueTypeMismatch { .. }));
    }

    #[test]
    fn test_parse_failure_is_reported() {
        let registry = DatatypeRegistry::new();
        registry.add_type::<Celsius>();

        let err = registry.parse(Celsius::IRI, "warm").unwrap().unwrap_err();
        assert!(matches!(err, DatatypeError::Parse { .. }));
        assert!(registry.canonicalize(Celsius::IRI, "warm").unwrap().is_err());
    }

    #[test]
    fn test_downcast_returns_value_on_mismatch() {
        let value = DatatypeValue::new("urn:example:dt", 5i64);
        let value = value.downcast::<String>().unwrap_err();
        assert_eq!(value.downcast::<i64>().unwrap(), 5);
    }

    #[test]
    fn test_shared_registry_is_singleton() {
        let a = DatatypeRegistry::shared();
        let b = DatatypeRegistry::shared();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.contains(xsd::XSD_INTEGER));
    }
}
