use rdf_termstore::datatypes::{xsd, FactoryFn, ToStringFn};
use rdf_termstore::{
    Datatype, DatatypeError, DatatypeRegistry, DatatypeResult, DatatypeValue, Literal, Node,
    NodeStorage,
};
use std::sync::Arc;

const TEMP: &str = "http://example.org#Temp";

struct Temperature(f64);

impl Datatype for Temperature {
    const IRI: &'static str = TEMP;

    fn from_lexical(lexical: &str) -> DatatypeResult<Self> {
        lexical
            .trim()
            .parse()
            .map(Temperature)
            .map_err(|e| DatatypeError::parse(TEMP, lexical, e))
    }

    fn to_lexical(&self) -> String {
        format!("{:.1}", self.0)
    }
}

fn tagged_factory(tag: u32) -> FactoryFn {
    Arc::new(move |_: &str| Ok(DatatypeValue::new("urn:example:unregistered", tag)))
}

fn tag_to_string() -> ToStringFn {
    Arc::new(|value: &DatatypeValue| {
        value
            .downcast_ref::<u32>()
            .map(|tag| format!("tag-{}", tag))
            .ok_or(DatatypeError::ValueTypeMismatch {
                datatype: "urn:example:unregistered".to_string(),
                expected: "u32",
            })
    })
}

#[test]
fn test_lookup_before_and_after_add() {
    let registry = DatatypeRegistry::new();
    assert!(registry.get_factory("urn:example:unregistered").is_none());

    let factory = tagged_factory(1);
    registry.add("urn:example:unregistered", factory.clone(), tag_to_string());

    let found = registry.get_factory("urn:example:unregistered").unwrap();
    assert!(Arc::ptr_eq(&found, &factory));
}

#[test]
fn test_upsert_keeps_one_entry_bound_to_latest() {
    let registry = DatatypeRegistry::with_xsd_datatypes();
    let before = registry.len();

    registry.add("urn:example:unregistered", tagged_factory(1), tag_to_string());
    let second_to_string = tag_to_string();
    registry.add("urn:example:unregistered", tagged_factory(2), second_to_string.clone());

    assert_eq!(registry.len(), before + 1);
    let matching: Vec<_> = registry
        .registered_datatypes()
        .into_iter()
        .filter(|entry| entry.datatype_iri == "urn:example:unregistered")
        .collect();
    assert_eq!(matching.len(), 1);
    assert!(Arc::ptr_eq(&matching[0].to_string, &second_to_string));

    let value = registry.parse("urn:example:unregistered", "x").unwrap().unwrap();
    assert_eq!(registry.render(&value).unwrap().unwrap(), "tag-2");
}

#[test]
fn test_registered_datatypes_sorted() {
    let registry = DatatypeRegistry::with_xsd_datatypes();
    registry.add_type::<Temperature>();

    let names: Vec<String> = registry
        .registered_datatypes()
        .into_iter()
        .map(|entry| entry.datatype_iri)
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(names.iter().any(|name| name == TEMP));
}

#[test]
fn test_registry_governs_canonical_output() {
    let registry = DatatypeRegistry::with_xsd_datatypes();
    registry.add_type::<Temperature>();
    let storage = NodeStorage::with_registry(Arc::new(registry));

    let exact = Literal::new_typed_in("36.6", TEMP, &storage).unwrap();
    assert_eq!(exact.to_string(), "\"36.6\"^^<http://example.org#Temp>");

    let padded = Literal::new_typed_in("36.60", TEMP, &storage).unwrap();
    assert_eq!(padded.lexical_form(), "36.60");
    assert_eq!(padded.canonical_lexical_form(), "36.6");
    assert_eq!(padded.to_string(), "\"36.6\"^^<http://example.org#Temp>");
    assert_ne!(padded, exact);
    assert_ne!(padded.id(), exact.id());

    let value = exact.value().unwrap().unwrap();
    assert!(value.is::<Temperature>());
}

#[test]
fn test_unknown_datatype_is_recoverable() {
    let storage = NodeStorage::new();
    let lit = Literal::new_typed_in("36.60", TEMP, &storage).unwrap();

    assert_eq!(lit.to_string(), "\"36.60\"^^<http://example.org#Temp>");
    assert!(lit.value().unwrap().is_none());
    assert!(storage.registry().get_to_string(TEMP).is_none());
}

#[test]
fn test_registration_after_interning_keeps_ids() {
    let registry = Arc::new(DatatypeRegistry::new());
    let storage = NodeStorage::with_registry(Arc::clone(&registry));

    let before = Literal::new_typed_in("36.60", TEMP, &storage).unwrap();
    assert_eq!(before.to_string(), "\"36.60\"^^<http://example.org#Temp>");

    registry.add_type::<Temperature>();
    let after = Literal::new_typed_in("36.60", TEMP, &storage).unwrap();
    assert_eq!(after.id(), before.id());
    assert_eq!(after, before);
    assert_eq!(before.to_string(), "\"36.6\"^^<http://example.org#Temp>");
}

#[test]
fn test_registries_do_not_affect_equality() {
    let plain = NodeStorage::with_registry(Arc::new(DatatypeRegistry::new()));
    let registry = DatatypeRegistry::new();
    registry.add_type::<Temperature>();
    let aware = NodeStorage::with_registry(Arc::new(registry));

    let raw: Node = Literal::new_typed_in("36.60", TEMP, &plain).unwrap().into();
    let same: Node = Literal::new_typed_in("36.60", TEMP, &aware).unwrap().into();
    assert_eq!(raw, same);

    let moved = raw.to_node_storage(&aware);
    assert_eq!(moved, raw);
    assert_eq!(moved.backend_handle(), same.backend_handle());
    assert_eq!(raw.to_string(), "\"36.60\"^^<http://example.org#Temp>");
    assert_eq!(moved.to_string(), "\"36.6\"^^<http://example.org#Temp>");
}

#[test]
fn test_xsd_values() {
    let storage = NodeStorage::new();
    let double = Literal::new_typed_in("1.50", xsd::XSD_DOUBLE, &storage).unwrap();
    assert_eq!(double.lexical_form(), "1.50");
    assert_eq!(double.canonical_lexical_form(), "1.5");
    assert_eq!(double.value_as::<f64>().unwrap(), Some(1.5));

    let flag = Literal::from_value(&false, &storage).unwrap();
    assert_eq!(flag.value_as::<bool>().unwrap(), Some(false));
}
