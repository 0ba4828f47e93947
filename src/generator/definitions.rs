//! Object definitions for record types, including every nested record they reach.

use std::{any::TypeId, collections::HashMap};

use indexmap::IndexMap;
use tracing::warn;

use crate::{
    GenerateError, GenerateResult,
    config::CyclePolicy,
    contract::{RecordDescriptor, Shape},
    openapi::Schema,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Two distinct types registered under the same definition name.
pub struct NameCollision {
    /// Shared definition name.
    pub name: String,
    /// Identity that owned the name before.
    pub previous: TypeId,
    /// Identity that overwrote it.
    pub current: TypeId,
}

#[derive(Debug)]
/// Builds object definitions for records and everything they reference.
///
/// Definitions are keyed by type name only; registering a different type under a taken name
/// replaces the earlier definition and is reported through [`DefinitionBuilder::collisions`].
pub struct DefinitionBuilder {
    tag_name: String,
    cycle_policy: CyclePolicy,
    definitions: IndexMap<String, Schema>,
    owners: HashMap<String, TypeId>,
    in_progress: Vec<RecordDescriptor>,
    collisions: Vec<NameCollision>,
}

impl DefinitionBuilder {
    /// Empty builder reading field names from the `tag_name` namespace.
    pub fn new(tag_name: impl Into<String>, cycle_policy: CyclePolicy) -> Self {
        Self {
            tag_name: tag_name.into(),
            cycle_policy,
            definitions: IndexMap::new(),
            owners: HashMap::new(),
            in_progress: Vec::new(),
            collisions: Vec::new(),
        }
    }

    /// Tag namespace supplying exposed field names.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Definitions registered so far.
    pub fn definitions(&self) -> &IndexMap<String, Schema> {
        &self.definitions
    }

    /// Name collisions detected so far.
    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    /// Hand over the accumulated definitions.
    pub fn into_definitions(self) -> IndexMap<String, Schema> {
        self.definitions
    }

    /// Build the definition of `record` and of every record it reaches, then store them.
    ///
    /// Nested definitions are stored before the record that references them. A record that is
    /// reached again while still being built is handled according to the [`CyclePolicy`].
    pub fn register(&mut self, record: RecordDescriptor) -> GenerateResult<()> {
        if let Some(start) = self.in_progress.iter().position(|r| *r == record) {
            let chain: Vec<String> = self.in_progress[start..]
                .iter()
                .chain(std::iter::once(&record))
                .map(|r| r.name().to_string())
                .collect();
            return match self.cycle_policy {
                CyclePolicy::Reject => Err(GenerateError::CyclicType { chain }),
                CyclePolicy::Reference => {
                    warn!(
                        record = record.name(),
                        chain = %chain.join(" -> "),
                        "cyclic type reference; emitting $ref without descending"
                    );
                    Ok(())
                }
            };
        }

        self.in_progress.push(record);
        let built = self.build(&record);
        self.in_progress.pop();

        self.store(&record, built?);
        Ok(())
    }

    fn build(&mut self, record: &RecordDescriptor) -> GenerateResult<Schema> {
        let mut def = Schema::object();
        for field in record.fields() {
            let Some(name) = field.exposed_name(&self.tag_name) else {
                continue;
            };
            let property = self.property(record, name, field.shape())?;
            def.set_property(name, property);
        }
        Ok(def)
    }

    /// Apply the wrapping mode of the outermost shape around the element schema.
    fn property(
        &mut self,
        owner: &RecordDescriptor,
        field: &str,
        shape: &Shape,
    ) -> GenerateResult<Schema> {
        match shape {
            Shape::Optional(inner) => self.element(owner, field, inner),
            Shape::Sequence(inner) => Ok(Schema::array(self.element(owner, field, inner)?)),
            other => self.element(owner, field, other),
        }
    }

    fn element(
        &mut self,
        owner: &RecordDescriptor,
        field: &str,
        shape: &Shape,
    ) -> GenerateResult<Schema> {
        let schema = match shape {
            Shape::Text => Schema::string(),
            // Byte-sized integers are described as binary arrays.
            Shape::Int8 | Shape::Uint8 => Schema::array(Schema::int8()),
            Shape::Int32 | Shape::Uint32 => Schema::int32(),
            Shape::Int | Shape::Uint | Shape::Int64 | Shape::Uint64 => Schema::int64(),
            Shape::Float32 => Schema::float32(),
            Shape::Float64 => Schema::float64(),
            Shape::Bool => Schema::boolean(),
            Shape::Record(nested) => {
                self.register(*nested)?;
                Schema::reference(nested.name())
            }
            Shape::Any => Schema::object(),
            Shape::Optional(inner) => return self.element(owner, field, inner),
            Shape::Int16
            | Shape::Uint16
            | Shape::Sequence(_)
            | Shape::Map(_, _)
            | Shape::Unsupported(_) => {
                warn!(
                    record = owner.name(),
                    field,
                    kind = shape.kind(),
                    "unsupported field kind; falling back to string schema"
                );
                Schema::string()
            }
        };
        Ok(schema)
    }

    fn store(&mut self, record: &RecordDescriptor, def: Schema) {
        let name = record.name();
        if let Some(previous) = self.owners.insert(name.to_string(), record.id()) {
            if previous != record.id() {
                warn!(
                    definition = name,
                    "distinct types share a definition name; overwriting previous definition"
                );
                self.collisions.push(NameCollision {
                    name: name.to_string(),
                    previous,
                    current: record.id(),
                });
            }
        }
        self.definitions.insert(name.to_string(), def);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::{Value, json};

    use super::*;
    use crate::{
        contract::{FieldDescriptor, Record},
        describe_record,
    };

    struct Everything;
    struct Inner;
    struct Parent;
    struct OtherParent;

    impl Record for Everything {
        fn type_name() -> &'static str {
            "Everything"
        }

        fn fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::of::<String>("text").tag("json", "text"),
                FieldDescriptor::of::<i8>("small").tag("json", "small"),
                FieldDescriptor::of::<u8>("byte").tag("json", "byte"),
                FieldDescriptor::of::<i32>("i32").tag("json", "i32"),
                FieldDescriptor::of::<u32>("u32").tag("json", "u32"),
                FieldDescriptor::of::<isize>("int").tag("json", "int"),
                FieldDescriptor::of::<usize>("uint").tag("json", "uint"),
                FieldDescriptor::of::<i64>("i64").tag("json", "i64"),
                FieldDescriptor::of::<u64>("u64").tag("json", "u64"),
                FieldDescriptor::of::<f32>("f32").tag("json", "f32"),
                FieldDescriptor::of::<f64>("f64").tag("json", "f64"),
                FieldDescriptor::of::<bool>("flag").tag("json", "flag,omitempty"),
                FieldDescriptor::of::<Value>("any").tag("json", "any"),
                FieldDescriptor::of::<Option<Option<i32>>>("maybe").tag("json", "maybe"),
                FieldDescriptor::of::<Vec<String>>("names").tag("json", "names"),
                FieldDescriptor::of::<Vec<u8>>("blob").tag("json", "blob"),
                FieldDescriptor::of::<u16>("port").tag("json", "port"),
                FieldDescriptor::of::<BTreeMap<String, i64>>("labels").tag("json", "labels"),
                FieldDescriptor::of::<String>("hidden"),
            ]
        }
    }

    impl Record for Inner {
        fn type_name() -> &'static str {
            "Inner"
        }

        fn fields() -> Vec<FieldDescriptor> {
            vec![FieldDescriptor::of::<String>("value").tag("json", "value")]
        }
    }

    impl Record for Parent {
        fn type_name() -> &'static str {
            "Parent"
        }

        fn fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::of::<Inner>("inner").tag("json", "inner"),
                FieldDescriptor::of::<Vec<Inner>>("inners").tag("json", "inners"),
                FieldDescriptor::of::<Option<Inner>>("maybe_inner").tag("json", "maybeInner"),
            ]
        }
    }

    impl Record for OtherParent {
        fn type_name() -> &'static str {
            "OtherParent"
        }

        fn fields() -> Vec<FieldDescriptor> {
            vec![FieldDescriptor::of::<Inner>("inner").tag("json", "inner")]
        }
    }

    describe_record!(Inner);

    fn build<T: Record>() -> DefinitionBuilder {
        let mut builder = DefinitionBuilder::new("json", CyclePolicy::Reject);
        builder.register(RecordDescriptor::of::<T>()).unwrap();
        builder
    }

    fn property(builder: &DefinitionBuilder, def: &str, name: &str) -> Value {
        serde_json::to_value(&builder.definitions()[def].properties[name]).unwrap()
    }

    #[test]
    fn primitive_kinds_map_to_table() {
        let b = build::<Everything>();
        let int8_array = json!({"type": "array", "items": {"type": "integer", "format": "int8"}});

        assert_eq!(property(&b, "Everything", "text"), json!({"type": "string"}));
        assert_eq!(property(&b, "Everything", "small"), int8_array);
        assert_eq!(property(&b, "Everything", "byte"), int8_array);
        for name in ["i32", "u32"] {
            assert_eq!(
                property(&b, "Everything", name),
                json!({"type": "integer", "format": "int32"})
            );
        }
        for name in ["int", "uint", "i64", "u64"] {
            assert_eq!(
                property(&b, "Everything", name),
                json!({"type": "integer", "format": "int64"})
            );
        }
        assert_eq!(
            property(&b, "Everything", "f32"),
            json!({"type": "number", "format": "float"})
        );
        assert_eq!(
            property(&b, "Everything", "f64"),
            json!({"type": "number", "format": "double"})
        );
        assert_eq!(property(&b, "Everything", "flag"), json!({"type": "boolean"}));
        assert_eq!(property(&b, "Everything", "any"), json!({"type": "object"}));
    }

    #[test]
    fn optional_levels_are_unwrapped() {
        let b = build::<Everything>();
        assert_eq!(
            property(&b, "Everything", "maybe"),
            json!({"type": "integer", "format": "int32"})
        );
    }

    #[test]
    fn collections_wrap_as_arrays() {
        let b = build::<Everything>();
        assert_eq!(
            property(&b, "Everything", "names"),
            json!({"type": "array", "items": {"type": "string"}})
        );
        assert_eq!(
            property(&b, "Everything", "blob"),
            json!({
                "type": "array",
                "items": {"type": "array", "items": {"type": "integer", "format": "int8"}}
            })
        );
    }

    #[test]
    fn unsupported_kinds_fall_back_to_string() {
        let b = build::<Everything>();
        assert_eq!(property(&b, "Everything", "port"), json!({"type": "string"}));
        assert_eq!(property(&b, "Everything", "labels"), json!({"type": "string"}));
    }

    struct Layered;

    impl Record for Layered {
        fn type_name() -> &'static str {
            "Layered"
        }

        fn fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::of::<Vec<Vec<String>>>("grid").tag("json", "grid"),
                FieldDescriptor::of::<Option<Vec<String>>>("maybe").tag("json", "maybe"),
                FieldDescriptor::of::<String>("unnamed").tag("json", ",omitempty"),
                FieldDescriptor::of::<String>("spaced").tag("json", "  ,string"),
            ]
        }
    }

    #[test]
    fn collections_past_the_first_level_fall_back_to_string() {
        let b = build::<Layered>();
        assert_eq!(
            property(&b, "Layered", "grid"),
            json!({"type": "array", "items": {"type": "string"}})
        );
        assert_eq!(property(&b, "Layered", "maybe"), json!({"type": "string"}));
    }

    #[test]
    fn blank_tag_names_are_skipped() {
        let b = build::<Layered>();
        let properties = &b.definitions()["Layered"].properties;
        assert!(!properties.contains_key(""));
        let names: Vec<_> = properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["grid", "maybe"]);
    }

    #[test]
    fn untagged_fields_are_skipped() {
        let b = build::<Everything>();
        assert!(!b.definitions()["Everything"].properties.contains_key("hidden"));
        assert_eq!(b.definitions()["Everything"].properties.len(), 18);
    }

    #[test]
    fn nested_records_are_referenced_and_registered() {
        let b = build::<Parent>();
        let names: Vec<_> = b.definitions().keys().cloned().collect();
        assert_eq!(names, vec!["Inner", "Parent"]);
        assert_eq!(
            property(&b, "Parent", "inner"),
            json!({"$ref": "#/definitions/Inner"})
        );
        assert_eq!(
            property(&b, "Parent", "inners"),
            json!({"type": "array", "items": {"$ref": "#/definitions/Inner"}})
        );
        assert_eq!(
            property(&b, "Parent", "maybeInner"),
            json!({"$ref": "#/definitions/Inner"})
        );
    }

    #[test]
    fn shared_nested_record_yields_one_definition() {
        let mut b = DefinitionBuilder::new("json", CyclePolicy::Reject);
        b.register(RecordDescriptor::of::<Parent>()).unwrap();
        b.register(RecordDescriptor::of::<OtherParent>()).unwrap();

        assert_eq!(b.definitions().len(), 3);
        assert_eq!(
            b.definitions().keys().filter(|name| *name == "Inner").count(),
            1
        );
        assert!(b.collisions().is_empty());
    }

    mod first {
        use crate::contract::{FieldDescriptor, Record};

        pub struct Clash;

        impl Record for Clash {
            fn type_name() -> &'static str {
                "Clash"
            }

            fn fields() -> Vec<FieldDescriptor> {
                vec![FieldDescriptor::of::<String>("a").tag("json", "a")]
            }
        }
    }

    mod second {
        use crate::contract::{FieldDescriptor, Record};

        pub struct Clash;

        impl Record for Clash {
            fn type_name() -> &'static str {
                "Clash"
            }

            fn fields() -> Vec<FieldDescriptor> {
                vec![FieldDescriptor::of::<bool>("b").tag("json", "b")]
            }
        }
    }

    #[test]
    fn same_name_distinct_types_overwrite_and_are_reported() {
        let mut b = DefinitionBuilder::new("json", CyclePolicy::Reject);
        b.register(RecordDescriptor::of::<first::Clash>()).unwrap();
        b.register(RecordDescriptor::of::<second::Clash>()).unwrap();

        assert_eq!(b.definitions().len(), 1);
        let clash = &b.definitions()["Clash"];
        assert!(clash.properties.contains_key("b"));
        assert!(!clash.properties.contains_key("a"));

        assert_eq!(b.collisions().len(), 1);
        assert_eq!(b.collisions()[0].name, "Clash");
        assert_eq!(b.collisions()[0].previous, TypeId::of::<first::Clash>());
        assert_eq!(b.collisions()[0].current, TypeId::of::<second::Clash>());
    }

    #[test]
    fn re_registering_same_type_is_not_a_collision() {
        let mut b = build::<Inner>();
        b.register(RecordDescriptor::of::<Inner>()).unwrap();
        assert_eq!(b.definitions().len(), 1);
        assert!(b.collisions().is_empty());
    }

    struct Node;
    struct Edge;

    impl Record for Node {
        fn type_name() -> &'static str {
            "Node"
        }

        fn fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::of::<String>("id").tag("json", "id"),
                FieldDescriptor::of::<Vec<Edge>>("edges").tag("json", "edges"),
            ]
        }
    }

    impl Record for Edge {
        fn type_name() -> &'static str {
            "Edge"
        }

        fn fields() -> Vec<FieldDescriptor> {
            vec![FieldDescriptor::of::<Option<Node>>("target").tag("json", "target")]
        }
    }

    describe_record!(Node, Edge);

    #[test]
    fn cycles_are_rejected_by_default() {
        let mut b = DefinitionBuilder::new("json", CyclePolicy::Reject);
        let err = b.register(RecordDescriptor::of::<Node>()).unwrap_err();
        match err {
            GenerateError::CyclicType { chain } => {
                assert_eq!(chain, vec!["Node", "Edge", "Node"]);
            }
            other => panic!("expected cyclic type error, got {other:?}"),
        }
        assert!(b.definitions().is_empty());
    }

    #[test]
    fn cycles_become_references_when_allowed() {
        let mut b = DefinitionBuilder::new("json", CyclePolicy::Reference);
        b.register(RecordDescriptor::of::<Node>()).unwrap();

        let names: Vec<_> = b.definitions().keys().cloned().collect();
        assert_eq!(names, vec!["Edge", "Node"]);
        assert_eq!(
            property(&b, "Edge", "target"),
            json!({"$ref": "#/definitions/Node"})
        );
        assert_eq!(
            property(&b, "Node", "edges"),
            json!({"type": "array", "items": {"$ref": "#/definitions/Edge"}})
        );
    }
}
