//! Path and query parameters derived from an input record.

use std::collections::HashSet;

use tracing::debug;

use crate::{
    contract::{RecordDescriptor, RoutePattern, Shape},
    openapi::{Parameter, Schema},
};

/// Turn every tagged field of `record` into a path or query parameter.
///
/// A field is a path parameter when its exposed name appears as a `:name` segment of
/// `pattern`, otherwise a query parameter. Both kinds are required and reject empty values.
/// Fields whose shape has no wire type are dropped.
pub fn classify(
    pattern: &RoutePattern,
    record: &RecordDescriptor,
    tag_name: &str,
) -> Vec<Parameter> {
    let path_params: HashSet<&str> = pattern.param_names().collect();

    record
        .fields()
        .iter()
        .filter_map(|field| {
            let name = field.exposed_name(tag_name)?;
            let Some(wire) = wire_type(field.shape()) else {
                debug!(
                    record = record.name(),
                    field = name,
                    kind = field.shape().kind(),
                    "dropping parameter without a wire type"
                );
                return None;
            };

            if path_params.contains(name) {
                Some(Parameter::path(name, wire))
            } else {
                Some(Parameter::query(name, wire))
            }
        })
        .collect()
}

/// Wire type of a parameter field, or `None` when the shape cannot travel in a URL.
pub fn wire_type(shape: &Shape) -> Option<Schema> {
    match shape {
        Shape::Sequence(element) => primitive(element).map(Schema::array),
        other => primitive(other),
    }
}

fn primitive(shape: &Shape) -> Option<Schema> {
    let schema = match shape {
        Shape::Text => Schema::string(),
        Shape::Int8 | Shape::Uint8 => Schema::int8(),
        Shape::Int32 | Shape::Uint32 => Schema::int32(),
        Shape::Int | Shape::Uint | Shape::Int64 | Shape::Uint64 => Schema::int64(),
        Shape::Float32 => Schema::float32(),
        Shape::Float64 => Schema::float64(),
        Shape::Bool => Schema::boolean(),
        Shape::Optional(inner) => return wire_type(inner),
        _ => return None,
    };
    Some(schema)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        contract::{FieldDescriptor, Record},
        openapi::{ParameterLocation, SchemaType},
    };

    struct Lookup;

    impl Record for Lookup {
        fn type_name() -> &'static str {
            "Lookup"
        }

        fn fields() -> Vec<FieldDescriptor> {
            vec![
                FieldDescriptor::of::<String>("x").tag("json", "x"),
                FieldDescriptor::of::<String>("y").tag("json", "y"),
                FieldDescriptor::of::<i64>("z").tag("json", "z,omitempty"),
                FieldDescriptor::of::<Vec<String>>("w").tag("json", "w"),
                FieldDescriptor::of::<Option<bool>>("flag").tag("json", "flag"),
                FieldDescriptor::of::<HashMap<String, String>>("meta").tag("json", "meta"),
                FieldDescriptor::of::<u16>("port").tag("json", "port"),
                FieldDescriptor::of::<String>("internal"),
            ]
        }
    }

    fn params() -> Vec<Parameter> {
        classify(
            &RoutePattern::parse("/some/:x/:y"),
            &RecordDescriptor::of::<Lookup>(),
            "json",
        )
    }

    fn find<'a>(params: &'a [Parameter], name: &str) -> &'a Parameter {
        params.iter().find(|p| p.name == name).unwrap()
    }

    #[test]
    fn pattern_names_become_path_parameters() {
        let params = params();
        assert_eq!(find(&params, "x").location, ParameterLocation::Path);
        assert_eq!(find(&params, "y").location, ParameterLocation::Path);
        assert_eq!(find(&params, "z").location, ParameterLocation::Query);
    }

    #[test]
    fn every_parameter_is_required_and_non_empty() {
        for param in params() {
            assert!(param.required, "{} should be required", param.name);
            assert_eq!(param.allow_empty_value, Some(false));
        }
    }

    #[test]
    fn wire_types_follow_field_shape() {
        let params = params();
        let z = find(&params, "z");
        assert_eq!(z.param_type, Some(SchemaType::Integer));
        assert_eq!(z.format.as_deref(), Some("int64"));

        let w = find(&params, "w");
        assert_eq!(w.param_type, Some(SchemaType::Array));
        assert_eq!(w.items.as_deref(), Some(&Schema::string()));

        assert_eq!(find(&params, "flag").param_type, Some(SchemaType::Boolean));
    }

    #[test]
    fn unclassifiable_and_untagged_fields_are_dropped() {
        let names: Vec<_> = params().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["x", "y", "z", "w", "flag"]);
    }

    #[test]
    fn unmatched_pattern_parameter_is_ignored() {
        let params = classify(
            &RoutePattern::parse("/items/:missing/:x"),
            &RecordDescriptor::of::<Lookup>(),
            "json",
        );
        assert!(params.iter().all(|p| p.name != "missing"));
        assert_eq!(find(&params, "x").location, ParameterLocation::Path);
        assert_eq!(find(&params, "y").location, ParameterLocation::Query);
    }

    #[test]
    fn other_tag_namespace_exposes_nothing() {
        let params = classify(
            &RoutePattern::parse("/some/:x/:y"),
            &RecordDescriptor::of::<Lookup>(),
            "xml",
        );
        assert!(params.is_empty());
    }
}
