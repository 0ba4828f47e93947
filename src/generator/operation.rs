//! Operations for the REST routes of a contract.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::{
    GenerateResult,
    contract::{Contract, RecordDescriptor, RestRoute, Selector},
    generator::{definitions::DefinitionBuilder, parameters::classify},
    openapi::{Document, Operation, Parameter, Response, Schema},
};

/// Status code of the successful response.
const SUCCESS_CODE: u16 = 200;

/// Add one operation per REST selector of `contract` to `document`.
///
/// Selectors without an HTTP route are skipped. Error payload definitions are registered even
/// when no selector produces an operation.
pub fn add_contract(
    document: &mut Document,
    definitions: &mut DefinitionBuilder,
    service: &str,
    contract: &Contract,
) -> GenerateResult<()> {
    let errors = error_responses(definitions, contract)?;

    for selector in &contract.selectors {
        let Some(route) = selector.rest_route() else {
            trace!(
                contract = %contract.name,
                ?selector,
                "skipping selector without REST route"
            );
            continue;
        };

        let operation = build_operation(definitions, service, contract, route, &errors)?;
        let path = route.pattern.to_swagger_path();
        debug!(
            contract = %contract.name,
            method = %route.method,
            path = %path,
            "adding operation"
        );
        if document
            .path_item_mut(path)
            .set(route.method, operation)
            .is_some()
        {
            debug!(
                contract = %contract.name,
                method = %route.method,
                "replaced an operation already bound to this path and method"
            );
        }
    }

    Ok(())
}

fn build_operation(
    definitions: &mut DefinitionBuilder,
    service: &str,
    contract: &Contract,
    route: RestRoute<'_>,
    errors: &BTreeMap<u16, Response>,
) -> GenerateResult<Operation> {
    let mut operation = Operation::new(&contract.name, service);
    operation.responds_with(
        SUCCESS_CODE,
        Response {
            description: String::new(),
            schema: contract.output.map(|output| Schema::reference(output.name())),
        },
    );
    for (code, response) in errors {
        operation.responds_with(*code, response.clone());
    }

    if let Some(input) = contract.input {
        operation.parameters = classify(route.pattern, &input, definitions.tag_name());
        definitions.register(input)?;
        if route.method.carries_body() {
            operation
                .parameters
                .push(Parameter::body(input.name(), Schema::reference(input.name())));
        }
    }
    if let Some(output) = contract.output {
        definitions.register(output)?;
    }

    Ok(operation)
}

/// Merge declared errors by status code, registering each payload definition.
///
/// The description lists every label declared for a code in declaration order; the schema
/// refers to the last payload declared for that code.
fn error_responses(
    definitions: &mut DefinitionBuilder,
    contract: &Contract,
) -> GenerateResult<BTreeMap<u16, Response>> {
    let mut grouped: BTreeMap<u16, (Vec<&str>, RecordDescriptor)> = BTreeMap::new();

    for error in &contract.possible_errors {
        definitions.register(error.message)?;
        grouped
            .entry(error.code)
            .and_modify(|(items, payload)| {
                items.push(&error.item);
                *payload = error.message;
            })
            .or_insert_with(|| (vec![error.item.as_str()], error.message));
    }

    Ok(grouped
        .into_iter()
        .map(|(code, (items, payload))| {
            let response = Response {
                description: format!("Items: {}", items.join(", ")),
                schema: Some(Schema::reference(payload.name())),
            };
            (code, response)
        })
        .collect())
}
