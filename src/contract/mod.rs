//! Declarative description of services and their contracts.
//!
//! This is the input side of the generator: each [`Service`] lists [`Contract`]s, and each
//! contract names its input, output and error records together with the selectors that
//! expose it.

mod selector;
mod shape;

pub use self::selector::{
    Method, PARAM_SENTINEL, RestRoute, RestSelector, RoutePattern, RpcSelector, Segment,
    Selector, UnknownMethod,
};
pub use self::shape::{Describe, FieldDescriptor, Record, RecordDescriptor, Shape};

/// A named group of contracts, rendered as one tag.
#[derive(Debug)]
pub struct Service {
    /// Service name, also used as the operation tag.
    pub name: String,
    /// Contracts in declaration order.
    pub contracts: Vec<Contract>,
}

impl Service {
    /// Empty service called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contracts: Vec::new(),
        }
    }

    /// Append a contract.
    pub fn add_contract(mut self, contract: Contract) -> Self {
        self.contracts.push(contract);
        self
    }
}

/// Error outcome a contract may answer with.
#[derive(Debug, Clone)]
pub struct PossibleError {
    /// HTTP status code.
    pub code: u16,
    /// Short label, e.g. `ITEM_NOT_FOUND`.
    pub item: String,
    /// Error payload record.
    pub message: RecordDescriptor,
}

/// One callable operation of a service.
#[derive(Debug)]
pub struct Contract {
    /// Operation identifier.
    pub name: String,
    /// Input record, if set.
    pub input: Option<RecordDescriptor>,
    /// Output record, if set.
    pub output: Option<RecordDescriptor>,
    /// Transport bindings in declaration order.
    pub selectors: Vec<Box<dyn Selector>>,
    /// Declared error outcomes in declaration order.
    pub possible_errors: Vec<PossibleError>,
}

impl Contract {
    /// Contract with the given operation name and nothing else.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: None,
            output: None,
            selectors: Vec::new(),
            possible_errors: Vec::new(),
        }
    }

    /// Set the input record.
    pub fn with_input<T: Record>(mut self) -> Self {
        self.input = Some(RecordDescriptor::of::<T>());
        self
    }

    /// Set the output record.
    pub fn with_output<T: Record>(mut self) -> Self {
        self.output = Some(RecordDescriptor::of::<T>());
        self
    }

    /// Bind the contract to another selector.
    pub fn add_selector(mut self, selector: impl Selector + 'static) -> Self {
        self.selectors.push(Box::new(selector));
        self
    }

    /// Declare an error outcome with payload `T`.
    pub fn add_possible_error<T: Record>(mut self, code: u16, item: impl Into<String>) -> Self {
        self.possible_errors.push(PossibleError {
            code,
            item: item.into(),
            message: RecordDescriptor::of::<T>(),
        });
        self
    }
}
