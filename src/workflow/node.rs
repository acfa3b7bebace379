use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A handle to one output of a producer node.
///
/// On the wire this is the two-element tuple `[node_id, index]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, u32)", into = "(String, u32)")]
pub struct OutputRef {
    pub node_id: String,
    pub index: u32,
}

impl OutputRef {
    pub fn new(node_id: impl Into<String>, index: u32) -> Self {
        Self {
            node_id: node_id.into(),
            index,
        }
    }
}

impl From<(String, u32)> for OutputRef {
    fn from((node_id, index): (String, u32)) -> Self {
        Self { node_id, index }
    }
}

impl From<OutputRef> for (String, u32) {
    fn from(output: OutputRef) -> Self {
        (output.node_id, output.index)
    }
}

/// The value bound to a named node input: either a reference to another
/// node's output or an opaque scalar.
///
/// Deserialization tries the reference shape first, so any two-element
/// `[string, unsigned integer]` array is read as a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Output(OutputRef),
    Value(Value),
}

impl InputValue {
    pub fn as_output(&self) -> Option<&OutputRef> {
        match self {
            InputValue::Output(output) => Some(output),
            InputValue::Value(_) => None,
        }
    }

    pub fn is_output(&self) -> bool {
        matches!(self, InputValue::Output(_))
    }

    /// `true` for the scalar `null`, which `Node::set_input` treats as removal.
    pub fn is_null(&self) -> bool {
        matches!(self, InputValue::Value(Value::Null))
    }
}

impl From<OutputRef> for InputValue {
    fn from(output: OutputRef) -> Self {
        InputValue::Output(output)
    }
}

impl From<Value> for InputValue {
    fn from(value: Value) -> Self {
        InputValue::Value(value)
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Value(Value::from(value))
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Value(Value::from(value))
    }
}

impl From<i64> for InputValue {
    fn from(value: i64) -> Self {
        InputValue::Value(Value::from(value))
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Value(Value::from(value))
    }
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        InputValue::Value(Value::from(value))
    }
}

/// A single operation in an execution-format workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    class_type: String,
    meta: Option<Map<String, Value>>,
    inputs: IndexMap<String, InputValue>,
}

impl Node {
    pub(crate) fn new(id: String, class_type: String, meta: Option<Map<String, Value>>) -> Self {
        Self {
            id,
            class_type,
            meta,
            inputs: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class_type(&self) -> &str {
        &self.class_type
    }

    pub fn meta(&self) -> Option<&Map<String, Value>> {
        self.meta.as_ref()
    }

    pub fn with_meta(&mut self, meta: Map<String, Value>) -> &mut Self {
        self.meta = Some(meta);
        self
    }

    /// Returns a handle to this node's output slot `index`.
    pub fn output(&self, index: u32) -> OutputRef {
        OutputRef::new(self.id.clone(), index)
    }

    /// Binds `value` to the input `name`. Binding `null` removes the input.
    pub fn set_input(&mut self, name: impl Into<String>, value: impl Into<InputValue>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        if value.is_null() {
            self.inputs.shift_remove(&name);
        } else {
            self.inputs.insert(name, value);
        }
        self
    }

    pub fn set_inputs<I, K, V>(&mut self, inputs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<InputValue>,
    {
        for (name, value) in inputs {
            self.set_input(name, value);
        }
        self
    }

    /// Stores `value` as is, `null` included. Used when loading raw workflows.
    pub(crate) fn insert_input(&mut self, name: String, value: InputValue) {
        self.inputs.insert(name, value);
    }

    pub fn remove_input(&mut self, name: &str) -> Option<InputValue> {
        self.inputs.shift_remove(name)
    }

    pub fn input(&self, name: &str) -> Option<&InputValue> {
        self.inputs.get(name)
    }

    pub fn inputs(&self) -> &IndexMap<String, InputValue> {
        &self.inputs
    }
}
