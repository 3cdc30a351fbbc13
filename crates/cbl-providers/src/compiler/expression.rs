//! Expression Compiler
//!
//! Default [`Compiler`] built on the evalexpr crate.
//!
//! A component module is a sequence of evalexpr statements. It is evaluated
//! once, with no capabilities bound, and must assign its render body to the
//! reserved `component` binding as a string:
//!
//! ```text
//! greeting = "Hello, ";
//! component = "\"<h1>\" + greeting + props_name + \"</h1>\""
//! ```
//!
//! Rendering evaluates the body in a copy of the module scope with:
//!
//! - `props_<name>` for every top-level prop (non-alphanumeric characters in
//!   the name become `_`)
//! - `use_state(key, initial)`, `use_ref(key, initial)`, `use_memo(key, value)`,
//!   `use_callback(key, name)` and `use_effect(key)` over the caller's
//!   [`RenderScope`]
//!
//! A string result is returned as-is; any other value is rendered with its
//! display form.

use evalexpr::{
    Context, ContextWithMutableFunctions, ContextWithMutableVariables, DefaultNumericTypes,
    EvalexprError, Function, HashMapContext, Node,
};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use cbl_domain::constants::{COMPONENT_EXPORT_BINDING, PROPS_VARIABLE_PREFIX};
use cbl_domain::error::{Error, ExecutionError, Result};
use cbl_domain::ports::{Compiler, Component, ExecutableComponent};
use cbl_domain::render::{Capability, CapabilitySet, RenderScope};

use crate::constants::EXPRESSION_COMPILER_NAME;

type EvalValue = evalexpr::Value;
type EvalResult = std::result::Result<EvalValue, EvalexprError>;

/// Compiles evalexpr component modules
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionCompiler;

impl ExpressionCompiler {
    /// Create a compiler
    pub fn new() -> Self {
        Self
    }

    fn evaluate_module(
        source: &str,
        identifier: &str,
    ) -> std::result::Result<HashMapContext, ExecutionError> {
        let evaluation = |e: EvalexprError| ExecutionError::Evaluation {
            identifier: identifier.to_string(),
            message: e.to_string(),
        };

        let module: Node = evalexpr::build_operator_tree(source).map_err(evaluation)?;
        let mut scope: HashMapContext = HashMapContext::new();
        module
            .eval_with_context_mut(&mut scope)
            .map_err(evaluation)?;
        Ok(scope)
    }

    fn read_export(
        scope: &HashMapContext,
        identifier: &str,
    ) -> std::result::Result<String, ExecutionError> {
        let no_export = || ExecutionError::NoExport {
            identifier: identifier.to_string(),
            binding: COMPONENT_EXPORT_BINDING.to_string(),
        };

        match scope.get_value(COMPONENT_EXPORT_BINDING) {
            None | Some(EvalValue::Empty) => Err(no_export()),
            Some(EvalValue::String(body)) if body.trim().is_empty() => Err(no_export()),
            Some(EvalValue::String(body)) => Ok(body.clone()),
            Some(other) => Err(ExecutionError::NotCallable {
                identifier: identifier.to_string(),
                found: format!("{} `{other}`", type_name(other)),
            }),
        }
    }
}

impl Compiler for ExpressionCompiler {
    fn compile(
        &self,
        source: &str,
        identifier: &str,
        capabilities: &CapabilitySet,
    ) -> std::result::Result<ExecutableComponent, ExecutionError> {
        let module = Self::evaluate_module(source, identifier)?;
        let body = Self::read_export(&module, identifier)?;

        let render: Node =
            evalexpr::build_operator_tree(&body).map_err(|e| ExecutionError::NotCallable {
                identifier: identifier.to_string(),
                found: format!("render body that does not compile ({e})"),
            })?;

        debug!(
            identifier = identifier,
            capabilities = ?capabilities.binding_names(),
            "Compiled expression component"
        );

        Ok(Arc::new(ExpressionComponent {
            identifier: identifier.to_string(),
            module,
            render,
            capabilities: capabilities.clone(),
        }))
    }

    fn compiler_name(&self) -> &str {
        EXPRESSION_COMPILER_NAME
    }
}

/// Component produced by [`ExpressionCompiler`]
pub struct ExpressionComponent {
    identifier: String,
    module: HashMapContext,
    render: Node,
    capabilities: CapabilitySet,
}

impl ExpressionComponent {
    fn bind_props(&self, ctx: &mut HashMapContext, props: &Value) -> Result<()> {
        let Value::Object(props) = props else {
            return Ok(());
        };
        for (name, value) in props {
            ctx.set_value(prop_variable(name), json_to_eval_value(value))
                .map_err(|e| Error::render(&self.identifier, format!("prop `{name}`: {e}")))?;
        }
        Ok(())
    }

    fn bind_capabilities(&self, ctx: &mut HashMapContext, scope: &RenderScope) -> Result<()> {
        for capability in self.capabilities.iter() {
            let function = capability_function(capability, scope.clone());
            ctx.set_function(capability.binding_name().to_string(), function)
                .map_err(|e| Error::render(&self.identifier, e.to_string()))?;
        }
        Ok(())
    }
}

impl Component for ExpressionComponent {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn render(&self, props: &Value, scope: &RenderScope) -> Result<String> {
        let mut ctx = self.module.clone();
        self.bind_props(&mut ctx, props)?;
        self.bind_capabilities(&mut ctx, scope)?;

        let output = self
            .render
            .eval_with_context_mut(&mut ctx)
            .map_err(|e| Error::render(&self.identifier, e.to_string()))?;

        Ok(match output {
            EvalValue::String(markup) => markup,
            other => other.to_string(),
        })
    }
}

impl fmt::Debug for ExpressionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionComponent")
            .field("identifier", &self.identifier)
            .field("capabilities", &self.capabilities.binding_names())
            .finish()
    }
}

fn capability_function(
    capability: Capability,
    scope: RenderScope,
) -> Function<DefaultNumericTypes> {
    match capability {
        Capability::State => Function::new(move |argument: &EvalValue| -> EvalResult {
            let (key, initial) = key_and_value("use_state", argument)?;
            Ok(json_to_eval_value(&scope.use_state(&key, initial)))
        }),
        Capability::Ref => Function::new(move |argument: &EvalValue| -> EvalResult {
            let (key, initial) = key_and_value("use_ref", argument)?;
            Ok(json_to_eval_value(&scope.use_ref(&key, initial)))
        }),
        Capability::Memo => Function::new(move |argument: &EvalValue| -> EvalResult {
            let (key, value) = key_and_value("use_memo", argument)?;
            Ok(json_to_eval_value(&scope.use_memo(&key, value)))
        }),
        Capability::Callback => Function::new(move |argument: &EvalValue| -> EvalResult {
            let (key, name) = key_and_value("use_callback", argument)?;
            let name = match name {
                Value::String(name) => name,
                other => other.to_string(),
            };
            Ok(EvalValue::String(scope.use_callback(&key, &name)))
        }),
        Capability::Effect => Function::new(move |argument: &EvalValue| -> EvalResult {
            let EvalValue::String(key) = argument else {
                return Err(custom("use_effect expects a string key"));
            };
            scope.use_effect(key);
            Ok(EvalValue::Empty)
        }),
    }
}

/// Split `(key, value)` call arguments
fn key_and_value(
    function: &str,
    argument: &EvalValue,
) -> std::result::Result<(String, Value), EvalexprError> {
    match argument {
        EvalValue::Tuple(arguments) => match arguments.as_slice() {
            [EvalValue::String(key), value] => Ok((key.clone(), eval_to_json(value))),
            _ => Err(custom(format!(
                "{function} expects (string key, value), got {argument}"
            ))),
        },
        _ => Err(custom(format!(
            "{function} expects (string key, value), got {argument}"
        ))),
    }
}

fn custom<S: Into<String>>(message: S) -> EvalexprError {
    EvalexprError::CustomMessage(message.into())
}

/// Variable name a prop is bound to
pub fn prop_variable(name: &str) -> String {
    let name: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{PROPS_VARIABLE_PREFIX}{name}")
}

fn type_name(value: &EvalValue) -> &'static str {
    match value {
        EvalValue::String(_) => "string",
        EvalValue::Float(_) => "float",
        EvalValue::Int(_) => "int",
        EvalValue::Boolean(_) => "boolean",
        EvalValue::Tuple(_) => "tuple",
        EvalValue::Empty => "empty",
    }
}

/// Convert JSON value to evalexpr value
fn json_to_eval_value(value: &Value) -> EvalValue {
    match value {
        Value::Null => EvalValue::Empty,
        Value::Bool(b) => EvalValue::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                EvalValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                EvalValue::Float(f)
            } else {
                EvalValue::Empty
            }
        }
        Value::String(s) => EvalValue::String(s.clone()),
        Value::Array(items) => EvalValue::Tuple(items.iter().map(json_to_eval_value).collect()),
        // Objects have no evalexpr counterpart
        Value::Object(_) => EvalValue::String(value.to_string()),
    }
}

/// Convert evalexpr value to JSON value
fn eval_to_json(value: &EvalValue) -> Value {
    match value {
        EvalValue::String(s) => Value::String(s.clone()),
        EvalValue::Int(i) => Value::from(*i),
        EvalValue::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
        EvalValue::Boolean(b) => Value::Bool(*b),
        EvalValue::Tuple(items) => Value::Array(items.iter().map(eval_to_json).collect()),
        EvalValue::Empty => Value::Null,
    }
}
