use log::debug;

use super::InitializerConfig;
use crate::{ModelErr, Result};

/// A trainable tensor of a compiled model.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    shape: Vec<usize>,
    values: Vec<f32>,
}

impl Parameter {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A compiled model graph, as far as learners are concerned: its ordered parameters.
#[derive(Debug, Clone, Default)]
pub struct Function {
    parameters: Vec<Parameter>,
}

impl Function {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new parameter initialized following `init`.
    ///
    /// # Arguments
    /// * `name` - The unique name of the parameter.
    /// * `shape` - The dimensions of the parameter.
    /// * `init` - The native initializer configuration to sample the initial values from.
    ///
    /// # Returns
    /// An error if the name is taken or the initializer can't be materialized for `shape`.
    pub fn add_parameter(
        &mut self,
        name: impl Into<String>,
        shape: &[usize],
        init: &InitializerConfig,
    ) -> Result<()> {
        let name = name.into();

        if self.parameter(&name).is_some() {
            return Err(ModelErr::DuplicateParameter(name));
        }

        let values = init.generate(shape)?;
        debug!(name = name.as_str(), len = values.len(); "added parameter");

        self.parameters.push(Parameter {
            name,
            shape: shape.to_vec(),
            values,
        });

        Ok(())
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut [Parameter] {
        &mut self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// The length of every parameter, in order.
    pub fn parameter_lens(&self) -> Vec<usize> {
        self.parameters.iter().map(Parameter::len).collect()
    }
}
