use super::Initializer;
use crate::native::{InitializerConfig, constant_initializer};

/// An initializer that fills the whole parameter with the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    /// Creates a new `Constant` initializer.
    ///
    /// # Arguments
    /// * `value` - The value of every generated element.
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    pub fn zeros() -> Self {
        Self::new(0.)
    }

    pub fn ones() -> Self {
        Self::new(1.)
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Initializer for Constant {
    fn to_dictionary(&self) -> InitializerConfig {
        constant_initializer(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::InitializerKind;

    #[test]
    fn materializes_value() {
        let config = Constant::new(3.).to_dictionary();

        assert_eq!(config.kind(), InitializerKind::Constant);
        assert_eq!(config.generate(&[2, 2]).unwrap(), vec![3.; 4]);
    }

    #[test]
    fn zeros_and_ones() {
        assert_eq!(Constant::zeros().value(), 0.);
        assert_eq!(Constant::ones().value(), 1.);
    }
}
