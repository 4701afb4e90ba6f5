use thiserror::Error;

/// Ways a combinator can be misused. The pattern algebra itself cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("repetition range {min}..={max} is inverted")]
    InvertedRange { min: usize, max: usize },
}
