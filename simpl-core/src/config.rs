//! Evaluation options

/// How the `-` operator combines its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubtractionMode {
    /// `left - right`
    #[default]
    Difference,
    /// `left + right`, the behaviour of the first implementation of the
    /// language; kept for running old programs unchanged
    LegacySum,
}

/// Options that change how a program is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub subtraction: SubtractionMode,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select how `-` is evaluated
    pub fn with_subtraction(mut self, mode: SubtractionMode) -> Self {
        self.subtraction = mode;
        self
    }

    /// Shorthand for `with_subtraction(SubtractionMode::LegacySum)`
    pub fn with_legacy_subtraction(self) -> Self {
        self.with_subtraction(SubtractionMode::LegacySum)
    }
}
