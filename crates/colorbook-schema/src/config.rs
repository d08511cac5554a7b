/// Controls book validation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// When true, objects reject properties not named in the schema.
    pub strict_mode: bool,
    /// Schema errors reported after the first one.
    pub max_reported_errors: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            max_reported_errors: 3,
        }
    }
}
