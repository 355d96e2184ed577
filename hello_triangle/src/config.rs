/// Program manager configuration

/// Options for `ProgramManager`
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Name used in log lines
    pub label: String,
    /// Run the reflector once the program has linked
    pub reflect_on_init: bool,
    /// Write the full reflection report to the diagnostic stream (DEBUG)
    pub dump_report_on_init: bool,
    /// Make the program current as part of activation
    pub bind_on_activate: bool,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            label: "Hello Triangle".to_string(),
            reflect_on_init: cfg!(debug_assertions),
            dump_report_on_init: cfg!(debug_assertions),
            bind_on_activate: true,
        }
    }
}

impl ProgramConfig {
    /// Default options under a different label
    pub fn labeled(label: impl Into<String>) -> Self {
        Self { label: label.into(), ..Self::default() }
    }
}
