use serde::{Deserialize, Serialize};

/// Options for React compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Name of the exported function component
    pub component_name: String,
    /// `className` of the wrapper every page is rendered in
    pub wrapper_class: String,
    /// Whether to annotate the component's return type
    pub use_typescript: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            component_name: "GeneratedPage".to_string(),
            wrapper_class: "container mx-auto p-4".to_string(),
            use_typescript: false,
        }
    }
}

/// Output buffer and indentation for one component
pub struct CompilerContext {
    buffer: String,
    depth: usize,
    pub options: CompileOptions,
}

impl CompilerContext {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            buffer: String::new(),
            depth: 0,
            options,
        }
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Indented line with a trailing newline
    pub fn add_line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn get_output(self) -> String {
        self.buffer
    }
}
