mod compiler;
mod context;

pub use compiler::{compile_to_react, component_name};
pub use context::{CompileOptions, CompilerContext};
