//! Svelte provider: the generic tail over Svelte's file set, with the AST
//! pass enabled for its JS/TS script blocks.

use super::{generic, ProviderSpec};

pub fn provider() -> ProviderSpec {
    ProviderSpec {
        rules: generic::rules(),
        source_extensions: &[".js", ".ts", ".svelte", ".css"],
        wants_ast: true,
    }
}
