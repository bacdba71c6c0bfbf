//! Vue head: async components, template bindings, Nuxt folder conventions.

use super::{generic, ProviderSpec, RuleSpec, IMAGE_EXT};
use crate::model::ReferenceKind;

pub fn provider() -> ProviderSpec {
    let mut rules = vec![
        RuleSpec::new(
            "vue-async-component",
            ReferenceKind::Import,
            r#"defineAsyncComponent\s*\(\s*\(\s*\)\s*=>\s*import\s*\(\s*["']([^"']+)["']"#
                .to_string(),
            1.0,
        ),
        RuleSpec::new(
            "vue-template-img-binding",
            ReferenceKind::HtmlAttribute,
            format!(r#"<img[^>]+:src\s*=\s*["']([^"']+\.(?:{IMAGE_EXT}))["']"#),
            0.95,
        ),
        RuleSpec::new(
            "vue-template-require",
            ReferenceKind::FunctionCall,
            r#":src\s*=\s*"require\s*\(\s*'([^']+\.(?:jpg|jpeg|png|gif|svg|webp))'"#.to_string(),
            0.95,
        ),
        RuleSpec::new(
            "vue-nuxt-static-folder",
            ReferenceKind::StringLiteral,
            r#"["'](/(?:_nuxt|static|public)/[^"']+\.(?:jpg|jpeg|png|gif|svg|webp|ttf|woff|woff2))["']"#
                .to_string(),
            0.9,
        ),
    ];
    rules.extend(generic::rules());

    ProviderSpec {
        rules,
        source_extensions: &[".js", ".ts", ".vue", ".css", ".scss", ".sass", ".less"],
        wants_ast: true,
    }
}
