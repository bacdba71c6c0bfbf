//! Angular head: component decorator URLs, lazy routes, property bindings.

use super::{generic, ProviderSpec, RuleSpec, IMAGE_EXT};
use crate::model::ReferenceKind;

pub fn provider() -> ProviderSpec {
    let mut rules = vec![
        RuleSpec::new(
            "angular-template-url",
            ReferenceKind::ConfigDeclaration,
            r#"templateUrl\s*:\s*["']([^"']+\.html)["']"#.to_string(),
            1.0,
        ),
        RuleSpec::new(
            "angular-style-urls",
            ReferenceKind::ConfigDeclaration,
            r"styleUrls\s*:\s*\[([^\]]+)\]".to_string(),
            1.0,
        )
        .as_list(),
        RuleSpec::new(
            "angular-lazy-route",
            ReferenceKind::Import,
            r#"loadChildren\s*:\s*\(\s*\)\s*=>\s*import\s*\(\s*["']([^"']+)["']"#.to_string(),
            1.0,
        ),
        RuleSpec::new(
            "angular-src-binding",
            ReferenceKind::HtmlAttribute,
            format!(r#"\[src\]\s*=\s*["']([^"']+\.(?:{IMAGE_EXT}))["']"#),
            0.95,
        ),
    ];
    rules.extend(generic::rules());

    ProviderSpec {
        rules,
        source_extensions: &[".ts", ".html", ".css", ".scss", ".sass", ".less"],
        wants_ast: true,
    }
}
