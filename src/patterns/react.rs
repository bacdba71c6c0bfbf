//! React and React Native head: lazy imports, Next.js public-folder paths,
//! webpack magic-comment dynamic imports.

use super::{generic, ProviderSpec, RuleSpec};
use crate::model::ReferenceKind;

pub fn provider() -> ProviderSpec {
    let mut rules = vec![
        RuleSpec::new(
            "react-lazy-import",
            ReferenceKind::Import,
            r#"React\.lazy\s*\(\s*\(\s*\)\s*=>\s*import\s*\(\s*["']([^"']+)["']"#.to_string(),
            1.0,
        ),
        RuleSpec::new(
            "react-public-folder",
            ReferenceKind::StringLiteral,
            format!(
                r#"["'](/(?:images?|assets?|static|fonts?|videos?|media)/[^"']+\.(?:{}))["']"#,
                super::MEDIA_EXT
            ),
            0.95,
        ),
        RuleSpec::new(
            "react-webpack-dynamic-import",
            ReferenceKind::Import,
            r#"import\s*\(\s*/\*.*?\*/\s*["']([^"']+\.(?:jpg|jpeg|png|svg))["']"#.to_string(),
            0.9,
        ),
    ];
    rules.extend(generic::rules());

    ProviderSpec {
        rules,
        source_extensions: &[".js", ".jsx", ".ts", ".tsx", ".css", ".scss", ".less"],
        wants_ast: true,
    }
}
