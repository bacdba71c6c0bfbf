//! Flutter head: asset constructors, bundle loads, fonts, pubspec entries.

use super::{generic, ProviderSpec, RuleSpec};
use crate::model::ReferenceKind;

pub fn provider() -> ProviderSpec {
    let mut rules = vec![
        RuleSpec::new(
            "flutter-image-asset",
            ReferenceKind::FunctionCall,
            r#"Image\.asset\s*\(\s*["']([^"']+\.(?:png|jpg|jpeg|gif|svg|webp|ico))["']"#
                .to_string(),
            1.0,
        ),
        RuleSpec::new(
            "flutter-asset-image",
            ReferenceKind::FunctionCall,
            r#"AssetImage\s*\(\s*["']([^"']+\.(?:png|jpg|jpeg|gif|svg|webp|ico))["']"#.to_string(),
            1.0,
        ),
        RuleSpec::new(
            "flutter-bundle-load",
            ReferenceKind::FunctionCall,
            r#"(?:rootBundle\.load|DefaultAssetBundle\.of.*?\.load)\s*\(\s*["']([^"']+\.(?:jpg|jpeg|png|gif|svg|webp|ttf|woff|woff2|mp4|mp3|wav|ogg))["']"#
                .to_string(),
            1.0,
        ),
        RuleSpec::new(
            "flutter-font-family",
            ReferenceKind::Constant,
            r#"fontFamily\s*:\s*["']([^"']+)["']"#.to_string(),
            0.9,
        ),
        RuleSpec::new(
            "flutter-pubspec-asset",
            ReferenceKind::ConfigDeclaration,
            r"^\s*-\s+([^#\s][^#\n]*\.(?:png|jpg|jpeg|gif|svg|webp|ttf|otf))".to_string(),
            1.0,
        )
        .with_extensions(&[".yaml"]),
    ];
    rules.extend(generic::rules());

    ProviderSpec {
        rules,
        source_extensions: &[".dart", ".yaml"],
        wants_ast: false,
    }
}
