//! Generic tail: the rules every provider shares.

use super::{ProviderSpec, RuleSpec, ASSET_EXT, MARKUP_EXT, MEDIA_EXT, STYLE_EXT};
use crate::model::ReferenceKind;

pub fn provider() -> ProviderSpec {
    ProviderSpec {
        rules: rules(),
        source_extensions: &[".js", ".ts", ".jsx", ".tsx", ".css", ".html"],
        wants_ast: false,
    }
}

/// The generic tail, appended to every framework head.
pub fn rules() -> Vec<RuleSpec> {
    vec![
        RuleSpec::new(
            "generic-import",
            ReferenceKind::Import,
            format!(r#"import\s+.*?["']([^"']+\.(?:{MEDIA_EXT}))["']"#),
            1.0,
        ),
        RuleSpec::new(
            "generic-require",
            ReferenceKind::Import,
            format!(r#"require\s*\(\s*["']([^"']+\.(?:{MEDIA_EXT}))["']\s*\)"#),
            1.0,
        ),
        RuleSpec::new(
            "generic-css-url",
            ReferenceKind::CssUrl,
            format!(r#"url\s*\(\s*["']?([^"')]+\.(?:{STYLE_EXT}))["']?\s*\)"#),
            0.95,
        ),
        RuleSpec::new(
            "generic-html-attribute",
            ReferenceKind::HtmlAttribute,
            format!(r#"(?:src|href)\s*=\s*["']([^"']+\.(?:{MARKUP_EXT}))["']"#),
            0.95,
        ),
        RuleSpec::new(
            "generic-string-literal",
            ReferenceKind::StringLiteral,
            format!(r#"["']([^"']*\.(?:{ASSET_EXT}))["']"#),
            0.8,
        ),
        RuleSpec::new(
            "generic-template-literal",
            ReferenceKind::TemplateLiteral,
            format!(r"`([^`]*\.(?:{MEDIA_EXT}))`"),
            0.8,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn find<'a>(rules: &'a [RuleSpec], name: &str) -> &'a RuleSpec {
        rules.iter().find(|r| r.name == name).unwrap()
    }

    fn capture(spec: &RuleSpec, line: &str) -> Option<String> {
        Regex::new(&spec.pattern)
            .unwrap()
            .captures(line)
            .map(|c| c[spec.capture].to_string())
    }

    #[test]
    fn test_import_matches_default_import() {
        let rules = rules();
        let rule = find(&rules, "generic-import");
        assert_eq!(
            capture(rule, r#"import logo from "./assets/logo.png";"#),
            Some("./assets/logo.png".to_string())
        );
    }

    #[test]
    fn test_import_requires_asset_extension() {
        let rules = rules();
        let rule = find(&rules, "generic-import");
        assert_eq!(capture(rule, r#"import App from "./App";"#), None);
    }

    #[test]
    fn test_require_single_quotes() {
        let rules = rules();
        let rule = find(&rules, "generic-require");
        assert_eq!(
            capture(rule, "const img = require('./img/banner.jpg');"),
            Some("./img/banner.jpg".to_string())
        );
    }

    #[test]
    fn test_css_url_unquoted() {
        let rules = rules();
        let rule = find(&rules, "generic-css-url");
        assert_eq!(
            capture(rule, "background: url(../fonts/icons.woff2);"),
            Some("../fonts/icons.woff2".to_string())
        );
    }

    #[test]
    fn test_css_url_double_quoted() {
        let rules = rules();
        let rule = find(&rules, "generic-css-url");
        assert_eq!(
            capture(rule, r#"background-image: url("img/bg.png");"#),
            Some("img/bg.png".to_string())
        );
    }

    #[test]
    fn test_html_src_and_href() {
        let rules = rules();
        let rule = find(&rules, "generic-html-attribute");
        assert_eq!(
            capture(rule, r#"<img src="/images/hero.webp" alt="">"#),
            Some("/images/hero.webp".to_string())
        );
        assert_eq!(
            capture(rule, r#"<a href="media/clip.mp4">clip</a>"#),
            Some("media/clip.mp4".to_string())
        );
    }

    #[test]
    fn test_string_literal_any_asset_extension() {
        let rules = rules();
        let rule = find(&rules, "generic-string-literal");
        assert_eq!(
            capture(rule, r#"const sound = "audio/ping.flac";"#),
            Some("audio/ping.flac".to_string())
        );
    }

    #[test]
    fn test_template_literal() {
        let rules = rules();
        let rule = find(&rules, "generic-template-literal");
        assert_eq!(
            capture(rule, "const path = `assets/logo.svg`;"),
            Some("assets/logo.svg".to_string())
        );
    }
}
