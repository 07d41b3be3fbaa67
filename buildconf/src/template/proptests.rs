//! Property-based tests for template rendering.

use super::{ConfigValue, ConfigurationData, TemplateRenderer};
use proptest::prelude::*;

// Lines that can never contain a placeholder or start a directive
fn plain_line() -> impl Strategy<Value = String> {
    "[^@#\n]{0,40}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 500,
        .. ProptestConfig::default()
    })]

    // Text without placeholders passes through untouched
    #[test]
    fn plain_lines_are_unchanged(line in plain_line()) {
        let renderer = TemplateRenderer::new();
        let data = ConfigurationData::new();
        prop_assert_eq!(renderer.render_line(&line, &data).unwrap(), line);
    }

    // A placeholder is replaced by its value when the value holds no `@`
    #[test]
    fn placeholder_inserts_value_verbatim(
        name in "[A-Za-z_][-A-Za-z0-9_]{0,12}",
        value in "[^@\\p{C}]{0,20}",
        prefix in plain_line(),
        suffix in plain_line(),
    ) {
        let renderer = TemplateRenderer::new();
        let mut data = ConfigurationData::new();
        data.set(name.clone(), value.clone());
        let line = format!("{prefix}@{name}@{suffix}");
        prop_assume!(!line.starts_with('#'));
        prop_assert_eq!(
            renderer.render_line(&line, &data).unwrap(),
            format!("{prefix}{value}{suffix}")
        );
    }

    // Going through an intermediate name gives the same line as the direct value
    #[test]
    fn nested_placeholders_expand_fully(
        value in "[^@\\p{C}]{0,20}",
        prefix in plain_line(),
    ) {
        let renderer = TemplateRenderer::new();
        let mut data = ConfigurationData::new();
        data.set("OUTER", "[@INNER@]");
        data.set("INNER", value.clone());
        let line = format!("{prefix}@OUTER@");
        prop_assume!(!line.starts_with('#'));
        prop_assert_eq!(
            renderer.render_line(&line, &data).unwrap(),
            format!("{prefix}[{value}]")
        );
    }

    // Integers render in decimal in both productions
    #[test]
    fn integers_render_in_decimal(value in any::<i64>()) {
        let renderer = TemplateRenderer::new();
        let data: ConfigurationData = [("N", ConfigValue::Integer(value))].into_iter().collect();
        prop_assert_eq!(renderer.render_line("@N@", &data).unwrap(), value.to_string());
        prop_assert_eq!(
            renderer.render_line("#confdefine N", &data).unwrap(),
            format!("#define N {value}\n")
        );
    }

    // Rendering is a function of its input: same text, same data, same output
    #[test]
    fn rendering_is_deterministic(lines in prop::collection::vec(plain_line(), 0..8)) {
        let renderer = TemplateRenderer::new();
        let data = ConfigurationData::new();
        let text = lines.join("\n");
        let first = renderer.render_str(&text, &data).unwrap();
        let second = renderer.render_str(&first, &data).unwrap();
        prop_assert_eq!(&first, &text);
        prop_assert_eq!(first, second);
    }
}
