//! Property-based tests for option validation.

use super::literal;
use super::{OptionValue, RawValue, UserOption};
use crate::error::Error;
use proptest::prelude::*;

// Strategy for generating combo choice sets with distinct members
fn choices_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z0-9]{1,8}", 1..6).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Booleans survive render -> validate in any ASCII casing
    #[test]
    fn boolean_render_round_trip(value in any::<bool>(), upper in any::<bool>()) {
        let opt = UserOption::boolean("flag", "", value);
        let rendered = opt.render();
        let text = if upper { rendered.to_uppercase() } else { rendered };
        prop_assert_eq!(opt.validate(&RawValue::from(text)).unwrap(), OptionValue::Boolean(value));
    }

    // Only true/false in some casing are booleans
    #[test]
    fn boolean_rejects_everything_else(text in "\\PC{0,12}") {
        let opt = UserOption::boolean("flag", "", false);
        let result = opt.validate(&RawValue::from(text.clone()));
        let expected_ok = text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false");
        prop_assert_eq!(result.is_ok(), expected_ok);
    }

    // A combo accepts a value iff it is a literal member of the choice set
    #[test]
    fn combo_accepts_only_members(choices in choices_strategy(), candidate in "[a-z0-9]{1,8}") {
        let mut opt = UserOption::combo("c", "", choices.clone(), choices[0].clone()).unwrap();
        let result = opt.set(&RawValue::from(candidate.clone()));
        if choices.contains(&candidate) {
            prop_assert!(result.is_ok());
            prop_assert_eq!(opt.render(), candidate);
        } else {
            let expected: Vec<String> = choices.iter().map(|c| format!("\"{c}\"")).collect();
            match result {
                Err(Error::InvalidChoice { choices: listed, .. }) => {
                    prop_assert_eq!(listed, expected.join(", "));
                }
                other => prop_assert!(false, "unexpected result {:?}", other),
            }
        }
    }

    // Rendered string arrays are accepted back unchanged
    #[test]
    fn string_array_literal_round_trip(items in prop::collection::vec("\\PC{0,10}", 0..6)) {
        let rendered = literal::render(&items);
        prop_assert_eq!(literal::parse(&rendered).unwrap(), items.clone());

        let mut opt = UserOption::string_array("list", "", Vec::new());
        opt.set(&RawValue::from(rendered)).unwrap();
        prop_assert_eq!(opt.value(), OptionValue::StringArray(items));
    }
}
