//! Property tests for text that comes from users or from terraform.

use proptest::prelude::*;

use hrafnar_verify::domain::value_objects::{VarValue, Variables};
use hrafnar_verify::infrastructure::tool::parse_outputs;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: parsing `output -json` never panics, whatever comes back.
    #[test]
    fn property_parse_outputs_never_panics(text in ".{0,200}") {
        let _ = parse_outputs(&text);
    }

    /// PROPERTY: string outputs are read back verbatim.
    #[test]
    fn property_string_outputs_verbatim(name in "[a-z_]{1,20}", value in "[ -~]{0,40}") {
        let json = serde_json::json!({ name.clone(): { "sensitive": false, "type": "string", "value": value.clone() } });
        let outputs = parse_outputs(&json.to_string()).unwrap();
        prop_assert_eq!(outputs.read(&name), value.as_str());
    }

    /// PROPERTY: `NAME=VALUE` splits at the first `=`.
    #[test]
    fn property_assignment_splits_at_first_equals(
        name in "[a-z_][a-z0-9_]{0,15}",
        value in "[a-zA-Z=/.:-]{0,30}",
    ) {
        let (parsed_name, parsed) = Variables::parse_assignment(&format!("{}={}", name, value)).unwrap();
        prop_assert_eq!(parsed_name, name);
        prop_assert_eq!(parsed, VarValue::infer(&value));
    }

    /// PROPERTY: numeric-looking values keep their exact text.
    #[test]
    fn property_infer_keeps_numeric_text(raw in "[+-]?[0-9]{1,8}") {
        match VarValue::infer(&raw) {
            VarValue::Int(n) => prop_assert_eq!(n.to_string(), raw),
            VarValue::Str(s) => prop_assert_eq!(s, raw),
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}
