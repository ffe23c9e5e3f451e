//! Property tests for resource name prefixes.

use proptest::prelude::*;

use hrafnar_verify::domain::value_objects::NamePrefix;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the prefix is `test-<tag>-<token>` with the token lowercased.
    #[test]
    fn property_prefix_format(tag in "(dev|prod|min)", token in "[A-Za-z0-9]{6}") {
        let prefix = NamePrefix::new(&tag, &token);
        prop_assert_eq!(
            prefix.as_str().to_string(),
            format!("test-{}-{}", tag, token.to_lowercase())
        );
    }

    /// PROPERTY: prefixes built from lowercase tags contain no uppercase.
    #[test]
    fn property_prefix_is_lowercase(tag in "[a-z]{1,8}", token in "[A-Za-z0-9]{1,12}") {
        let prefix = NamePrefix::new(&tag, &token);
        prop_assert!(!prefix.as_str().chars().any(|c| c.is_ascii_uppercase()));
    }

    /// PROPERTY: different tokens never collide.
    #[test]
    fn property_distinct_tokens_distinct_prefixes(
        a in "[a-z0-9]{6}",
        b in "[a-z0-9]{6}",
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(NamePrefix::new("dev", &a), NamePrefix::new("dev", &b));
    }
}
