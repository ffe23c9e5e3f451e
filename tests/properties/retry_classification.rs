//! Property tests for transient-error classification.

use proptest::prelude::*;

use hrafnar_verify::domain::value_objects::RetryPolicy;

fn noise() -> impl Strategy<Value = String> {
    // Lowercase only, so never an "Error ..." line
    "[a-z0-9 :.\n]{0,80}"
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a known transient phrase anywhere in the output is retryable.
    #[test]
    fn property_transient_phrase_anywhere_is_retryable(
        before in noise(),
        after in noise(),
        phrase in prop_oneof![
            Just("Error waiting for Creating Network"),
            Just("Error creating Service: googleapi: Error 409"),
        ],
    ) {
        let policy = RetryPolicy::default();
        let text = format!("{}{}{}", before, phrase, after);
        prop_assert!(policy.classify(&text).is_some());
    }

    /// PROPERTY: output without either phrase is never retried.
    #[test]
    fn property_unrelated_output_is_fatal(text in noise()) {
        prop_assert!(RetryPolicy::default().classify(&text).is_none());
    }

    /// PROPERTY: a policy without patterns retries nothing.
    #[test]
    fn property_empty_policy_retries_nothing(text in ".{0,200}") {
        let policy = RetryPolicy::from_pairs(std::iter::empty::<(&str, &str)>(), 3, std::time::Duration::ZERO)
            .unwrap();
        prop_assert!(policy.classify(&text).is_none());
    }
}
