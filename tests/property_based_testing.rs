//! Property-Based Testing for Response Helpers and Routing
//!
//! These tests use property-based testing (via proptest) to validate the
//! response-shape invariants under randomly generated fields.

use mcp_server_base::{
    error_response, not_found_response, success_response, Fields, ToolRouter,
};
use proptest::prelude::*;
use serde_json::{json, Value};

prop_compose! {
    fn arb_fields()(
        field_names in prop::collection::hash_set("[a-z_][a-z0-9_]{0,12}", 0..8),
        seed in any::<i64>()
    ) -> Fields {
        field_names
            .into_iter()
            .filter(|name| name != "success" && name != "error")
            .enumerate()
            .map(|(i, name)| (name, json!(seed.wrapping_add(i as i64))))
            .collect()
    }
}

proptest! {
    #[test]
    fn success_response_has_exactly_fields_plus_success(fields in arb_fields()) {
        let response = success_response(fields.clone());
        let object = response.as_object().unwrap();

        prop_assert_eq!(&object["success"], &Value::Bool(true));
        prop_assert_eq!(object.len(), fields.len() + 1);
        for (key, value) in &fields {
            prop_assert_eq!(&object[key], value);
        }
    }

    #[test]
    fn error_response_carries_message_and_fields(
        message in ".*",
        fields in arb_fields()
    ) {
        let response = error_response(message.clone(), fields.clone());
        let object = response.as_object().unwrap();

        prop_assert_eq!(&object["success"], &Value::Bool(false));
        prop_assert_eq!(object["error"].as_str(), Some(message.as_str()));
        prop_assert_eq!(object.len(), fields.len() + 2);
        for (key, value) in &fields {
            prop_assert_eq!(&object[key], value);
        }
    }

    #[test]
    fn not_found_is_specialized_error(entity_type in "[A-Za-z]{1,16}", entity_id in "\\PC{0,32}") {
        prop_assert_eq!(
            not_found_response(&entity_type, &entity_id),
            error_response(format!("{entity_type} not found: {entity_id}"), Fields::new())
        );
    }

    #[test]
    fn unregistered_tools_never_error(name in "[a-z_]{1,20}") {
        let mut router = ToolRouter::new();
        router.register_raw("registered", |_| Ok(json!({"success": true}))).unwrap();
        prop_assume!(name != "registered");

        let response = router.dispatch(&name, &json!({})).unwrap();
        prop_assert_eq!(&response["success"], &Value::Bool(false));
        prop_assert!(response["error"].is_string());
    }
}
