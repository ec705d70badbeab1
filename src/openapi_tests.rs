#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{} should be an object schema", name),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();

        assert!(openapi.components.is_some());
        let components = openapi.components.as_ref().unwrap();

        for name in [
            "ErrorResponse",
            "ValidationErrorResponse",
            "HealthResponse",
            "FormData",
            "Prediction",
            "RecentEvent",
            "ChatMessage",
            "ChatRequest",
        ] {
            assert!(components.schemas.contains_key(name), "missing {}", name);
        }

        // Verify that the schema can be serialized to JSON without errors
        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        assert!(properties.contains(&"error".to_string()));
        assert!(properties.contains(&"code".to_string()));
        assert!(properties.contains(&"success".to_string()));

        let properties = object_properties("ValidationErrorResponse");
        assert!(properties.contains(&"fields".to_string()));
    }

    #[test]
    fn test_form_data_lists_every_field() {
        let properties = object_properties("FormData");
        for field in common::FormField::ALL {
            assert!(
                properties.contains(&field.name().to_string()),
                "missing {}",
                field.name()
            );
        }
    }

    #[test]
    fn test_openapi_paths() {
        let openapi = ApiDoc::openapi();
        let paths = &openapi.paths.paths;

        let health = paths.get("/health").unwrap();
        assert!(health.operations.contains_key(&PathItemType::Get));

        let predictions = paths.get("/api/v1/predictions").unwrap();
        let post = predictions.operations.get(&PathItemType::Post).unwrap();
        assert!(post.responses.responses.contains_key("200"));
        assert!(post.responses.responses.contains_key("422"));

        let events = paths.get("/api/v1/events/recent").unwrap();
        let get = events.operations.get(&PathItemType::Get).unwrap();
        assert!(get.responses.responses.contains_key("502"));

        let chat = paths.get("/api/v1/chat").unwrap();
        assert!(chat.operations.contains_key(&PathItemType::Post));
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi = ApiDoc::openapi();
        let openapi_json = serde_json::to_string(&openapi).unwrap();

        assert!(!openapi_json.contains("common.ErrorResponse"));
        assert!(!openapi_json.contains("common::ErrorResponse"));
        assert!(openapi_json.contains("ErrorResponse"));
    }
}
