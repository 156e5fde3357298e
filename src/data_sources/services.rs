use crate::client::models::Service;
use crate::client::Collection;
use crate::schema::{AttributeType, Schema};

use super::{computed_attributes, Listing};

/// Services, listed or looked up.
pub struct Services;

impl Listing for Services {
    type Wire = Service;

    const COLLECTION: Collection = Collection::Services;
    const LABEL: &'static str = "service";
    const SINGLE: &'static str = "coolify_service";
    const LIST: &'static str = "coolify_services";
    const LIST_KEY: &'static str = "services";
    const FILTERS: &'static [&'static str] = &["uuid", "name", "description", "service_type"];

    fn attributes() -> Schema {
        use AttributeType::{Bool, Int64, String};

        computed_attributes(&[
            ("id", Int64),
            ("uuid", String),
            ("name", String),
            ("description", String),
            ("service_type", String),
            ("docker_compose_raw", String),
            ("server_id", Int64),
            ("environment_id", Int64),
            ("destination_id", Int64),
            ("destination_type", String),
            ("connect_to_docker_network", Bool),
            ("created_at", String),
            ("updated_at", String),
            ("deleted_at", String),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::client_for;
    use crate::data_sources::read_one;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_read_one_service() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/services/svc-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 4,
                "uuid": "svc-1",
                "name": "plausible",
                "service_type": "plausible",
                "connect_to_docker_network": false
            })))
            .mount(&server)
            .await;

        let record = read_one::<Services>(&client_for(&server), "svc-1").await.unwrap();
        assert_eq!(record["service_type"], "plausible");
        assert_eq!(record["id"], 4);
        assert_eq!(record["description"], serde_json::Value::Null);
    }
}
