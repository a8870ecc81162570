use crate::domain::model::{Expectation, FixtureKind, StepDefinition, SuiteDefinition};
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;

pub const NAME: &str = "platzi";
pub const BASE_URL: &str = "https://api.escuelajs.co/api/v1";
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Product, category, user and auth checks for the Platzi fake store API.
pub fn definition() -> SuiteDefinition {
    let cases = vec![
        StepDefinition::get("GET /products lists products", "/products", StatusCode::OK)
            .expect(Expectation::NonEmptyArray)
            .capture("existing_product_id", "/0/id"),
        StepDefinition::get(
            "GET /products/:id returns the product",
            "/products/{existing_product_id}",
            StatusCode::OK,
        )
        .expect(Expectation::JsonLike(json!({"id": "{existing_product_id}"}))),
        StepDefinition::post("POST /products creates a product", "/products", StatusCode::CREATED)
            .with_fixture(FixtureKind::PlatziProduct)
            .capture("created_product_id", "/id"),
        StepDefinition::put(
            "PUT /products/:id replaces the product",
            "/products/{created_product_id}",
            StatusCode::OK,
        )
        .with_json(json!({
            "title": "Produto Atualizado",
            "price": 99.99,
            "description": "Descrição atualizada",
            "categoryId": 1,
            "images": ["https://placeimg.com/640/480/tech"],
        }))
        .expect(Expectation::JsonLike(json!({"title": "Produto Atualizado"}))),
        StepDefinition::delete(
            "DELETE /products/:id deletes the product",
            "/products/{created_product_id}",
            StatusCode::OK,
        ),
        // the API reports unknown ids as a bad request
        StepDefinition::get(
            "GET /products/:id rejects an unknown id",
            "/products/999999",
            StatusCode::BAD_REQUEST,
        ),
        StepDefinition::post(
            "POST /products rejects an incomplete product",
            "/products",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_json(json!({"price": 123})),
        StepDefinition::get("GET /categories lists categories", "/categories", StatusCode::OK)
            .expect(Expectation::NonEmptyArray),
        StepDefinition::get(
            "GET /categories/:id/products lists a category",
            "/categories/1/products",
            StatusCode::OK,
        )
        .expect(Expectation::IsArray),
        StepDefinition::post("POST /users creates a user", "/users", StatusCode::CREATED)
            .with_fixture(FixtureKind::PlatziUser)
            .expect(Expectation::EchoesRequestField("/email".to_string())),
        StepDefinition::post("POST /auth/login signs in a known user", "/auth/login", StatusCode::CREATED)
            .with_json(json!({"email": "john@mail.com", "password": "changeme"}))
            .expect(Expectation::FieldPresent("/access_token".to_string())),
    ];

    SuiteDefinition {
        name: NAME.to_string(),
        default_base_url: BASE_URL.to_string(),
        default_timeout: TIMEOUT,
        setup: Vec::new(),
        cases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[test]
    fn test_platzi_suite_layout() {
        let suite = definition();
        assert_eq!(suite.cases.len(), 11);
        assert!(suite.setup.is_empty());
        assert_eq!(suite.default_timeout, Duration::from_secs(10));

        let delete = suite.case("DELETE /products/:id deletes the product").unwrap();
        assert_eq!(delete.method, Method::DELETE);
        assert_eq!(delete.path, "/products/{created_product_id}");
        // no guard: a missing id fails the case instead of skipping it
        assert!(delete.skip_unless.is_empty());
    }

    #[test]
    fn test_captures_precede_their_use() {
        let suite = definition();
        let position = |name: &str| suite.cases.iter().position(|c| c.captures.iter().any(|cap| cap.name == name));
        let first_use = |placeholder: &str| {
            suite
                .cases
                .iter()
                .position(|c| c.path.contains(&format!("{{{}}}", placeholder)))
        };

        for name in ["existing_product_id", "created_product_id"] {
            assert!(position(name).unwrap() < first_use(name).unwrap(), "{}", name);
        }
    }
}
