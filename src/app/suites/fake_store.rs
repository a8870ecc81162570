use crate::domain::model::{Expectation, FixtureKind, StepDefinition, SuiteDefinition};
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;

pub const NAME: &str = "fake-store";
pub const BASE_URL: &str = "https://fakestoreapi.com";
pub const TIMEOUT: Duration = Duration::from_secs(90);

pub fn definition() -> SuiteDefinition {
    let setup = vec![
        StepDefinition::get("load first product", "/products", StatusCode::OK)
            .expect(Expectation::NonEmptyArray)
            .capture("first_product_id", "/0/id"),
    ];

    let cases = vec![
        StepDefinition::get("GET /products lists products", "/products", StatusCode::OK)
            .expect(Expectation::NonEmptyArray),
        StepDefinition::get(
            "GET /products/:id returns the product",
            "/products/{first_product_id}",
            StatusCode::OK,
        )
        .expect(Expectation::JsonLike(json!({"id": "{first_product_id}"}))),
        StepDefinition::post("POST /products creates a product", "/products", StatusCode::CREATED)
            .with_fixture(FixtureKind::FakeStoreProduct)
            .capture("created_product_id", "/id"),
        StepDefinition::put(
            "PUT /products/:id updates the product",
            "/products/{created_product_id}",
            StatusCode::OK,
        )
        .with_json(json!({"title": "Produto atualizado", "price": 29.9}))
        .expect(Expectation::JsonLike(json!({"id": "{created_product_id}"})))
        .skip_unless("created_product_id"),
        StepDefinition::delete(
            "DELETE /products/:id deletes the product",
            "/products/{created_product_id}",
            StatusCode::OK,
        )
        .skip_unless("created_product_id"),
        // unknown ids answer 200 with an empty body
        StepDefinition::get(
            "GET /products/:id answers an unknown id",
            "/products/999999",
            StatusCode::OK,
        ),
        StepDefinition::post(
            "POST /products accepts an incomplete product",
            "/products",
            StatusCode::CREATED,
        )
        .with_json(json!({"title": "Incompleto"})),
        StepDefinition::get(
            "GET /products/categories lists categories",
            "/products/categories",
            StatusCode::OK,
        )
        .expect(Expectation::NonEmptyArray),
        StepDefinition::get(
            "GET /products/category/:category lists a category",
            "/products/category/electronics",
            StatusCode::OK,
        )
        .expect(Expectation::NonEmptyArray),
        StepDefinition::post("POST /users creates a user", "/users", StatusCode::CREATED)
            .with_fixture(FixtureKind::FakeStoreUser),
        StepDefinition::post("POST /auth/login returns a token", "/auth/login", StatusCode::CREATED)
            .with_json(json!({"username": "mor_2314", "password": "83r5^_"}))
            .expect(Expectation::FieldMatches("/token".to_string(), r"\S+".to_string())),
        StepDefinition::post("POST /carts creates a cart", "/carts", StatusCode::CREATED).with_json(json!({
            "userId": 1,
            "date": "2020-02-03",
            "products": [
                {"productId": 1, "quantity": 2},
                {"productId": 2, "quantity": 1},
            ],
        })),
        StepDefinition::patch("PATCH /products/:id updates the price", "/products/1", StatusCode::OK)
            .with_json(json!({"price": 99.9})),
    ];

    SuiteDefinition {
        name: NAME.to_string(),
        default_base_url: BASE_URL.to_string(),
        default_timeout: TIMEOUT,
        setup,
        cases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_store_suite_layout() {
        let suite = definition();
        assert_eq!(suite.setup.len(), 1);
        assert_eq!(suite.cases.len(), 13);
        assert_eq!(suite.default_timeout, Duration::from_secs(90));
    }

    #[test]
    fn test_created_product_steps_are_guarded() {
        let suite = definition();
        let guarded: Vec<&str> = suite
            .cases
            .iter()
            .filter(|c| c.skip_unless.iter().any(|n| n == "created_product_id"))
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            guarded,
            vec![
                "PUT /products/:id updates the product",
                "DELETE /products/:id deletes the product"
            ]
        );
    }
}
