use crate::domain::model::FixtureKind;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::{Sentence, Word, Words};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::Fake;
use serde_json::{json, Value};

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Handcrafted", "Ergonomic", "Rustic", "Sleek", "Refined", "Practical", "Modern", "Gorgeous",
];
const PRODUCT_NOUNS: &[&str] = &[
    "Chair", "Keyboard", "Shirt", "Table", "Shoes", "Gloves", "Lamp", "Backpack",
];

fn pick<'a>(items: &[&'a str]) -> &'a str {
    items[(0..items.len()).fake::<usize>()]
}

fn product_name() -> String {
    let material: String = Word().fake();
    let mut chars = material.chars();
    let material = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{} {} {}", pick(PRODUCT_ADJECTIVES), material, pick(PRODUCT_NOUNS))
}

/// Price with two decimals between 1.00 and 999.99.
fn price() -> f64 {
    let cents: u32 = (100..100_000).fake();
    f64::from(cents) / 100.0
}

fn image_url() -> String {
    let seed: String = Word().fake();
    format!("https://picsum.photos/seed/{}/640/480", seed)
}

fn description() -> String {
    Sentence(8..16).fake()
}

pub fn generate(kind: FixtureKind) -> Value {
    match kind {
        FixtureKind::PlatziProduct => json!({
            "title": product_name(),
            "price": price(),
            "description": description(),
            "categoryId": 1,
            "images": [image_url()],
        }),
        FixtureKind::PlatziUser => {
            let email: String = SafeEmail().fake();
            json!({
                "name": Name().fake::<String>(),
                "avatar": format!("https://i.pravatar.cc/150?u={}", email),
                "email": email,
                "password": "123456",
            })
        }
        FixtureKind::FakeStoreProduct => json!({
            "title": product_name(),
            "price": 49.9,
            "description": "Produto criado no teste",
            "image": "https://i.pravatar.cc",
            "category": "electronics",
        }),
        FixtureKind::FakeStoreUser => {
            let tags: Vec<String> = Words(1..3).fake();
            json!({
                "email": SafeEmail().fake::<String>(),
                "username": format!("{}_{}", Username().fake::<String>(), tags.join("")),
                "password": "123456",
                "name": {
                    "firstname": FirstName().fake::<String>(),
                    "lastname": LastName().fake::<String>(),
                },
                "address": {
                    "city": CityName().fake::<String>(),
                    "street": StreetName().fake::<String>(),
                    "number": 3,
                    "zipcode": "12345-678",
                    "geolocation": {
                        "lat": "40.7128",
                        "long": "74.0060",
                    },
                },
                "phone": "123-456-7890",
            })
        }
    }
}
