use serde_derive::Serialize;

mod conditionals;

#[derive(Debug, Serialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
}

impl Product {
    #[allow(dead_code)]
    pub fn new(name: &str, price: f64) -> Product {
        Product { name: name.to_owned(), price }
    }
}
