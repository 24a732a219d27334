use serde_derive::Serialize;
use vista::{Config, Engine};

#[derive(Debug, Serialize)]
pub struct Product {
    name: String,
    manufacturer: String,
    price: i32,
}

impl Product {
    #[allow(dead_code)]
    pub fn new(name: &str, manufacturer: &str, price: i32) -> Product {
        Product { name: name.to_owned(), manufacturer: manufacturer.to_owned(), price }
    }
}

/// Engine loaded with every view of `tests/views`
#[allow(dead_code)]
pub fn load_engine() -> Engine {
    let mut engine = Engine::new("tests/views/**/*.html").unwrap();
    engine.set_config(Config::parse("APP_URL=http://x/\nAPP_PORT=8000\n"));
    engine
}
