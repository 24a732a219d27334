#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate vista;

use vista::{Context, Engine};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = String::from_utf8(data.to_vec()) {
        let engine = Engine::default();
        let _ = engine.render_str(&s, &Context::new());
    }
});
