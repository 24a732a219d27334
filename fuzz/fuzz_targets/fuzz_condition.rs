#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate vista;

use vista::{eval_condition, Context};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = String::from_utf8(data.to_vec()) {
        let _ = eval_condition(&s, &Context::new());
    }
});
