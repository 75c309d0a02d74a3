//! 在浏览器里测试网页接口。

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use wasm_bindgen_test::*;

use wasm_bindgen::JsValue;

use fa_minify::{compile, EPSILON_CODE};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn compile_then_minify() {
    let nfa = compile("a*b").map_err(JsValue::from).unwrap();
    assert!(!nfa.is_deterministic());
    assert!(nfa.transitions().chunks(3).any(|t| t[2] == EPSILON_CODE));

    let min = nfa
        .determinize()
        .and_then(|dfa| dfa.minify())
        .map_err(JsValue::from)
        .unwrap();
    assert!(min.is_deterministic());
    assert_eq!(min.states(), vec![1, 2]);
    assert_eq!(min.alphabet(), "ab");
    assert_eq!(min.accepting().len(), 1);
    assert_eq!(min.transitions().len() % 3, 0);
}

#[wasm_bindgen_test]
fn syntax_errors_are_reported() {
    assert!(compile("(a").is_err());
    assert!(compile("").is_err());
}
