#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

//! Browser smoke tests for `PortfolioPage`.
//!
//! Run:
//!   wasm-pack test --headless --firefox crates/folio-web

use folio_web::PortfolioPage;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const MARKUP: &str = r##"
<nav>
  <button id="themeToggle">theme</button>
  <button id="hamburger" aria-expanded="false">menu</button>
  <ul class="nav-menu" id="navMenu">
    <li><a href="#home">Home</a></li>
    <li><a href="#about">About</a></li>
  </ul>
</nav>
<section id="home" style="height: 900px">home</section>
<section id="about" style="height: 900px">about</section>
"##;

fn document() -> Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("document")
}

fn element(id: &str) -> HtmlElement {
    document()
        .get_element_by_id(id)
        .expect("element")
        .dyn_into::<HtmlElement>()
        .expect("html element")
}

fn fresh_page() -> PortfolioPage {
    let window = web_sys::window().expect("window");
    if let Ok(Some(storage)) = window.local_storage() {
        storage.clear().expect("clear storage");
    }
    let body = document().body().expect("body");
    body.set_class_name("");
    body.set_inner_html(MARKUP);
    PortfolioPage::new(None).expect("mount")
}

#[wasm_bindgen_test]
fn theme_toggle_marks_body() {
    let page = fresh_page();
    let body = document().body().expect("body");
    assert!(!body.class_list().contains("dark-theme"));

    element("themeToggle").click();
    assert!(body.class_list().contains("dark-theme"));
    page.dispose();
}

#[wasm_bindgen_test]
fn hamburger_opens_menu() {
    let page = fresh_page();
    element("hamburger").click();
    assert!(element("navMenu").class_list().contains("active"));
    assert_eq!(
        element("hamburger").get_attribute("aria-expanded").as_deref(),
        Some("true")
    );
    page.dispose();
}

#[wasm_bindgen_test]
fn sections_get_reveal_baseline() {
    let page = fresh_page();
    assert!(element("home").class_list().contains("reveal"));
    assert!(element("about").class_list().contains("reveal"));
    page.dispose();
}
