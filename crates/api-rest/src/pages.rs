//! Static HTML form pages for manual use from a browser.

use axum::response::Html;

const REGISTER_FORM: &str = include_str!("../assets/register_form.html");
const SEARCH_FORM: &str = include_str!("../assets/search_form.html");

pub async fn register_form() -> Html<&'static str> {
    Html(REGISTER_FORM)
}

pub async fn search_form() -> Html<&'static str> {
    Html(SEARCH_FORM)
}
