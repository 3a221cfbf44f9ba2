use axum::response::Html;

/// Serve the embedded search/layout form.
pub async fn form_handler() -> Html<&'static str> {
    Html(include_str!("../../../static/index.html"))
}
