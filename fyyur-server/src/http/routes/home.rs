//! Landing page

use axum::{routing::get, Router};

use crate::http::view::Page;

/// GET /
async fn home() -> Page {
    Page::home()
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn home_renders_home_template() {
        let page = home().await;
        assert_eq!(page.status, StatusCode::OK);
        assert_eq!(page.template, "pages/home.html");
        assert!(page.flashes.is_empty());
    }
}
