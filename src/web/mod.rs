//! Web viewer - read-only HTTP server over the memo directory
//!
//! Three pages: the index (one link per memo), a memo rendered to HTML,
//! and a 404 that points home. Every request re-scans the memo
//! directory, so the pages always reflect what is on disk.
//!
//! The page shell is a built-in template; an assets directory can
//! override it with its own `base.html` and contribute a favicon plus
//! loose `.css`/`.js` files, concatenated by extension into every page.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::core::markdown;
use crate::core::store::{MemoStore, MemoSummary};

struct AppState {
    config: Config,
    /// When set, the root page serves this memo instead of the index
    pinned: Option<u32>,
}

type SharedState = Arc<AppState>;

/// Run the viewer on 127.0.0.1 until interrupted.
pub async fn serve(config: Config, pinned: Option<u32>, port: u16) -> Result<()> {
    let state = Arc::new(AppState { config, pinned });

    let app = Router::new()
        .route("/", get(home))
        .route("/view", get(view))
        .route("/favicon.ico", get(favicon))
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tracing::info!("memo server listening on http://127.0.0.1:{}", port);
    println!("Serving memos on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

// === Handlers ===

async fn home(State(state): State<SharedState>) -> (StatusCode, Html<String>) {
    if let Some(id) = state.pinned {
        if let Some(page) = memo_page(&state.config, id) {
            return (StatusCode::OK, Html(page));
        }
    }
    (StatusCode::OK, Html(index_page(&state.config)))
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    id: Option<String>,
}

async fn view(
    State(state): State<SharedState>,
    Query(query): Query<ViewQuery>,
) -> (StatusCode, Html<String>) {
    let id = query.id.as_deref().and_then(|id| id.parse::<u32>().ok());
    match id.and_then(|id| memo_page(&state.config, id)) {
        Some(page) => (StatusCode::OK, Html(page)),
        None => not_found_page(&state.config),
    }
}

async fn favicon(State(state): State<SharedState>) -> impl IntoResponse {
    match std::fs::read(state.config.assets_dir.join("favicon.ico")) {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/x-icon")], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn not_found(State(state): State<SharedState>) -> (StatusCode, Html<String>) {
    not_found_page(&state.config)
}

// === Page builders ===

const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{title}}</title>
{{favicon}}
<style>
body { max-width: 48rem; margin: 2rem auto; padding: 0 1rem; font-family: sans-serif; line-height: 1.5; }
a.main-link { display: inline-block; padding: 0.15rem 0; }
pre { background: #f4f4f4; padding: 0.75rem; overflow-x: auto; }
{{style}}
</style>
</head>
<body>
<main>{{main}}</main>
<script>{{script}}</script>
</body>
</html>
"#;

/// Fill the page shell. `main` is trusted HTML, everything else is text.
fn page(config: &Config, title: &str, main: &str) -> String {
    let assets = &config.assets_dir;
    let template = std::fs::read_to_string(assets.join("base.html"))
        .unwrap_or_else(|_| BASE_TEMPLATE.to_string());

    let favicon = if crate::core::fsprobe::file_exists(&assets.join("favicon.ico")) {
        r#"<link rel="shortcut icon" href="/favicon.ico" type="image/x-icon">"#
    } else {
        ""
    };

    template
        .replace("{{title}}", &escape_html(title))
        .replace("{{favicon}}", favicon)
        .replace("{{style}}", &collect_assets(assets, "css"))
        .replace("{{script}}", &collect_assets(assets, "js"))
        .replace("{{main}}", main)
}

fn index_page(config: &Config) -> String {
    let store = MemoStore::open(&config.memo_dir);
    let memos = store.list().unwrap_or_else(|err| {
        tracing::warn!("listing memos failed: {}", err);
        Vec::new()
    });

    let main = if memos.is_empty() {
        "<p>No memos yet.</p>".to_string()
    } else {
        memos.iter().map(index_link).collect::<Vec<_>>().join("\n")
    };

    page(config, "Home", &main)
}

fn index_link(memo: &MemoSummary) -> String {
    format!(
        r#"<a class="main-link" href="/view?id={id}">{id} - {title}</a><br/>"#,
        id = memo.number,
        title = escape_html(&memo.title),
    )
}

/// Render one memo, `None` when the id resolves to nothing.
fn memo_page(config: &Config, id: u32) -> Option<String> {
    let store = MemoStore::open(&config.memo_dir);
    let path = store.resolve(id).ok().flatten()?;
    let content = std::fs::read_to_string(&path).ok()?;

    let title = crate::core::store::extract_title(&content);
    Some(page(config, &title, &markdown::to_html(&content)))
}

fn not_found_page(config: &Config) -> (StatusCode, Html<String>) {
    let main = r#"<div class="custom_404">
<p>404 Page Not Found</p>
<p>You can go <a href="/">Home</a> to view all memo listings</p>
</div>"#;
    (
        StatusCode::NOT_FOUND,
        Html(page(config, "404 Page Not Found", main)),
    )
}

/// Concatenate every `*.{ext}` file in the assets directory, sorted by
/// name so the order is stable.
fn collect_assets(dir: &Path, ext: &str) -> String {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return String::new();
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some(ext))
        .collect();
    paths.sort();

    let mut combined = String::new();
    for path in paths {
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                combined.push_str(&content);
                if !content.ends_with('\n') {
                    combined.push('\n');
                }
            }
            Err(err) => tracing::warn!("skipping asset {}: {}", path.display(), err),
        }
    }
    combined
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &Path) -> Config {
        let mut config = Config::default();
        config.memo_dir = dir.join("memo");
        config.assets_dir = dir.join("assets");
        config
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_index_page_links() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.memo_dir).unwrap();
        std::fs::write(
            config.memo_dir.join("1-2024-01-01-groceries.md"),
            "# Groceries\n",
        )
        .unwrap();
        std::fs::write(config.memo_dir.join("2-2024-01-02-todo.md"), "todo list\n").unwrap();

        let html = index_page(&config);
        assert!(html.contains(r#"href="/view?id=1""#));
        assert!(html.contains("1 - Groceries"));
        assert!(html.contains("2 - todo list"));
    }

    #[test]
    fn test_index_page_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        let html = index_page(&config);
        assert!(html.contains("No memos yet"));
    }

    #[test]
    fn test_memo_page() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.memo_dir).unwrap();
        std::fs::write(
            config.memo_dir.join("1-2024-01-01-groceries.md"),
            "# Groceries\n\nmilk\n",
        )
        .unwrap();

        let html = memo_page(&config, 1).unwrap();
        assert!(html.contains("<h1>Groceries</h1>"));
        assert!(html.contains("<title>Groceries</title>"));

        assert!(memo_page(&config, 2).is_none());
    }

    #[test]
    fn test_custom_base_template() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.assets_dir).unwrap();
        std::fs::write(
            config.assets_dir.join("base.html"),
            "<html><title>{{title}}</title><body>{{main}}</body></html>",
        )
        .unwrap();

        let html = page(&config, "T & T", "<p>body</p>");
        assert!(html.contains("<title>T &amp; T</title>"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_collect_assets_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        std::fs::create_dir_all(&assets).unwrap();
        std::fs::write(assets.join("b.css"), "b { color: red }").unwrap();
        std::fs::write(assets.join("a.css"), "a { color: blue }\n").unwrap();
        std::fs::write(assets.join("app.js"), "console.log(1)").unwrap();
        std::fs::write(assets.join("notes.txt"), "ignored").unwrap();

        let css = collect_assets(&assets, "css");
        let js = collect_assets(&assets, "js");

        // Sorted by name: a.css before b.css
        let a_pos = css.find("a { color: blue }").unwrap();
        let b_pos = css.find("b { color: red }").unwrap();
        assert!(a_pos < b_pos);

        assert!(js.contains("console.log(1)"));
        assert!(!css.contains("ignored"));
        assert!(!js.contains("color"));
    }

    #[test]
    fn test_missing_assets_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(collect_assets(&dir.path().join("nope"), "css"), "");
    }
}
