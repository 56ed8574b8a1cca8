use std::path::{Path, PathBuf};

use axum::Router;
use notify::{Event, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tower_http::services::ServeDir;
use tower_livereload::LiveReloadLayer;
use tracing::{error, info};

use crate::html_writer::HtmlWriter;
use crate::io::{FormatRegistry, IoResult};
use crate::site::SiteContent;

/// Delay that lets a burst of editor writes settle before regenerating
const DEBOUNCE_MS: u64 = 100;

fn is_change(event: &Event) -> bool {
    event.kind.is_modify() || event.kind.is_create()
}

/// Regenerate the page with a fresh registry around `writer`
fn regenerate(input: Option<&Path>, output: &Path, writer: &HtmlWriter) -> IoResult<SiteContent> {
    let registry = FormatRegistry::with_html_writer(writer.clone());
    crate::build(&registry, input, output)
}

/// Serve `output` with a live reload layer that fires on any change inside it.
///
/// The returned watcher must be kept alive for reloads to happen.
fn live_reload_router(output: &Path) -> anyhow::Result<(Router, notify::RecommendedWatcher)> {
    let livereload = LiveReloadLayer::new();
    let reloader = livereload.reloader();

    let mut output_watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
        if let Ok(event) = res {
            if is_change(&event) {
                reloader.reload();
            }
        }
    })?;
    output_watcher.watch(output, RecursiveMode::Recursive)?;

    let app = Router::new()
        .fallback_service(ServeDir::new(output))
        .layer(livereload);

    Ok((app, output_watcher))
}

async fn listen(app: Router, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("development server running at http://localhost:{port}");
    info!("press Ctrl+C to stop");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Start the development server with hot reload
pub async fn serve(
    input: Option<&Path>,
    output: &Path,
    port: u16,
    writer: HtmlWriter,
) -> anyhow::Result<()> {
    regenerate(input, output, &writer)?;

    let (tx, mut rx) = mpsc::channel::<()>(1);

    // Watch the content file's directory; the default site has nothing to watch.
    let input_watcher = match input {
        Some(input) => {
            let mut watcher = notify::recommended_watcher(move |res: Result<Event, _>| {
                if let Ok(event) = res {
                    if is_change(&event) {
                        let _ = tx.blocking_send(());
                    }
                }
            })?;
            let watch_path = input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            watcher.watch(&watch_path, RecursiveMode::NonRecursive)?;
            info!("watching {} for changes", input.display());
            Some(watcher)
        }
        None => None,
    };

    let input_for_regen = input.map(Path::to_path_buf);
    let output_for_regen = output.to_path_buf();
    tokio::spawn(async move {
        while rx.recv().await.is_some() {
            tokio::time::sleep(tokio::time::Duration::from_millis(DEBOUNCE_MS)).await;

            // Drain any additional notifications
            while rx.try_recv().is_ok() {}

            match regenerate(input_for_regen.as_deref(), &output_for_regen, &writer) {
                Ok(_) => info!("regenerated portfolio"),
                Err(e) => error!("error regenerating: {e}"),
            }
        }
    });

    let (app, output_watcher) = live_reload_router(output)?;

    // Keep watchers alive
    let _input_watcher = input_watcher;
    let _output_watcher = output_watcher;

    listen(app, port).await
}

/// Start a simple static file server with live reload (no input file watching).
#[cfg(feature = "dev")]
pub async fn serve_static(output: &Path, port: u16) -> anyhow::Result<()> {
    let (app, output_watcher) = live_reload_router(output)?;
    info!("watching {} for changes", output.display());

    let _output_watcher = output_watcher;

    listen(app, port).await
}
