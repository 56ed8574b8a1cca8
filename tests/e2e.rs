//! End-to-end browser tests using Playwright.
//!
//! These tests load a generated portfolio in a real browser and check the
//! behavior the `folio-scene` bundle wires up: the loading overlay, skill
//! bars, portfolio filters, the contact form and scene disposal.
//!
//! ## Setup
//! - Build the scene bundle: `wasm-pack build folio-scene --target web`
//! - Install Playwright browsers: `npx playwright install`
//!
//! Without the bundle the page has no controller, so the test is skipped.
//!
//! ## Running
//! - Default (chromium): `cargo nextest run e2e`
//! - Specific browser: `BROWSER=firefox cargo nextest run e2e`
//! - All browsers (CI): `BROWSER=all cargo nextest run e2e`

use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use playwright_rs::Playwright;
use tokio::sync::oneshot;

/// Poll `$script` every 50 ms until its value satisfies `$accept`, for at
/// most `$tries` attempts. Evaluates to the last value seen and whether it
/// was accepted.
macro_rules! wait_for_js {
    ($page:expr, $script:expr, $tries:expr, $accept:expr) => {{
        let mut last = String::new();
        let mut accepted = false;
        for _ in 0..$tries {
            last = $page.evaluate_value($script).await.unwrap_or_default();
            if $accept(last.as_str()) {
                accepted = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        (last, accepted)
    }};
}

const SKILL_BAR_WIDTH: &str =
    "document.querySelector('.skill-progress[data-percentage=\"88\"]').style.width";

const LOADING_DISPLAY: &str = "document.querySelector('.loading-screen').style.display";

const MS_SINCE_READY: &str = "performance.now() - \
     performance.getEntriesByType('navigation')[0].domContentLoadedEventStart";

const PORTFOLIO_DISPLAY: &str = "Array.from(document.querySelectorAll('.portfolio-item')) \
     .map(item => (item.classList.contains('mobile') ? 'mobile' : 'other') + ':' + item.style.display) \
     .join(',')";

/// Find an available port for the test server.
fn find_available_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to port")
        .local_addr()
        .expect("Failed to get local address")
        .port()
}

fn scene_pkg() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("folio-scene")
        .join("pkg")
}

/// Generate the fixture site, bundle included, into `output_dir`.
fn generate_site(output_dir: &Path) {
    let status = Command::new(env!("CARGO_BIN_EXE_folio"))
        .args(["generate", "--input", "tests/fixtures/site.yaml", "--output"])
        .arg(output_dir)
        .arg("--scene-pkg")
        .arg(scene_pkg())
        .status()
        .expect("Failed to execute folio");

    assert!(status.success(), "folio failed to generate the site");
    assert!(
        output_dir.join("folio_scene_bg.wasm").is_file(),
        "scene bundle should be copied next to the page"
    );
}

/// Start a simple HTTP server serving static files.
async fn start_server(output_dir: PathBuf, port: u16, shutdown_rx: oneshot::Receiver<()>) {
    use axum::Router;
    use tower_http::services::ServeDir;

    let app = Router::new().fallback_service(ServeDir::new(output_dir));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .expect("Failed to bind server");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        })
        .await
        .expect("Server error");
}

/// Get browsers to test based on BROWSER env var.
/// - "chromium" (default): just chromium
/// - "firefox": just firefox
/// - "webkit": just webkit
/// - "all": all three browsers
fn get_browsers_to_test() -> Vec<&'static str> {
    match std::env::var("BROWSER").as_deref() {
        Ok("firefox") => vec!["firefox"],
        Ok("webkit") => vec!["webkit"],
        Ok("all") => vec!["chromium", "firefox", "webkit"],
        _ => vec!["chromium"], // default
    }
}

/// Run the page journey with a specific browser.
async fn run_portfolio_test(playwright: &Playwright, browser_name: &str, base_url: &str) {
    println!("Testing with browser: {}", browser_name);

    let browser = match browser_name {
        "firefox" => playwright
            .firefox()
            .launch()
            .await
            .expect("Failed to launch Firefox"),
        "webkit" => playwright
            .webkit()
            .launch()
            .await
            .expect("Failed to launch WebKit"),
        _ => playwright
            .chromium()
            .launch()
            .await
            .expect("Failed to launch Chromium"),
    };

    let page = browser.new_page().await.expect("Failed to create page");
    page.set_viewport_size(playwright_rs::Viewport {
        width: 1280,
        height: 720,
    })
    .await
    .expect("Failed to set desktop viewport");

    // 1. Navigate and check the owner made it into the title
    let url = format!("{}/index.html", base_url);
    page.goto(&url, None)
        .await
        .expect("Failed to navigate to index page");

    let title = page.title().await.expect("Failed to get page title");
    assert!(
        title.contains("Rina Kusuma"),
        "[{}] Page title should contain the owner name, got: {}",
        browser_name,
        title
    );

    // 2. The controller renders one row per skill and one card per project
    let (rows, rendered) = wait_for_js!(
        page,
        "document.querySelectorAll('.skill-item').length",
        40,
        |v: &str| v.trim() == "3"
    );
    assert!(
        rendered,
        "[{}] Controller should render three skill rows, got {}",
        browser_name,
        rows
    );
    let cards = page
        .locator(".portfolio-item")
        .await
        .count()
        .await
        .expect("Failed to count portfolio cards");
    assert_eq!(cards, 3, "[{}] One card per project", browser_name);

    // 3. Loading overlay is hidden two seconds after DOMContentLoaded
    let (display, hidden) = wait_for_js!(page, LOADING_DISPLAY, 80, |v: &str| v.contains("none"));
    assert!(
        hidden,
        "[{}] Loading screen should be hidden, display was {:?}",
        browser_name,
        display
    );
    let since_ready: f64 = page
        .evaluate_value(MS_SINCE_READY)
        .await
        .unwrap_or_default()
        .trim_matches('"')
        .parse()
        .expect("Failed to read navigation timing");
    assert!(
        (1_950.0..2_600.0).contains(&since_ready),
        "[{}] Loading screen should disappear about 2.0 s after ready, took {} ms",
        browser_name,
        since_ready
    );

    // 4. Skill bars fill only once their row scrolls into view
    let before = page
        .evaluate_value(SKILL_BAR_WIDTH)
        .await
        .unwrap_or_default();
    assert!(
        !before.contains('%'),
        "[{}] Skill bar below the fold should have no width yet, got {}",
        browser_name,
        before
    );

    page.evaluate::<(), ()>(
        "document.querySelector('.skill-progress[data-percentage=\"88\"]') \
         .closest('.skill-item').scrollIntoView({ block: 'center' })",
        None,
    )
    .await
    .expect("Failed to scroll to skills");

    let (width, filled) = wait_for_js!(page, SKILL_BAR_WIDTH, 40, |v: &str| v.contains("88%"));
    assert!(
        filled,
        "[{}] Skill bar should fill to 88% in view, got {}",
        browser_name,
        width
    );

    // 5. The mobile filter leaves only mobile cards displayed
    let mobile_filter = page.locator(".filter-btn[data-filter=\"mobile\"]").await;
    mobile_filter
        .click(None)
        .await
        .expect("Failed to click mobile filter");

    let (cards, filtered) = wait_for_js!(page, PORTFOLIO_DISPLAY, 40, |v: &str| {
        let cards: Vec<&str> = v.trim_matches('"').split(',').collect();
        cards.len() == 3
            && cards.iter().all(|card| {
                *card == "mobile:block" || *card == "other:none"
            })
    });
    assert!(
        filtered,
        "[{}] Only mobile cards should stay displayed, got {}",
        browser_name,
        cards
    );

    let active = page
        .evaluate_value(
            "document.querySelector('.filter-btn[data-filter=\"mobile\"]').classList.contains('active')",
        )
        .await
        .unwrap_or_default();
    assert!(
        active.contains("true"),
        "[{}] Mobile filter button should be active",
        browser_name
    );

    // 6. Submitting the contact form confirms and clears it
    page.evaluate::<(), ()>(
        "(() => { \
           window.__confirmations = []; \
           window.alert = message => window.__confirmations.push(message); \
           const form = document.querySelector('.contact-form'); \
           form.querySelector('[name=name]').value = 'Ana'; \
           form.querySelector('[name=email]').value = 'ana@example.org'; \
           form.querySelector('[name=message]').value = 'Hello there'; \
           form.requestSubmit(); \
         })()",
        None,
    )
    .await
    .expect("Failed to submit contact form");

    let (confirmation, confirmed) = wait_for_js!(
        page,
        "window.__confirmations.join('|')",
        20,
        |v: &str| v.contains("get back to you soon")
    );
    assert!(
        confirmed,
        "[{}] Form should show the site's confirmation, got {}",
        browser_name,
        confirmation
    );
    let fields = page
        .evaluate_value(
            "Array.from(document.querySelectorAll('.contact-form input, .contact-form textarea')) \
             .map(field => field.value).join('')",
        )
        .await
        .unwrap_or_default();
    assert!(
        fields.trim_matches('"').is_empty(),
        "[{}] Form should be reset after submit, got {}",
        browser_name,
        fields
    );

    // 7. Disposing the scene removes its canvas
    let (canvases, mounted) = wait_for_js!(
        page,
        "document.querySelectorAll('#animation-3d canvas').length",
        40,
        |v: &str| v.trim() == "1"
    );
    assert!(
        mounted,
        "[{}] Scene should mount one canvas, got {}",
        browser_name,
        canvases
    );

    page.evaluate::<(), ()>(
        "import('./folio_scene.js').then(scene => scene.dispose_scene())",
        None,
    )
    .await
    .expect("Failed to dispose scene");

    let (canvases, removed) = wait_for_js!(
        page,
        "document.querySelectorAll('#animation-3d canvas').length",
        20,
        |v: &str| v.trim() == "0"
    );
    assert!(
        removed,
        "[{}] Disposed scene should remove its canvas, got {}",
        browser_name,
        canvases
    );

    // Cleanup
    browser.close().await.expect("Failed to close browser");

    println!("[{}] All checks passed!", browser_name);
}

#[test]
fn e2e_portfolio_page() {
    if !scene_pkg().join("folio_scene_bg.wasm").is_file() {
        eprintln!(
            "skipping e2e_portfolio_page: build the scene bundle with \
             `wasm-pack build folio-scene --target web`"
        );
        return;
    }

    let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");

    rt.block_on(async {
        let output = tempfile::tempdir().expect("Failed to create output dir");
        generate_site(output.path());
        let port = find_available_port();
        let base_url = format!("http://127.0.0.1:{}", port);

        // Start server
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let server_handle =
            tokio::spawn(start_server(output.path().to_path_buf(), port, shutdown_rx));

        // Give server time to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Initialize Playwright
        let playwright = Playwright::launch()
            .await
            .expect("Failed to initialize Playwright");

        // Run test for each configured browser
        for browser_name in get_browsers_to_test() {
            run_portfolio_test(&playwright, browser_name, &base_url).await;
        }

        // Cleanup
        let _ = shutdown_tx.send(());
        let _ = server_handle.await;
    });
}
