//! Headless Chromium session driven over the DevTools protocol.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use super::{Marker, PageSource};
use crate::config::{CHROME_ARGS, MARKER_POLL_INTERVAL, NAVIGATION_TIMEOUT};
use crate::error::{HarvesterError, Result};

/// Options for launching the browser.
#[derive(Debug, Clone, Default)]
pub struct BrowserOptions {
    /// Chrome/Chromium executable; auto-detected when `None`.
    pub chrome_executable: Option<PathBuf>,
    /// Show the browser window instead of running headless.
    pub headed: bool,
}

/// One browser with one tab, reused for every page of a run.
///
/// The DevTools client is asynchronous; the session owns a private
/// single-threaded runtime and blocks on it so callers stay synchronous.
pub struct ChromiumSession {
    runtime: Runtime,
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumSession {
    /// Launch a browser and open a blank tab.
    pub fn launch(options: &BrowserOptions) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let mut builder = BrowserConfig::builder();
        if let Some(path) = &options.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        if options.headed {
            builder = builder.with_head();
        }
        for arg in CHROME_ARGS {
            builder = builder.arg(*arg);
        }
        let config = builder.build().map_err(HarvesterError::BrowserConfig)?;

        let (browser, page, handler) = runtime.block_on(async {
            let (browser, mut handler) = Browser::launch(config).await?;

            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if let Err(e) = event {
                        tracing::trace!(error = %e, "DevTools handler error");
                    }
                }
            });

            let page = browser.new_page("about:blank").await?;
            Ok::<_, HarvesterError>((browser, page, handler))
        })?;

        tracing::debug!("Browser session started");

        Ok(Self {
            runtime,
            browser,
            page,
            handler,
        })
    }

    /// Close the browser and wait for the process to exit.
    pub fn close(self) -> Result<()> {
        let Self {
            runtime,
            mut browser,
            page,
            handler,
        } = self;

        runtime.block_on(async move {
            drop(page);
            browser.close().await?;
            browser.wait().await?;
            handler.abort();
            Ok::<_, HarvesterError>(())
        })?;

        tracing::debug!("Browser session closed");
        Ok(())
    }
}

impl PageSource for ChromiumSession {
    fn render(&mut self, url: &str, marker: Marker, timeout: Duration) -> Result<String> {
        let page = &self.page;

        self.runtime.block_on(async {
            let navigation = async {
                page.goto(url).await?;
                // Hash-routed pages only render fresh content after a reload
                page.reload().await?;
                Ok::<_, HarvesterError>(())
            };

            match tokio::time::timeout(NAVIGATION_TIMEOUT, navigation).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(HarvesterError::RenderTimeout {
                        url: url.to_string(),
                        marker: "page load".to_string(),
                        timeout: NAVIGATION_TIMEOUT,
                    })
                }
            }

            wait_for_marker(page, url, marker, timeout).await
        })
    }
}

/// Poll the rendered document until `marker` appears or `timeout` elapses.
async fn wait_for_marker(page: &Page, url: &str, marker: Marker, timeout: Duration) -> Result<String> {
    let deadline = Instant::now() + timeout;

    loop {
        let html = page.content().await?;
        if marker.is_present_in(&html) {
            return Ok(html);
        }

        if Instant::now() >= deadline {
            return Err(HarvesterError::RenderTimeout {
                url: url.to_string(),
                marker: marker.to_string(),
                timeout,
            });
        }

        tracing::trace!(%marker, url, "Marker not present yet");
        tokio::time::sleep(MARKER_POLL_INTERVAL).await;
    }
}

/// Run `f` with a freshly launched browser session.
///
/// The session is closed after `f` returns, whether it succeeded or not. If
/// both `f` and closing fail, the error from `f` is returned.
pub fn with_chromium<T>(
    options: &BrowserOptions,
    f: impl FnOnce(&mut ChromiumSession) -> Result<T>,
) -> Result<T> {
    let mut session = ChromiumSession::launch(options)?;
    let outcome = f(&mut session);
    let closed = session.close();

    match outcome {
        Ok(value) => closed.map(|()| value),
        Err(e) => {
            if let Err(close_error) = closed {
                tracing::warn!(error = %close_error, "Failed to close browser session");
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore] // Requires Chromium to be installed
    fn test_render_data_url() {
        let html = with_chromium(&BrowserOptions::default(), |session| {
            session.render(
                r#"data:text/html,<div id="subdivision">ready</div>"#,
                Marker::Id("subdivision"),
                Duration::from_secs(10),
            )
        })
        .unwrap();

        assert!(html.contains("ready"));
    }

    #[test]
    #[ignore] // Requires Chromium to be installed
    fn test_render_times_out_on_missing_marker() {
        let result = with_chromium(&BrowserOptions::default(), |session| {
            session.render(
                "data:text/html,<p>nothing here</p>",
                Marker::Id("subdivision"),
                Duration::from_secs(1),
            )
        });

        assert!(matches!(result, Err(HarvesterError::RenderTimeout { .. })));
    }
}
