//! Browser session over the Chrome DevTools Protocol
//!
//! One [`Session`] per suite run; scenarios open additional [`Tab`]s in the
//! same browser context to hold several UI surfaces open at once. Tabs are
//! driven strictly serially (`activate` brings one to front, reads happen,
//! then the next) - there is no intra-scenario parallelism.

use std::path::Path;
use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::{timeouts, TargetConfig};
use crate::error::{E2eError, E2eResult};
use crate::poll::poll_until;
use crate::selectors::LoginSelectors;

/// A running browser plus its CDP event loop.
pub struct Session {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl Session {
    /// Launch a local Chromium, or connect to `cdp_url` when configured.
    pub async fn start(cfg: &TargetConfig) -> E2eResult<Self> {
        let (browser, mut handler) = match &cfg.cdp_url {
            Some(url) => {
                info!(url, "connecting to existing CDP endpoint");
                Browser::connect(url.clone()).await?
            }
            None => {
                let mut builder = BrowserConfig::builder()
                    .window_size(cfg.viewport_width, cfg.viewport_height);
                if cfg.headful {
                    builder = builder.with_head();
                }
                let config = builder.build().map_err(E2eError::Browser)?;
                info!("launching headless browser");
                Browser::launch(config).await?
            }
        };

        // Drive CDP events for the lifetime of the session.
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// Open a new tab and navigate it.
    pub async fn open_tab(&self, url: &str) -> E2eResult<Tab> {
        let page = self.browser.new_page("about:blank").await?;
        let tab = Tab { page };
        tab.goto(url).await?;
        Ok(tab)
    }

    pub async fn shutdown(mut self) {
        let _ = self.browser.close().await;
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}

/// One browser tab holding one ERP screen.
pub struct Tab {
    page: Page,
}

impl Tab {
    /// Navigate and wait for the document to finish loading.
    pub async fn goto(&self, url: &str) -> E2eResult<()> {
        debug!(url, "navigate");
        self.page.goto(url).await?;
        poll_until(
            "document loaded",
            timeouts::POLL_INTERVAL,
            timeouts::NAVIGATION,
            move || async move {
                let state: String = self.eval_json("document.readyState").await?;
                Ok(state == "complete")
            },
        )
        .await
    }

    /// Bring this tab to the foreground for the next serial read.
    pub async fn activate(&self) -> E2eResult<()> {
        self.page.bring_to_front().await?;
        Ok(())
    }

    /// Evaluate JS and deserialize the completion value.
    pub async fn eval_json<T: DeserializeOwned>(&self, js: &str) -> E2eResult<T> {
        self.page
            .evaluate(js)
            .await?
            .into_value::<T>()
            .map_err(|e| E2eError::Eval(format!("{e}: {js}")))
    }

    /// Wait until `selector` is present and visible.
    pub async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> E2eResult<()> {
        let js = format!(
            "(() => {{ const e = document.querySelector('{selector}'); \
             return !!e && e.offsetParent !== null; }})()"
        );
        let js = &js;
        poll_until(selector, timeouts::POLL_INTERVAL, timeout, move || async move {
            self.eval_json::<bool>(js).await
        })
        .await
        .map_err(|_| E2eError::ElementNotFound(selector.to_string()))
    }

    /// Wait until `selector` matches nothing visible (e.g. modal closed).
    pub async fn wait_for_gone(&self, selector: &str, timeout: Duration) -> E2eResult<()> {
        let js = format!(
            "(() => {{ const e = document.querySelector('{selector}'); \
             return !e || e.offsetParent === null; }})()"
        );
        let js = &js;
        poll_until(selector, timeouts::POLL_INTERVAL, timeout, move || async move {
            self.eval_json::<bool>(js).await
        })
        .await
    }

    pub async fn click(&self, selector: &str) -> E2eResult<()> {
        self.wait_for_selector(selector, timeouts::ACTION).await?;
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        Ok(())
    }

    /// Double-click via a synthetic DOM event (CDP has no native dblclick).
    pub async fn dblclick(&self, selector: &str) -> E2eResult<()> {
        self.wait_for_selector(selector, timeouts::ACTION).await?;
        let js = format!(
            "(() => {{ const e = document.querySelector('{selector}'); if (!e) return false; \
             e.dispatchEvent(new MouseEvent('dblclick', {{ bubbles: true, cancelable: true }})); \
             return true; }})()"
        );
        if self.eval_json::<bool>(&js).await? {
            Ok(())
        } else {
            Err(E2eError::ElementNotFound(selector.to_string()))
        }
    }

    /// Read `innerText` of the first match. Missing element is a hard error.
    pub async fn text_of(&self, selector: &str) -> E2eResult<String> {
        self.wait_for_selector(selector, timeouts::ACTION).await?;
        let js = format!(
            "(() => {{ const e = document.querySelector('{selector}'); \
             return e ? (e.innerText || '').trim() : null; }})()"
        );
        self.eval_json::<Option<String>>(&js)
            .await?
            .ok_or_else(|| E2eError::ElementNotFound(selector.to_string()))
    }

    /// Current value of an input element.
    pub async fn value_of(&self, selector: &str) -> E2eResult<String> {
        let js = format!(
            "(() => {{ const e = document.querySelector('{selector}'); \
             return e ? e.value : null; }})()"
        );
        self.eval_json::<Option<String>>(&js)
            .await?
            .ok_or_else(|| E2eError::ElementNotFound(selector.to_string()))
    }

    pub async fn count_of(&self, selector: &str) -> E2eResult<usize> {
        let js = format!("document.querySelectorAll('{selector}').length");
        self.eval_json::<usize>(&js).await
    }

    /// Set an input's value through the DOM, firing the framework events the
    /// ERP listens for.
    async fn set_value(&self, selector: &str, value: &str) -> E2eResult<bool> {
        let escaped = js_escape(value);
        let js = format!(
            "(() => {{ const e = document.querySelector('{selector}'); if (!e) return false; \
             e.focus(); e.value = '{escaped}'; \
             e.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             e.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true; }})()"
        );
        self.eval_json::<bool>(&js).await
    }

    /// Fill an input and read it back; retry once when the field comes back
    /// empty (slow-rendering inputs occasionally swallow the first fill).
    pub async fn fill_verified(&self, selector: &str, value: &str) -> E2eResult<()> {
        self.wait_for_selector(selector, timeouts::ACTION).await?;
        for attempt in 0..2 {
            if !self.set_value(selector, value).await? {
                return Err(E2eError::ElementNotFound(selector.to_string()));
            }
            if self.value_of(selector).await? == value {
                return Ok(());
            }
            debug!(selector, attempt, "fill read back wrong, retrying");
        }
        Err(E2eError::StepFailed {
            step: format!("fill {selector}"),
            reason: "input did not keep the entered value".to_string(),
        })
    }

    /// Press Enter inside an element (commits searches).
    pub async fn press_enter(&self, selector: &str) -> E2eResult<()> {
        let element = self.page.find_element(selector).await?;
        element.press_key("Enter").await?;
        Ok(())
    }

    /// Full-page PNG, written to `path`.
    pub async fn screenshot_png(&self, path: &Path) -> E2eResult<()> {
        let bytes = self
            .page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Authenticate against the ERP login form.
    pub async fn login(&self, cfg: &TargetConfig) -> E2eResult<()> {
        self.goto(&cfg.url("/login")).await?;
        self.fill_verified(&LoginSelectors::username(), &cfg.username)
            .await?;
        self.fill_verified(&LoginSelectors::password(), &cfg.password)
            .await?;
        self.click(&LoginSelectors::submit()).await?;
        self.wait_for_selector(&LoginSelectors::app_shell(), timeouts::NAVIGATION)
            .await
            .map_err(|_| E2eError::Target("login did not reach the app shell".to_string()))
    }
}

/// Escape a value for embedding in a single-quoted JS string literal.
pub(crate) fn js_escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
        .replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_and_backslashes() {
        assert_eq!(js_escape(r"a\b"), r"a\\b");
        assert_eq!(js_escape("it's"), r"it\'s");
        assert_eq!(js_escape("a\nb"), r"a\nb");
    }

    #[test]
    fn plain_fixtures_pass_through() {
        assert_eq!(js_escape("TEST_PRODUCT_1"), "TEST_PRODUCT_1");
        assert_eq!(js_escape("23.01.2025"), "23.01.2025");
    }
}
