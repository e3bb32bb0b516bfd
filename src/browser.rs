//! Hand-off to the dealer's follow-up page

use anyhow::{Context, Result};

/// Opens a URL outside the terminal
#[cfg_attr(test, mockall::automock)]
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// The desktop's default browser
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        open::that_detached(url).with_context(|| format!("open {url} in a browser"))
    }
}
