//! Interactive OAuth authentication against the bookmark service.
//!
//! The browser launch and the blocking confirmation read are behind the
//! [`Prompt`] trait so tests can drive the flow without a real browser or
//! stdin.

use std::io::{self, BufRead};
use std::path::Path;

use tracing::info;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::client::BookmarkSource;
use crate::config::Config;
use crate::error::{PockyllError, SourceError};

/// The two host-environment side effects of the authentication flow.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait Prompt {
    /// Open the authorization URL in the user's environment.
    fn open_url(&self, url: &str) -> Result<(), SourceError>;

    /// Block until the user signals that authorization is complete.
    fn wait_for_confirmation(&self) -> Result<(), SourceError>;
}

/// Production prompt: default browser plus a blocking ENTER read from stdin.
pub struct BrowserPrompt;

impl Prompt for BrowserPrompt {
    fn open_url(&self, url: &str) -> Result<(), SourceError> {
        webbrowser::open(url)?;
        Ok(())
    }

    fn wait_for_confirmation(&self) -> Result<(), SourceError> {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(())
    }
}

/// Run the one-shot authentication flow and persist the obtained access token
/// into the configuration document at `config_path`.
pub fn run(
    config_path: &Path,
    config: &mut Config,
    source: &dyn BookmarkSource,
    prompt: &dyn Prompt,
) -> Result<(), PockyllError> {
    let (consumer_key, redirect_uri) = match (&config.consumer_key, &config.redirect_uri) {
        (Some(key), Some(uri)) => (key.clone(), uri.clone()),
        (key, uri) => {
            let mut missing = Vec::new();
            if key.is_none() {
                missing.push("consumer_key");
            }
            if uri.is_none() {
                missing.push("redirect_uri");
            }
            return Err(PockyllError::IncompleteConfig { missing });
        }
    };

    let request_token = source
        .request_token(&consumer_key, &redirect_uri)
        .map_err(PockyllError::Api)?;
    let auth_url = source.auth_url(&request_token, &redirect_uri);
    info!(url = %auth_url, "directing browser to the authorization URL");

    println!("Directing your browser to authenticate against Pocket.");
    println!("Please continue authentication in your browser.");
    println!("When finished, press ENTER.");
    prompt.open_url(&auth_url).map_err(PockyllError::Prompt)?;
    prompt.wait_for_confirmation().map_err(PockyllError::Prompt)?;

    let access_token = source
        .access_token(&consumer_key, &request_token)
        .map_err(PockyllError::Api)?;
    config.access_token = Some(access_token);
    config.save(config_path)?;
    info!("access token stored");
    Ok(())
}
