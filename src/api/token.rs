use crate::api;
use crate::api::Error;
use crate::model::{Api, Token};
use tokio::sync::Mutex;

/// Cache for the appliance session token. At most one login is in flight at
/// a time: a refresh runs inside the critical section, so concurrent callers
/// that all find the cache empty collapse into a single login and share its
/// result. Cache hits perform no I/O while holding the lock.
#[derive(Debug, Default)]
pub struct TokenStore {
    token: Mutex<Option<Token>>,
}

impl TokenStore {
    pub fn new() -> TokenStore {
        TokenStore {
            token: Mutex::new(None),
        }
    }

    /// Returns the cached token, logging in first if none is cached. With
    /// `force_refresh` the cached token is discarded and a new login is
    /// performed unconditionally; callers use this after the appliance
    /// rejected the cached token with a 401.
    ///
    /// A caller that waited on the lock while another caller refreshed will
    /// observe the freshly stored token and return it without a second login,
    /// unless it asked for `force_refresh` itself.
    pub async fn get_or_create(&self, api: &Api, force_refresh: bool) -> Result<Token, Error> {
        let mut cached = self.token.lock().await;

        match cached.as_ref() {
            Some(token) if !force_refresh => {
                log::info!("using cached token");
                Ok(token.clone())
            }
            _ => {
                log::info!("requesting new token");
                let token = api::login(api).await?;
                *cached = Some(token.clone());
                Ok(token)
            }
        }
    }
}
