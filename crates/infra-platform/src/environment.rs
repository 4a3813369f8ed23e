//! Platform environment (region) and the base URLs derived from it

use crate::error::{PlatformError, Result};
use url::Url;

/// Region the widget was deployed against
pub const DEFAULT_ENVIRONMENT: &str = "mypurecloud.de";

/// API and login base URLs for one platform region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEnvironment {
    api_base: Url,
    login_base: Url,
}

impl PlatformEnvironment {
    /// Derive `https://api.<host>/` and `https://login.<host>/`
    pub fn from_host(host: &str) -> Result<Self> {
        let host = host.trim().trim_end_matches('/');
        if host.is_empty() || host.contains("://") || host.contains('/') {
            return Err(PlatformError::InvalidUrl(format!(
                "environment must be a bare host name, got {:?}",
                host
            )));
        }

        Self::with_bases(
            &format!("https://api.{}", host),
            &format!("https://login.{}", host),
        )
    }

    /// Explicit base URLs (e.g. a local mock server)
    pub fn with_bases(api_base: &str, login_base: &str) -> Result<Self> {
        Ok(Self {
            api_base: base_url(api_base)?,
            login_base: base_url(login_base)?,
        })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    pub fn login_base(&self) -> &Url {
        &self.login_base
    }
}

/// Parse a base URL and make sure its path ends with `/` so joins append
fn base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(PlatformError::InvalidUrl(format!(
            "{} cannot be used as a base URL",
            raw
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_host_derives_bases() {
        let env = PlatformEnvironment::from_host(DEFAULT_ENVIRONMENT).unwrap();
        assert_eq!(env.api_base().as_str(), "https://api.mypurecloud.de/");
        assert_eq!(env.login_base().as_str(), "https://login.mypurecloud.de/");
    }

    #[test]
    fn test_from_host_rejects_urls() {
        assert!(PlatformEnvironment::from_host("https://mypurecloud.com").is_err());
        assert!(PlatformEnvironment::from_host("").is_err());
    }

    #[test]
    fn test_with_bases_keeps_path_prefix() {
        let env =
            PlatformEnvironment::with_bases("http://127.0.0.1:8080/proxy", "http://127.0.0.1:8081")
                .unwrap();
        assert_eq!(env.api_base().as_str(), "http://127.0.0.1:8080/proxy/");
        assert_eq!(env.login_base().as_str(), "http://127.0.0.1:8081/");
    }
}
