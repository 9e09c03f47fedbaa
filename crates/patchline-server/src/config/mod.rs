use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

/// Build-time default shipped in deployment manifests. A key equal to this
/// value is treated as absent.
pub const PLACEHOLDER_API_KEY: &str = "replace-with-mail-api-key";

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub public_base_url: String,
    pub company_name: String,
    pub company_phone: String,
    /// `None` when the credential is absent, empty, or the placeholder;
    /// resolved once at startup.
    pub mail_api_key: Option<String>,
    pub mail_endpoint: String,
    pub mail_from: String,
    /// Staff notification addresses, at most two.
    pub notify_recipients: Vec<String>,
    pub mail_timeout: Duration,
    pub max_body_bytes: usize,
    /// When set, an unconfigured mail provider aborts startup instead of
    /// degrading the lead forms to 503.
    pub strict_startup: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            public_base_url: "https://www.patchlinedrywall.com".to_string(),
            company_name: "Patchline Drywall".to_string(),
            company_phone: "(301) 555-0148".to_string(),
            mail_api_key: None,
            mail_endpoint: "https://api.resend.com/emails".to_string(),
            mail_from: "Patchline Drywall <leads@patchlinedrywall.com>".to_string(),
            notify_recipients: Vec::new(),
            mail_timeout: Duration::from_millis(10_000),
            max_body_bytes: 16 * 1024,
            strict_startup: false,
        }
    }
}

/// Maps an environment-provided credential to the resolved form: absent,
/// empty, and placeholder values all mean "no mailer".
#[must_use]
pub fn resolve_api_key(raw: Option<String>) -> Option<String> {
    let key = raw?.trim().to_string();
    if key.is_empty() || key == PLACEHOLDER_API_KEY {
        return None;
    }
    Some(key)
}

pub fn validate_startup_config_contract(cfg: &SiteConfig) -> Result<(), String> {
    if !cfg.public_base_url.starts_with("http://") && !cfg.public_base_url.starts_with("https://")
    {
        return Err(format!(
            "public base url must be absolute: {}",
            cfg.public_base_url
        ));
    }
    if cfg.mail_from.trim().is_empty() {
        return Err("mail sender address must not be empty".to_string());
    }
    if cfg.mail_timeout.is_zero() {
        return Err("mail timeout must be > 0".to_string());
    }
    if cfg.max_body_bytes == 0 {
        return Err("request body limit must be > 0".to_string());
    }
    if cfg.notify_recipients.len() > 2 {
        return Err("at most two staff notification addresses are supported".to_string());
    }
    if cfg.strict_startup {
        if cfg.mail_api_key.is_none() {
            return Err(
                "strict startup requires a mail provider credential (not the placeholder)"
                    .to_string(),
            );
        }
        if cfg.notify_recipients.is_empty() {
            return Err("strict startup requires at least one staff notification address"
                .to_string());
        }
    }
    Ok(())
}
