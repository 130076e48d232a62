//! Derivation of server-assigned link fields.

/// Merchant assigned when no other derivation is configured.
pub const DEFAULT_MERCHANT: &str = "amazon";

/// Computes the fields of a link that are not supplied by the caller.
pub trait LinkDerivation: Send + Sync {
    /// URL handed out for sharing.
    fn shared_url(&self, affiliate_url: Option<&str>) -> Option<String>;

    /// Merchant the link belongs to.
    fn merchant(&self, affiliate_url: Option<&str>) -> String;
}

/// Shares the affiliate URL unchanged and tags every link with one fixed merchant.
#[derive(Debug, Clone)]
pub struct StaticDerivation {
    merchant: String,
}

impl StaticDerivation {
    pub fn new(merchant: impl Into<String>) -> Self {
        Self {
            merchant: merchant.into(),
        }
    }
}

impl Default for StaticDerivation {
    fn default() -> Self {
        Self::new(DEFAULT_MERCHANT)
    }
}

impl LinkDerivation for StaticDerivation {
    fn shared_url(&self, affiliate_url: Option<&str>) -> Option<String> {
        affiliate_url.map(str::to_owned)
    }

    fn merchant(&self, _affiliate_url: Option<&str>) -> String {
        self.merchant.clone()
    }
}
