use anyhow::{Context, Result, bail};

/// Parameter carrying the committed search term.
pub const PARAM_QUERY: &str = "q";

/// Parameter carrying the open model's task identifier.
pub const PARAM_TASK_ID: &str = "task_id";

/// Page the share links point at.
pub const DEFAULT_BASE: &str = "https://trivo.app/search";

/// Shareable navigation state. The parameter set is the single channel
/// between the search controller and the model modal controller, so every
/// update is read-modify-write over the full set: setting or deleting one
/// key never touches the others.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareLink {
    base: String,
    params: Vec<(String, String)>,
}

impl ShareLink {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.to_string(),
            params: Vec::new(),
        }
    }

    /// Parse a previously shared URL. The fragment is dropped; parameters
    /// keep their original order. Accepts both `%20` and `+` for spaces.
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.split('#').next().unwrap_or(url);
        if url.is_empty() {
            bail!("empty link");
        }

        let (base, query) = match url.split_once('?') {
            Some((base, query)) => (base, query),
            None => (url, ""),
        };

        let mut params = Vec::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.push((decode_component(key)?, decode_component(value)?));
        }

        Ok(Self {
            base: base.to_string(),
            params,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Replace the value in place when the key exists, otherwise append.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    pub fn delete(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    pub fn to_url(&self) -> String {
        if self.params.is_empty() {
            return self.base.clone();
        }
        let query: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.base, query.join("&"))
    }
}

impl Default for ShareLink {
    fn default() -> Self {
        Self::new(DEFAULT_BASE)
    }
}

// Form-style decoding: '+' means space, then percent-decode.
fn decode_component(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode(&spaced)
        .with_context(|| format!("invalid percent-encoding in {raw:?}"))?;
    Ok(decoded.into_owned())
}
