//! # Deep Links
//!
//! The viewer state is mirrored into a single query parameter (`pdfId`) of
//! the page URL. Its presence means "viewer open on this record", its absence
//! means "viewer closed". It is the only way viewer state is restored from a
//! link, so every open and close goes through [`DeepLink`].
//!
//! URL writes use replace semantics (no history entries), matching how the
//! dashboard calls `history.replaceState`.

use crate::env::Environment;
use crate::error::Result;
use log::debug;
use std::fmt;

pub const DEEP_LINK_PARAM: &str = "pdfId";

/// A page URL split into the parts the synchronizer touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    base: String,
    params: Vec<(String, String)>,
    fragment: Option<String>,
}

impl Location {
    pub fn parse(href: &str) -> Self {
        let (rest, fragment) = match href.split_once('#') {
            Some((rest, frag)) => (rest, Some(frag.to_string())),
            None => (href, None),
        };
        let (base, query) = match rest.split_once('?') {
            Some((base, query)) => (base, query),
            None => (rest, ""),
        };

        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(k), decode_component(v))
            })
            .collect();

        Self {
            base: base.to_string(),
            params,
            fragment,
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Sets `name`, replacing the first occurrence in place and dropping any duplicates.
    pub fn set_param(&mut self, name: &str, value: &str) {
        let mut replaced = false;
        self.params.retain_mut(|(k, v)| {
            if k != name {
                return true;
            }
            if replaced {
                return false;
            }
            *v = value.to_string();
            replaced = true;
            true
        });
        if !replaced {
            self.params.push((name.to_string(), value.to_string()));
        }
    }

    pub fn remove_param(&mut self, name: &str) {
        self.params.retain(|(k, _)| k != name);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, urlencoding::encode(k), urlencoding::encode(v))?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Reads and writes the deep-link parameter through the environment.
#[derive(Debug, Clone)]
pub struct DeepLink {
    param: String,
}

impl Default for DeepLink {
    fn default() -> Self {
        Self::new(DEEP_LINK_PARAM)
    }
}

impl DeepLink {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }

    /// The record id currently named by the URL, if any.
    pub fn requested_id<E: Environment + ?Sized>(&self, env: &E) -> Option<String> {
        Location::parse(&env.location())
            .param(&self.param)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }

    pub fn on_open<E: Environment + ?Sized>(&self, env: &E, id: &str) -> Result<()> {
        let mut location = Location::parse(&env.location());
        location.set_param(&self.param, id);
        debug!("Deep link set to {id}");
        env.replace_location(&location.to_string())
    }

    pub fn on_close<E: Environment + ?Sized>(&self, env: &E) -> Result<()> {
        let mut location = Location::parse(&env.location());
        if location.param(&self.param).is_none() {
            return Ok(());
        }
        location.remove_param(&self.param);
        debug!("Deep link cleared");
        env.replace_location(&location.to_string())
    }

    /// Absolute URL that opens `id` when loaded. Does not touch the current location.
    pub fn share_url<E: Environment + ?Sized>(&self, env: &E, id: &str) -> String {
        let mut location = Location::parse(&env.location());
        location.set_param(&self.param, id);
        location.to_string()
    }
}
