// ABOUTME: Secret sources feeding the environment > code > stored resolver
// ABOUTME: Reads PASS, TG_TOKEN, and TG_ID from the process environment at lookup time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Expiry Dashboard Contributors

use expiry_engine::{ConfigResolver, EmbeddedSecrets, EnvLookup};
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

/// Reads secrets from the process environment on every lookup
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// The two external tiers: environment lookup and compiled-in constants
#[derive(Clone)]
pub struct SecretSources {
    env: Arc<dyn EnvLookup>,
    embedded: EmbeddedSecrets,
}

impl SecretSources {
    /// Build from explicit sources
    #[must_use]
    pub fn new(env: Arc<dyn EnvLookup>, embedded: EmbeddedSecrets) -> Self {
        Self { env, embedded }
    }

    /// Process environment plus the constants compiled into the binary
    #[must_use]
    pub fn from_process() -> Self {
        Self::new(Arc::new(ProcessEnv), EmbeddedSecrets::compiled())
    }

    /// Fixed environment map and no embedded constants
    #[must_use]
    pub fn from_map(vars: HashMap<String, String>) -> Self {
        Self::new(Arc::new(vars), EmbeddedSecrets::default())
    }

    /// Resolver borrowing these sources
    #[must_use]
    pub fn resolver(&self) -> ConfigResolver<'_> {
        ConfigResolver::new(self.env.as_ref(), &self.embedded)
    }
}
