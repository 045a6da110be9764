// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::api::ApiClient;
use crate::config::Config;
use crate::session::{provider_for, AuthProvider, Session};
use crate::store::LocalStore;

/// Everything a command needs, wired once at startup.
pub struct App {
    pub config: Config,
    pub session: Session,
    api: ApiClient,
}

impl App {
    pub fn new(config: Config, store: LocalStore) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        let provider = provider_for(&config, &api);
        Ok(Self::with_provider(config, store, api, provider))
    }

    pub fn with_provider(
        config: Config,
        store: LocalStore,
        api: ApiClient,
        provider: Box<dyn AuthProvider>,
    ) -> Self {
        Self {
            config,
            session: Session::new(store, provider),
            api,
        }
    }

    /// Client carrying the current session token, read fresh on every call.
    pub fn api(&self) -> ApiClient {
        self.api.clone().with_token(self.session.token())
    }
}
