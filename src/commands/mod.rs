// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod doctor;
pub mod exporter;
pub mod transactions;
pub mod upload;

use anyhow::{bail, Result};

use crate::app::App;
use crate::error::FormError;
use crate::guard::{guard, Navigation, Route};

/// Prints one line per violated form constraint.
pub fn report_form_errors(errors: &[FormError]) {
    for e in errors {
        eprintln!("  - {}", e);
    }
}

/// Runs the route guard for a protected subcommand. A redirect becomes an
/// error naming the command to run first.
pub fn ensure_allowed(app: &App, command: &str) -> Result<()> {
    match guard(&app.session, Route::resolve(command)) {
        Navigation::Allow(_) => Ok(()),
        Navigation::Redirect(to) => bail!(
            "Not signed in or session expired. Run `finassist {}` first.",
            to.path().trim_start_matches("auth/")
        ),
    }
}
