// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use serde::Serialize;
use tracing::warn;

use super::report_form_errors;
use crate::api::{self, ApiClient};
use crate::app::App;
use crate::error::ApiError;
use crate::forms::{LoginForm, RegisterForm};
use crate::guard::Route;
use crate::models::{UserCreate, UserLogin};
use crate::session::Session;

pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

pub fn login_message(e: &ApiError) -> &'static str {
    match e {
        ApiError::InvalidCredentials => "Invalid email or password",
        _ => GENERIC_ERROR,
    }
}

pub fn register_message(e: &ApiError) -> &'static str {
    match e {
        ApiError::AlreadyRegistered => "This email is already registered",
        _ => GENERIC_ERROR,
    }
}

/// Signs in and returns where to go next, or the message to show.
pub fn login_flow(session: &Session, credentials: &UserLogin) -> Result<Route, &'static str> {
    match session.login(credentials) {
        Ok(_) => Ok(Route::Dashboard),
        Err(e) => {
            warn!(error = %e, "login failed");
            Err(login_message(&e))
        }
    }
}

/// Registers, then signs in with the same credentials. A failed sign-in after
/// a successful registration sends the user to the login page instead.
pub fn register_flow(
    api: &ApiClient,
    session: &Session,
    user: &UserCreate,
) -> Result<Route, &'static str> {
    if let Err(e) = api::auth::register(api, user) {
        warn!(error = %e, "registration failed");
        return Err(register_message(&e));
    }
    let credentials = UserLogin {
        username: user.email.clone(),
        password: user.password.clone(),
    };
    match session.login(&credentials) {
        Ok(_) => Ok(Route::Dashboard),
        Err(e) => {
            warn!(error = %e, "auto-login after registration failed");
            Ok(Route::Login)
        }
    }
}

fn arg(m: &clap::ArgMatches, name: &str) -> String {
    m.get_one::<String>(name).cloned().unwrap_or_default()
}

fn announce(route: Route) {
    match route {
        Route::Login => println!("Account created. Please sign in with `finassist login`."),
        _ => println!("Signed in. Open `finassist {}` to continue.", route.path()),
    }
}

pub fn login(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let form = LoginForm {
        email: arg(m, "email"),
        password: arg(m, "password"),
    };
    let credentials = match form.validate() {
        Ok(c) => c,
        Err(errors) => {
            report_form_errors(&errors);
            bail!("Cannot sign in");
        }
    };
    match login_flow(&app.session, &credentials) {
        Ok(route) => announce(route),
        Err(msg) => bail!(msg),
    }
    Ok(())
}

pub fn register(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let form = RegisterForm {
        first_name: arg(m, "first-name"),
        last_name: arg(m, "last-name"),
        email: arg(m, "email"),
        password: arg(m, "password"),
    };
    let user = match form.validate() {
        Ok(u) => u,
        Err(errors) => {
            report_form_errors(&errors);
            bail!("Cannot register");
        }
    };
    match register_flow(&app.api(), &app.session, &user) {
        Ok(route) => announce(route),
        Err(msg) => bail!(msg),
    }
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.session.logout()?;
    println!("Signed out. Use `finassist login` to sign in again.");
    Ok(())
}

#[derive(Serialize)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub email: Option<String>,
    pub name: Option<String>,
    pub expires_at: Option<i64>,
}

pub fn session_status(session: &Session, now: i64) -> SessionStatus {
    let logged_in = session.is_authenticated_at(now);
    let claims = if logged_in { session.user_info() } else { None };
    SessionStatus {
        logged_in,
        email: claims.as_ref().and_then(|c| c.email.clone()),
        name: claims.as_ref().and_then(|c| c.name.clone()),
        expires_at: claims.map(|c| c.exp),
    }
}

pub fn status(app: &App, m: &clap::ArgMatches) -> Result<()> {
    let st = session_status(&app.session, chrono::Utc::now().timestamp());
    if crate::utils::maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &st)? {
        return Ok(());
    }
    if st.logged_in {
        println!("Signed in as {}", st.email.as_deref().unwrap_or(""));
    } else {
        println!("Not signed in");
    }
    Ok(())
}
