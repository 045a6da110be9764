// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod api;
pub mod app;
pub mod charts;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod forms;
pub mod guard;
pub mod models;
pub mod session;
pub mod store;
pub mod utils;
