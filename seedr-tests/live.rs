//! Live tests against the real Seedr service
//!
//! These exercise the full login -> content client flow over the network.
//! They need `SEEDR_EMAIL` and `SEEDR_PASSWORD` (a `.env` file works too);
//! without them every test returns early and reports as skipped.

#[path = "live/fixture.rs"]
mod fixture;

#[path = "live/account.rs"]
mod account;
#[path = "live/content.rs"]
mod content;
