//! Grant metrics
//!
//! Counters go through the `metrics` facade, so they are free until the host
//! installs a recorder. [`GrantCollector`] keeps a local tally for reporting.

use metrics::{counter, describe_counter, describe_gauge, gauge};

mod collector;

pub use collector::{GrantCollector, GrantSnapshot};

pub const PLAYERS_RECONCILED: &str = "dlcmanager.players.reconciled";
pub const BLUEPRINTS_GRANTED: &str = "dlcmanager.blueprints.granted";
pub const RESETS: &str = "dlcmanager.resets";
pub const GATEWAY_FAILURES: &str = "dlcmanager.gateway.failures";
pub const ELIGIBLE_BLUEPRINTS: &str = "dlcmanager.catalog.eligible";

/// Register metric descriptions with the installed recorder
pub fn init_metrics() {
    describe_counter!(PLAYERS_RECONCILED, "Connect events that ran the grant sequence");
    describe_counter!(BLUEPRINTS_GRANTED, "Blueprints newly added to player records");
    describe_counter!(RESETS, "Administrative unlock resets");
    describe_counter!(GATEWAY_FAILURES, "Permission or persistence faults surfaced to the host");
    describe_gauge!(ELIGIBLE_BLUEPRINTS, "Blueprints in the eligible catalog set");
}

pub fn record_counter(name: &'static str, value: u64) {
    counter!(name).increment(value);
}

pub fn record_gauge(name: &'static str, value: f64) {
    gauge!(name).set(value);
}
