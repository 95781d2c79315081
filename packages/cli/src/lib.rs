// ABOUTME: Shared plumbing for the bionic binary
// ABOUTME: Runtime assembly from the environment plus terminal rendering of workflow results

pub mod output;
pub mod runtime;

pub use runtime::{init_tracing, GatewayOverrides, Runtime, RuntimeError};
