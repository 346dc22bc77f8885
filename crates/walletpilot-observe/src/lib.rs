//! Observability setup for WalletPilot: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
