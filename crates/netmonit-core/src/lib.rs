//! NetMonit diagnostic reasoning engine.
//!
//! Deterministic root-cause analysis over a telemetry snapshot of an
//! industrial IT/OT network: topology graph, fault propagation tracing,
//! criticality, remediation playbooks, forensic reports, and a rule-based
//! query router with an optional completion backstop.

pub mod config;
pub mod criticality;
pub mod error;
pub mod forensics;
pub mod greetings;
pub mod intent;
pub mod llm;
pub mod monitoring;
pub mod orchestrator;
pub mod propagation;
pub mod recommendations;
pub mod responders;
pub mod telemetry;
pub mod topology;

pub use config::{AnalysisSettings, EngineConfig, LlmConfig};
pub use criticality::Criticality;
pub use error::{NetmonitError, Result};
pub use forensics::{ForensicArtifact, ForensicReport, ForensicStep};
pub use intent::{classify, classify_query, Intent, Query};
pub use llm::{CompletionClient, FakeCompletionClient, HttpCompletionClient, LlmError, QuotaGuard};
pub use orchestrator::{analyze, analyze_query, AnalysisResult};
pub use propagation::{trace, CausalChain, DiagnosisType};
pub use telemetry::{
    Alert, DependencyPath, Device, DeviceStatus, Layer, NetworkConnection, Severity,
    TelemetrySnapshot,
};
pub use topology::TopologyGraph;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
