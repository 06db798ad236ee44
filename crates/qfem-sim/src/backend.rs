//! Circuit-capability probing for the synthesizer.
//!
//! Whether gate-level circuits can actually be produced is a property of the
//! execution environment, not of the algorithm. The synthesizer therefore
//! consults an injected [`BackendCapability`] provider instead of a global
//! flag. Injecting [`Unavailable`] forces the degraded mock output
//! deterministically, which is how the fallback path is exercised in tests.

/// Capability provider consulted once per synthesis call.
pub trait BackendCapability {
    /// True when the backend can realize gate-level circuits.
    fn circuits_available(&self) -> bool;

    /// Short name used in logs and degraded-output causes.
    fn label(&self) -> &str;
}

/// The built-in gate-model backend. Circuits are always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateModel;

impl BackendCapability for GateModel {
    fn circuits_available(&self) -> bool {
        true
    }

    fn label(&self) -> &str {
        "gate-model"
    }
}

/// A provider with no circuit capability.
///
/// Swapping this in via
/// [`TrotterSynthesizer::with_backend`](crate::trotter::TrotterSynthesizer::with_backend)
/// makes every synthesis call take the mock path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl BackendCapability for Unavailable {
    fn circuits_available(&self) -> bool {
        false
    }

    fn label(&self) -> &str {
        "unavailable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_model_reports_circuits() {
        assert!(GateModel.circuits_available());
        assert_eq!(GateModel.label(), "gate-model");
    }

    #[test]
    fn test_unavailable_reports_nothing() {
        assert!(!Unavailable.circuits_available());
        assert_eq!(Unavailable.label(), "unavailable");
    }
}
