use crate::core::entities::{CanonicalPayload, DispatchOutcome, ProcessingResult};

pub const DELIVERED_MESSAGE: &str = "Successfully sent to workflow";
pub const TIMED_OUT_MESSAGE: &str = "Workflow endpoint timed out";

/// Fold a dispatch outcome into the caller-facing result. The payload is always included.
pub fn aggregate(outcome: DispatchOutcome, payload: CanonicalPayload) -> ProcessingResult {
    let (success, message, downstream_response) = match outcome {
        DispatchOutcome::Delivered { body, .. } => (true, DELIVERED_MESSAGE.to_string(), Some(body)),
        DispatchOutcome::Rejected { status_code, body } => (
            false,
            format!("Workflow rejected submission (status {})", status_code),
            Some(body),
        ),
        DispatchOutcome::Unreachable { cause } => (
            false,
            format!("Workflow endpoint unreachable: {}", cause),
            None,
        ),
        DispatchOutcome::TimedOut => (false, TIMED_OUT_MESSAGE.to_string(), None),
    };

    ProcessingResult {
        success,
        message,
        processed_data: payload,
        downstream_response,
    }
}
