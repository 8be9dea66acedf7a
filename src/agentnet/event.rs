//! Progress events streamed to the client during workflow execution.
//!
//! Events are serialized with an `event` tag so every SSE payload is
//! self-describing, e.g. `{"event":"phase_start","name":"Task Analysis"}`.

use serde::{Deserialize, Serialize};

/// One unit of streamed progress information.
///
/// Within each phase the ordering is fixed: `PhaseStart`, then one
/// `AgentResult` per agent in slot order, then exactly one `PhaseComplete`.
/// A stream is terminated by `End` on success or by `Error` (without a
/// trailing `End`) when the workflow aborts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WorkflowEvent {
    PhaseStart {
        name: String,
    },
    AgentResult {
        phase_name: String,
        id: String,
        role: String,
        status: String,
        output: String,
    },
    PhaseComplete {
        name: String,
    },
    FinalOutput {
        output: String,
    },
    End,
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_start_wire_shape() {
        let event = WorkflowEvent::PhaseStart {
            name: "Task Analysis".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"event":"phase_start","name":"Task Analysis"}"#
        );
    }

    #[test]
    fn end_is_a_bare_sentinel() {
        assert_eq!(
            serde_json::to_string(&WorkflowEvent::End).unwrap(),
            r#"{"event":"end"}"#
        );
    }

    #[test]
    fn agent_result_round_trips() {
        let event = WorkflowEvent::AgentResult {
            phase_name: "Execution".to_string(),
            id: "agent2".to_string(),
            role: "researcher".to_string(),
            status: "executed".to_string(),
            output: "done".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event":"agent_result""#));

        let back: WorkflowEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
