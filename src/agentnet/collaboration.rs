//! The five-phase collaboration workflow.
//!
//! A [`Collaboration`] drives one task through Task Analysis, Team
//! Discussion, Execution, Final Review and Final Compilation. Phases run
//! strictly sequentially, one agent call at a time; each phase's prompt is
//! built from the previous phase's complete result set, and every per-agent
//! result is emitted as a [`WorkflowEvent`] the moment it lands rather than
//! buffered until the workflow finishes.
//!
//! Prompt construction lives in the [`prompts`] submodule as pure functions,
//! so the formats can be tested without a network dependency.

use std::error::Error;
use std::fmt;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::agentnet::agent::{AgentBinding, AGENT_UNAVAILABLE};
use crate::agentnet::event::WorkflowEvent;

const EVENT_BUFFER: usize = 64;

/// The five fixed workflow phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    TaskAnalysis,
    TeamDiscussion,
    Execution,
    FinalReview,
    FinalCompilation,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::TaskAnalysis,
        Phase::TeamDiscussion,
        Phase::Execution,
        Phase::FinalReview,
        Phase::FinalCompilation,
    ];

    /// Display name used in streamed events.
    pub fn name(self) -> &'static str {
        match self {
            Phase::TaskAnalysis => "Task Analysis",
            Phase::TeamDiscussion => "Team Discussion",
            Phase::Execution => "Execution",
            Phase::FinalReview => "Final Review",
            Phase::FinalCompilation => "Final Compilation",
        }
    }

    /// Status tag attached to per-agent results of this phase.
    pub fn status_tag(self) -> &'static str {
        match self {
            Phase::TaskAnalysis => "analyzed",
            Phase::TeamDiscussion => "discussed",
            Phase::Execution => "executed",
            Phase::FinalReview => "reviewed",
            // Phase 5 emits a single final_output, never agent_result
            Phase::FinalCompilation => "compiled",
        }
    }
}

/// One agent's contribution to one phase.
///
/// Prior phases' results are read-only inputs to later prompt construction,
/// never mutated.
#[derive(Debug, Clone)]
pub struct PhaseResult {
    pub id: String,
    pub role: String,
    pub status: String,
    pub output: String,
}

/// Prompt construction for every phase, kept free of I/O.
pub mod prompts {
    use super::PhaseResult;

    pub fn analysis(task: &str, role: &str) -> String {
        format!(
            "You are a {} working on: {}. Describe your 3 main responsibilities and deliverables.",
            role, task
        )
    }

    pub fn discussion(role: &str, analyses: &[PhaseResult]) -> String {
        let context = analyses
            .iter()
            .map(|r| format!("{}: {}", r.role, r.output))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!(
            "As the {}, give short feedback on the team's analysis:\n{}",
            role, context
        )
    }

    pub fn execution(task: &str, own_analysis: &str, role: &str, feedback: &[PhaseResult]) -> String {
        let context = feedback
            .iter()
            .map(|r| format!("{} feedback: {}", r.role, r.output))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!(
            "Task: {}\nAnalysis: {}\nFeedback: {}\nNow act as {} and deliver a detailed result.",
            task, own_analysis, context, role
        )
    }

    pub fn review(role: &str, work: &[PhaseResult]) -> String {
        let context = work
            .iter()
            .map(|r| format!("{}'s work:\n{}", r.role, r.output))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!(
            "Review all outputs below as the {}. Suggest final improvements:\n{}",
            role, context
        )
    }

    pub fn compilation(task: &str, reviews: &[PhaseResult]) -> String {
        let context = reviews
            .iter()
            .map(|r| format!("{}: {}", r.role, r.output))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "Task: {}\n\nTeam outputs and reviews:\n{}\n\nCompile everything into one clear, markdown-formatted final result.",
            task, context
        )
    }
}

/// Errors that abort a running workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Final Compilation needs an agent bound to the "manager" role.
    ManagerNotFound,
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowError::ManagerNotFound => {
                write!(f, "no agent is bound to the 'manager' role")
            }
        }
    }
}

impl Error for WorkflowError {}

/// Emit one event; a closed channel means the consumer went away, which does
/// not cancel the workflow.
async fn emit(tx: &mpsc::Sender<WorkflowEvent>, event: WorkflowEvent) {
    if tx.send(event).await.is_err() {
        log::debug!("event receiver dropped, continuing workflow");
    }
}

/// Call one agent, never letting a failure escape into the phase loop.
///
/// A binding without a client yields the constant [`AGENT_UNAVAILABLE`]. The
/// vendor call runs on its own task so a panicking client surfaces as an
/// output string rather than tearing down the whole workflow; vendor API
/// errors are already rendered into the output by
/// [`ClientWrapper::generate`](crate::agentnet::client_wrapper::ClientWrapper::generate).
pub async fn safe_generate(agent: &AgentBinding, prompt: String) -> String {
    let client = match &agent.client {
        Some(client) => client.clone(),
        None => return AGENT_UNAVAILABLE.to_string(),
    };

    match tokio::spawn(async move { client.generate(&prompt).await }).await {
        Ok(output) => output,
        Err(err) => format!("⚠️ Error generating response: {}", err),
    }
}

/// Drives one task through the five phases, emitting events as they happen.
pub struct Collaboration {
    task: String,
    agents: Vec<AgentBinding>,
}

impl Collaboration {
    pub fn new(task: impl Into<String>, agents: Vec<AgentBinding>) -> Self {
        Collaboration {
            task: task.into(),
            agents,
        }
    }

    /// The agent bound to the "manager" role, matched case-insensitively.
    fn manager(&self) -> Option<&AgentBinding> {
        self.agents
            .iter()
            .find(|a| a.role.eq_ignore_ascii_case("manager"))
    }

    /// Run the workflow to completion, emitting events into `tx`.
    ///
    /// Agent failures never abort a phase; the failing agent contributes its
    /// error text as its output and the workflow proceeds. The only aborting
    /// condition is a missing manager binding at Final Compilation, which
    /// emits one [`WorkflowEvent::Error`] and returns the named error.
    pub async fn run(self, tx: &mpsc::Sender<WorkflowEvent>) -> Result<(), WorkflowError> {
        log::info!(
            "starting collaboration across {} agents: {}",
            self.agents.len(),
            self.task
        );

        let analyses = self
            .run_phase(Phase::TaskAnalysis, tx, |_, agent| {
                prompts::analysis(&self.task, &agent.role)
            })
            .await;

        let feedback = self
            .run_phase(Phase::TeamDiscussion, tx, |_, agent| {
                prompts::discussion(&agent.role, &analyses)
            })
            .await;

        let work = self
            .run_phase(Phase::Execution, tx, |i, agent| {
                prompts::execution(&self.task, &analyses[i].output, &agent.role, &feedback)
            })
            .await;

        let reviews = self
            .run_phase(Phase::FinalReview, tx, |_, agent| {
                prompts::review(&agent.role, &work)
            })
            .await;

        // Final Compilation runs a single call against the manager binding.
        let phase = Phase::FinalCompilation;
        emit(
            tx,
            WorkflowEvent::PhaseStart {
                name: phase.name().to_string(),
            },
        )
        .await;
        log::info!("phase: {}", phase.name());

        let manager = match self.manager() {
            Some(manager) => manager,
            None => {
                let err = WorkflowError::ManagerNotFound;
                log::error!("{}", err);
                emit(
                    tx,
                    WorkflowEvent::Error {
                        message: err.to_string(),
                    },
                )
                .await;
                return Err(err);
            }
        };

        let output = safe_generate(manager, prompts::compilation(&self.task, &reviews)).await;
        emit(tx, WorkflowEvent::FinalOutput { output }).await;
        emit(
            tx,
            WorkflowEvent::PhaseComplete {
                name: phase.name().to_string(),
            },
        )
        .await;

        log::info!("collaboration complete");
        Ok(())
    }

    /// Run one of the per-agent phases: prompt each agent in slot order, one
    /// awaited call at a time, emitting each result as soon as it lands.
    async fn run_phase<F>(
        &self,
        phase: Phase,
        tx: &mpsc::Sender<WorkflowEvent>,
        build_prompt: F,
    ) -> Vec<PhaseResult>
    where
        F: Fn(usize, &AgentBinding) -> String,
    {
        emit(
            tx,
            WorkflowEvent::PhaseStart {
                name: phase.name().to_string(),
            },
        )
        .await;
        log::info!("phase: {}", phase.name());

        let mut results = Vec::with_capacity(self.agents.len());
        for (i, agent) in self.agents.iter().enumerate() {
            let prompt = build_prompt(i, agent);
            let output = safe_generate(agent, prompt).await;

            let result = PhaseResult {
                id: agent.id.clone(),
                role: agent.role.clone(),
                status: phase.status_tag().to_string(),
                output,
            };
            emit(
                tx,
                WorkflowEvent::AgentResult {
                    phase_name: phase.name().to_string(),
                    id: result.id.clone(),
                    role: result.role.clone(),
                    status: result.status.clone(),
                    output: result.output.clone(),
                },
            )
            .await;
            results.push(result);
        }

        emit(
            tx,
            WorkflowEvent::PhaseComplete {
                name: phase.name().to_string(),
            },
        )
        .await;

        results
    }

    /// Consume the collaboration and stream its events.
    ///
    /// The workflow runs on its own task. On success the stream is terminated
    /// by [`WorkflowEvent::End`]; after a workflow error or a panicked
    /// workflow task a single [`WorkflowEvent::Error`] is the final item and
    /// no `End` sentinel follows.
    pub fn stream(self) -> ReceiverStream<WorkflowEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        tokio::spawn(async move {
            let worker_tx = tx.clone();
            let worker = tokio::spawn(async move { self.run(&worker_tx).await });

            match worker.await {
                Ok(Ok(())) => {
                    let _ = tx.send(WorkflowEvent::End).await;
                }
                Ok(Err(err)) => {
                    // The error event was already emitted inside run().
                    log::error!("workflow aborted: {}", err);
                }
                Err(join_err) => {
                    let _ = tx
                        .send(WorkflowEvent::Error {
                            message: format!("workflow task failed: {}", join_err),
                        })
                        .await;
                }
            }
        });

        ReceiverStream::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(role: &str, output: &str) -> PhaseResult {
        PhaseResult {
            id: "agent1".to_string(),
            role: role.to_string(),
            status: "analyzed".to_string(),
            output: output.to_string(),
        }
    }

    #[test]
    fn analysis_prompt_names_role_and_task() {
        assert_eq!(
            prompts::analysis("build a game", "designer"),
            "You are a designer working on: build a game. Describe your 3 main responsibilities and deliverables."
        );
    }

    #[test]
    fn discussion_prompt_labels_each_analysis() {
        let prompt = prompts::discussion(
            "manager",
            &[result("researcher", "notes"), result("designer", "sketch")],
        );
        assert!(prompt.starts_with("As the manager, give short feedback"));
        assert!(prompt.contains("researcher: notes\n\ndesigner: sketch"));
    }

    #[test]
    fn execution_prompt_carries_own_analysis_and_team_feedback() {
        let prompt = prompts::execution(
            "ship it",
            "my plan",
            "researcher",
            &[result("manager", "go ahead")],
        );
        assert!(prompt.contains("Task: ship it"));
        assert!(prompt.contains("Analysis: my plan"));
        assert!(prompt.contains("manager feedback: go ahead"));
        assert!(prompt.ends_with("Now act as researcher and deliver a detailed result."));
    }

    #[test]
    fn review_prompt_lists_work_per_role() {
        let prompt = prompts::review("designer", &[result("researcher", "report")]);
        assert!(prompt.contains("researcher's work:\nreport"));
    }

    #[test]
    fn compilation_prompt_joins_reviews_with_single_newlines() {
        let prompt = prompts::compilation(
            "the task",
            &[result("manager", "fine"), result("designer", "polish")],
        );
        assert!(prompt.contains("Task: the task"));
        assert!(prompt.contains("Team outputs and reviews:\nmanager: fine\ndesigner: polish"));
        assert!(prompt.ends_with("markdown-formatted final result."));
    }

    #[test]
    fn phases_are_terminally_ordered() {
        assert_eq!(Phase::ALL.len(), 5);
        assert_eq!(Phase::ALL[0].name(), "Task Analysis");
        assert_eq!(Phase::ALL[4].name(), "Final Compilation");
        assert_eq!(Phase::TeamDiscussion.status_tag(), "discussed");
    }
}
