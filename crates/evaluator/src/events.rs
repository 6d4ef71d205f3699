use anyhow::Result;
use code_grader_core::domain::EvaluationId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Progress of an evaluation, published before and after each remote call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EvaluationEvent {
    Started {
        evaluation_id: EvaluationId,
        algorithm_name: String,
    },
    SimilarityRequested {
        evaluation_id: EvaluationId,
    },
    /// `similarity` is `None` when the service was unavailable.
    SimilarityMeasured {
        evaluation_id: EvaluationId,
        similarity: Option<f64>,
    },
    ReviewRequested {
        evaluation_id: EvaluationId,
    },
    /// `response_len` is zero when the reviewer was unavailable.
    ReviewReceived {
        evaluation_id: EvaluationId,
        response_len: usize,
    },
    Cancelled {
        evaluation_id: EvaluationId,
    },
    Completed {
        evaluation_id: EvaluationId,
        mean_grade: f64,
        correctness_grade: u8,
        passed: bool,
    },
}

impl EvaluationEvent {
    pub fn evaluation_id(&self) -> EvaluationId {
        match self {
            Self::Started { evaluation_id, .. }
            | Self::SimilarityRequested { evaluation_id }
            | Self::SimilarityMeasured { evaluation_id, .. }
            | Self::ReviewRequested { evaluation_id }
            | Self::ReviewReceived { evaluation_id, .. }
            | Self::Cancelled { evaluation_id }
            | Self::Completed { evaluation_id, .. } => *evaluation_id,
        }
    }
}

/// `tokio::broadcast` fan-out of evaluation events.
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    sender: broadcast::Sender<EvaluationEvent>,
}

impl EventBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishing never fails; events are dropped when nobody listens.
    pub fn emit(&self, event: EvaluationEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> EventStream {
        EventStream {
            receiver: self.sender.subscribe(),
        }
    }
}

#[derive(Debug)]
pub struct EventStream {
    receiver: broadcast::Receiver<EvaluationEvent>,
}

impl EventStream {
    pub async fn recv(&mut self) -> Result<EvaluationEvent> {
        Ok(self.receiver.recv().await?)
    }

    pub fn try_recv(&mut self) -> Result<EvaluationEvent> {
        Ok(self.receiver.try_recv()?)
    }
}
