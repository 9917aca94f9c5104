/*
[INPUT]:  Lifecycle call parameters from the task service port
[OUTPUT]: JSON request bodies for the task relay gateway
[POS]:    Data layer - relay request payloads
[UPDATE]: When relay endpoints gain parameters
*/

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/tasks/{id}/review`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub note: String,
}

/// Body of the parameterless lifecycle calls (start, complete, cancel)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmptyRequest {}
