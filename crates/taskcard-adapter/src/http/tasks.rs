/*
[INPUT]:  TaskService calls
[OUTPUT]: Relay gateway requests and typed answers
[POS]:    HTTP layer - task endpoints (mutations are wallet-signed)
[UPDATE]: When adding relay endpoints or changing paths
*/

// ### Task Endpoints

use async_trait::async_trait;

use crate::error::Result;
use crate::http::RelayTaskService;
use crate::ports::TaskService;
use crate::types::{
    ApprovalsResponse, EmptyRequest, QuorumResponse, ReviewRequest, RoleResponse, SubmitResponse,
    Task, TaskId,
};

impl RelayTaskService {
    async fn submit<B: serde::Serialize>(&self, task_id: TaskId, action: &str, body: &B) -> Result<()> {
        let endpoint = format!("v1/tasks/{}/{}", task_id, action);
        let response: SubmitResponse = self.post_signed(&endpoint, body).await?;
        tracing::info!(
            task_id = %task_id,
            action,
            tx_hash = response.tx_hash.as_deref().unwrap_or("-"),
            "relay accepted transaction"
        );
        Ok(())
    }

    async fn role(&self, role: &str, address: &str) -> Result<bool> {
        let endpoint = format!("v1/roles/{}/{}", role, address);
        let response: RoleResponse = self.get_json(&endpoint).await?;
        Ok(response.granted)
    }
}

#[async_trait]
impl TaskService for RelayTaskService {
    /// POST /v1/tasks/{id}/start
    async fn start_task(&self, task_id: TaskId) -> Result<()> {
        self.submit(task_id, "start", &EmptyRequest::default()).await
    }

    /// POST /v1/tasks/{id}/review {"note": ...}
    async fn review_task(&self, task_id: TaskId, note: &str) -> Result<()> {
        let body = ReviewRequest {
            note: note.to_string(),
        };
        self.submit(task_id, "review", &body).await
    }

    /// POST /v1/tasks/{id}/complete
    async fn complete_task(&self, task_id: TaskId) -> Result<()> {
        self.submit(task_id, "complete", &EmptyRequest::default()).await
    }

    /// POST /v1/tasks/{id}/cancel
    async fn cancel_task(&self, task_id: TaskId) -> Result<()> {
        self.submit(task_id, "cancel", &EmptyRequest::default()).await
    }

    /// GET /v1/roles/member/{address}
    async fn has_member_role(&self, address: &str) -> Result<bool> {
        self.role("member", address).await
    }

    /// GET /v1/roles/leader/{address}
    async fn has_leader_role(&self, address: &str) -> Result<bool> {
        self.role("leader", address).await
    }

    /// GET /v1/tasks/{id}/approvals
    async fn get_quorum_approvals(&self, task_id: TaskId) -> Result<u64> {
        let endpoint = format!("v1/tasks/{}/approvals", task_id);
        let response: ApprovalsResponse = self.get_json(&endpoint).await?;
        Ok(response.approvals)
    }

    /// GET /v1/quorum
    async fn get_min_quorum(&self) -> Result<u64> {
        let response: QuorumResponse = self.get_json("v1/quorum").await?;
        Ok(response.min_quorum)
    }

    /// GET /v1/tasks/{id}
    async fn get_task(&self, task_id: TaskId) -> Result<Task> {
        let endpoint = format!("v1/tasks/{}", task_id);
        self.get_json(&endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wiremock::matchers::{body_json, header, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::auth::MockWalletSigner;
    use crate::error::TaskServiceError;
    use crate::http::RelayTaskService;
    use crate::ports::TaskService;
    use crate::types::{TaskId, TaskStatus};

    fn client(server: &MockServer) -> RelayTaskService {
        let wallet = Arc::new(MockWalletSigner::new("0xabc", "0xsig"));
        RelayTaskService::new(&server.uri(), wallet).expect("client init")
    }

    #[tokio::test]
    async fn test_review_posts_signed_note() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/v1/tasks/4/review"))
            .and(header("x-taskcard-address", "0xabc"))
            .and(header("x-taskcard-signature", "0xsig"))
            .and(header_exists("x-taskcard-request-id"))
            .and(body_json(serde_json::json!({ "note": "Hello, I already finished" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tx_hash": "0xfeed" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        client(&server)
            .review_task(TaskId(4), "Hello, I already finished")
            .await
            .expect("review_task failed");
    }

    #[tokio::test]
    async fn test_rejection_carries_revert_reason() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/v1/tasks/4/cancel"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "message": "execution reverted: caller is not a leader",
            })))
            .mount(&server)
            .await;

        let err = client(&server).cancel_task(TaskId(4)).await.unwrap_err();
        match err {
            TaskServiceError::Rejected { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "execution reverted: caller is not a leader");
            }
            other => panic!("Expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejection_with_plain_body() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/v1/tasks/4/start"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream node down"))
            .mount(&server)
            .await;

        let err = client(&server).start_task(TaskId(4)).await.unwrap_err();
        assert!(err.is_revert());
        assert_eq!(
            err.to_string(),
            "Transaction rejected (status 502): upstream node down"
        );
    }

    #[tokio::test]
    async fn test_role_and_quorum_queries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/roles/leader/0xabc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "granted": true })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/roles/member/0xabc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "granted": false })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/tasks/4/approvals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "approvals": 2 })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/quorum"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "min_quorum": 3 })))
            .mount(&server)
            .await;

        let client = client(&server);
        assert!(client.has_leader_role("0xabc").await.unwrap());
        assert!(!client.has_member_role("0xabc").await.unwrap());
        assert_eq!(client.get_quorum_approvals(TaskId(4)).await.unwrap(), 2);
        assert_eq!(client.get_min_quorum().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_get_task() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/tasks/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 4,
                "status": "Progress",
                "reward": "250",
                "title": "Audit vault",
                "metadata": "ipfs://bafy/4.png",
                "creatorRole": 2,
                "authorizedRoles": [2, 5],
                "assignee": "0xdef",
                "endDate": "2026-12-01"
            })))
            .mount(&server)
            .await;

        let task = client(&server).get_task(TaskId(4)).await.unwrap();
        assert_eq!(task.status, TaskStatus::Progress);
        assert_eq!(task.title, "Audit vault");
        assert_eq!(task.authorized_roles, vec![2, 5]);
    }
}
