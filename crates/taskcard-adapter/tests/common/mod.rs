/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for taskcard-adapter tests

use chrono::NaiveDate;
use rust_decimal::Decimal;
use taskcard_adapter::{Task, TaskId, TaskStatus};
use wiremock::MockServer;

#[allow(dead_code)]
pub const LEADER: &str = "0x00000000000000000000000000000000000000a1";
#[allow(dead_code)]
pub const MEMBER: &str = "0x00000000000000000000000000000000000000b2";

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Task fixture in the given status
pub fn sample_task(id: u64, status: TaskStatus) -> Task {
    Task {
        id: TaskId(id),
        status,
        reward: Decimal::new(5000, 2),
        title: "Translate onboarding guide".to_string(),
        metadata: "ipfs://bafybeigdyrzt/guide.png".to_string(),
        creator_role: 1,
        authorized_roles: vec![1, 4],
        assignee: String::new(),
        end_date: NaiveDate::from_ymd_opt(2026, 11, 30).expect("valid date"),
    }
}
