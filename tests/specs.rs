// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end scenarios and property tests for the Fulcrum control plane
//! (spec.md §8).

use fulcrum_auth::{token, Identity};
use fulcrum_core::{
    AgentFields, AgentState, AgentTypeFields, JobCompletionPayload, ParticipantFields,
    ParticipantStatus, Role, ServiceGroupFields, ServiceState, ServiceTypeFields,
};
use fulcrum_engine::Engine;
use fulcrum_storage::{MemoryStore, PageRequest};
use serde_json::json;
use std::collections::BTreeSet;

/// A fully wired tenant: a provider (with one Agent supporting one
/// ServiceType) and a consumer (with one ServiceGroup), ready to create
/// Services against.
struct Fixture {
    engine: Engine,
    clock: std::sync::Arc<fulcrum_core::FixedClock>,
    provider_id: fulcrum_core::ParticipantId,
    consumer_id: fulcrum_core::ParticipantId,
    agent_id: fulcrum_core::AgentId,
    group_id: fulcrum_core::ServiceGroupId,
    service_type_id: fulcrum_core::ServiceTypeId,
}

fn build_fixture() -> Fixture {
    let (store, clock) = MemoryStore::new_for_test();
    let engine = Engine::new(store);
    let admin = Identity::admin();

    let provider = engine
        .create_participant(&admin, ParticipantFields::builder().name("acme-cloud").build())
        .unwrap();
    let consumer = engine
        .create_participant(&admin, ParticipantFields::builder().name("acme-customer").build())
        .unwrap();

    let service_type = engine
        .create_service_type(&admin, ServiceTypeFields::builder().name("postgres").build())
        .unwrap();

    let mut supported = BTreeSet::new();
    supported.insert(service_type.id());
    let agent_type = engine
        .create_agent_type(
            &admin,
            AgentTypeFields::builder()
                .name("db-worker")
                .supported_service_types(supported)
                .build(),
        )
        .unwrap();

    let agent = engine
        .create_agent(
            &admin,
            AgentFields::builder()
                .name("worker-1")
                .provider_id(provider.id())
                .agent_type_id(agent_type.id())
                .build(),
        )
        .unwrap();

    let group = engine
        .create_service_group(
            &admin,
            ServiceGroupFields::builder().name("prod").participant_id(consumer.id()).build(),
        )
        .unwrap();

    Fixture {
        engine,
        clock,
        provider_id: provider.id(),
        consumer_id: consumer.id(),
        agent_id: agent.id(),
        group_id: group.id(),
        service_type_id: service_type.id(),
    }
}

impl Fixture {
    fn create_service(&self, identity: &Identity, name: &str) -> fulcrum_core::Service {
        self.engine
            .create_service(
                identity,
                name.to_string(),
                Default::default(),
                fulcrum_core::JsonDoc::new(json!({"version": "14"})).unwrap(),
                self.provider_id,
                self.consumer_id,
                self.group_id,
                self.agent_id,
                self.service_type_id,
            )
            .unwrap()
    }
}

#[test]
fn create_service_dispatches_a_create_job() {
    let fx = build_fixture();
    let admin = Identity::admin();
    let service = fx.create_service(&admin, "orders-db");
    assert_eq!(service.current_state, ServiceState::Creating);
    assert_eq!(service.target_state, Some(ServiceState::Created));

    let agent_identity = Identity::agent(fx.agent_id, fx.provider_id);
    let pending = fx
        .engine
        .list_pending_jobs(&agent_identity, fx.agent_id, 10)
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].service_id, service.id());
    assert_eq!(pending[0].action, fulcrum_core::ServiceAction::Create);
}

#[test]
fn claim_and_complete_applies_external_id_and_resources() {
    let fx = build_fixture();
    let admin = Identity::admin();
    let agent_identity = Identity::agent(fx.agent_id, fx.provider_id);
    let service = fx.create_service(&admin, "orders-db");

    let job = fx
        .engine
        .list_pending_jobs(&agent_identity, fx.agent_id, 10)
        .unwrap()
        .remove(0);
    let claimed = fx.engine.claim_job(&agent_identity, job.id()).unwrap();
    assert_eq!(claimed.state, fulcrum_core::JobState::Processing);

    let payload = JobCompletionPayload {
        resources: Some(fulcrum_core::JsonDoc::new(json!({"instance_id": "i-123"})).unwrap()),
        external_id: Some("ext-456".to_string()),
    };
    fx.engine.complete_job(&agent_identity, claimed.id(), payload).unwrap();

    let after = fx.engine.get_service(&admin, service.id()).unwrap();
    assert_eq!(after.current_state, ServiceState::Created);
    assert_eq!(after.target_state, None);
    assert_eq!(after.external_id, Some("ext-456".to_string()));
    assert_eq!(after.resources.as_value()["instance_id"], "i-123");
    assert_eq!(after.current_properties.as_value()["version"], "14");
}

#[test]
fn start_transition_failure_then_retry_reissues_the_same_action() {
    let fx = build_fixture();
    let admin = Identity::admin();
    let agent_identity = Identity::agent(fx.agent_id, fx.provider_id);
    let service = fx.create_service(&admin, "orders-db");

    // Drive the Create job to completion so the Service reaches Created.
    let create_job = fx.engine.list_pending_jobs(&agent_identity, fx.agent_id, 10).unwrap().remove(0);
    fx.engine.claim_job(&agent_identity, create_job.id()).unwrap();
    fx.engine
        .complete_job(&agent_identity, create_job.id(), JobCompletionPayload::default())
        .unwrap();

    let started = fx.engine.transition_service(&admin, service.id(), ServiceState::Started).unwrap();
    assert_eq!(started.current_state, ServiceState::Starting);
    assert_eq!(started.target_state, Some(ServiceState::Started));

    let start_job = fx.engine.list_pending_jobs(&agent_identity, fx.agent_id, 10).unwrap().remove(0);
    assert_eq!(start_job.action, fulcrum_core::ServiceAction::Start);
    fx.engine.claim_job(&agent_identity, start_job.id()).unwrap();
    fx.engine
        .fail_job(&agent_identity, start_job.id(), "connection refused".to_string())
        .unwrap();

    let failed = fx.engine.get_service(&admin, service.id()).unwrap();
    assert_eq!(failed.current_state, ServiceState::Starting, "state does not move on failure");
    assert_eq!(failed.failed_action, Some(fulcrum_core::ServiceAction::Start));
    assert_eq!(failed.error_message.as_deref(), Some("connection refused"));

    let retried = fx.engine.retry_service(&admin, service.id()).unwrap();
    assert_eq!(retried.retry_count, 1);

    let retry_jobs = fx.engine.list_pending_jobs(&agent_identity, fx.agent_id, 10).unwrap();
    assert_eq!(retry_jobs.len(), 1);
    assert_eq!(retry_jobs[0].action, fulcrum_core::ServiceAction::Start);

    // Retrying again with no failed_action (after a successful completion)
    // is a no-op (spec.md §4.6).
    fx.engine.claim_job(&agent_identity, retry_jobs[0].id()).unwrap();
    fx.engine
        .complete_job(&agent_identity, retry_jobs[0].id(), JobCompletionPayload::default())
        .unwrap();
    let settled = fx.engine.get_service(&admin, service.id()).unwrap();
    let noop = fx.engine.retry_service(&admin, service.id()).unwrap();
    assert_eq!(noop.retry_count, settled.retry_count);
}

#[test]
fn property_update_on_started_service_triggers_hot_updating() {
    let fx = build_fixture();
    let admin = Identity::admin();
    let agent_identity = Identity::agent(fx.agent_id, fx.provider_id);
    let service = fx.create_service(&admin, "orders-db");

    for _ in 0..2 {
        let job = fx.engine.list_pending_jobs(&agent_identity, fx.agent_id, 10).unwrap().remove(0);
        fx.engine.claim_job(&agent_identity, job.id()).unwrap();
        fx.engine
            .complete_job(&agent_identity, job.id(), JobCompletionPayload::default())
            .unwrap();
        if fx.engine.get_service(&admin, service.id()).unwrap().current_state == ServiceState::Created {
            fx.engine.transition_service(&admin, service.id(), ServiceState::Started).unwrap();
        } else {
            break;
        }
    }
    let started = fx.engine.get_service(&admin, service.id()).unwrap();
    assert_eq!(started.current_state, ServiceState::Started);

    let update = fulcrum_core::ServiceUpdate {
        name: None,
        target_properties: Some(fulcrum_core::JsonDoc::new(json!({"version": "15"})).unwrap()),
    };
    let updated = fx.engine.update_service(&admin, service.id(), update).unwrap();
    assert_eq!(updated.current_state, ServiceState::HotUpdating);
    assert_eq!(updated.target_state, Some(ServiceState::Started));

    let hot_update_job = fx.engine.list_pending_jobs(&agent_identity, fx.agent_id, 10).unwrap().remove(0);
    assert_eq!(hot_update_job.action, fulcrum_core::ServiceAction::HotUpdate);
}

#[test]
fn deleting_an_agent_with_services_conflicts_then_succeeds_and_removes_tokens() {
    let fx = build_fixture();
    let admin = Identity::admin();
    let _service = fx.create_service(&admin, "orders-db");

    let generated = fx
        .engine
        .generate_token(
            &admin,
            "worker-1 token".to_string(),
            Role::Agent,
            Some(fx.provider_id),
            Some(fx.agent_id),
            chrono::Duration::days(30),
        )
        .unwrap();
    assert!(token::verify(&generated.plaintext, &generated.token.hashed_value));

    let conflict = fx.engine.delete_agent(&admin, fx.agent_id);
    assert!(conflict.is_err());

    // Delete is only legal from Stopped, so drive the Service through its
    // full Creating -> Created -> Starting -> Started -> Stopping -> Stopped
    // -> Deleting -> Deleted path before the Agent can be deleted.
    let agent_identity = Identity::agent(fx.agent_id, fx.provider_id);
    let create_job = fx.engine.list_pending_jobs(&agent_identity, fx.agent_id, 10).unwrap().remove(0);
    fx.engine.claim_job(&agent_identity, create_job.id()).unwrap();
    fx.engine
        .complete_job(&agent_identity, create_job.id(), JobCompletionPayload::default())
        .unwrap();
    let service = fx.engine.get_service(&admin, create_job.service_id).unwrap();

    fx.engine.transition_service(&admin, service.id(), ServiceState::Started).unwrap();
    let start_job = fx.engine.list_pending_jobs(&agent_identity, fx.agent_id, 10).unwrap().remove(0);
    fx.engine.claim_job(&agent_identity, start_job.id()).unwrap();
    fx.engine
        .complete_job(&agent_identity, start_job.id(), JobCompletionPayload::default())
        .unwrap();

    fx.engine.transition_service(&admin, service.id(), ServiceState::Stopped).unwrap();
    let stop_job = fx.engine.list_pending_jobs(&agent_identity, fx.agent_id, 10).unwrap().remove(0);
    fx.engine.claim_job(&agent_identity, stop_job.id()).unwrap();
    fx.engine
        .complete_job(&agent_identity, stop_job.id(), JobCompletionPayload::default())
        .unwrap();

    fx.engine.transition_service(&admin, service.id(), ServiceState::Deleted).unwrap();
    let delete_job = fx.engine.list_pending_jobs(&agent_identity, fx.agent_id, 10).unwrap().remove(0);
    fx.engine.claim_job(&agent_identity, delete_job.id()).unwrap();
    fx.engine
        .complete_job(&agent_identity, delete_job.id(), JobCompletionPayload::default())
        .unwrap();

    fx.engine.delete_agent(&admin, fx.agent_id).unwrap();

    let page = fx
        .engine
        .list_tokens(
            &admin,
            fulcrum_core::AuthScope::agent(fx.agent_id, fx.provider_id),
            PageRequest::default(),
        )
        .unwrap();
    assert_eq!(page.total, 0, "deleting the agent must cascade-delete its tokens");
}

#[test]
fn cross_tenant_participant_access_is_denied() {
    let fx = build_fixture();
    let admin = Identity::admin();
    let other = fx
        .engine
        .create_participant(&admin, ParticipantFields::builder().name("other-tenant").build())
        .unwrap();

    let identity = Identity::participant(fx.consumer_id);
    let result = fx.engine.get_participant(&identity, other.id());
    assert!(result.is_err());

    // Owning their own tenant is fine.
    let own = fx.engine.get_participant(&identity, fx.consumer_id);
    assert!(own.is_ok());
}

#[test]
fn agent_cannot_claim_a_job_belonging_to_another_agent() {
    let fx = build_fixture();
    let admin = Identity::admin();
    fx.create_service(&admin, "orders-db");

    let other_agent_type = fx
        .engine
        .create_agent_type(&admin, AgentTypeFields::builder().name("other-type").build())
        .unwrap();
    let other_agent = fx
        .engine
        .create_agent(
            &admin,
            AgentFields::builder()
                .name("worker-2")
                .provider_id(fx.provider_id)
                .agent_type_id(other_agent_type.id())
                .build(),
        )
        .unwrap();

    let owning_agent_identity = Identity::agent(fx.agent_id, fx.provider_id);
    let job = fx
        .engine
        .list_pending_jobs(&owning_agent_identity, fx.agent_id, 10)
        .unwrap()
        .remove(0);

    let foreign_agent_identity = Identity::agent(other_agent.id(), fx.provider_id);
    let result = fx.engine.claim_job(&foreign_agent_identity, job.id());
    assert!(result.is_err());
}

#[test]
fn fail_timed_out_jobs_fails_stale_processing_jobs() {
    let fx = build_fixture();
    let admin = Identity::admin();
    let agent_identity = Identity::agent(fx.agent_id, fx.provider_id);
    fx.create_service(&admin, "orders-db");

    let job = fx.engine.list_pending_jobs(&agent_identity, fx.agent_id, 10).unwrap().remove(0);
    fx.engine.claim_job(&agent_identity, job.id()).unwrap();

    // A zero timeout means any Processing job claimed before "now" has
    // timed out; advance the clock so `claimed_at` is strictly in the past.
    fx.clock.advance(chrono::Duration::seconds(1));
    let failed_count = fx.engine.fail_timed_out_jobs(chrono::Duration::zero()).unwrap();
    assert_eq!(failed_count, 1);

    let service = fx.engine.get_service(&admin, job.service_id).unwrap();
    assert_eq!(service.failed_action, Some(fulcrum_core::ServiceAction::Create));
}

#[test]
fn token_round_trip_verifies_only_the_matching_plaintext() {
    let plaintext = token::generate_plaintext();
    let hashed = token::hash_value(&plaintext);
    assert!(token::verify(&plaintext, &hashed));
    assert!(!token::verify("not-the-plaintext", &hashed));
}

proptest::proptest! {
    #[test]
    fn retry_is_idempotent_without_a_failed_action(retry_count in 0u32..5) {
        let fields = fulcrum_core::ServiceFields::builder()
            .current_state(ServiceState::Started)
            .retry_count(retry_count)
            .build();
        let service = fulcrum_core::test_support::service(fields);
        proptest::prop_assert!(service.failed_action.is_none());
        proptest::prop_assert_eq!(service.retry_count, retry_count);
    }

    #[test]
    fn scope_is_monotonic_under_identity_coverage(
        participant_offset in 0u32..2,
        checked_offset in 0u32..2,
    ) {
        // Two fixed ids give four (subject, checked) combinations; an
        // Identity covers its own AuthScope and never a foreign one
        // (spec.md §8's scope-monotonicity property).
        let ids = [fulcrum_core::ParticipantId::new(), fulcrum_core::ParticipantId::new()];
        let mine = ids[participant_offset as usize % 2];
        let checked = ids[checked_offset as usize % 2];
        let identity = Identity::participant(mine);
        let scope = fulcrum_core::AuthScope::participant(checked);
        proptest::prop_assert_eq!(identity.covers(&scope), mine == checked);
    }
}
