// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Service lifecycle engine (spec.md §4.6).
//!
//! A Service's `CurrentState`/`TargetState` pair is driven forward by the
//! Commander requesting a transition (`Transition`) and backward/forward by
//! the Job Commander's completion/failure handlers (`crate::job`) — never
//! both from the same call site.

use crate::Engine;
use fulcrum_audit::EntityScope;
use fulcrum_auth::{Action, Identity, Subject};
use fulcrum_core::{
    AttributeMap, AuthScope, Error, JobCompletionPayload, JsonDoc, ParticipantId, Result, Service,
    ServiceAction, ServiceGroupId, ServiceId, ServiceState, ServiceTypeId, ServiceUpdate,
};
use fulcrum_storage::{JobCreate, Page, PageRequest};

const DELETE_PRIORITY: i32 = 0;

impl Engine {
    /// `Create` (spec.md §4.6): builds the Service in `Creating` with
    /// `TargetState = Created`, dispatches the corresponding Job.
    #[allow(clippy::too_many_arguments)]
    #[tracing::instrument(skip(self, identity, name, attributes, target_properties), fields(service.name = %name))]
    pub fn create_service(
        &self,
        identity: &Identity,
        name: String,
        attributes: AttributeMap,
        target_properties: JsonDoc,
        provider_id: ParticipantId,
        consumer_id: ParticipantId,
        group_id: ServiceGroupId,
        agent_id: fulcrum_core::AgentId,
        service_type_id: ServiceTypeId,
    ) -> Result<Service> {
        let scope = AuthScope::service(provider_id, consumer_id, agent_id);
        self.authorize(identity, Subject::Service, Action::Create, scope)?;
        self.store.atomic(|tx| {
            let group = tx
                .service_groups()
                .find_by_id(group_id)?
                .ok_or_else(|| Error::not_found("service group", group_id))?;
            if group.participant_id != consumer_id {
                return Err(Error::invalid("service group does not belong to consumer"));
            }
            let agent = tx
                .agents()
                .find_by_id(agent_id)?
                .ok_or_else(|| Error::not_found("agent", agent_id))?;
            if agent.provider_id != provider_id {
                return Err(Error::invalid("agent does not belong to provider"));
            }
            let agent_type = tx
                .agent_types()
                .find_by_id(agent.agent_type_id)?
                .ok_or_else(|| Error::not_found("agent type", agent.agent_type_id))?;
            if !agent_type.supports(service_type_id) {
                return Err(Error::invalid("agent type does not support this service type"));
            }
            let now = tx.clock().now();
            let service = Service::new_creating(
                name,
                attributes,
                target_properties,
                provider_id,
                consumer_id,
                group_id,
                agent_id,
                service_type_id,
                now,
            );
            service.validate()?;
            let saved = tx.services().save(&service)?;
            tx.jobs().create(JobCreate {
                service_id: saved.id(),
                agent_id,
                provider_id,
                consumer_id,
                action: ServiceAction::Create,
                priority: fulcrum_core::DEFAULT_PRIORITY,
            })?;
            self.audit_create(identity, "ServiceCreated", saved.id(), EntityScope::from(saved.scope()))?;
            Ok(saved)
        })
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn get_service(&self, identity: &Identity, id: ServiceId) -> Result<Service> {
        let service = self
            .store
            .services()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service", id))?;
        self.authorize(identity, Subject::Service, Action::Read, service.scope())?;
        Ok(service)
    }

    #[tracing::instrument(skip(self, identity, scope, page))]
    pub fn list_services(
        &self,
        identity: &Identity,
        scope: AuthScope,
        page: PageRequest,
    ) -> Result<Page<Service>> {
        self.authorize(identity, Subject::Service, Action::List, scope)?;
        self.store.services().list(scope, page)
    }

    /// Property update (spec.md §4.6): a request whose `target_properties`
    /// differs (deep-equal) from `current_properties` dispatches a
    /// HotUpdate or ColdUpdate Job depending on the ServiceType, matching
    /// `name` renames are applied immediately with no Job.
    #[tracing::instrument(skip(self, identity, update), fields(entity_id = %id))]
    pub fn update_service(
        &self,
        identity: &Identity,
        id: ServiceId,
        update: ServiceUpdate,
    ) -> Result<Service> {
        let before = self
            .store
            .services()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service", id))?;
        self.authorize(identity, Subject::Service, Action::Update, before.scope())?;
        self.store.atomic(|tx| {
            let mut after = before.clone();
            if let Some(name) = update.name.clone() {
                after.name = name;
            }
            let triggers_job = match &update.target_properties {
                Some(proposed) => !proposed.deep_eq(&before.current_properties),
                None => false,
            };
            if triggers_job {
                let (next_state, action) = match before.current_state {
                    ServiceState::Started => (ServiceState::HotUpdating, ServiceAction::HotUpdate),
                    ServiceState::Stopped => (ServiceState::ColdUpdating, ServiceAction::ColdUpdate),
                    other => {
                        return Err(Error::invalid(format!(
                            "cannot update properties while service is {other}"
                        )));
                    }
                };
                after.target_properties = update.target_properties.clone();
                after.current_state = next_state;
                after.target_state = Some(before.current_state);
                let saved = tx.services().save(&after)?;
                tx.jobs().create(JobCreate {
                    service_id: id,
                    agent_id: saved.agent_id,
                    provider_id: saved.provider_id,
                    consumer_id: saved.consumer_id,
                    action,
                    priority: fulcrum_core::DEFAULT_PRIORITY,
                })?;
                self.audit_update(
                    identity,
                    "ServiceUpdated",
                    id,
                    EntityScope::from(saved.scope()),
                    &to_doc(&before),
                    &to_doc(&saved),
                )?;
                Ok(saved)
            } else {
                let saved = tx.services().save(&after)?;
                self.audit_update(
                    identity,
                    "ServiceUpdated",
                    id,
                    EntityScope::from(saved.scope()),
                    &to_doc(&before),
                    &to_doc(&saved),
                )?;
                Ok(saved)
            }
        })
    }

    /// `Transition(id, target)` — the external `Start`/`Stop`/`Delete`
    /// verbs all resolve to this (spec.md §4.6's legal-transition table).
    #[tracing::instrument(skip(self, identity), fields(entity_id = %id, service.target = ?target))]
    pub fn transition_service(
        &self,
        identity: &Identity,
        id: ServiceId,
        target: ServiceState,
    ) -> Result<Service> {
        let before = self
            .store
            .services()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service", id))?;
        let action_kind = match target {
            ServiceState::Started => Action::Start,
            ServiceState::Stopped => Action::Stop,
            ServiceState::Deleted => Action::Delete,
            _ => Action::Update,
        };
        self.authorize(identity, Subject::Service, action_kind, before.scope())?;
        self.store.atomic(|tx| {
            let (transient, job_action) = Service::legal_transition(before.current_state, target)?;
            let mut after = before.clone();
            after.current_state = transient;
            after.target_state = Some(target);
            let priority = if job_action == ServiceAction::Delete {
                DELETE_PRIORITY
            } else {
                fulcrum_core::DEFAULT_PRIORITY
            };
            let saved = tx.services().save(&after)?;
            tx.jobs().create(JobCreate {
                service_id: id,
                agent_id: saved.agent_id,
                provider_id: saved.provider_id,
                consumer_id: saved.consumer_id,
                action: job_action,
                priority,
            })?;
            let event = match job_action {
                ServiceAction::Start => "ServiceStarting",
                ServiceAction::Stop => "ServiceStopping",
                ServiceAction::Delete => "ServiceDeleting",
                _ => "ServiceTransitioned",
            };
            self.audit_update(
                identity,
                event,
                id,
                EntityScope::from(saved.scope()),
                &to_doc(&before),
                &to_doc(&saved),
            )?;
            Ok(saved)
        })
    }

    /// `Retry(id)` (spec.md §4.6): no-op unless `failed_action` is set;
    /// otherwise bumps `retry_count` and dispatches a fresh Job for the same
    /// action, leaving `current_state`/`target_state` untouched.
    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn retry_service(&self, identity: &Identity, id: ServiceId) -> Result<Service> {
        let before = self
            .store
            .services()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service", id))?;
        self.authorize(identity, Subject::Service, Action::Retry, before.scope())?;
        self.store.atomic(|tx| {
            let Some(failed_action) = before.failed_action else {
                return Ok(before);
            };
            if tx.jobs().count_non_terminal_by_service(id)? > 0 {
                return Err(Error::conflict("service already has a non-terminal job"));
            }
            let mut after = before.clone();
            after.retry_count += 1;
            let saved = tx.services().save(&after)?;
            tx.jobs().create(JobCreate {
                service_id: id,
                agent_id: saved.agent_id,
                provider_id: saved.provider_id,
                consumer_id: saved.consumer_id,
                action: failed_action,
                priority: fulcrum_core::DEFAULT_PRIORITY,
            })?;
            self.audit_update(
                identity,
                "ServiceRetried",
                id,
                EntityScope::from(saved.scope()),
                &to_doc(&before),
                &to_doc(&saved),
            )?;
            Ok(saved)
        })
    }

    /// Job completion handler (spec.md §4.6), invoked by `crate::job`
    /// inside the Job Commander's own transaction — never called directly
    /// by an external interface.
    pub(crate) fn apply_service_completion(
        service: &mut Service,
        payload: JobCompletionPayload,
    ) -> Result<()> {
        let target = service
            .target_state
            .ok_or_else(|| Error::invalid("service has no target state to complete"))?;
        service.current_state = target;
        service.target_state = None;
        service.failed_action = None;
        service.error_message = None;
        service.retry_count = 0;
        if let Some(resources) = payload.resources {
            service.resources = resources;
        }
        if let Some(external_id) = payload.external_id {
            service.external_id = Some(external_id);
        }
        if let Some(target_properties) = service.target_properties.take() {
            service.current_properties = target_properties;
        }
        Ok(())
    }

    /// Job failure handler (spec.md §4.6): records the error and the action
    /// that failed so a subsequent `Retry` can reissue it; the Service's
    /// state does not move.
    pub(crate) fn apply_service_failure(
        service: &mut Service,
        action: ServiceAction,
        error_message: String,
    ) {
        service.failed_action = Some(action);
        service.error_message = Some(error_message);
    }
}

pub(crate) fn to_doc(service: &Service) -> JsonDoc {
    JsonDoc::from(serde_json::json!({
        "name": service.name,
        "current_state": service.current_state,
        "target_state": service.target_state,
        "current_properties": service.current_properties.as_value(),
        "target_properties": service.target_properties.as_ref().map(JsonDoc::as_value),
        "external_id": service.external_id,
        "error_message": service.error_message,
        "failed_action": service.failed_action,
        "retry_count": service.retry_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fulcrum_core::test_support;

    #[test]
    fn legal_transition_table_matches_spec() {
        assert!(Service::legal_transition(ServiceState::Created, ServiceState::Started).is_ok());
        assert!(Service::legal_transition(ServiceState::Started, ServiceState::Stopped).is_ok());
        assert!(Service::legal_transition(ServiceState::Stopped, ServiceState::Started).is_ok());
        assert!(Service::legal_transition(ServiceState::Stopped, ServiceState::Deleted).is_ok());
        assert!(Service::legal_transition(ServiceState::Created, ServiceState::Deleted).is_err());
    }

    #[test]
    fn completion_handler_moves_current_to_target_and_clears_retry_state() {
        let fields = fulcrum_core::ServiceFields::builder()
            .current_state(ServiceState::Starting)
            .target_state(Some(ServiceState::Started))
            .retry_count(2)
            .build();
        let mut service = test_support::service(fields);
        service.failed_action = Some(ServiceAction::Start);
        service.error_message = Some("boom".to_string());
        Engine::apply_service_completion(&mut service, JobCompletionPayload::default()).unwrap();
        assert_eq!(service.current_state, ServiceState::Started);
        assert_eq!(service.target_state, None);
        assert_eq!(service.failed_action, None);
        assert_eq!(service.error_message, None);
        assert_eq!(service.retry_count, 0);
    }
}
