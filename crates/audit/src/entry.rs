// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! [`CreateCtx`]/[`CreateCtxWithDiff`] — the two constructors every
//! Commander mutation uses to produce its [`AuditEntry`] (spec.md §4.5).

use crate::diff::structural_diff;
use fulcrum_core::{
    AgentId, AuditEntry, Authority, Clock, JsonDoc, ParticipantId, Role,
};

/// Maps the caller's [`Role`] to the audit [`Authority`] it acts under.
/// There is no "unknown role" case in this codebase's closed `Role` enum,
/// but the mapping is written as a `match` with no wildcard so a newly
/// added `Role` variant fails to compile here instead of silently falling
/// back to `Internal`.
pub fn authority_for_role(role: Role) -> Authority {
    match role {
        Role::FulcrumAdmin => Authority::Admin,
        Role::Participant => Authority::Participant,
        Role::Agent => Authority::Agent,
    }
}

/// Scope pointers copied onto an [`AuditEntry`] from the affected entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityScope {
    pub participant_id: Option<ParticipantId>,
    pub provider_id: Option<ParticipantId>,
    pub agent_id: Option<AgentId>,
    pub consumer_id: Option<ParticipantId>,
}

impl From<fulcrum_core::AuthScope> for EntityScope {
    fn from(scope: fulcrum_core::AuthScope) -> Self {
        Self {
            participant_id: scope.participant_id,
            provider_id: scope.provider_id,
            agent_id: scope.agent_id,
            consumer_id: scope.consumer_id,
        }
    }
}

/// Build an [`AuditEntry`] for a create/delete mutation (spec.md §4.5:
/// `CreateCtx(eventType, properties, entityID, providerID, agentID,
/// consumerID)`). `entity_id` is folded into `properties.entity_id` since
/// `AuditEntry` itself carries no dedicated entity-id column — the scope
/// pointers are what every audit query filters on.
pub fn create_ctx(
    clock: &dyn Clock,
    authority: Authority,
    authority_id: Option<String>,
    event_type: impl Into<String>,
    properties: JsonDoc,
    entity_id: impl ToString,
    scope: EntityScope,
) -> AuditEntry {
    AuditEntry {
        id: fulcrum_core::AuditEntryId::new(),
        created_at: clock.now(),
        authority,
        authority_id,
        event_type: event_type.into(),
        properties: with_entity_id(properties, entity_id),
        participant_id: scope.participant_id,
        provider_id: scope.provider_id,
        agent_id: scope.agent_id,
        consumer_id: scope.consumer_id,
    }
}

/// Build an [`AuditEntry`] for an update mutation (spec.md §4.5:
/// `CreateCtxWithDiff(eventType, entityID, providerID, agentID, consumerID,
/// before, after)`). The structural diff between `before` and `after` is
/// stored under `properties.diff`.
#[allow(clippy::too_many_arguments)]
pub fn create_ctx_with_diff(
    clock: &dyn Clock,
    authority: Authority,
    authority_id: Option<String>,
    event_type: impl Into<String>,
    entity_id: impl ToString,
    scope: EntityScope,
    before: &JsonDoc,
    after: &JsonDoc,
) -> AuditEntry {
    let diff = structural_diff(before, after);
    let properties = JsonDoc::from(serde_json::json!({ "diff": diff.into_value() }));
    create_ctx(
        clock,
        authority,
        authority_id,
        event_type,
        properties,
        entity_id,
        scope,
    )
}

fn with_entity_id(properties: JsonDoc, entity_id: impl ToString) -> JsonDoc {
    let mut value = properties.into_value();
    if let serde_json::Value::Object(map) = &mut value {
        map.insert("entity_id".to_string(), serde_json::Value::String(entity_id.to_string()));
    }
    JsonDoc::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fulcrum_core::{FixedClock, ParticipantId};

    #[test]
    fn create_ctx_carries_scope_and_entity_id() {
        let clock = FixedClock::default();
        let participant_id = ParticipantId::new();
        let scope = EntityScope {
            participant_id: Some(participant_id),
            ..Default::default()
        };
        let entry = create_ctx(
            &clock,
            Authority::Admin,
            None,
            "ParticipantCreated",
            JsonDoc::empty_object(),
            participant_id,
            scope,
        );
        assert_eq!(entry.participant_id, Some(participant_id));
        assert_eq!(entry.event_type, "ParticipantCreated");
        assert_eq!(
            entry.properties.as_value().get("entity_id").and_then(|v| v.as_str()),
            Some(participant_id.to_string().as_str())
        );
    }

    #[test]
    fn create_ctx_with_diff_stores_diff_under_properties() {
        let clock = FixedClock::default();
        let before = JsonDoc::from(serde_json::json!({"name": "a"}));
        let after = JsonDoc::from(serde_json::json!({"name": "b"}));
        let entry = create_ctx_with_diff(
            &clock,
            Authority::Participant,
            None,
            "ServiceUpdated",
            ParticipantId::new(),
            EntityScope::default(),
            &before,
            &after,
        );
        let diff = entry.properties.as_value().get("diff").expect("diff present");
        assert_eq!(diff.get("name").unwrap()["before"], "a");
        assert_eq!(diff.get("name").unwrap()["after"], "b");
    }

    #[test]
    fn authority_mapping_matches_role() {
        assert_eq!(authority_for_role(Role::FulcrumAdmin), Authority::Admin);
        assert_eq!(authority_for_role(Role::Participant), Authority::Participant);
        assert_eq!(authority_for_role(Role::Agent), Authority::Agent);
    }
}
