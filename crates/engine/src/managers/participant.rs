// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Participant Commander (spec.md §3, §4.2, §4.5).

use crate::Engine;
use fulcrum_audit::EntityScope;
use fulcrum_auth::{Action, Identity, Subject};
use fulcrum_core::{
    AuthScope, Error, Participant, ParticipantFields, ParticipantId, ParticipantUpdate, Result,
};
use fulcrum_storage::{Page, PageRequest};

impl Engine {
    #[tracing::instrument(skip(self, identity, fields), fields(participant.name = %fields.name))]
    pub fn create_participant(
        &self,
        identity: &Identity,
        fields: ParticipantFields,
    ) -> Result<Participant> {
        self.authorize(identity, Subject::Participant, Action::Create, AuthScope::empty())?;
        self.store.atomic(|tx| {
            let saved = tx.participants().create(fields)?;
            self.audit_create(
                identity,
                "ParticipantCreated",
                saved.id(),
                EntityScope {
                    participant_id: Some(saved.id()),
                    ..Default::default()
                },
            )?;
            Ok(saved)
        })
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn get_participant(&self, identity: &Identity, id: ParticipantId) -> Result<Participant> {
        self.authorize(
            identity,
            Subject::Participant,
            Action::Read,
            AuthScope::participant(id),
        )?;
        self.store
            .participants()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("participant", id))
    }

    #[tracing::instrument(skip(self, identity, scope, page))]
    pub fn list_participants(
        &self,
        identity: &Identity,
        scope: AuthScope,
        page: PageRequest,
    ) -> Result<Page<Participant>> {
        self.authorize(identity, Subject::Participant, Action::List, scope)?;
        self.store.participants().list(scope, page)
    }

    #[tracing::instrument(skip(self, identity, update), fields(entity_id = %id))]
    pub fn update_participant(
        &self,
        identity: &Identity,
        id: ParticipantId,
        update: ParticipantUpdate,
    ) -> Result<Participant> {
        self.authorize(
            identity,
            Subject::Participant,
            Action::Update,
            AuthScope::participant(id),
        )?;
        self.store.atomic(|tx| {
            let before = tx
                .participants()
                .find_by_id(id)?
                .ok_or_else(|| Error::not_found("participant", id))?;
            let now = tx.clock().now();
            let after = tx.participants().update(id, update, now)?;
            after.validate()?;
            self.audit_update(
                identity,
                "ParticipantUpdated",
                id,
                EntityScope {
                    participant_id: Some(id),
                    ..Default::default()
                },
                &to_doc(&before),
                &to_doc(&after),
            )?;
            Ok(after)
        })
    }

    /// Delete requires zero owned Agents (spec.md §3, §4: a Participant
    /// deletion cascades to its Tokens, but never to Agents or
    /// ServiceGroups — those must be deleted explicitly first).
    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn delete_participant(&self, identity: &Identity, id: ParticipantId) -> Result<()> {
        self.authorize(
            identity,
            Subject::Participant,
            Action::Delete,
            AuthScope::participant(id),
        )?;
        self.store.atomic(|tx| {
            tx.participants()
                .find_by_id(id)?
                .ok_or_else(|| Error::not_found("participant", id))?;
            if tx.agents().count_by_provider(id)? > 0 {
                return Err(Error::conflict("cannot delete participant with associated agents"));
            }
            if tx.service_groups().count_by_participant(id)? > 0 {
                return Err(Error::conflict(
                    "cannot delete participant with associated service groups",
                ));
            }
            if tx.services().count_by_provider(id)? > 0 || tx.services().count_by_consumer(id)? > 0
            {
                return Err(Error::conflict("cannot delete participant with associated services"));
            }
            tx.participants().delete(id)?;
            tx.tokens().delete_by_participant_id(id)?;
            self.audit_create(
                identity,
                "ParticipantDeleted",
                id,
                EntityScope {
                    participant_id: Some(id),
                    ..Default::default()
                },
            )?;
            Ok(())
        })
    }
}

fn to_doc(participant: &Participant) -> fulcrum_core::JsonDoc {
    fulcrum_core::JsonDoc::from(serde_json::json!({
        "name": participant.name,
        "country": participant.country,
        "status": participant.status,
    }))
}
