// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ServiceGroup Commander (spec.md §3, §4.2, §4.5).

use crate::Engine;
use fulcrum_audit::EntityScope;
use fulcrum_auth::{Action, Identity, Subject};
use fulcrum_core::{
    AuthScope, Error, Result, ServiceGroup, ServiceGroupFields, ServiceGroupId, ServiceGroupUpdate,
};
use fulcrum_storage::{Page, PageRequest};

impl Engine {
    #[tracing::instrument(skip(self, identity, fields), fields(service_group.name = %fields.name))]
    pub fn create_service_group(
        &self,
        identity: &Identity,
        fields: ServiceGroupFields,
    ) -> Result<ServiceGroup> {
        let scope = AuthScope::participant(fields.participant_id);
        self.authorize(identity, Subject::ServiceGroup, Action::Create, scope)?;
        self.store.atomic(|tx| {
            tx.participants()
                .find_by_id(fields.participant_id)?
                .ok_or_else(|| Error::not_found("participant", fields.participant_id))?;
            let saved = tx.service_groups().create(fields)?;
            self.audit_create(
                identity,
                "ServiceGroupCreated",
                saved.id(),
                EntityScope::from(saved.scope()),
            )?;
            Ok(saved)
        })
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn get_service_group(&self, identity: &Identity, id: ServiceGroupId) -> Result<ServiceGroup> {
        let group = self
            .store
            .service_groups()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service group", id))?;
        self.authorize(identity, Subject::ServiceGroup, Action::Read, group.scope())?;
        Ok(group)
    }

    #[tracing::instrument(skip(self, identity, scope, page))]
    pub fn list_service_groups(
        &self,
        identity: &Identity,
        scope: AuthScope,
        page: PageRequest,
    ) -> Result<Page<ServiceGroup>> {
        self.authorize(identity, Subject::ServiceGroup, Action::List, scope)?;
        self.store.service_groups().list(scope, page)
    }

    #[tracing::instrument(skip(self, identity, update), fields(entity_id = %id))]
    pub fn update_service_group(
        &self,
        identity: &Identity,
        id: ServiceGroupId,
        update: ServiceGroupUpdate,
    ) -> Result<ServiceGroup> {
        let before = self
            .store
            .service_groups()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service group", id))?;
        self.authorize(identity, Subject::ServiceGroup, Action::Update, before.scope())?;
        self.store.atomic(|tx| {
            let after = tx.service_groups().update(id, update)?;
            self.audit_update(
                identity,
                "ServiceGroupUpdated",
                id,
                EntityScope::from(after.scope()),
                &to_doc(&before),
                &to_doc(&after),
            )?;
            Ok(after)
        })
    }

    /// Delete requires zero contained Services (spec.md §3).
    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn delete_service_group(&self, identity: &Identity, id: ServiceGroupId) -> Result<()> {
        let group = self
            .store
            .service_groups()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service group", id))?;
        self.authorize(identity, Subject::ServiceGroup, Action::Delete, group.scope())?;
        self.store.atomic(|tx| {
            if tx.services().count_by_group(id)? > 0 {
                return Err(Error::conflict("cannot delete service group with associated services"));
            }
            tx.service_groups().delete(id)?;
            self.audit_create(
                identity,
                "ServiceGroupDeleted",
                id,
                EntityScope::from(group.scope()),
            )?;
            Ok(())
        })
    }
}

fn to_doc(group: &ServiceGroup) -> fulcrum_core::JsonDoc {
    fulcrum_core::JsonDoc::from(serde_json::json!({ "name": group.name }))
}
