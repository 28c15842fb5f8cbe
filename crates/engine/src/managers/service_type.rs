// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ServiceType Commander — an admin-curated global catalog (spec.md §3).

use crate::Engine;
use fulcrum_audit::EntityScope;
use fulcrum_auth::{Action, Identity, Subject};
use fulcrum_core::{
    AuthScope, Error, Result, ServiceType, ServiceTypeFields, ServiceTypeId, ServiceTypeUpdate,
};
use fulcrum_storage::{Page, PageRequest};

impl Engine {
    #[tracing::instrument(skip(self, identity, fields), fields(service_type.name = %fields.name))]
    pub fn create_service_type(
        &self,
        identity: &Identity,
        fields: ServiceTypeFields,
    ) -> Result<ServiceType> {
        self.authorize(identity, Subject::ServiceType, Action::Create, AuthScope::empty())?;
        self.store.atomic(|tx| {
            let saved = tx.service_types().create(fields)?;
            self.audit_create(identity, "ServiceTypeCreated", saved.id(), EntityScope::default())?;
            Ok(saved)
        })
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn get_service_type(&self, identity: &Identity, id: ServiceTypeId) -> Result<ServiceType> {
        self.authorize(identity, Subject::ServiceType, Action::Read, AuthScope::empty())?;
        self.store
            .service_types()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("service type", id))
    }

    #[tracing::instrument(skip(self, identity, page))]
    pub fn list_service_types(
        &self,
        identity: &Identity,
        page: PageRequest,
    ) -> Result<Page<ServiceType>> {
        self.authorize(identity, Subject::ServiceType, Action::List, AuthScope::empty())?;
        self.store.service_types().list(AuthScope::empty(), page)
    }

    #[tracing::instrument(skip(self, identity, update), fields(entity_id = %id))]
    pub fn update_service_type(
        &self,
        identity: &Identity,
        id: ServiceTypeId,
        update: ServiceTypeUpdate,
    ) -> Result<ServiceType> {
        self.authorize(identity, Subject::ServiceType, Action::Update, AuthScope::empty())?;
        self.store.atomic(|tx| {
            let before = tx
                .service_types()
                .find_by_id(id)?
                .ok_or_else(|| Error::not_found("service type", id))?;
            let after = tx.service_types().update(id, update)?;
            self.audit_update(
                identity,
                "ServiceTypeUpdated",
                id,
                EntityScope::default(),
                &to_doc(&before),
                &to_doc(&after),
            )?;
            Ok(after)
        })
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn delete_service_type(&self, identity: &Identity, id: ServiceTypeId) -> Result<()> {
        self.authorize(identity, Subject::ServiceType, Action::Delete, AuthScope::empty())?;
        self.store.atomic(|tx| {
            tx.service_types()
                .find_by_id(id)?
                .ok_or_else(|| Error::not_found("service type", id))?;
            tx.service_types().delete(id)?;
            self.audit_create(identity, "ServiceTypeDeleted", id, EntityScope::default())?;
            Ok(())
        })
    }
}

fn to_doc(service_type: &ServiceType) -> fulcrum_core::JsonDoc {
    fulcrum_core::JsonDoc::from(serde_json::json!({ "name": service_type.name }))
}
