// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::{ParticipantRepository, Repository};
use chrono::{DateTime, Utc};
use fulcrum_core::{
    AuthScope, Error, Participant, ParticipantFields, ParticipantId, ParticipantUpdate, Result,
};

impl Repository<Participant, ParticipantId, ParticipantFields> for MemoryStore {
    fn create(&self, fields: ParticipantFields) -> Result<Participant> {
        let now = self.clock().now();
        let participant = Participant::from_fields(fields, now);
        participant.validate()?;
        self.with_inner(|inner| {
            inner
                .participants
                .insert(participant.id(), participant.clone());
        });
        Ok(participant)
    }

    fn save(&self, entity: &Participant) -> Result<Participant> {
        entity.validate()?;
        self.with_inner(|inner| {
            inner.participants.insert(entity.id(), entity.clone());
        });
        Ok(entity.clone())
    }

    fn delete(&self, id: ParticipantId) -> Result<()> {
        self.with_inner(|inner| inner.participants.remove(&id));
        Ok(())
    }

    fn find_by_id(&self, id: ParticipantId) -> Result<Option<Participant>> {
        Ok(self.with_inner(|inner| inner.participants.get(&id).cloned()))
    }

    fn list(&self, scope: AuthScope, page: PageRequest) -> Result<Page<Participant>> {
        let items: Vec<Participant> = self.with_inner(|inner| {
            inner
                .participants
                .values()
                .filter(|p| scope.participant_id.is_none_or(|id| id == p.id()))
                .cloned()
                .collect()
        });
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }

    fn exists(&self, id: ParticipantId) -> Result<bool> {
        Ok(self.with_inner(|inner| inner.participants.contains_key(&id)))
    }
}

impl ParticipantRepository for MemoryStore {
    fn update(
        &self,
        id: ParticipantId,
        update: ParticipantUpdate,
        now: DateTime<Utc>,
    ) -> Result<Participant> {
        let mut participant = self
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("participant", id))?;
        if let Some(name) = update.name {
            participant.name = name;
        }
        if let Some(country) = update.country {
            participant.country = country;
        }
        if let Some(attributes) = update.attributes {
            participant.attributes = attributes;
        }
        if let Some(status) = update.status {
            participant.status = status;
        }
        participant.base.touch(now);
        self.save(&participant)
    }
}
