// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::MemoryStore;
use crate::page::{Page, PageRequest};
use crate::repository::{Repository, TokenCreate, TokenRepository};
use fulcrum_core::{AgentId, AuthScope, BaseEntity, ParticipantId, Result, Token, TokenId};

impl Repository<Token, TokenId, TokenCreate> for MemoryStore {
    fn create(&self, fields: TokenCreate) -> Result<Token> {
        let now = self.clock().now();
        let token = Token {
            base: BaseEntity::new(TokenId::new(), now),
            name: fields.name,
            role: fields.role,
            hashed_value: fields.hashed_value,
            expires_at: fields.expires_at,
            participant_id: fields.participant_id,
            agent_id: fields.agent_id,
        };
        self.with_inner(|inner| {
            inner.tokens.insert(token.id(), token.clone());
        });
        Ok(token)
    }

    fn save(&self, entity: &Token) -> Result<Token> {
        self.with_inner(|inner| {
            inner.tokens.insert(entity.id(), entity.clone());
        });
        Ok(entity.clone())
    }

    fn delete(&self, id: TokenId) -> Result<()> {
        self.with_inner(|inner| inner.tokens.remove(&id));
        Ok(())
    }

    fn find_by_id(&self, id: TokenId) -> Result<Option<Token>> {
        Ok(self.with_inner(|inner| inner.tokens.get(&id).cloned()))
    }

    fn list(&self, scope: AuthScope, page: PageRequest) -> Result<Page<Token>> {
        let items: Vec<Token> = self.with_inner(|inner| {
            inner
                .tokens
                .values()
                .filter(|t| scope.participant_id.is_none_or(|id| t.participant_id == Some(id)))
                .filter(|t| scope.agent_id.is_none_or(|id| t.agent_id == Some(id)))
                .cloned()
                .collect()
        });
        let total = items.len() as u64;
        Ok(Page::new(items, page, total))
    }

    fn exists(&self, id: TokenId) -> Result<bool> {
        Ok(self.with_inner(|inner| inner.tokens.contains_key(&id)))
    }
}

impl TokenRepository for MemoryStore {
    fn find_by_hashed_value(&self, hashed_value: &str) -> Result<Option<Token>> {
        Ok(self.with_inner(|inner| {
            inner
                .tokens
                .values()
                .find(|t| t.hashed_value == hashed_value)
                .cloned()
        }))
    }

    fn delete_by_participant_id(&self, participant_id: ParticipantId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            let before = inner.tokens.len();
            inner
                .tokens
                .retain(|_, t| t.participant_id != Some(participant_id));
            (before - inner.tokens.len()) as u64
        }))
    }

    fn delete_by_agent_id(&self, agent_id: AgentId) -> Result<u64> {
        Ok(self.with_inner(|inner| {
            let before = inner.tokens.len();
            inner.tokens.retain(|_, t| t.agent_id != Some(agent_id));
            (before - inner.tokens.len()) as u64
        }))
    }
}
