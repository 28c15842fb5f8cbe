// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token Commander (spec.md §3, §4.2, §4.3).
//!
//! `GenerateToken`/`Regenerate` are the only methods that ever see the
//! plaintext value — it is returned to the caller once and never stored.

use crate::Engine;
use fulcrum_audit::EntityScope;
use fulcrum_auth::{Action, Identity, Subject};
use fulcrum_core::{AgentId, AuthScope, Error, ParticipantId, Result, Role, Token, TokenId};
use fulcrum_storage::{Page, PageRequest, TokenCreate};

/// A freshly generated Token: the saved record plus its one-time plaintext.
pub struct GeneratedToken {
    pub token: Token,
    pub plaintext: String,
}

impl Engine {
    /// Issue a new Token for a Participant or Agent identity (spec.md §4.3).
    /// Exactly one of `participant_id`/`agent_id` combination is valid per
    /// `role`, enforced by [`Token::scope_matches_role`].
    #[tracing::instrument(skip(self, identity, name, ttl), fields(token.role = ?role))]
    pub fn generate_token(
        &self,
        identity: &Identity,
        name: String,
        role: Role,
        participant_id: Option<ParticipantId>,
        agent_id: Option<AgentId>,
        ttl: chrono::Duration,
    ) -> Result<GeneratedToken> {
        let scope = match (participant_id, agent_id) {
            (Some(provider_id), Some(agent_id)) => AuthScope::agent(agent_id, provider_id),
            (Some(participant_id), None) => AuthScope::participant(participant_id),
            _ => AuthScope::empty(),
        };
        self.authorize(identity, Subject::Token, Action::GenerateToken, scope)?;
        self.store.atomic(|tx| {
            let plaintext = fulcrum_auth::token::generate_plaintext();
            let hashed_value = fulcrum_auth::token::hash_value(&plaintext);
            let now = tx.clock().now();
            let fields = TokenCreate {
                name,
                role,
                hashed_value,
                expires_at: now + ttl,
                participant_id,
                agent_id,
            };
            let token = tx.tokens().create(fields)?;
            if !token.scope_matches_role() {
                return Err(Error::invalid("token scope does not match role"));
            }
            self.audit_create(
                identity,
                "TokenGenerated",
                token.id(),
                EntityScope {
                    participant_id,
                    agent_id,
                    ..Default::default()
                },
            )?;
            Ok(GeneratedToken { token, plaintext })
        })
    }

    /// Revoke the existing Token and issue a replacement with the same
    /// identity binding (spec.md §4.3).
    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn regenerate_token(&self, identity: &Identity, id: TokenId) -> Result<GeneratedToken> {
        let existing = self
            .store
            .tokens()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("token", id))?;
        let scope = match (existing.participant_id, existing.agent_id) {
            (Some(provider_id), Some(agent_id)) => AuthScope::agent(agent_id, provider_id),
            (Some(participant_id), None) => AuthScope::participant(participant_id),
            _ => AuthScope::empty(),
        };
        self.authorize(identity, Subject::Token, Action::Regenerate, scope)?;
        self.store.atomic(|tx| {
            let plaintext = fulcrum_auth::token::generate_plaintext();
            let hashed_value = fulcrum_auth::token::hash_value(&plaintext);
            let now = tx.clock().now();
            let ttl = existing.expires_at - existing.base.created_at;
            let mut token = existing.clone();
            token.hashed_value = hashed_value;
            token.expires_at = now + ttl;
            token.base.touch(now);
            let token = tx.tokens().save(&token)?;
            self.audit_update(
                identity,
                "TokenRegenerated",
                token.id(),
                EntityScope {
                    participant_id: existing.participant_id,
                    agent_id: existing.agent_id,
                    ..Default::default()
                },
                &to_doc(&existing),
                &to_doc(&token),
            )?;
            Ok(GeneratedToken { token, plaintext })
        })
    }

    #[tracing::instrument(skip(self, identity, scope, page))]
    pub fn list_tokens(
        &self,
        identity: &Identity,
        scope: AuthScope,
        page: PageRequest,
    ) -> Result<Page<Token>> {
        self.authorize(identity, Subject::Token, Action::List, scope)?;
        self.store.tokens().list(scope, page)
    }

    #[tracing::instrument(skip(self, identity), fields(entity_id = %id))]
    pub fn delete_token(&self, identity: &Identity, id: TokenId) -> Result<()> {
        let token = self
            .store
            .tokens()
            .find_by_id(id)?
            .ok_or_else(|| Error::not_found("token", id))?;
        let scope = match (token.participant_id, token.agent_id) {
            (Some(provider_id), Some(agent_id)) => AuthScope::agent(agent_id, provider_id),
            (Some(participant_id), None) => AuthScope::participant(participant_id),
            _ => AuthScope::empty(),
        };
        self.authorize(identity, Subject::Token, Action::Delete, scope)?;
        self.store.atomic(|tx| {
            tx.tokens().delete(id)?;
            self.audit_create(
                identity,
                "TokenDeleted",
                id,
                EntityScope {
                    participant_id: token.participant_id,
                    agent_id: token.agent_id,
                    ..Default::default()
                },
            )?;
            Ok(())
        })
    }
}

fn to_doc(token: &Token) -> fulcrum_core::JsonDoc {
    fulcrum_core::JsonDoc::from(serde_json::json!({
        "name": token.name,
        "role": token.role,
        "expires_at": token.expires_at,
    }))
}
