// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validated CRUD Commanders for the catalog/tenant entities (spec.md §4,
//! §6): Participant, Agent, AgentType, ServiceType, ServiceGroup,
//! MetricType, MetricEntry, Token. Service and Job have their own
//! lifecycle-aware modules (`crate::service`, `crate::job`).

mod agent;
mod agent_type;
mod metric;
mod participant;
mod service_group;
mod service_type;
mod token;
