//! Record every fallback: component, failure, fallback used, timestamp, recovery status.

use chrono::{DateTime, Utc};
use popcast_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

/// Events kept before the oldest are dropped.
pub const DEFAULT_MAX_EVENTS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Active,
    Recovered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Bounded log of degradation events.
#[derive(Debug, Clone)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
    max_events: usize,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_EVENTS)
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events: max_events.max(1),
        }
    }

    pub fn record(&mut self, event: DegradationEvent) {
        crate::tracing_setup::events::degradation_triggered(
            &event.component,
            &event.failure,
            &event.fallback_used,
        );
        if self.events.len() == self.max_events {
            self.events.remove(0);
        }
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Convenience over [`record`](Self::record) stamped with the current time.
    pub fn record_now(&mut self, component: &str, failure: &str, fallback_used: &str) {
        self.record(DegradationEvent {
            component: component.to_string(),
            failure: failure.to_string(),
            fallback_used: fallback_used.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Mark every active degradation of `component` as recovered.
    pub fn mark_recovered(&mut self, component: &str) {
        let now = Utc::now();
        let mut any = false;
        for tracked in self.events.iter_mut() {
            if tracked.event.component == component
                && tracked.recovery_status == RecoveryStatus::Active
            {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
                any = true;
            }
        }
        if any {
            crate::tracing_setup::events::component_recovered(component);
        }
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    /// Latest active event per component, oldest component first.
    pub fn active_events(&self) -> Vec<DegradationEvent> {
        let mut latest: Vec<&DegradationEvent> = Vec::new();
        for tracked in self.active_degradations() {
            match latest
                .iter_mut()
                .find(|e| e.component == tracked.event.component)
            {
                Some(slot) => *slot = &tracked.event,
                None => latest.push(&tracked.event),
            }
        }
        latest.into_iter().cloned().collect()
    }
}
