//! In-memory wizard sessions
//!
//! Each session owns one `Wizard`. Sessions live only in process memory and
//! are not resumable after a restart. Sessions idle past the TTL are evicted
//! whenever the table is touched, unless they are submitting, and the table
//! never holds more than `max_sessions` entries.

use super::draft::Draft;
use super::wizard::Wizard;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use uuid::Uuid;

pub type WizardHandle = Arc<Mutex<Wizard>>;

/// Point-in-time view of a wizard session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSnapshot {
    pub id: Uuid,
    pub current: usize,
    pub completed: Vec<usize>,
    pub can_advance: bool,
    pub submitting: bool,
    pub draft: Draft,
}

impl WizardSnapshot {
    pub fn capture(id: Uuid, wizard: &Wizard) -> Self {
        Self {
            id,
            current: wizard.current(),
            completed: wizard.completed().iter().copied().collect(),
            can_advance: wizard.can_advance(),
            submitting: wizard.is_submitting(),
            draft: wizard.draft().clone(),
        }
    }
}

/// Bounds on the session table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions untouched for this long are dropped on the next sweep
    pub idle_ttl: Duration,
    /// Live sessions allowed at once
    pub max_sessions: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle_ttl: Duration::from_secs(60 * 60),
            max_sessions: 1000,
        }
    }
}

/// The session table is at `max_sessions` after evicting idle sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("wizard session limit of {limit} reached")]
pub struct SessionsFull {
    pub limit: usize,
}

struct Entry {
    handle: WizardHandle,
    last_touched: Instant,
}

impl Entry {
    /// Idle past the TTL and not in the middle of a submission.
    /// A session whose lock is held right now is in use.
    fn expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.last_touched) >= ttl
            && self
                .handle
                .try_lock()
                .is_some_and(|wizard| !wizard.is_submitting())
    }
}

#[derive(Default)]
pub struct WizardSessions {
    sessions: RwLock<HashMap<Uuid, Entry>>,
    limits: SessionLimits,
}

impl WizardSessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SessionLimits) -> Self {
        Self {
            sessions: RwLock::default(),
            limits,
        }
    }

    pub fn limits(&self) -> SessionLimits {
        self.limits
    }

    pub fn create(&self) -> Result<(Uuid, WizardHandle), SessionsFull> {
        let now = Instant::now();
        let mut sessions = self.sessions.write();
        self.sweep(&mut sessions, now);
        if sessions.len() >= self.limits.max_sessions {
            return Err(SessionsFull {
                limit: self.limits.max_sessions,
            });
        }

        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(Wizard::new()));
        sessions.insert(
            id,
            Entry {
                handle: handle.clone(),
                last_touched: now,
            },
        );
        Ok((id, handle))
    }

    /// Look up a session and mark it as used
    pub fn get(&self, id: Uuid) -> Option<WizardHandle> {
        let now = Instant::now();
        let mut sessions = self.sessions.write();
        self.sweep(&mut sessions, now);
        let entry = sessions.get_mut(&id)?;
        entry.last_touched = now;
        Some(entry.handle.clone())
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn sweep(&self, sessions: &mut HashMap<Uuid, Entry>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.expired(now, self.limits.idle_ttl));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = sessions.len(), "idle wizard sessions evicted");
        }
    }
}

/// Clears the submitting flag when dropped, whatever happened in between.
///
/// A dropped request future (client gone mid-submission) still releases the
/// session.
pub struct SubmitGuard {
    handle: WizardHandle,
    succeeded: bool,
}

impl SubmitGuard {
    pub fn new(handle: WizardHandle) -> Self {
        Self {
            handle,
            succeeded: false,
        }
    }

    pub fn succeed(mut self) {
        self.succeeded = true;
    }
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.handle.lock().finish_submit(self.succeeded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::Section;
    use crate::domain::draft::Social;

    #[test]
    fn sessions_are_independent() {
        let sessions = WizardSessions::new();
        let (a, handle_a) = sessions.create().unwrap();
        let (b, _) = sessions.create().unwrap();
        assert_ne!(a, b);
        assert_eq!(sessions.len(), 2);

        handle_a.lock().back().ok();
        assert!(sessions.remove(a));
        assert!(!sessions.remove(a));
        assert!(sessions.get(a).is_none());
        assert!(sessions.get(b).is_some());
    }

    #[test]
    fn guard_keeps_draft_on_failure() {
        let sessions = WizardSessions::new();
        let (_, handle) = sessions.create().unwrap();
        handle
            .lock()
            .update_field(Section::Social(Social {
                comments: "keep me".into(),
                ..Default::default()
            }))
            .ok();

        drop(SubmitGuard::new(handle.clone()));

        let wizard = handle.lock();
        assert!(!wizard.is_submitting());
        assert_eq!(wizard.draft().social.comments, "keep me");
    }

    fn short_lived(max_sessions: usize) -> WizardSessions {
        WizardSessions::with_limits(SessionLimits {
            idle_ttl: Duration::from_secs(60),
            max_sessions,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn idle_sessions_are_evicted() {
        let sessions = short_lived(10);
        let (idle, _) = sessions.create().unwrap();
        let (active, _) = sessions.create().unwrap();

        tokio::time::advance(Duration::from_secs(45)).await;
        assert!(sessions.get(active).is_some());

        tokio::time::advance(Duration::from_secs(30)).await;
        let (_, _) = sessions.create().unwrap();

        assert!(sessions.get(idle).is_none());
        assert!(sessions.get(active).is_some());
        assert_eq!(sessions.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn submitting_session_survives_ttl() {
        let sessions = short_lived(10);
        let (id, handle) = sessions.create().unwrap();
        *handle.lock() = submitting_wizard();

        tokio::time::advance(Duration::from_secs(120)).await;
        assert!(sessions.get(id).is_some());

        handle.lock().finish_submit(false);
        tokio::time::advance(Duration::from_secs(120)).await;
        assert!(sessions.get(id).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn full_table_rejects_until_sessions_expire() {
        let sessions = short_lived(2);
        sessions.create().unwrap();
        sessions.create().unwrap();
        assert_eq!(sessions.create().unwrap_err(), SessionsFull { limit: 2 });

        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(sessions.create().is_ok());
        assert_eq!(sessions.len(), 1);
    }

    fn submitting_wizard() -> Wizard {
        use crate::domain::draft::{About, BinaryAsset, BusinessInfo, DeliveryHours, DishDraft};
        use crate::domain::wizard::NextStep;

        let image = || BinaryAsset::new("a.jpg", "image/jpeg", vec![1u8]);
        let mut wizard = Wizard::new();
        let sections = vec![
            Section::BusinessInfo(BusinessInfo {
                name: "Tony's".into(),
                address: "1 Main St".into(),
                email: "t@t.test".into(),
                ..Default::default()
            }),
            Section::About(About {
                founded_year: "1998".into(),
                story: "Pasta".into(),
                ..Default::default()
            }),
            Section::PopularDishes(vec![DishDraft::default(); 3]),
            Section::MenuPdf(Some(BinaryAsset::new("m.pdf", "application/pdf", vec![1u8]))),
            Section::DeliveryHours(DeliveryHours {
                delivery_areas: "Downtown".into(),
                hours: "11-22".into(),
                ..Default::default()
            }),
            Section::Photos(vec![image(), image(), image()]),
        ];
        for section in sections {
            wizard.update_field(section).unwrap();
            wizard.next().unwrap();
        }
        assert!(matches!(wizard.next(), Ok(NextStep::Submit(_))));
        wizard
    }
}
