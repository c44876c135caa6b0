//! Office alerts board: create/edit/delete, list and select the featured one.

use crate::core::audit;
use crate::core::retry::RetryPolicy;
use crate::errors::{AppError, AppResult};
use crate::models::alert::Alert;
use crate::notifier::{AlertEmail, Notifier};
use crate::store::RecordStore;
use chrono::NaiveDateTime;

pub const ALERT_SUBJECT: &str = "Message From EMS Alerts";

pub fn alert_email_message(text: &str) -> String {
    format!("A New Message is added To Email Alerts \"{}\"", text)
}

fn validate(description: &str) -> AppResult<&str> {
    let text = description.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Alert message cannot be empty".into()));
    }
    Ok(text)
}

pub struct AlertBoard<'a> {
    store: &'a dyn RecordStore,
    notifier: &'a dyn Notifier,
    retry: &'a RetryPolicy,
    subject: String,
}

impl<'a> AlertBoard<'a> {
    pub fn new(store: &'a dyn RecordStore, notifier: &'a dyn Notifier, retry: &'a RetryPolicy) -> Self {
        Self {
            store,
            notifier,
            retry,
            subject: ALERT_SUBJECT.to_string(),
        }
    }

    pub fn with_subject(mut self, subject: &str) -> Self {
        if !subject.trim().is_empty() {
            self.subject = subject.to_string();
        }
        self
    }

    /// Store a new alert, then email every user. The alert stays even when
    /// the email cannot be delivered.
    pub fn create(&self, description: &str, now: NaiveDateTime) -> AppResult<Alert> {
        let text = validate(description)?;
        let alert = self
            .retry
            .run("insert_alert", || self.store.insert_alert(text, now))?;

        tracing::info!(alert_id = alert.id, "alert created");
        audit(self.store, "alert_add", "alerts", &format!("alert {}", alert.id));

        if let Err(e) = self.notify(text) {
            tracing::warn!(alert_id = alert.id, "alert notification failed: {e}");
            audit(
                self.store,
                "alert_notify_failed",
                "alerts",
                &format!("alert {}: {}", alert.id, e),
            );
        }

        Ok(alert)
    }

    fn notify(&self, text: &str) -> AppResult<()> {
        let users = self.retry.run("list_users", || self.store.list_users())?;
        let recipients: Vec<String> = users
            .into_iter()
            .map(|u| u.personal_email)
            .filter(|e| !e.trim().is_empty())
            .collect();

        if recipients.is_empty() {
            tracing::debug!("no recipients for alert email");
            return Ok(());
        }

        let email = AlertEmail {
            recipients,
            subject: self.subject.clone(),
            message: alert_email_message(text),
        };
        // sent once, never retried
        self.notifier.send(&email)
    }

    pub fn edit(&self, id: i64, description: &str) -> AppResult<()> {
        let text = validate(description)?;
        let n = self
            .retry
            .run("update_alert", || self.store.update_alert_description(id, text))?;
        if n == 0 {
            return Err(AppError::NotFound(format!("alert {}", id)));
        }
        audit(self.store, "alert_edit", "alerts", &format!("alert {}", id));
        Ok(())
    }

    pub fn delete(&self, id: i64) -> AppResult<()> {
        let n = self.retry.run("delete_alert", || self.store.delete_alert(id))?;
        if n == 0 {
            return Err(AppError::NotFound(format!("alert {}", id)));
        }
        audit(self.store, "alert_del", "alerts", &format!("alert {}", id));
        Ok(())
    }

    /// Selected alert first, the rest newest first.
    pub fn list(&self) -> AppResult<Vec<Alert>> {
        let mut alerts = self.retry.run("load_alerts", || self.store.select_alerts())?;
        // stable: keeps created_at order within each group
        alerts.sort_by_key(|a| !a.selected);
        Ok(alerts)
    }

    /// Make `id` the only selected alert.
    pub fn select(&self, id: i64) -> AppResult<()> {
        let n = self
            .retry
            .run("select_alert", || self.store.select_alert_exclusive(id))?;
        if n == 0 {
            return Err(AppError::NotFound(format!("alert {}", id)));
        }
        audit(self.store, "alert_select", "alerts", &format!("alert {}", id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{seed_named_user, ts};
    use crate::store::SqliteStore;
    use std::cell::{Cell, RefCell};
    use std::time::Duration;

    #[derive(Default)]
    struct Outbox {
        sent: RefCell<Vec<AlertEmail>>,
        fail: bool,
    }

    impl Notifier for Outbox {
        fn send(&self, email: &AlertEmail) -> AppResult<()> {
            if self.fail {
                return Err(AppError::Notifier("relay down".into()));
            }
            self.sent.borrow_mut().push(email.clone());
            Ok(())
        }
    }

    #[test]
    fn create_emails_every_user() {
        let store = SqliteStore::in_memory().unwrap();
        seed_named_user(&store, "Ayesha Khan", "ayesha@example.com");
        seed_named_user(&store, "Bilal Ahmed", "bilal@example.com");
        let outbox = Outbox::default();
        let retry = RetryPolicy::none();
        let board = AlertBoard::new(&store, &outbox, &retry);

        let alert = board.create("  Office closed Friday ", ts("2025-03-03 09:00")).unwrap();
        assert_eq!(alert.description, "Office closed Friday");
        assert!(!alert.selected);

        let sent = outbox.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Message From EMS Alerts");
        assert_eq!(
            sent[0].message,
            "A New Message is added To Email Alerts \"Office closed Friday\""
        );
        assert_eq!(sent[0].recipients.len(), 2);
    }

    #[test]
    fn empty_text_is_rejected_before_any_write() {
        let store = SqliteStore::in_memory().unwrap();
        let outbox = Outbox::default();
        let retry = RetryPolicy::none();
        let board = AlertBoard::new(&store, &outbox, &retry);

        let err = board.create("   ", ts("2025-03-03 09:00")).unwrap_err();
        assert_eq!(err.to_string(), "Alert message cannot be empty");
        assert!(board.list().unwrap().is_empty());
    }

    #[test]
    fn notifier_failure_keeps_the_alert() {
        let store = SqliteStore::in_memory().unwrap();
        seed_named_user(&store, "Ayesha Khan", "ayesha@example.com");
        let outbox = Outbox {
            fail: true,
            ..Default::default()
        };
        let retry = RetryPolicy::none();
        let board = AlertBoard::new(&store, &outbox, &retry);

        board.create("Fire drill at 11", ts("2025-03-03 09:00")).unwrap();
        assert_eq!(board.list().unwrap().len(), 1);
    }

    struct Flaky {
        calls: Cell<u32>,
    }

    impl Notifier for Flaky {
        fn send(&self, _email: &AlertEmail) -> AppResult<()> {
            self.calls.set(self.calls.get() + 1);
            Err(AppError::TransientIo("relay answered 503".into()))
        }
    }

    #[test]
    fn transient_notifier_failure_is_sent_once() {
        let store = SqliteStore::in_memory().unwrap();
        seed_named_user(&store, "Ayesha Khan", "ayesha@example.com");
        let flaky = Flaky { calls: Cell::new(0) };
        let retry = RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        };
        let board = AlertBoard::new(&store, &flaky, &retry);

        board.create("Generator test at 15:00", ts("2025-03-03 09:00")).unwrap();
        assert_eq!(flaky.calls.get(), 1);
        assert_eq!(board.list().unwrap().len(), 1);
    }

    #[test]
    fn no_users_means_no_email() {
        let store = SqliteStore::in_memory().unwrap();
        let outbox = Outbox::default();
        let retry = RetryPolicy::none();
        let board = AlertBoard::new(&store, &outbox, &retry);

        board.create("Hello", ts("2025-03-03 09:00")).unwrap();
        assert!(outbox.sent.borrow().is_empty());
    }

    #[test]
    fn selection_is_exclusive_and_listed_first() {
        let store = SqliteStore::in_memory().unwrap();
        let outbox = Outbox::default();
        let retry = RetryPolicy::none();
        let board = AlertBoard::new(&store, &outbox, &retry);

        let a = board.create("first", ts("2025-03-01 09:00")).unwrap();
        let b = board.create("second", ts("2025-03-02 09:00")).unwrap();
        let c = board.create("third", ts("2025-03-03 09:00")).unwrap();

        board.select(a.id).unwrap();
        board.select(b.id).unwrap();

        let list = board.list().unwrap();
        let ids: Vec<i64> = list.iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![b.id, c.id, a.id]);
        assert_eq!(list.iter().filter(|x| x.selected).count(), 1);
    }

    #[test]
    fn selecting_unknown_alert_changes_nothing() {
        let store = SqliteStore::in_memory().unwrap();
        let outbox = Outbox::default();
        let retry = RetryPolicy::none();
        let board = AlertBoard::new(&store, &outbox, &retry);

        let a = board.create("only", ts("2025-03-01 09:00")).unwrap();
        board.select(a.id).unwrap();

        assert!(board.select(999).unwrap_err().is_not_found());
        assert!(board.list().unwrap()[0].selected);
    }

    #[test]
    fn edit_and_delete_report_missing_ids() {
        let store = SqliteStore::in_memory().unwrap();
        let outbox = Outbox::default();
        let retry = RetryPolicy::none();
        let board = AlertBoard::new(&store, &outbox, &retry);

        let a = board.create("typo", ts("2025-03-01 09:00")).unwrap();
        board.edit(a.id, "fixed").unwrap();
        assert_eq!(board.list().unwrap()[0].description, "fixed");
        assert!(matches!(board.edit(a.id, ""), Err(AppError::Validation(_))));
        // edits never notify
        assert_eq!(outbox.sent.borrow().len(), 0);

        board.delete(a.id).unwrap();
        assert!(board.delete(a.id).unwrap_err().is_not_found());
        assert!(board.edit(a.id, "gone").unwrap_err().is_not_found());
    }
}
