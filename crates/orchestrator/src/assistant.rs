//! The assistant pipeline front object.

use std::sync::Arc;

use assistant_core::{AssistantResponse, ClassifierChain, IntentLabel, IntentResult};
use chrono::NaiveDateTime;
use cloud_intent::CloudClassifier;
use local_intent::LocalClassifier;
use room_booking::{BookingError, BookingService};
use rule_intent::RuleClassifier;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::actions::{DomainActions, EmailDraft, EventDraft, ReminderDraft, TaskDraft};

/// Coordinates classify, normalize, route and respond.
///
/// One call to [`Assistant::handle`] is terminal: no conversational state
/// is carried across calls, and every failure path degrades into a
/// structured [`AssistantResponse`] instead of raising.
pub struct Assistant {
    chain: ClassifierChain,
    actions: Arc<dyn DomainActions>,
    booking: Arc<BookingService>,
}

impl Assistant {
    /// Create an assistant over an explicit provider chain.
    pub fn new(
        chain: ClassifierChain,
        actions: Arc<dyn DomainActions>,
        booking: Arc<BookingService>,
    ) -> Self {
        Self {
            chain,
            actions,
            booking,
        }
    }

    /// Create an assistant with only the deterministic rule classifier.
    ///
    /// Useful offline and in tests: classification still always succeeds.
    pub fn with_rule_fallback(actions: Arc<dyn DomainActions>, booking: Arc<BookingService>) -> Self {
        Self::new(
            ClassifierChain::new().with_provider(RuleClassifier::new()),
            actions,
            booking,
        )
    }

    /// Create an assistant with the standard provider chain from the
    /// environment: cloud, then local, then the rule fallback.
    ///
    /// Providers that cannot be configured are skipped; the rule classifier
    /// is always appended, so the chain is total regardless.
    pub fn from_env(actions: Arc<dyn DomainActions>, booking: Arc<BookingService>) -> Self {
        let mut chain = ClassifierChain::new();

        match CloudClassifier::from_env() {
            Ok(classifier) => chain.push(Arc::new(classifier)),
            Err(e) => info!("cloud classifier disabled: {}", e),
        }

        match LocalClassifier::from_env() {
            Ok(classifier) => chain.push(Arc::new(classifier)),
            Err(e) => info!("local classifier disabled: {}", e),
        }

        chain.push(Arc::new(RuleClassifier::new()));

        Self::new(chain, actions, booking)
    }

    /// The booking service.
    pub fn booking(&self) -> &Arc<BookingService> {
        &self.booking
    }

    /// Handle a request using the local wall clock.
    pub async fn handle(&self, user_id: &str, text: &str) -> AssistantResponse {
        let now = chrono::Local::now().naive_local();
        self.handle_at(user_id, text, now).await
    }

    /// Handle a request at an explicit `now`, for deterministic testing.
    pub async fn handle_at(&self, user_id: &str, text: &str, now: NaiveDateTime) -> AssistantResponse {
        let classification = self.chain.classify(text).await;

        info!(
            user_id,
            intent = %classification.intent,
            confidence = ?classification.confidence,
            "routing request"
        );

        let response = AssistantResponse::from_classification(&classification);

        match classification.intent {
            IntentLabel::TaskCreate => {
                self.create_task(user_id, &classification, text, now, response).await
            }
            IntentLabel::TaskList => self.list_tasks(user_id, response).await,
            IntentLabel::ReminderCreate => {
                self.create_reminder(user_id, &classification, text, now, response).await
            }
            IntentLabel::EmailSend => {
                self.send_email(user_id, &classification, text, response).await
            }
            IntentLabel::RoomReserve => {
                self.reserve_room(user_id, &classification, text, now, response).await
            }
            IntentLabel::MathEvaluate => self.evaluate_math(&classification, text, response),
            IntentLabel::GroceryAdd => response.with_message(
                "Grocery lists live in the shopping module - I've noted the request, \
                 but you'll want to add it there.",
            ),
            IntentLabel::DocumentSearch => response.with_message(
                "Document search lives in the documents module - try searching there.",
            ),
            IntentLabel::Unknown => response.with_message(
                "I'm not sure what you need. You can ask me to create tasks or reminders, \
                 book a meeting room, send an email, or do quick math.",
            ),
        }
    }

    async fn create_task(
        &self,
        user_id: &str,
        classification: &IntentResult,
        text: &str,
        now: NaiveDateTime,
        response: AssistantResponse,
    ) -> AssistantResponse {
        let params = &classification.parameters;

        let Some(title) = slot_extract::description(params, text) else {
            return response.with_message("What should the task say?");
        };

        let due_date = slot_extract::extract_datetime(params, text, now);

        let draft = TaskDraft {
            title,
            status: "open".to_string(),
            description: None,
            due_date,
            assignee_id: None,
        };

        match self.actions.create_task(user_id, draft).await {
            Ok(record) => {
                let message = match record.due_date {
                    Some(due) => format!(
                        "Created task \"{}\", due {}.",
                        record.title,
                        due.format("%d/%m/%Y at %H:%M")
                    ),
                    None => format!("Created task \"{}\".", record.title),
                };
                response.with_message(message).with_result(json!(record))
            }
            Err(e) => {
                warn!(user_id, error = %e, "task creation failed");
                response.with_message(format!("Sorry, I couldn't create that task: {}", e))
            }
        }
    }

    async fn list_tasks(&self, user_id: &str, response: AssistantResponse) -> AssistantResponse {
        match self.actions.list_tasks(user_id).await {
            Ok(tasks) if tasks.is_empty() => {
                response.with_message("You have no tasks.").with_result(json!([]))
            }
            Ok(tasks) => {
                let mut lines = vec![format!(
                    "You have {} task{}:",
                    tasks.len(),
                    if tasks.len() == 1 { "" } else { "s" }
                )];
                for (i, task) in tasks.iter().enumerate() {
                    lines.push(format!("{}. {} ({})", i + 1, task.title, task.status));
                }
                response
                    .with_message(lines.join("\n"))
                    .with_result(json!(tasks))
            }
            Err(e) => {
                warn!(user_id, error = %e, "task listing failed");
                response.with_message(format!("Sorry, I couldn't fetch your tasks: {}", e))
            }
        }
    }

    async fn create_reminder(
        &self,
        user_id: &str,
        classification: &IntentResult,
        text: &str,
        now: NaiveDateTime,
        response: AssistantResponse,
    ) -> AssistantResponse {
        let params = &classification.parameters;

        let Some(reminder_text) = slot_extract::description(params, text) else {
            return response.with_message("What should I remind you about?");
        };

        let Some(remind_at) = slot_extract::extract_datetime(params, text, now) else {
            return response.with_message("When should I remind you?");
        };

        let draft = ReminderDraft {
            text: reminder_text.clone(),
            remind_at,
        };

        let reminder = match self.actions.create_reminder(user_id, draft).await {
            Ok(record) => record,
            Err(e) => {
                warn!(user_id, error = %e, "reminder creation failed");
                return response
                    .with_message(format!("Sorry, I couldn't set that reminder: {}", e));
            }
        };

        let mut message = format!(
            "I'll remind you to {} on {}.",
            reminder.text,
            remind_at.format("%d/%m/%Y at %H:%M")
        );

        // Best-effort calendar entry: the reminder stands even if this fails.
        let event_draft = EventDraft {
            title: reminder_text,
            date: remind_at.date(),
            time: Some(remind_at.time()),
            description: None,
            location: None,
        };

        let calendar_event = match self.actions.create_calendar_event(user_id, event_draft).await {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(user_id, error = %e, "calendar event creation failed after reminder");
                message.push_str(&format!(" (I couldn't add it to your calendar: {})", e));
                None
            }
        };

        response.with_message(message).with_result(json!({
            "reminder": reminder,
            "calendar_event": calendar_event,
        }))
    }

    async fn send_email(
        &self,
        user_id: &str,
        classification: &IntentResult,
        text: &str,
        response: AssistantResponse,
    ) -> AssistantResponse {
        let params = &classification.parameters;

        let routing = slot_extract::email_routing(params, text);
        if routing.is_empty() {
            return response.with_message("Who should receive the email?");
        }

        let subject = slot_extract::params::string_field(params, &["subject"])
            .or_else(|| slot_extract::description(params, text))
            .unwrap_or_else(|| "(no subject)".to_string());

        let body = slot_extract::params::string_field(params, &["body", "message", "content"])
            .unwrap_or_else(|| text.to_string());

        let draft = EmailDraft {
            to: routing.to,
            cc: routing.cc,
            bcc: routing.bcc,
            subject,
            body,
        };

        match self.actions.send_email(user_id, draft).await {
            Ok(receipt) => {
                let others = receipt.to.len().saturating_sub(1);
                let message = match (receipt.to.first(), others) {
                    (Some(first), 0) => format!("Email sent to {}.", first),
                    (Some(first), n) => format!("Email sent to {} and {} more.", first, n),
                    (None, _) => "Email sent.".to_string(),
                };
                response.with_message(message).with_result(json!(receipt))
            }
            Err(e) => {
                warn!(user_id, error = %e, "email send failed");
                response.with_message(format!("Sorry, I couldn't send that email: {}", e))
            }
        }
    }

    async fn reserve_room(
        &self,
        user_id: &str,
        classification: &IntentResult,
        text: &str,
        now: NaiveDateTime,
        response: AssistantResponse,
    ) -> AssistantResponse {
        let request = slot_extract::reservation_request(&classification.parameters, text, now);
        let preferred = request.preferred_room.clone();

        match self.booking.reserve(user_id, request, now).await {
            Ok(outcome) => {
                let mut message = format!(
                    "Booked {} on {} from {} to {}.",
                    outcome.room.name,
                    outcome.reservation.start.format("%d/%m/%Y"),
                    outcome.reservation.start.format("%H:%M"),
                    outcome.reservation.end.format("%H:%M"),
                );
                if !outcome.alternatives.is_empty() {
                    if let Some(preferred) = preferred {
                        message.push_str(&format!(" {} was already taken.", capitalize(&preferred)));
                    }
                }
                response.with_message(message).with_result(json!(outcome))
            }
            Err(BookingError::NoAvailability { alternatives }) => {
                let mut lines = vec![format!(
                    "No room is free for that window - I checked {} room{}:",
                    alternatives.len(),
                    if alternatives.len() == 1 { "" } else { "s" }
                )];
                for alternative in &alternatives {
                    lines.push(format!(
                        "- {} has {} conflicting booking{}",
                        alternative.room.name,
                        alternative.conflicts.len(),
                        if alternative.conflicts.len() == 1 { "" } else { "s" }
                    ));
                }
                response
                    .with_message(lines.join("\n"))
                    .with_result(json!({ "alternatives": alternatives }))
            }
        }
    }

    fn evaluate_math(
        &self,
        classification: &IntentResult,
        text: &str,
        response: AssistantResponse,
    ) -> AssistantResponse {
        let Some(expression) = slot_extract::expression(&classification.parameters, text) else {
            return response.with_message("What should I calculate?");
        };

        match slot_extract::evaluate(&expression) {
            Ok(result) => {
                let message = format!("{} = {}", result.original, result.formatted);
                response.with_message(message).with_result(json!({
                    "value": result.value,
                    "formatted": result.formatted,
                    "sanitized": result.sanitized,
                }))
            }
            Err(e) => response.with_message(format!("I couldn't evaluate that expression: {}", e)),
        }
    }
}

/// Raw parameter bag type used across the pipeline.
pub type ParameterBag = Map<String, Value>;

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::InMemoryActions;
    use chrono::NaiveDate;

    // A Monday at noon.
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn assistant() -> (Assistant, Arc<InMemoryActions>) {
        let actions = Arc::new(InMemoryActions::new());
        let booking = Arc::new(BookingService::with_default_rooms());
        (
            Assistant::with_rule_fallback(actions.clone(), booking),
            actions,
        )
    }

    #[tokio::test]
    async fn test_end_to_end_room_booking() {
        let (assistant, _) = assistant();

        let response = assistant
            .handle_at(
                "alice",
                "book a 30-minute team meeting Friday at 14:30 in meeting room B",
                now(),
            )
            .await;

        assert_eq!(response.intent, IntentLabel::RoomReserve);

        let result = response.result.expect("booking result");
        assert_eq!(result["room"]["name"], "Meeting room B");
        assert_eq!(result["reservation"]["start"], "2026-03-06T14:30:00");
        assert_eq!(result["reservation"]["end"], "2026-03-06T15:00:00");
    }

    #[tokio::test]
    async fn test_task_create_and_list() {
        let (assistant, actions) = assistant();

        let response = assistant
            .handle_at("alice", "create a task to fix the printer", now())
            .await;
        assert_eq!(response.intent, IntentLabel::TaskCreate);
        assert!(response.message.unwrap().contains("fix the printer"));

        let tasks = actions.tasks_for("alice").await;
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].status, "open");

        let response = assistant
            .handle_at("alice", "show me my tasks", now())
            .await;
        assert_eq!(response.intent, IntentLabel::TaskList);
        assert!(response.message.unwrap().contains("fix the printer"));
    }

    #[tokio::test]
    async fn test_reminder_requires_datetime() {
        let (assistant, actions) = assistant();

        let response = assistant
            .handle_at("alice", "remind me to call the dentist", now())
            .await;

        assert_eq!(response.intent, IntentLabel::ReminderCreate);
        assert_eq!(
            response.message.as_deref(),
            Some("When should I remind you?")
        );
        assert!(response.result.is_none());
        assert!(actions.reminders_for("alice").await.is_empty());
    }

    #[tokio::test]
    async fn test_reminder_with_calendar() {
        let (assistant, actions) = assistant();

        let response = assistant
            .handle_at("alice", "remind me to call the dentist tomorrow at 10:00", now())
            .await;

        assert_eq!(response.intent, IntentLabel::ReminderCreate);
        let reminders = actions.reminders_for("alice").await;
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].text, "call the dentist");
        assert_eq!(
            reminders[0].remind_at,
            NaiveDate::from_ymd_opt(2026, 3, 3)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );

        assert_eq!(actions.events_for("alice").await.len(), 1);
        assert!(!response.message.unwrap().contains("calendar:"));
    }

    #[tokio::test]
    async fn test_reminder_survives_calendar_failure() {
        let actions = Arc::new(InMemoryActions::with_failing_calendar());
        let booking = Arc::new(BookingService::with_default_rooms());
        let assistant = Assistant::with_rule_fallback(actions.clone(), booking);

        let response = assistant
            .handle_at("alice", "remind me to call the dentist tomorrow at 10:00", now())
            .await;

        // Partial success: the reminder stands, the failure is explained.
        assert_eq!(actions.reminders_for("alice").await.len(), 1);
        let message = response.message.unwrap();
        assert!(message.contains("I'll remind you to call the dentist"));
        assert!(message.contains("couldn't add it to your calendar"));

        let result = response.result.unwrap();
        assert!(result["reminder"].is_object());
        assert!(result["calendar_event"].is_null());
    }

    #[tokio::test]
    async fn test_email_requires_recipient() {
        let (assistant, _) = assistant();

        let response = assistant
            .handle_at("alice", "send an email to bob about the launch", now())
            .await;

        assert_eq!(response.intent, IntentLabel::EmailSend);
        assert_eq!(
            response.message.as_deref(),
            Some("Who should receive the email?")
        );
    }

    #[tokio::test]
    async fn test_email_sent_to_address_in_text() {
        let (assistant, actions) = assistant();

        let response = assistant
            .handle_at("alice", "email bob@example.com about the launch", now())
            .await;

        assert_eq!(response.intent, IntentLabel::EmailSend);
        assert!(response.message.unwrap().contains("bob@example.com"));

        let emails = actions.emails_for("alice").await;
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].to, vec!["bob@example.com"]);
    }

    #[tokio::test]
    async fn test_math_evaluation() {
        let (assistant, _) = assistant();

        let response = assistant.handle_at("alice", "what is 2+2", now()).await;
        assert_eq!(response.intent, IntentLabel::MathEvaluate);
        assert_eq!(response.message.as_deref(), Some("2+2 = 4"));
        assert_eq!(response.result.unwrap()["value"], 4.0);
    }

    #[tokio::test]
    async fn test_math_failure_degrades_to_message() {
        let (assistant, _) = assistant();

        let response = assistant.handle_at("alice", "calculate (1+2", now()).await;
        assert_eq!(response.intent, IntentLabel::MathEvaluate);
        assert!(response
            .message
            .unwrap()
            .contains("I couldn't evaluate that expression"));
        assert!(response.result.is_none());
    }

    #[tokio::test]
    async fn test_unknown_gets_clarification() {
        let (assistant, _) = assistant();

        let response = assistant.handle_at("alice", "how are you today", now()).await;
        assert_eq!(response.intent, IntentLabel::Unknown);
        assert!(response.message.unwrap().contains("I'm not sure"));
    }

    #[tokio::test]
    async fn test_no_availability_lists_alternatives() {
        let (assistant, _) = assistant();

        // Fill every seed room for the same window.
        for organizer in ["a", "b", "c"] {
            let response = assistant
                .handle_at(
                    organizer,
                    "book a meeting tomorrow at 10:00 for 1 hour",
                    now(),
                )
                .await;
            assert!(response.result.is_some(), "setup booking failed");
        }

        let response = assistant
            .handle_at("dave", "book a meeting tomorrow at 10:30 for 1 hour", now())
            .await;

        assert_eq!(response.intent, IntentLabel::RoomReserve);
        let message = response.message.unwrap();
        assert!(message.contains("No room is free"));
        let alternatives = &response.result.unwrap()["alternatives"];
        assert_eq!(alternatives.as_array().unwrap().len(), 3);
    }
}
