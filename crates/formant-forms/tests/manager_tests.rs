//! End-to-end tests for the form manager lifecycle: validation timing,
//! submission outcomes, reset semantics, and event delivery.

use formant_core::{FieldValue, ValidationRule, confirm_password_rules, password_rules};
use formant_forms::{
	FieldSpec, FormError, FormEvent, FormManager, FormOptions, FormSchema, InputKind,
	SubmissionOutcome, ValidationMode, submission_handler,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn login_schema() -> FormSchema {
	FormSchema::new()
		.with_field(
			FieldSpec::new("email", InputKind::Email)
				.required_with_message("Email is required")
				.with_rule(ValidationRule::email("Enter a valid email address")),
		)
		.with_field(
			FieldSpec::new("password", InputKind::Password)
				.required_with_message("Password is required")
				.with_rule(ValidationRule::min_length(
					6,
					"Password must be at least 6 characters",
				)),
		)
}

#[tokio::test]
async fn required_field_reports_configured_message() {
	let manager = FormManager::new(login_schema()).await;

	let passed = manager.validate_field("email").await;

	assert!(!passed);
	assert_eq!(manager.field_errors("email"), vec!["Email is required"]);
}

#[tokio::test]
async fn non_blank_value_clears_required_error() {
	let manager = FormManager::new(login_schema()).await;
	manager.validate_field("email").await;
	assert!(!manager.field_errors("email").is_empty());

	manager.set_field_value("email", "user@example.com").await;
	let passed = manager.validate_field("email").await;

	assert!(passed);
	assert!(manager.field_errors("email").is_empty());
}

#[tokio::test]
async fn invalid_email_reports_format_error_not_required_error() {
	let manager = FormManager::new(login_schema()).await;

	manager.set_field_value("email", "not-an-email").await;
	let passed = manager.validate_field("email").await;

	assert!(!passed);
	assert_eq!(
		manager.field_errors("email"),
		vec!["Enter a valid email address"]
	);
}

#[tokio::test]
async fn short_password_reports_min_length_error() {
	let manager = FormManager::new(login_schema()).await;

	manager.set_field_value("password", "abc").await;
	let passed = manager.validate_field("password").await;

	assert!(!passed);
	assert_eq!(
		manager.field_errors("password"),
		vec!["Password must be at least 6 characters"]
	);
}

#[tokio::test]
async fn validate_form_is_idempotent() {
	let manager = FormManager::new(login_schema()).await;
	manager.set_field_value("email", "not-an-email").await;

	manager.validate_form().await;
	let first = manager.snapshot().errors;
	manager.validate_form().await;
	let second = manager.snapshot().errors;

	assert_eq!(first, second);
}

#[tokio::test]
async fn unknown_field_value_is_ignored() {
	let manager = FormManager::new(login_schema()).await;
	let before = manager.values();

	manager.set_field_value("nickname", "ignored").await;

	assert_eq!(manager.values(), before);
	assert_eq!(manager.field_value("nickname"), None);
}

#[tokio::test]
async fn reset_restores_schema_defaults() {
	let schema = FormSchema::new()
		.with_field(FieldSpec::new("title", InputKind::Text).with_default("untitled"))
		.with_field(FieldSpec::new("email", InputKind::Email).required());
	let manager = FormManager::new(schema).await;

	manager.set_field_value("title", "changed").await;
	manager.set_field_touched("email", true).await;
	manager.validate_form().await;
	assert!(manager.is_dirty());

	manager.reset().await;

	let state = manager.snapshot();
	assert_eq!(state.values.get("title"), Some(&FieldValue::from("untitled")));
	assert!(state.errors.is_empty());
	assert!(state.touched.is_empty());
	assert!(!state.is_dirty);
	assert_eq!(state.submit_count, 0);
	assert!(state.last_submission.is_none());
}

#[tokio::test]
async fn submit_on_invalid_form_never_calls_handler() {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let handler = submission_handler(move |_values| {
		let counter = Arc::clone(&counter);
		async move {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(SubmissionOutcome::succeeded())
		}
	});
	let manager = FormManager::with_handler(login_schema(), handler).await;

	let outcome = manager.submit().await.expect("submit returns an outcome");

	assert!(!outcome.success);
	assert_eq!(calls.load(Ordering::SeqCst), 0);
	assert_eq!(manager.submit_count(), 1);
	assert!(!manager.is_submitting());
}

#[tokio::test]
async fn handler_error_is_normalized_into_failed_outcome() {
	let handler =
		submission_handler(|_values| async move { Err(anyhow::anyhow!("database unavailable")) });
	let manager = FormManager::with_handler(login_schema(), handler).await;
	manager.set_field_value("email", "user@example.com").await;
	manager.set_field_value("password", "secret123").await;

	let outcome = manager.submit().await.expect("submit returns an outcome");

	assert!(!outcome.success);
	match &outcome.errors {
		Some(formant_forms::SubmissionErrors::Message(msg)) => {
			assert_eq!(msg, "database unavailable");
		}
		other => panic!("expected a message error, got {other:?}"),
	}
}

#[tokio::test]
async fn valid_submit_without_handler_is_a_contract_violation() {
	let manager = FormManager::new(login_schema()).await;
	manager.set_field_value("email", "user@example.com").await;
	manager.set_field_value("password", "secret123").await;

	let result = manager.submit().await;

	assert!(matches!(result, Err(FormError::MissingSubmissionHandler)));
	assert!(!manager.is_submitting());
}

#[tokio::test]
async fn successful_submit_with_reset_on_submit_restores_defaults() {
	let schema = login_schema().with_options(FormOptions {
		reset_on_submit: true,
		..FormOptions::default()
	});
	let handler = submission_handler(|_values| async move { Ok(SubmissionOutcome::succeeded()) });
	let manager = FormManager::with_handler(schema, handler).await;

	manager.set_field_value("email", "user@example.com").await;
	manager.set_field_value("password", "secret123").await;
	let outcome = manager.submit().await.expect("submit returns an outcome");

	assert!(outcome.success);
	assert!(manager.is_valid());
	// The automatic reset keeps the stored outcome readable...
	let last = manager.last_submission().expect("outcome is stored");
	assert!(last.success);
	// ...while the values are back to their defaults.
	assert_eq!(
		manager.field_value("email"),
		Some(FieldValue::Text(String::new()))
	);
	assert!(!manager.is_dirty());
}

#[tokio::test]
async fn failed_handler_merges_structured_errors_into_live_map() {
	let handler = submission_handler(|_values| async move {
		let mut fields = HashMap::new();
		fields.insert(
			"email".to_string(),
			vec!["This address is already registered".to_string()],
		);
		Ok(SubmissionOutcome::failed_with_fields(fields))
	});
	let manager = FormManager::with_handler(login_schema(), handler).await;
	manager.set_field_value("email", "user@example.com").await;
	manager.set_field_value("password", "secret123").await;

	let outcome = manager.submit().await.expect("submit returns an outcome");

	assert!(!outcome.success);
	assert_eq!(
		manager.field_errors("email"),
		vec!["This address is already registered"]
	);
	assert!(!manager.is_valid());
}

#[tokio::test]
async fn overlapping_submit_is_rejected() {
	let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
	let release_rx = Arc::new(Mutex::new(Some(release_rx)));
	let handler = submission_handler(move |_values| {
		let release_rx = Arc::clone(&release_rx);
		async move {
			let rx = release_rx.lock().unwrap().take().expect("handler runs once");
			let _ = rx.await;
			Ok(SubmissionOutcome::succeeded())
		}
	});
	let manager = FormManager::with_handler(login_schema(), handler).await;
	manager.set_field_value("email", "user@example.com").await;
	manager.set_field_value("password", "secret123").await;

	let first = tokio::spawn({
		let manager = manager.clone();
		async move { manager.submit().await }
	});
	while !manager.is_submitting() {
		tokio::task::yield_now().await;
	}

	let second = manager.submit().await;
	assert!(matches!(second, Err(FormError::SubmissionInProgress)));

	release_tx.send(()).expect("first submit is waiting");
	let first = first.await.expect("task joins").expect("outcome");
	assert!(first.success);
	assert_eq!(manager.submit_count(), 1);
}

#[tokio::test]
async fn confirm_password_scenario() {
	let schema = FormSchema::new()
		.with_field(FieldSpec::new("password", InputKind::Password).with_rules(password_rules()))
		.with_field(
			FieldSpec::new("confirm_password", InputKind::Password)
				.with_rules(confirm_password_rules("password")),
		);
	let manager = FormManager::new(schema).await;

	manager.set_field_value("password", "Abc12345").await;
	manager.set_field_value("confirm_password", "Abc1234").await;
	let passed = manager.validate_field("confirm_password").await;
	assert!(!passed);
	assert_eq!(
		manager.field_errors("confirm_password"),
		vec!["Passwords do not match"]
	);

	manager.set_field_value("confirm_password", "Abc12345").await;
	let passed = manager.validate_field("confirm_password").await;
	assert!(passed);
	assert!(manager.field_errors("confirm_password").is_empty());
}

#[tokio::test]
async fn on_change_mode_validates_every_edit() {
	let schema = login_schema().with_options(FormOptions {
		validation_mode: ValidationMode::OnChange,
		..FormOptions::default()
	});
	let manager = FormManager::new(schema).await;

	manager.set_field_value("email", "nope").await;
	assert_eq!(
		manager.field_errors("email"),
		vec!["Enter a valid email address"]
	);

	manager.set_field_value("email", "user@example.com").await;
	assert!(manager.field_errors("email").is_empty());
}

#[tokio::test]
async fn on_blur_mode_validates_on_touch_only() {
	let schema = login_schema().with_options(FormOptions {
		validation_mode: ValidationMode::OnBlur,
		revalidate_mode: ValidationMode::OnBlur,
		..FormOptions::default()
	});
	let manager = FormManager::new(schema).await;

	manager.set_field_value("email", "nope").await;
	assert!(manager.field_errors("email").is_empty());

	manager.set_field_touched("email", true).await;
	assert_eq!(
		manager.field_errors("email"),
		vec!["Enter a valid email address"]
	);
}

#[tokio::test]
async fn revalidate_on_change_clears_errors_after_failed_submit() {
	// Default modes: validate on submit, revalidate on change.
	let manager = FormManager::new(login_schema()).await;
	manager.validate_form().await;
	assert!(!manager.field_errors("email").is_empty());

	manager.set_field_value("email", "user@example.com").await;

	assert!(manager.field_errors("email").is_empty());
}

#[tokio::test]
async fn validate_on_mount_runs_before_interaction() {
	let schema = login_schema().with_options(FormOptions {
		validate_on_mount: true,
		..FormOptions::default()
	});
	let manager = FormManager::new(schema).await;

	assert!(!manager.is_valid());
	assert!(!manager.field_errors("email").is_empty());
}

#[tokio::test]
async fn bulk_set_values_emits_one_event() {
	let manager = FormManager::new(login_schema()).await;
	let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
	let log = Arc::clone(&events);
	let _subscription = manager.subscribe(move |event| {
		log.lock().unwrap().push(format!("{event:?}"));
		Ok(())
	});

	let mut values = HashMap::new();
	values.insert("email".to_string(), FieldValue::from("user@example.com"));
	values.insert("password".to_string(), FieldValue::from("secret123"));
	manager.set_values(values);

	let events = events.lock().unwrap();
	assert_eq!(events.len(), 1);
	assert!(events[0].starts_with("FieldsChanged"));
}

#[tokio::test]
async fn submission_events_fire_in_order() {
	let handler = submission_handler(|_values| async move { Ok(SubmissionOutcome::succeeded()) });
	let manager = FormManager::with_handler(login_schema(), handler).await;
	manager.set_field_value("email", "user@example.com").await;
	manager.set_field_value("password", "secret123").await;

	let events: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
	let log = Arc::clone(&events);
	let _subscription = manager.subscribe(move |event| {
		let tag = match event {
			FormEvent::SubmissionStarted => "started",
			FormEvent::SubmissionSucceeded => "succeeded",
			FormEvent::SubmissionFailed => "failed",
			_ => return Ok(()),
		};
		log.lock().unwrap().push(tag);
		Ok(())
	});

	manager.submit().await.expect("submit returns an outcome");

	assert_eq!(*events.lock().unwrap(), vec!["started", "succeeded"]);
}

#[tokio::test]
async fn add_field_with_value_and_rules_validates_immediately() {
	let manager = FormManager::new(login_schema()).await;

	manager
		.add_field(
			FieldSpec::new("username", InputKind::Text)
				.with_value("ab")
				.with_rule(ValidationRule::min_length(3, "Username is too short")),
		)
		.await;

	assert_eq!(manager.field_errors("username"), vec!["Username is too short"]);
	assert_eq!(manager.field_value("username"), Some(FieldValue::from("ab")));
}

#[tokio::test]
async fn remove_field_clears_its_entries_and_validity() {
	let manager = FormManager::new(login_schema()).await;
	manager.validate_form().await;
	assert!(!manager.is_valid());

	let removed_email = manager.remove_field("email");
	let removed_password = manager.remove_field("password");

	assert!(removed_email.is_some());
	assert!(removed_password.is_some());
	assert!(manager.is_valid());
	assert_eq!(manager.field_value("email"), None);
}

#[tokio::test]
async fn update_field_synchronizes_the_values_map() {
	let manager = FormManager::new(login_schema()).await;

	manager.update_field("email", |field| {
		field.label = Some("Work email".to_string());
		field.value = Some(FieldValue::from("work@example.com"));
	});

	assert_eq!(
		manager.field_value("email"),
		Some(FieldValue::from("work@example.com"))
	);
	let snapshot = manager.snapshot();
	assert_eq!(
		snapshot.field("email").and_then(|f| f.label.clone()),
		Some("Work email".to_string())
	);
}
