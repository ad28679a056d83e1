//! Debounced auto-save
//!
//! [`Autosave`] observes a form's change events and persists a value
//! snapshot through a caller-supplied async save function once editing goes
//! quiet. A single pending timer debounces bursts: every new change restarts
//! it. Saves run on one worker task, so they never overlap; changes that
//! arrive while a save is in flight re-arm the debounce and the next save
//! reads the newest snapshot, coalescing intermediate states.

use formant_core::ValueMap;
use formant_forms::{FormEvent, FormManager, Subscription};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Future returned by a save function.
pub type SaveFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Caller-supplied async function that persists a value snapshot.
pub type SaveFn = Arc<dyn Fn(ValueMap) -> SaveFuture + Send + Sync>;

/// Wraps an async closure into a [`SaveFn`].
pub fn save_fn<F, Fut>(f: F) -> SaveFn
where
	F: Fn(ValueMap) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
	let save: SaveFn = Arc::new(move |values| Box::pin(f(values)));
	save
}

/// Debounced auto-save attached to one form manager.
///
/// Dropping the handle detaches the listener and stops the worker.
///
/// # Examples
///
/// ```no_run
/// use formant_forms::{FieldSpec, FormManager, FormSchema, InputKind};
/// use formant_reactive::{Autosave, save_fn};
/// use std::time::Duration;
///
/// # async fn example() {
/// let schema = FormSchema::new()
/// 	.with_field(FieldSpec::new("notes", InputKind::TextArea));
/// let manager = FormManager::new(schema).await;
///
/// let autosave = Autosave::attach(
/// 	&manager,
/// 	Duration::from_millis(500),
/// 	save_fn(|values| async move {
/// 		// persist `values` somewhere
/// 		let _ = values;
/// 		Ok(())
/// 	}),
/// );
/// # drop(autosave);
/// # }
/// ```
pub struct Autosave {
	_subscription: Subscription,
	worker: JoinHandle<()>,
}

impl Autosave {
	/// Starts observing the manager. Must be called from within a tokio
	/// runtime, which hosts the debounce worker.
	pub fn attach(manager: &FormManager, debounce: Duration, save: SaveFn) -> Self {
		let (changes_tx, changes_rx) = mpsc::unbounded_channel::<()>();
		let subscription = manager.subscribe(move |event| {
			if matches!(
				event,
				FormEvent::FieldChanged { .. } | FormEvent::FieldsChanged { .. }
			) {
				let _ = changes_tx.send(());
			}
			Ok(())
		});

		let manager = manager.clone();
		let worker = tokio::spawn(run_worker(manager, debounce, save, changes_rx));

		Self {
			_subscription: subscription,
			worker,
		}
	}

	/// Detaches the listener and stops the worker. Equivalent to dropping.
	pub fn detach(self) {}
}

impl Drop for Autosave {
	fn drop(&mut self) {
		self.worker.abort();
	}
}

async fn run_worker(
	manager: FormManager,
	debounce: Duration,
	save: SaveFn,
	mut changes: mpsc::UnboundedReceiver<()>,
) {
	while changes.recv().await.is_some() {
		// Quiet-period wait: every further change restarts the timer.
		loop {
			tokio::select! {
				_ = tokio::time::sleep(debounce) => break,
				more = changes.recv() => {
					if more.is_none() {
						return;
					}
				}
			}
		}
		let values = manager.values();
		if let Err(error) = save(values).await {
			tracing::warn!(%error, "auto-save failed");
		}
	}
}
