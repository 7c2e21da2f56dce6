//! Defines the Clutter runtime task runner.
use std::future::Future;

use parking_lot::Mutex;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::OnceCell;
use tokio::task;
use tokio::task::JoinHandle;

use crate::errors::{Error, RuntimeError, Unknown};

/// Represents the result of a task.
/// A task may return either () or Result<(), Error> for flexibility which
/// will be converted to TaskResult sent to the runtime.
pub enum TaskResult {
    Ok,
    Err(Error),
}

/// Represents a handler on a running task.
pub type TaskHandler = JoinHandle<Result<(), Error>>;

/// Globally accessible runtime transmitter(TX)/receiver(RX) (not initialised yet)
static RUNTIME_TX: OnceCell<Mutex<Option<UnboundedSender<UnboundedReceiver<TaskResult>>>>> =
    OnceCell::const_new();
static RUNTIME_RX: OnceCell<
    tokio::sync::Mutex<Option<UnboundedReceiver<UnboundedReceiver<TaskResult>>>>,
> = OnceCell::const_new();

impl From<Result<(), Error>> for TaskResult {
    fn from(result: Result<(), Error>) -> Self {
        match result {
            Ok(_) => TaskResult::Ok,
            Err(e) => TaskResult::Err(e),
        }
    }
}

impl From<()> for TaskResult {
    fn from(_: ()) -> Self {
        TaskResult::Ok
    }
}

/// Initializes the channel through which [`run`] reports tasks to the runtime.
/// Called by `#[clutter::runtime]`.
pub async fn init_task_channel() {
    RUNTIME_RX
        .get_or_init(|| async {
            let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<UnboundedReceiver<TaskResult>>();

            RUNTIME_TX
                .get_or_init(|| async { Mutex::new(Some(tx)) })
                .await;

            tokio::sync::Mutex::new(Some(rx))
        })
        .await;
}

/// Waits for every task reported through [`run`] to be done (including the tasks those tasks
/// spawned themselves). Called by `#[clutter::runtime]` before returning.
pub async fn wait_for_tasks() {
    let Some(cell) = RUNTIME_RX.get() else {
        return;
    };
    let mut lock = cell.lock().await;
    let Some(receiver) = lock.as_mut() else {
        return;
    };

    while let Ok(mut task_receiver) = receiver.try_recv() {
        if let Some(TaskResult::Err(err)) = task_receiver.recv().await {
            eprintln!("Task failed: {:?}", err.to_string());
        }
    }
}

/// Runs a given future as a Tokio task while ensuring the main function (marked by `#[clutter::runtime]`)
/// will not finish before all running tasks are done.
/// This is done by using a globally accessible channel to communicate the handlers to be waited by the
/// runtime.
///
/// # Errors
/// Returns [`Error::RuntimeError`] if the runtime channel is not initialized (not running
/// inside `#[clutter::runtime]`).
///
/// # Example
/// ```ignore
/// use clutter::utils::task;
///
/// #[clutter::runtime]
/// async fn main() {
///     task::run(async move {
///         // whatever
///     }).unwrap();
/// }
/// ```
pub fn run<F, T>(future: F) -> Result<TaskHandler, Error>
where
    F: Future<Output = T> + Send + 'static,
    T: Into<TaskResult> + Send + 'static,
{
    let cell = RUNTIME_TX.get().ok_or(RuntimeError)?;
    let mut lock = cell.lock();
    let runtime_tx = lock.as_mut().ok_or(RuntimeError)?;

    // Create a transmitter(tx)/receiver(rx) unique to this task.
    let (task_tx, task_rx) = tokio::sync::mpsc::unbounded_channel();

    // Send the receiver(rx) side of the task-channel to the runtime.
    runtime_tx.send(task_rx).map_err(|err| Unknown {
        info: err.to_string(),
    })?;

    let handler = task::spawn(async move {
        let result = future.await.into();
        task_tx.send(result).map_err(|err| Unknown {
            info: err.to_string(),
        })?;
        Ok(())
    });

    Ok(handler)
}

#[macro_export]
macro_rules! pause {
    ($ms:expr) => {
        tokio::time::sleep(tokio::time::Duration::from_millis($ms as u64)).await
    };
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU8, Ordering};
    use std::sync::Arc;
    use std::time::SystemTime;

    use serial_test::serial;

    use crate::errors::{Error, Unknown};
    use crate::utils::task;

    #[clutter_macros::runtime]
    async fn my_runtime() -> Result<(), Error> {
        task::run(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(300)).await;
            task::run(async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            })?;
            Ok::<(), Error>(())
        })?;

        task::run(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(300)).await;
        })?;

        Ok(())
    }

    #[test]
    #[serial]
    fn test_task_parallel_execution() {
        // Tasks run in parallel and the runtime waits for all of them (nested ones included).
        let start = SystemTime::now();
        my_runtime().unwrap();
        let duration = SystemTime::now()
            .duration_since(start)
            .unwrap()
            .as_millis();
        assert!(
            duration >= 400,
            "Duration should be at least 400ms (found: {})",
            duration,
        );
        assert!(
            duration < 1000,
            "Duration should be lower than 1000ms (found: {})",
            duration,
        );
    }

    #[clutter_macros::test]
    #[serial]
    async fn test_task_abort_execution() {
        let flag = Arc::new(AtomicU8::new(0));
        let flag_clone = flag.clone();

        let handler = task::run(async move {
            pause!(100);
            flag_clone.fetch_add(1, Ordering::SeqCst);
        })
        .expect("Should not panic");

        pause!(50);
        assert_eq!(flag.load(Ordering::SeqCst), 0);

        handler.abort();
        pause!(100);
        assert_eq!(
            flag.load(Ordering::SeqCst),
            0,
            "The aborted task never updated the flag",
        );
    }

    #[clutter_macros::test]
    #[serial]
    async fn test_task_with_result() {
        let task = task::run(async move { Ok::<(), Error>(()) });
        assert!(task.is_ok(), "An Ok(()) task do not panic the runtime");

        let task = task::run(async move {
            Err::<(), Error>(Unknown {
                info: "wow panic!".to_string(),
            })
        });
        assert!(task.is_ok(), "A failing task do not panic the runtime");
    }
}
