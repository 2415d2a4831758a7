/// Observable events of the core, for a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LauncherEvent {
    Log(String),
    Progress { done: u32, total: u32 },
    FileStarted(String),
}

/// Callback hooks. Every hook is optional and may be invoked from any thread.
pub trait LauncherEvents: Send + Sync {
    fn on_log(&self, _message: &str) {}

    fn on_progress(&self, _done: u32, _total: u32) {}

    fn on_file_start(&self, _file_name: &str) {}
}

/// `LauncherEvents` that does nothing with provided events.
pub struct IgnoreEvents;

impl LauncherEvents for IgnoreEvents {}

/// `LauncherEvents` that prints events into stdout.
pub struct PrintEvents;

impl LauncherEvents for PrintEvents {
    fn on_log(&self, message: &str) {
        println!("{message}");
    }

    fn on_progress(&self, done: u32, total: u32) {
        println!("[{done}/{total}]");
    }

    fn on_file_start(&self, file_name: &str) {
        println!("Downloading: {file_name}");
    }
}

/// Forwards events to whichever thread owns the receiver.
impl LauncherEvents for tokio::sync::mpsc::UnboundedSender<LauncherEvent> {
    fn on_log(&self, message: &str) {
        let _ = self.send(LauncherEvent::Log(message.to_owned()));
    }

    fn on_progress(&self, done: u32, total: u32) {
        let _ = self.send(LauncherEvent::Progress { done, total });
    }

    fn on_file_start(&self, file_name: &str) {
        let _ = self.send(LauncherEvent::FileStarted(file_name.to_owned()));
    }
}

impl LauncherEvents for std::sync::mpsc::Sender<LauncherEvent> {
    fn on_log(&self, message: &str) {
        let _ = self.send(LauncherEvent::Log(message.to_owned()));
    }

    fn on_progress(&self, done: u32, total: u32) {
        let _ = self.send(LauncherEvent::Progress { done, total });
    }

    fn on_file_start(&self, file_name: &str) {
        let _ = self.send(LauncherEvent::FileStarted(file_name.to_owned()));
    }
}

type TextHook = Box<dyn Fn(&str) + Send + Sync>;
type ProgressHook = Box<dyn Fn(u32, u32) + Send + Sync>;

/// Closure based [`LauncherEvents`].
///
/// ```
/// # use launcher_core::downloads::Callbacks;
/// let callbacks = Callbacks::new()
///     .on_log(|message| println!("{message}"))
///     .on_progress(|done, total| println!("{done}/{total}"));
/// ```
#[derive(Default)]
pub struct Callbacks {
    log: Option<TextHook>,
    progress: Option<ProgressHook>,
    file_start: Option<TextHook>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_log(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.log = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_progress(mut self, hook: impl Fn(u32, u32) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn on_file_start(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.file_start = Some(Box::new(hook));
        self
    }
}

impl LauncherEvents for Callbacks {
    fn on_log(&self, message: &str) {
        if let Some(hook) = &self.log {
            hook(message);
        }
    }

    fn on_progress(&self, done: u32, total: u32) {
        if let Some(hook) = &self.progress {
            hook(done, total);
        }
    }

    fn on_file_start(&self, file_name: &str) {
        if let Some(hook) = &self.file_start {
            hook(file_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn callbacks_forward_only_registered_hooks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let callbacks = Callbacks::new()
            .on_progress(move |done, total| sink.lock().unwrap().push((done, total)));

        LauncherEvents::on_log(&callbacks, "ignored");
        LauncherEvents::on_file_start(&callbacks, "ignored.jar");
        LauncherEvents::on_progress(&callbacks, 1, 2);

        assert_eq!(*seen.lock().unwrap(), [(1, 2)]);
    }

    #[test]
    fn channel_sender_forwards_events() {
        let (tx, rx) = std::sync::mpsc::channel();

        tx.on_file_start("a.jar");
        tx.on_progress(1, 1);

        assert_eq!(rx.try_recv().unwrap(), LauncherEvent::FileStarted("a.jar".into()));
        assert_eq!(rx.try_recv().unwrap(), LauncherEvent::Progress { done: 1, total: 1 });
    }
}
