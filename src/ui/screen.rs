use std::sync::Arc;

use iced::Task;
use tokio::sync::mpsc;

use marquee::screens::{channel_stream, ViewModel};

use super::app::Message;

#[derive(Debug)]
pub struct ScreenHandle<I> {
    inputs: mpsc::UnboundedSender<I>,
}

impl<I> ScreenHandle<I> {
    pub fn send(&self, input: I) {
        if self.inputs.send(input).is_err() {
            tracing::debug!("screen input dropped, view-model has stopped");
        }
    }
}

/// Wires a view-model into the iced runtime.
///
/// Outputs and routes come back as messages built by `on_output` and
/// `on_route`; dropping the returned handle ends the output stream.
pub fn start<VM, R>(
    view_model: VM,
    routes: mpsc::UnboundedReceiver<R>,
    on_output: impl Fn(VM::Output) -> Message + Send + 'static,
    on_route: impl Fn(R) -> Message + Send + 'static,
) -> (ScreenHandle<VM::Input>, Task<Message>)
where
    VM: ViewModel,
    R: Send + 'static,
{
    let (inputs, receiver) = mpsc::unbounded_channel();
    let outputs = Arc::new(view_model).transform(channel_stream(receiver));

    let task = Task::batch([
        Task::run(outputs, on_output),
        Task::run(channel_stream(routes), on_route),
    ]);
    (ScreenHandle { inputs }, task)
}
