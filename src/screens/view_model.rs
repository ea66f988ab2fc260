use std::future::Future;
use std::sync::Arc;

use futures_util::future;
use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use tokio::sync::mpsc;

/// Turns a stream of screen inputs into a stream of display outputs.
///
/// Inputs are handled one at a time, in arrival order: the output stream of
/// one input is drained before the next input is looked at.
pub trait ViewModel: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    fn handle(&self, input: Self::Input) -> BoxStream<'static, Self::Output>;

    fn transform<S>(self: Arc<Self>, inputs: S) -> BoxStream<'static, Self::Output>
    where
        Self: Sized,
        S: Stream<Item = Self::Input> + Send + 'static,
    {
        inputs.flat_map(move |input| self.handle(input)).boxed()
    }
}

pub trait Router<R>: Send + Sync {
    fn navigate(&self, route: R);
}

#[derive(Debug)]
pub struct ChannelRouter<R> {
    sender: mpsc::UnboundedSender<R>,
}

impl<R> Clone for ChannelRouter<R> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<R> ChannelRouter<R> {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<R>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl<R: Send> Router<R> for ChannelRouter<R> {
    fn navigate(&self, route: R) {
        if self.sender.send(route).is_err() {
            tracing::debug!("route dropped, nobody is listening");
        }
    }
}

pub fn deferred<O, F>(work: F) -> BoxStream<'static, O>
where
    O: Send + 'static,
    F: Future<Output = Vec<O>> + Send + 'static,
{
    stream::once(work).flat_map(stream::iter).boxed()
}

pub fn effect<O, F>(work: F) -> BoxStream<'static, O>
where
    O: Send + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    stream::once(work)
        .filter_map(|()| future::ready(None))
        .boxed()
}

pub fn channel_stream<T: Send + 'static>(
    receiver: mpsc::UnboundedReceiver<T>,
) -> BoxStream<'static, T> {
    stream::unfold(receiver, |mut receiver| async move {
        receiver.recv().await.map(|item| (item, receiver))
    })
    .boxed()
}
