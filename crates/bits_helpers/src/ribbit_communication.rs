use std::sync::{Arc, LazyLock};

use bevy::prelude::*;
use parking_lot::Mutex;
use ribbit_bits::{BitDuration, BitMessage, BitParameters, BitResult, RibbitMessage};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::MessageEvent;

/// Messages received from Ribbit, waiting for the next `PostUpdate`.
pub static RIBBIT_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<RibbitMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

/// Messages a native build would have posted to Ribbit.
#[cfg(not(target_arch = "wasm32"))]
pub static BIT_MESSAGE_QUEUE: LazyLock<Arc<Mutex<Vec<BitMessage>>>> =
    LazyLock::new(|| Arc::new(Mutex::new(Vec::new())));

#[cfg(target_arch = "wasm32")]
pub fn listen_ribbit_messages() {
    let Some(window) = web_sys::window() else {
        error!("No global `window`, Ribbit messages will not be received");
        return;
    };

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        let message: Result<RibbitMessage, serde_wasm_bindgen::Error> =
            serde_wasm_bindgen::from_value(event.data());

        let Ok(message) = message else {
            error!("Could not parse ribbit message {:?}", &event.data());
            return;
        };

        RIBBIT_MESSAGE_QUEUE.lock().push(message);
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Err(err) =
        window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
    {
        error!("Failed to add message event listener: {err:?}");
        return;
    }

    closure.forget(); // Leaks memory, but ensures the closure lives for the lifetime of the program
}

#[cfg(not(target_arch = "wasm32"))]
pub fn send_bit_message(message: BitMessage) {
    debug!("Queued {message:?}");
    BIT_MESSAGE_QUEUE.lock().push(message);
}

#[cfg(target_arch = "wasm32")]
pub fn send_bit_message(message: BitMessage) {
    let Some(window) = web_sys::window() else {
        error!("{message:?} not sent, no global `window`.");
        return;
    };
    let Ok(message_str) = serde_wasm_bindgen::to_value(&message) else {
        error!("Could not serialize {message:?}");
        return;
    };

    let Ok(Some(parent_window)) = window.parent() else {
        error!("{message:?} not sent, parent_window not found.");
        return;
    };

    if let Err(err) = parent_window.post_message(&message_str, "*") {
        error!("Could not post message {message_str:?}. {err:?}");
    }
}

/// Takes every message a native build queued for Ribbit.
#[cfg(not(target_arch = "wasm32"))]
pub fn drain_bit_messages() -> Vec<BitMessage> {
    BIT_MESSAGE_QUEUE.lock().drain(..).collect()
}

/// This trait implements the messages that can be called by Ribbit.
///
/// The functions needs to be implemented for the good functionning of the platform.
/// Those functions are not meant to be called directly from the bit itself.
pub trait RibbitMessageHandler: Send + Sync + Default + 'static {
    fn duration(world: &mut World) -> BitDuration;
    fn end(world: &mut World) -> BitResult;
    fn restart(world: &mut World);

    /// Ribbit finished showing its intro. Bits that wait for it start playing here.
    fn start(_world: &mut World) {}
}

/// Runs the handler for one Ribbit message and returns the reply owed to Ribbit, if any.
pub fn dispatch_ribbit_message<T: RibbitMessageHandler>(
    world: &mut World,
    message: RibbitMessage,
) -> Option<BitMessage> {
    match message {
        RibbitMessage::End => Some(BitMessage::End(T::end(world))),
        RibbitMessage::Parameters => {
            let duration = T::duration(world);
            Some(BitMessage::Parameters(BitParameters { duration }))
        }
        RibbitMessage::Restart => {
            T::restart(world);
            None
        }
        RibbitMessage::Start => {
            T::start(world);
            None
        }
    }
}

fn process_ribbit_messages<T: RibbitMessageHandler>(world: &mut World) {
    let messages = RIBBIT_MESSAGE_QUEUE.lock().drain(..).collect::<Vec<_>>();

    for message in messages {
        if let Some(reply) = dispatch_ribbit_message::<T>(world, message) {
            send_bit_message(reply);
        }
    }
}

fn ready() {
    send_bit_message(BitMessage::Ready);
}

/// Native builds have no Ribbit page to post to, so outgoing messages end up in the log.
#[cfg(not(target_arch = "wasm32"))]
fn log_bit_messages() {
    for message in drain_bit_messages() {
        match message {
            BitMessage::End(result) => info!("Bit ended with {result:?}"),
            BitMessage::Parameters(parameters) => {
                info!("Bit runs for {:?}", parameters.duration.get_duration());
            }
            BitMessage::Ready | BitMessage::Start => debug!("Bit sent {message:?}"),
        }
    }
}

#[derive(Default)]
pub struct RibbitCommunicationPlugin<T: RibbitMessageHandler>(core::marker::PhantomData<T>);

impl<T: RibbitMessageHandler> Plugin for RibbitCommunicationPlugin<T> {
    fn build(&self, app: &mut App) {
        app.add_systems(PostUpdate, process_ribbit_messages::<T>);
        #[cfg(target_arch = "wasm32")]
        {
            app.add_systems(Startup, listen_ribbit_messages);
        }
        app.add_systems(PostStartup, ready);
        #[cfg(not(target_arch = "wasm32"))]
        {
            app.add_systems(Last, log_bit_messages);
        }
    }
}
