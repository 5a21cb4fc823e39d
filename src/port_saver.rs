use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Orbit, Rocket};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Creates a liftoff fairing together with the handle that learns which port
/// the server ended up listening on. Needed when the configured port is 0.
pub fn create_pair() -> (PortSaver, Port) {
    let (sender, receiver) = oneshot::channel();
    let port_saver = PortSaver {
        sender: Mutex::new(Some(sender)),
    };
    let port = Port {
        port: None,
        receiver: Some(receiver),
    };
    (port_saver, port)
}

pub struct Port {
    port: Option<u16>,
    receiver: Option<oneshot::Receiver<u16>>,
}

impl Port {
    /// Waits for liftoff on first use. `None` if the server never lifted off.
    pub async fn get(&mut self) -> Option<u16> {
        if self.port.is_none() {
            if let Some(receiver) = self.receiver.take() {
                self.port = receiver.await.ok();
            }
        }
        self.port
    }
}

pub struct PortSaver {
    sender: Mutex<Option<oneshot::Sender<u16>>>,
}

#[rocket::async_trait]
impl Fairing for PortSaver {
    fn info(&self) -> Info {
        Info {
            name: "Port Saver",
            kind: Kind::Liftoff,
        }
    }

    async fn on_liftoff(&self, rocket: &Rocket<Orbit>) {
        let port = rocket.config().port;
        let sender = self.sender.lock().ok().and_then(|mut sender| sender.take());
        match sender {
            Some(sender) => {
                if sender.send(port).is_err() {
                    tracing::debug!(port, "Nobody is waiting for the bound port");
                }
            }
            None => tracing::warn!(port, "The bound port was already reported"),
        }
    }
}
