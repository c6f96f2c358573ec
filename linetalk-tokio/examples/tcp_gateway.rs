//! LineTalk over TCP
//!
//! Connects to a line-oriented endpoint, mirrors `led/-/state` messages and
//! reports button presses. Pair it with something as simple as:
//!
//! ```text
//! printf '["led/-/state", true]\n' | nc -l -p 7000
//! ```

use linetalk_tokio::task::{drive, send};
use linetalk_tokio::{publish, DefaultLineTalk, IntValue, LineTalk, TcpTransport, TransportError};

#[derive(Default)]
struct App {
    led_state: bool,
    event_count: i32,
}

fn on_led_state(app: &mut App, payload: &linetalk_tokio::Payload<'_>) {
    if let Some(state) = payload.get_bool() {
        app.led_state = state;
        println!("led state -> {}", state);
    }
}

fn on_event_count(app: &mut App, payload: &linetalk_tokio::Payload<'_>) {
    if let Some(IntValue::Value(count)) = payload.get_int() {
        app.event_count = count;
        println!("event count -> {}", count);
    }
}

#[tokio::main]
async fn main() -> Result<(), TransportError> {
    env_logger::init();

    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:7000".to_string());

    let mut engine: DefaultLineTalk<App> = LineTalk::new();
    engine.subscribe("led/-/state", on_led_state).unwrap();
    engine
        .subscribe("push-button/-/event-count", on_event_count)
        .unwrap();

    let mut transport = TcpTransport::connect(&address).await?;

    // Announce ourselves before settling into the polling loop.
    let mut tx_buffer = [0u8; 256];
    send(&mut transport, &mut tx_buffer, |buffer| {
        publish::encode_string("gateway/-/info", "linetalk", buffer)
    })
    .await?;

    let mut app = App::default();
    drive(&mut transport, &mut engine, &mut app).await
}
