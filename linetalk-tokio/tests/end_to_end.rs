//! End-to-end: engine driven over a real TCP loopback.

use linetalk_tokio::task::drive;
use linetalk_tokio::{DefaultLineTalk, IntValue, LineTalk, TcpTransport};
use tokio::io::AsyncWriteExt;

#[derive(Default)]
struct Captured {
    values: Vec<i32>,
}

#[tokio::test]
async fn test_tcp_round_trip() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        // Two valid frames with transport noise in between; closing the
        // stream ends the drive loop.
        stream
            .write_all(b"[\"sensor/temp\", 21]\nnoise\n[\"sensor/temp\", 22]\n")
            .await
            .unwrap();
    });

    let mut engine: DefaultLineTalk<Captured> = LineTalk::new();
    engine
        .subscribe("sensor/temp", |captured, payload| {
            if let Some(IntValue::Value(value)) = payload.get_int() {
                captured.values.push(value);
            }
        })
        .unwrap();

    let mut transport = TcpTransport::connect(&address.to_string()).await.unwrap();
    let mut captured = Captured::default();
    drive(&mut transport, &mut engine, &mut captured)
        .await
        .unwrap();

    server.await.unwrap();
    assert_eq!(captured.values, vec![21, 22]);
}
