//! End-to-end server tests: real relay transports feeding real listeners
//! over loopback sockets, through to the cursor backend.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::mpsc;
use tokio::time::timeout;

use gyro_core::{ConnectionTarget, MotionSample, PointerEvent};
use gyro_relay::infrastructure::transport::{EventTransport, UdpTransport, WebSocketTransport};
use gyro_server::application::apply_input::{ApplyInputUseCase, ClickButton, CursorBackend};
use gyro_server::infrastructure::cursor::MockCursorBackend;
use gyro_server::infrastructure::listener::{run_udp_listener, run_ws_listener};

async fn recv_event(rx: &mut mpsc::Receiver<PointerEvent>) -> PointerEvent {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("event must arrive")
        .expect("channel must stay open")
}

#[tokio::test]
async fn test_udp_listener_decodes_relay_traffic() {
    // Arrange: a UDP listener on an ephemeral port
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    let running = Arc::new(AtomicBool::new(true));
    let (tx, mut rx) = mpsc::channel(16);
    let listener = tokio::spawn(run_udp_listener(socket, tx, Arc::clone(&running)));

    // Act: drive it with the real relay transport
    let target = ConnectionTarget::parse(&addr.to_string()).unwrap();
    let transport = UdpTransport::connect(&target).await.unwrap();
    transport
        .send(&PointerEvent::GyroData(MotionSample::new(0.5, 0.0, -0.5)))
        .await
        .unwrap();
    transport.send(&PointerEvent::LeftClick).await.unwrap();

    // Assert
    assert_eq!(
        recv_event(&mut rx).await,
        PointerEvent::GyroData(MotionSample::new(0.5, 0.0, -0.5))
    );
    assert_eq!(recv_event(&mut rx).await, PointerEvent::LeftClick);

    // Cleanup: the flag stops the loop
    running.store(false, Ordering::Relaxed);
    timeout(Duration::from_secs(2), listener)
        .await
        .expect("listener must honour the shutdown flag")
        .unwrap();
}

#[tokio::test]
async fn test_udp_listener_skips_malformed_datagrams() {
    // Arrange
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    let running = Arc::new(AtomicBool::new(true));
    let (tx, mut rx) = mpsc::channel(16);
    let _listener = tokio::spawn(run_udp_listener(socket, tx, Arc::clone(&running)));

    // Act: garbage first, then a valid event
    let sender = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    sender.send_to(b"\xff\xfe not json", addr).await.unwrap();
    sender
        .send_to(br#"{"event":"unknownThing"}"#, addr)
        .await
        .unwrap();
    sender
        .send_to(br#"{"event":"rightClick"}"#, addr)
        .await
        .unwrap();

    // Assert: only the valid event comes through
    assert_eq!(recv_event(&mut rx).await, PointerEvent::RightClick);
    running.store(false, Ordering::Relaxed);
}

#[tokio::test]
async fn test_ws_listener_decodes_relay_traffic_and_survives_disconnect() {
    // Arrange: a WebSocket listener on an ephemeral port
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let running = Arc::new(AtomicBool::new(true));
    let (tx, mut rx) = mpsc::channel(16);
    let task = tokio::spawn(run_ws_listener(listener, tx, Arc::clone(&running)));

    // Act: first relay connects, streams, and hangs up
    let target = ConnectionTarget::parse(&addr.to_string()).unwrap();
    let transport = WebSocketTransport::connect(&target).await.unwrap();
    transport
        .send(&PointerEvent::GyroData(MotionSample::new(0.1, 0.2, 0.3)))
        .await
        .unwrap();
    transport.close().await.unwrap();

    assert_eq!(
        recv_event(&mut rx).await,
        PointerEvent::GyroData(MotionSample::new(0.1, 0.2, 0.3))
    );

    // A second relay must still be able to connect afterwards.
    let transport = WebSocketTransport::connect(&target).await.unwrap();
    transport.send(&PointerEvent::LeftClick).await.unwrap();
    assert_eq!(recv_event(&mut rx).await, PointerEvent::LeftClick);
    transport.close().await.unwrap();

    // Cleanup
    running.store(false, Ordering::Relaxed);
    timeout(Duration::from_secs(2), task)
        .await
        .expect("listener must honour the shutdown flag")
        .unwrap();
}

#[tokio::test]
async fn test_full_pipeline_moves_the_cursor() {
    // Arrange: listener → dispatch loop → mock cursor, like main() wires it
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();
    let running = Arc::new(AtomicBool::new(true));
    let (tx, mut rx) = mpsc::channel(16);
    let _listener = tokio::spawn(run_udp_listener(socket, tx, Arc::clone(&running)));

    let backend = Arc::new(MockCursorBackend::at(500.0, 500.0));
    let use_case = ApplyInputUseCase::new(
        Arc::clone(&backend) as Arc<dyn CursorBackend>,
        20.0,
        0.7,
    );

    // Act: a motion sample and a click from the real relay transport
    let target = ConnectionTarget::parse(&addr.to_string()).unwrap();
    let transport = UdpTransport::connect(&target).await.unwrap();
    transport
        .send(&PointerEvent::GyroData(MotionSample::new(1.0, 0.0, 0.5)))
        .await
        .unwrap();
    transport.send(&PointerEvent::RightClick).await.unwrap();

    for _ in 0..2 {
        let event = recv_event(&mut rx).await;
        use_case.handle_event(&event);
    }

    // Assert: new_x = 500 - 0.5*20 = 490, new_y = 500 - 1.0*20 = 480
    assert_eq!(backend.moves.lock().unwrap().as_slice(), &[(490.0, 480.0)]);
    assert_eq!(
        backend.clicks.lock().unwrap().as_slice(),
        &[ClickButton::Right]
    );
    running.store(false, Ordering::Relaxed);
}
