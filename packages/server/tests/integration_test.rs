//! Integration tests driving a real server over WebSocket and HTTP.

use std::{net::SocketAddr, time::Duration};

use futures_util::{SinkExt, StreamExt};
use pomoroom_server::{bootstrap::build_server, config::TimerConfig, domain::PhaseDurations};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::oneshot, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

type Client = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

const TICK: Duration = Duration::from_millis(50);
const RECV_TIMEOUT: Duration = Duration::from_secs(3);

/// Helper struct to manage server lifecycle
struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Start a test server on a free port with a fast tick
    async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("No local addr");
        let server = build_server(TimerConfig {
            defaults: PhaseDurations::default(),
            tick_interval: TICK,
        });

        let (shutdown, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let signal = async {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = server.serve(listener, signal).await {
                eprintln!("server error: {}", e);
            }
        });

        TestServer {
            addr,
            shutdown: Some(shutdown),
        }
    }

    fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    fn http_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn connect(&self) -> Client {
        let (client, _) = connect_async(self.ws_url())
            .await
            .expect("Failed to connect");
        client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn send(client: &mut Client, message: Value) {
    client
        .send(Message::Text(message.to_string().into()))
        .await
        .expect("Failed to send");
}

/// Next text frame as JSON
async fn recv(client: &mut Client) -> Value {
    loop {
        let frame = timeout(RECV_TIMEOUT, client.next())
            .await
            .expect("Timed out waiting for a message")
            .expect("Connection closed")
            .expect("WebSocket error");
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).expect("Invalid JSON");
        }
    }
}

/// Skip frames until one has the given `type`
async fn recv_type(client: &mut Client, r#type: &str) -> Value {
    loop {
        let message = recv(client).await;
        if message["type"] == r#type {
            return message;
        }
    }
}

async fn join(client: &mut Client, room_id: &str, settings: Value) -> Value {
    send(
        client,
        json!({"type": "room:join", "roomId": room_id, "settings": settings}),
    )
    .await;
    recv_type(client, "timer:stateChanged").await
}

#[tokio::test]
async fn test_join_receives_initial_state() {
    // テスト項目: join すると Room の初期状態が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;

    // when (操作):
    let state = join(&mut alice, "team", json!({"workMinutes": 10, "breakMinutes": 2})).await;

    // then (期待する結果):
    assert_eq!(
        state,
        json!({
            "type": "timer:stateChanged",
            "roomId": "team",
            "time": 600,
            "isActive": false,
            "phase": "work",
            "completedPomodoros": 0
        })
    );
}

#[tokio::test]
async fn test_late_joiner_keeps_first_settings() {
    // テスト項目: 後から join した設定は無視され、既存の状態が届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    join(&mut alice, "team", json!({"workMinutes": 10})).await;

    // when (操作):
    let state = join(&mut bob, "team", json!({"workMinutes": 50})).await;

    // then (期待する結果):
    assert_eq!(state["time"], 600);
}

#[tokio::test]
async fn test_start_is_broadcast_and_ticks_reach_everyone() {
    // テスト項目: start は全員に届き、その後の tick も全員に届く
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    join(&mut alice, "team", json!({"workMinutes": 1})).await;
    join(&mut bob, "team", json!(null)).await;

    // when (操作):
    send(&mut alice, json!({"type": "timer:start", "roomId": "team"})).await;

    // then (期待する結果):
    for client in [&mut alice, &mut bob] {
        let state = recv_type(client, "timer:stateChanged").await;
        assert_eq!(state["isActive"], true);
        assert_eq!(state["time"], 60);
        let tick = recv(client).await;
        assert_eq!(tick, json!({"type": "timer:tick", "roomId": "team", "time": 59}));
    }
}

#[tokio::test]
async fn test_pause_stops_ticks() {
    // テスト項目: pause した後は tick が届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    join(&mut alice, "team", json!({"workMinutes": 1})).await;
    send(&mut alice, json!({"type": "timer:start", "roomId": "team"})).await;
    recv_type(&mut alice, "timer:tick").await;

    // when (操作):
    send(&mut alice, json!({"type": "timer:pause", "roomId": "team"})).await;
    let paused = recv_type(&mut alice, "timer:stateChanged").await;

    // then (期待する結果):
    assert_eq!(paused["isActive"], false);
    let next = timeout(TICK * 6, alice.next()).await;
    assert!(next.is_err(), "unexpected frame after pause: {:?}", next);
}

#[tokio::test]
async fn test_rooms_are_isolated() {
    // テスト項目: 別の Room の操作は届かない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    join(&mut alice, "a", json!({})).await;
    join(&mut bob, "b", json!({})).await;

    // when (操作):
    send(&mut alice, json!({"type": "timer:reset", "roomId": "a"})).await;
    recv_type(&mut alice, "timer:stateChanged").await;

    // then (期待する結果):
    let next = timeout(TICK * 4, bob.next()).await;
    assert!(next.is_err(), "room b received: {:?}", next);
}

#[tokio::test]
async fn test_bad_frames_are_ignored() {
    // テスト項目: 壊れたフレームや存在しない Room への操作では接続は切れない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;

    // when (操作):
    alice
        .send(Message::Text("not json".into()))
        .await
        .unwrap();
    send(&mut alice, json!({"type": "timer:start", "roomId": "ghost"})).await;

    // then (期待する結果): 接続は生きていて join できる
    let state = join(&mut alice, "team", json!({"workTime": "5"})).await;
    assert_eq!(state["time"], 300);
}

#[tokio::test]
async fn test_fractional_minutes_and_array_settings() {
    // テスト項目: 0.5 分は 30 秒になり、配列の settings はデフォルトになる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;

    // when (操作):
    let half = join(&mut alice, "half", json!({"workMinutes": 0.5})).await;
    let array = join(&mut alice, "array", json!([1, 2])).await;

    // then (期待する結果):
    assert_eq!(half["time"], 30);
    assert_eq!(array["time"], 1500);
}

#[tokio::test]
async fn test_toggle_phase_while_paused() {
    // テスト項目: 停止中の togglePhase は BREAK に移り停止したまま
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    join(&mut alice, "team", json!({"breakMinutes": 3})).await;

    // when (操作):
    send(&mut alice, json!({"type": "timer:togglePhase", "roomId": "team"})).await;

    // then (期待する結果):
    let state = recv_type(&mut alice, "timer:stateChanged").await;
    assert_eq!(state["phase"], "break");
    assert_eq!(state["time"], 180);
    assert_eq!(state["isActive"], false);
    assert_eq!(state["completedPomodoros"], 0);
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: ヘルスチェック
    let server = TestServer::start().await;

    let body: Value = reqwest::get(server.http_url("/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_http_rooms() {
    // テスト項目: Room 一覧と詳細が HTTP で取得できる
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    join(&mut alice, "team", json!({"workMinutes": 50, "breakMinutes": 10})).await;

    // when (操作):
    let rooms: Value = reqwest::get(server.http_url("/api/rooms"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let detail: Value = reqwest::get(server.http_url("/api/rooms/team"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(rooms.as_array().unwrap().len(), 1);
    assert_eq!(rooms[0]["id"], "team");
    assert_eq!(rooms[0]["subscribers"], 1);
    assert_eq!(rooms[0]["phase"], "work");
    assert!(rooms[0]["createdAt"].as_str().unwrap().ends_with("+09:00"));
    assert_eq!(detail["workDuration"], 3000);
    assert_eq!(detail["breakDuration"], 600);
    assert_eq!(detail["time"], 3000);
    assert_eq!(detail["isActive"], false);
}

#[tokio::test]
async fn test_http_room_errors() {
    // テスト項目: 存在しない Room は 404、長すぎる ID は 400
    let server = TestServer::start().await;

    let missing = reqwest::get(server.http_url("/api/rooms/ghost"))
        .await
        .unwrap();
    let too_long = reqwest::get(server.http_url(&format!("/api/rooms/{}", "x".repeat(129))))
        .await
        .unwrap();

    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);
    assert_eq!(too_long.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disconnect_leaves_room_running() {
    // テスト項目: 切断すると購読者数が減り、Room は動き続ける
    // given (前提条件):
    let server = TestServer::start().await;
    let mut alice = server.connect().await;
    let mut bob = server.connect().await;
    join(&mut alice, "team", json!({"workMinutes": 1})).await;
    join(&mut bob, "team", json!({})).await;
    send(&mut alice, json!({"type": "timer:start", "roomId": "team"})).await;
    recv_type(&mut bob, "timer:tick").await;

    // when (操作):
    alice.close(None).await.unwrap();
    drop(alice);

    // then (期待する結果): bob には tick が届き続ける
    recv_type(&mut bob, "timer:tick").await;
    let mut subscribers = Value::Null;
    for _ in 0..40 {
        let detail: Value = reqwest::get(server.http_url("/api/rooms/team"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        subscribers = detail["subscribers"].clone();
        if subscribers == 1 {
            assert_eq!(detail["isActive"], true);
            break;
        }
        tokio::time::sleep(TICK).await;
    }
    assert_eq!(subscribers, 1);
}
