//! End-to-end scenarios (§8 S1-S6), driving a real `irc_server::net::run`
//! instance over a loopback TCP socket.

use irc_server::config::Config;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedReadHalf;

async fn start_server(password: &str) -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let password = password.to_string();
    tokio::spawn(async move {
        let _ = irc_server::net::run(port, password, "srv".to_string(), Config::default()).await;
    });
    // Give the listener a moment to bind before the first connect attempt.
    tokio::time::sleep(Duration::from_millis(50)).await;
    port
}

struct TestClient {
    write: tokio::net::tcp::OwnedWriteHalf,
    read: tokio::io::Lines<BufReader<OwnedReadHalf>>,
}

impl TestClient {
    async fn connect(port: u16) -> Self {
        let stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        let (read, write) = stream.into_split();
        TestClient { write, read: BufReader::new(read).lines() }
    }

    async fn send(&mut self, line: &str) {
        self.write.write_all(line.as_bytes()).await.unwrap();
        self.write.write_all(b"\r\n").await.unwrap();
        self.write.flush().await.unwrap();
    }

    async fn recv(&mut self) -> String {
        tokio::time::timeout(Duration::from_secs(2), self.read.next_line())
            .await
            .expect("timed out waiting for a reply")
            .unwrap()
            .expect("connection closed unexpectedly")
    }

    async fn recv_until(&mut self, needle: &str) -> Vec<String> {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await;
            let contains = line.contains(needle);
            lines.push(line);
            if contains {
                return lines;
            }
        }
    }

    async fn register(&mut self, password: &str, nick: &str) {
        self.send(&format!("PASS {password}")).await;
        self.send(&format!("NICK {nick}")).await;
        self.send(&format!("USER {nick} 0 * :{nick}")).await;
        self.recv_until("376").await;
    }
}

#[tokio::test]
async fn s1_registration_burst() {
    let port = start_server("s3cret").await;
    let mut alice = TestClient::connect(port).await;
    alice.send("PASS s3cret").await;
    alice.send("NICK alice").await;
    alice.send("USER alice 0 * :Alice").await;

    let burst = alice.recv_until("376").await;
    assert!(burst[0].contains(" 001 alice :Welcome"));
    assert!(burst.iter().any(|l| l.contains(" 002 ")));
    assert!(burst.iter().any(|l| l.contains(" 003 ")));
    assert!(burst.iter().any(|l| l.contains(" 004 ")));
    assert!(burst.iter().any(|l| l.contains("CASEMAPPING=ascii")));
    assert!(burst.iter().any(|l| l.contains(" 251 ")));
    assert!(burst.last().unwrap().contains("376"));
}

#[tokio::test]
async fn s2_channel_create_and_topic() {
    let port = start_server("s3cret").await;
    let mut alice = TestClient::connect(port).await;
    alice.register("s3cret", "alice").await;

    alice.send("JOIN #chat").await;
    let join = alice.recv().await;
    assert!(join.contains("alice!alice@") && join.contains("JOIN #chat"));
    let burst = alice.recv_until("366").await;
    assert!(burst.iter().any(|l| l.contains("331"))); // no topic set yet
    assert!(burst.iter().any(|l| l.contains("353") && l.contains("@alice")));
    assert!(burst.last().unwrap().contains("366"));

    alice.send("TOPIC #chat :hello").await;
    let topic = alice.recv().await;
    assert!(topic.contains("alice!alice@") && topic.contains("TOPIC #chat :hello"));
}

#[tokio::test]
async fn s3_key_enforcement() {
    let port = start_server("s3cret").await;
    let mut alice = TestClient::connect(port).await;
    alice.register("s3cret", "alice").await;
    alice.send("JOIN #k").await;
    alice.recv_until("366").await;
    alice.send("MODE #k +k sesame").await;
    alice.recv().await; // mode change echo

    let mut bob = TestClient::connect(port).await;
    bob.register("s3cret", "bob").await;
    bob.send("JOIN #k wrong").await;
    let denied = bob.recv().await;
    assert!(denied.contains("475") && denied.contains("bob") && denied.contains("#k"));

    bob.send("JOIN #k sesame").await;
    let joined = bob.recv().await;
    assert!(joined.contains("bob!bob@") && joined.contains("JOIN #k"));
}

#[tokio::test]
async fn s4_invite_only_and_operator_grant() {
    let port = start_server("s3cret").await;
    let mut alice = TestClient::connect(port).await;
    alice.register("s3cret", "alice").await;
    alice.send("JOIN #i").await;
    alice.recv_until("366").await;
    alice.send("MODE #i +i").await;
    alice.recv().await;

    let mut bob = TestClient::connect(port).await;
    bob.register("s3cret", "bob").await;
    bob.send("JOIN #i").await;
    let denied = bob.recv().await;
    assert!(denied.contains("473"));

    alice.send("INVITE bob #i").await;
    let inviting = alice.recv().await;
    assert!(inviting.contains("341") && inviting.contains("#i") && inviting.contains("bob"));
    let invited = bob.recv().await;
    assert!(invited.contains("alice!alice@") && invited.contains("INVITE bob #i"));

    bob.send("JOIN #i").await;
    let joined = bob.recv().await;
    assert!(joined.contains("bob!bob@") && joined.contains("JOIN #i"));
    bob.recv_until("366").await;
    alice.recv().await; // alice sees bob's JOIN broadcast

    alice.send("MODE #i +o bob").await;
    let mode_line = alice.recv().await;
    assert!(mode_line.contains("alice!alice@") && mode_line.contains("MODE #i +o bob"));
}

#[tokio::test]
async fn invite_requires_operator_even_outside_invite_only_channel() {
    let port = start_server("s3cret").await;
    let mut alice = TestClient::connect(port).await;
    alice.register("s3cret", "alice").await;
    alice.send("JOIN #open").await;
    alice.recv_until("366").await;

    let mut bob = TestClient::connect(port).await;
    bob.register("s3cret", "bob").await;
    bob.send("JOIN #open").await;
    bob.recv_until("366").await;
    alice.recv().await; // alice sees bob's JOIN broadcast

    let mut carol = TestClient::connect(port).await;
    carol.register("s3cret", "carol").await;

    // bob is a plain member (not the channel's operator, which alice is as
    // the first joiner) and #open is not invite-only, but INVITE still
    // requires operator status.
    bob.send("INVITE carol #open").await;
    let denied = bob.recv().await;
    assert!(denied.contains("482") && denied.contains("#open"));
}

#[tokio::test]
async fn s5_kick_removes_membership() {
    let port = start_server("s3cret").await;
    let mut alice = TestClient::connect(port).await;
    alice.register("s3cret", "alice").await;
    alice.send("JOIN #c").await;
    alice.recv_until("366").await;

    let mut bob = TestClient::connect(port).await;
    bob.register("s3cret", "bob").await;
    bob.send("JOIN #c").await;
    bob.recv_until("366").await;
    alice.recv().await; // alice sees bob's JOIN broadcast

    alice.send("KICK #c bob :bye").await;
    let alice_kick = alice.recv().await;
    assert!(alice_kick.contains("alice!alice@") && alice_kick.contains("KICK #c bob :bye"));
    let bob_kick = bob.recv().await;
    assert!(bob_kick.contains("KICK #c bob :bye"));

    alice.send("PRIVMSG #c :hi").await;
    // bob must not receive it; confirm by racing a fresh message to alice
    // herself resolving first would be flaky, so instead assert no line
    // arrives for bob within a short window.
    let result = tokio::time::timeout(Duration::from_millis(200), bob.read.next_line()).await;
    assert!(result.is_err(), "kicked member should not receive further channel traffic");
}

#[tokio::test]
async fn s6_nick_collision() {
    let port = start_server("s3cret").await;
    let mut alice = TestClient::connect(port).await;
    alice.register("s3cret", "alice").await;

    let mut carol = TestClient::connect(port).await;
    carol.send("PASS s3cret").await;
    carol.send("NICK alice").await;
    let collision = carol.recv().await;
    assert!(collision.contains("433") && collision.contains("alice"));
}

#[tokio::test]
async fn server_initiated_disconnect_actually_closes_the_socket() {
    let port = start_server("s3cret").await;
    let mut mallory = TestClient::connect(port).await;
    mallory.send("PASS wrong").await;

    let mismatch = mallory.recv().await;
    assert!(mismatch.contains("464"));
    let error_line = mallory.recv().await;
    assert!(error_line.starts_with("ERROR"));

    // The reader task must tear the socket down on its own rather than
    // waiting for the peer to react to a half-close: the next read should
    // observe EOF (`Ok(None)`) well within a bounded window, not hang.
    let eof = tokio::time::timeout(Duration::from_secs(1), mallory.read.next_line())
        .await
        .expect("server did not close the socket after a server-initiated disconnect");
    assert!(eof.unwrap().is_none(), "expected EOF after PASS mismatch disconnect");
}
