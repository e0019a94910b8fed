//! End-to-end tests of the stdio protocol over an in-memory pipe
use std::time::Duration;

use arglist_status::server::run;
use arglist_status::Config;
use serde_json::{json, Value};
use tokio::io::{duplex, split, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::timeout;

const SERVER_TIMEOUT: Duration = Duration::from_secs(5);

/// Feed `script` to the server line by line, then collect everything it wrote until EOF.
async fn exchange(script: &[Value], config: Config) -> Vec<Value> {
    let (client, server) = duplex(64 * 1024);
    let (server_read, server_write) = split(server);
    let (client_read, mut client_write) = split(client);

    let server = run(server_read, server_write, config, None);

    let client = async move {
        for message in script {
            let line = format!("{}\n", message);
            client_write
                .write_all(line.as_bytes())
                .await
                .expect("write to server");
        }

        let mut responses = Vec::new();
        let mut lines = BufReader::new(client_read).lines();
        while let Some(line) = lines.next_line().await.expect("read from server") {
            responses.push(serde_json::from_str(&line).expect("valid json"));
        }
        responses
    };

    let (result, responses) = timeout(SERVER_TIMEOUT, async { tokio::join!(server, client) })
        .await
        .expect("server finished in time");
    result.expect("server ran cleanly");
    responses
}

fn methods(responses: &[Value]) -> Vec<&str> {
    responses
        .iter()
        .map(|r| r["method"].as_str().expect("method"))
        .collect()
}

#[tokio::test]
async fn test_initialize_registers_keymaps() {
    let responses = exchange(
        &[
            json!({"method": "initialize", "params": {"columns": 100}}),
            json!({"method": "shutdown"}),
        ],
        Config::default(),
    )
    .await;

    assert_eq!(methods(&responses), vec!["register_keymaps"]);
    let bindings = responses[0]["params"]["bindings"]
        .as_array()
        .expect("bindings");
    assert_eq!(bindings.len(), 8);
    assert!(bindings.contains(&json!({"keys": "]a", "action": "next"})));
}

#[tokio::test]
async fn test_navigation_and_selection_session() {
    let responses = exchange(
        &[
            json!({"method": "initialize", "params": {"columns": 100}}),
            json!({"method": "state", "params": {
                "paths": ["a.txt", "b.txt", "c.txt"],
                "current": 0,
                "current_file": "a.txt"
            }}),
            json!({"method": "action", "params": {"name": "next"}}),
            json!({"method": "selection", "params": {"paths": ["x.rs", "y.rs"]}}),
            json!({"method": "shutdown"}),
        ],
        Config::default(),
    )
    .await;

    assert_eq!(
        methods(&responses),
        vec![
            "register_keymaps",
            "execute",
            "open_overlay",
            "execute",
            "execute",
            "execute",
            "close_overlay",
            "open_overlay",
            "close_overlay",
        ]
    );

    assert_eq!(
        responses[1]["params"],
        json!({"command": {"kind": "goto", "index": 1}})
    );
    assert_eq!(responses[2]["params"]["id"], json!(1));
    assert_eq!(responses[2]["params"]["text"], json!("a.txt [b.txt] c.txt"));
    assert_eq!(responses[2]["params"]["placement"], json!("top_right"));
    assert_eq!(
        responses[2]["params"]["highlights"][1],
        json!({"start": 6, "len": 7, "group": "ArglistCurrent"})
    );

    assert_eq!(responses[3]["params"]["command"], json!({"kind": "clear"}));
    assert_eq!(
        responses[4]["params"]["command"],
        json!({"kind": "append", "path": "x.rs"})
    );
    assert_eq!(
        responses[5]["params"]["command"],
        json!({"kind": "append", "path": "y.rs"})
    );
    assert_eq!(responses[6]["params"], json!({"id": 1}));
    assert_eq!(responses[7]["params"]["text"], json!("[x.rs] y.rs"));
    assert_eq!(responses[8]["params"], json!({"id": 2}));
}

#[tokio::test]
async fn test_boundary_notice_and_bad_input() {
    let responses = exchange(
        &[
            json!("not a message"),
            json!({"method": "state", "params": {"paths": ["a.txt"], "current": 0}}),
            json!({"method": "explode", "params": {}}),
            json!({"method": "key", "params": {"keys": "]a"}}),
            json!({"method": "shutdown"}),
        ],
        Config::default(),
    )
    .await;

    assert_eq!(
        responses,
        vec![json!({
            "method": "notify",
            "params": {"level": "warn", "message": "Already at the last entry"}
        })]
    );
}

#[tokio::test]
async fn test_closing_input_ends_session() {
    let (mut client, server) = duplex(1024);
    let (server_read, server_write) = split(server);
    client.shutdown().await.expect("close client side");

    let server = run(server_read, server_write, Config::default(), None);
    let result = timeout(SERVER_TIMEOUT, server)
        .await
        .expect("server finished in time");
    result.expect("server ran cleanly");

    let mut lines = BufReader::new(client).lines();
    assert!(lines.next_line().await.expect("read").is_none());
}

#[tokio::test]
async fn test_reloaded_config_is_applied() {
    let (client, server) = duplex(64 * 1024);
    let (server_read, server_write) = split(server);
    let (client_read, mut client_write) = split(client);
    let (reload_tx, reload_rx) = tokio::sync::mpsc::unbounded_channel();

    let server = run(server_read, server_write, Config::default(), Some(reload_rx));

    let client = async move {
        let mut lines = BufReader::new(client_read).lines();

        let mut config = Config::default();
        config.keymaps.next = "<C-n>".to_string();
        reload_tx.send(config).expect("send reload");

        let line = lines.next_line().await.expect("read").expect("line");
        let message: Value = serde_json::from_str(&line).expect("valid json");

        client_write
            .write_all(b"{\"method\":\"shutdown\"}\n")
            .await
            .expect("write");
        while lines.next_line().await.expect("read").is_some() {}
        message
    };

    let (result, message) = timeout(SERVER_TIMEOUT, async { tokio::join!(server, client) })
        .await
        .expect("server finished in time");
    result.expect("server ran cleanly");

    assert_eq!(message["method"], json!("register_keymaps"));
    assert!(message["params"]["bindings"]
        .as_array()
        .expect("bindings")
        .contains(&json!({"keys": "<C-n>", "action": "next"})));
}
