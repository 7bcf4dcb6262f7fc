use std::collections::VecDeque;
use std::sync::Arc;

use bytes::Bytes;
use reacji::common::error::{MalformedResponse, TransportError};
use reacji::common::{ClientError, ClientResult, Params, RequestExecutor};
use reacji::{
    AddReactionParams, GetReactionParams, ItemKind, ItemRef, ListReactionParams, PagingInfo,
    Reaction, ReactionRequest, ReactionService, RemoveReactionParams, SmolStr,
};
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct MockExecutor {
    // Bodies (or failures) to hand back, one per call
    queue: Arc<Mutex<VecDeque<ClientResult<Bytes>>>>,
    // Endpoint and parameters of every call
    log: Arc<Mutex<Vec<(String, Params)>>>,
}

impl MockExecutor {
    async fn push(&self, json: &str) {
        self.queue
            .lock()
            .await
            .push_back(Ok(Bytes::copy_from_slice(json.as_bytes())));
    }

    async fn push_err(&self, err: ClientError) {
        self.queue.lock().await.push_back(Err(err));
    }

    async fn take_log(&self) -> Vec<(String, Params)> {
        std::mem::take(&mut *self.log.lock().await)
    }
}

impl RequestExecutor for MockExecutor {
    async fn execute(&self, endpoint: &str, params: &Params) -> ClientResult<Bytes> {
        self.log
            .lock()
            .await
            .push((endpoint.to_owned(), params.clone()));
        self.queue
            .lock()
            .await
            .pop_front()
            .expect("no queued response")
    }
}

/// Answers every call with its own parameters under `"echo"`.
#[derive(Clone, Default)]
struct EchoExecutor;

impl RequestExecutor for EchoExecutor {
    async fn execute(&self, _endpoint: &str, params: &Params) -> ClientResult<Bytes> {
        let body = serde_json::json!({ "ok": true, "echo": params });
        Ok(Bytes::from(serde_json::to_vec(&body)?))
    }
}

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| (SmolStr::new(k), SmolStr::new(v)))
        .collect()
}

fn refs() -> [(ItemRef, Params); 3] {
    [
        (
            ItemRef::message("ChannelID", "123").unwrap(),
            params(&[("channel", "ChannelID"), ("timestamp", "123")]),
        ),
        (
            ItemRef::file("FileID").unwrap(),
            params(&[("file", "FileID")]),
        ),
        (
            ItemRef::file_comment("FileCommentID").unwrap(),
            params(&[("file_comment", "FileCommentID")]),
        ),
    ]
}

fn expected_reactions() -> Vec<Reaction> {
    vec![
        Reaction {
            name: "astonished".into(),
            count: 3,
            users: vec!["U1".into(), "U2".into(), "U3".into()],
        },
        Reaction {
            name: "clock1".into(),
            count: 3,
            users: vec!["U1".into(), "U2".into()],
        },
    ]
}

#[tokio::test]
async fn add_reaction_sends_name_and_reference() {
    let exec = MockExecutor::default();
    let service = ReactionService::new(exec.clone());

    for (item, mut want) in refs() {
        exec.push(r#"{ "ok": true }"#).await;
        service
            .add_reaction(&AddReactionParams::new("thumbsup", item))
            .await
            .unwrap();

        want.insert("name".into(), "thumbsup".into());
        let log = exec.take_log().await;
        assert_eq!(log, vec![("reactions.add".to_owned(), want)]);
    }
}

#[tokio::test]
async fn remove_reaction_sends_name_and_reference() {
    let exec = MockExecutor::default();
    let service = ReactionService::new(exec.clone());

    for (item, mut want) in refs() {
        exec.push(r#"{ "ok": true }"#).await;
        service
            .remove_reaction(&RemoveReactionParams::new("thumbsup", item))
            .await
            .unwrap();

        want.insert("name".into(), "thumbsup".into());
        let log = exec.take_log().await;
        assert_eq!(log, vec![("reactions.remove".to_owned(), want)]);
    }
}

#[tokio::test]
async fn get_reactions_decodes_each_shape() {
    let bodies = [
        r#"{"ok": true,
            "message": {
                "type": "message",
                "message": {
                    "reactions": [
                        { "name": "astonished", "count": 3, "users": [ "U1", "U2", "U3" ] },
                        { "name": "clock1", "count": 3, "users": [ "U1", "U2" ] }
                    ]
                }
            }}"#,
        r#"{"ok": true,
            "message": {
                "type": "file",
                "file": {
                    "reactions": [
                        { "name": "astonished", "count": 3, "users": [ "U1", "U2", "U3" ] },
                        { "name": "clock1", "count": 3, "users": [ "U1", "U2" ] }
                    ]
                }
            }}"#,
        r#"{"ok": true,
            "message": {
                "type": "file_comment",
                "file_comment": {
                    "comment": {
                        "reactions": [
                            { "name": "astonished", "count": 3, "users": [ "U1", "U2", "U3" ] },
                            { "name": "clock1", "count": 3, "users": [ "U1", "U2" ] }
                        ]
                    }
                }
            }}"#,
    ];

    let exec = MockExecutor::default();
    let service = ReactionService::new(exec.clone());

    for ((item, want_params), body) in refs().into_iter().zip(bodies) {
        exec.push(body).await;
        let got = service
            .get_reactions(&GetReactionParams::new(item))
            .await
            .unwrap();
        assert_eq!(got, expected_reactions());
        assert_eq!(
            exec.take_log().await,
            vec![("reactions.get".to_owned(), want_params)]
        );
    }
}

#[tokio::test]
async fn get_reactions_full_flag() {
    let exec = MockExecutor::default();
    exec.push(r#"{"ok": true, "message": {"type": "file", "file": {}}}"#)
        .await;
    let service = ReactionService::new(exec.clone());

    let got = service
        .get_reactions(&GetReactionParams::new(ItemRef::file("FileID").unwrap()).full(true))
        .await
        .unwrap();
    assert!(got.is_empty());

    let log = exec.take_log().await;
    assert_eq!(log[0].1, params(&[("file", "FileID"), ("full", "true")]));
}

#[tokio::test]
async fn list_reactions_returns_items_and_paging() {
    let exec = MockExecutor::default();
    exec.push(
        r#"{"ok": true,
    "items": [
        {
            "type": "message",
            "message": {
                "text": "hello",
                "reactions": [
                    { "name": "astonished", "count": 3, "users": [ "U1", "U2", "U3" ] },
                    { "name": "clock1", "count": 3, "users": [ "U1", "U2" ] }
                ]
            }
        },
        {
            "type": "file",
            "file": {
                "name": "toy",
                "reactions": [
                    { "name": "clock1", "count": 3, "users": [ "U1", "U2" ] }
                ]
            }
        },
        {
            "type": "file_comment",
            "file_comment": {
                "file": {},
                "comment": {
                    "comment": "cool toy",
                    "reactions": [
                        { "name": "astonished", "count": 3, "users": [ "U1", "U2", "U3" ] }
                    ]
                }
            }
        }
    ],
    "paging": { "count": 100, "total": 4, "page": 1, "pages": 1 }}"#,
    )
    .await;
    let service = ReactionService::new(exec.clone());

    let list = ListReactionParams::new("UserID")
        .count(200)
        .page(2)
        .full(true);
    let page = service.list_reactions(&list).await.unwrap();

    let [message, file, comment] = page.items.as_slice() else {
        panic!("expected three items, got {:?}", page.items);
    };
    let reactions = expected_reactions();

    assert_eq!(message.kind(), ItemKind::Message);
    assert_eq!(message.message().unwrap().text, "hello");
    assert_eq!(message.reactions, reactions);

    assert_eq!(file.kind(), ItemKind::File);
    assert_eq!(file.file().unwrap().name, "toy");
    assert_eq!(file.reactions, [reactions[1].clone()]);

    assert_eq!(comment.kind(), ItemKind::FileComment);
    assert_eq!(comment.comment().unwrap().comment, "cool toy");
    assert_eq!(comment.reactions, [reactions[0].clone()]);

    let paging = page.paging.expect("paging present");
    assert_ne!(paging, PagingInfo::default());
    assert_eq!(
        paging,
        PagingInfo {
            count: 100,
            total: 4,
            page: 1,
            pages: 1
        }
    );

    assert_eq!(
        exec.take_log().await,
        vec![(
            "reactions.list".to_owned(),
            params(&[
                ("user", "UserID"),
                ("count", "200"),
                ("page", "2"),
                ("full", "true")
            ])
        )]
    );
}

#[tokio::test]
async fn list_reactions_omits_defaults() {
    let exec = MockExecutor::default();
    exec.push(r#"{"ok": true, "items": []}"#).await;
    let service = ReactionService::new(exec.clone());

    let page = service
        .list_reactions(&ListReactionParams::new("UserID"))
        .await
        .unwrap();
    assert!(page.items.is_empty());
    assert!(page.paging.is_none());

    assert_eq!(
        exec.take_log().await[0].1,
        params(&[("user", "UserID")])
    );
}

#[tokio::test]
async fn api_errors_are_surfaced_verbatim() {
    let exec = MockExecutor::default();
    exec.push(r#"{"ok": false, "error": "already_reacted"}"#)
        .await;
    let service = ReactionService::new(exec);

    let err = service
        .add_reaction(&AddReactionParams::new(
            "thumbsup",
            ItemRef::file("FileID").unwrap(),
        ))
        .await
        .unwrap_err();
    match err {
        ClientError::Api(api) => assert_eq!(api.error, "already_reacted"),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_envelope_wins_over_body_shape() {
    let exec = MockExecutor::default();
    exec.push(r#"{"ok": false, "error": "no_item_specified", "message": {"type": "bogus"}}"#)
        .await;
    let service = ReactionService::new(exec);

    let err = service
        .get_reactions(&GetReactionParams::new(ItemRef::file("F").unwrap()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Api(_)));
}

#[tokio::test]
async fn transport_errors_pass_through() {
    let exec = MockExecutor::default();
    exec.push_err(TransportError::Timeout.into()).await;
    let service = ReactionService::new(exec);

    let err = service
        .list_reactions(&ListReactionParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(TransportError::Timeout)));
}

#[tokio::test]
async fn malformed_responses_are_errors() {
    let exec = MockExecutor::default();
    exec.push(r#"{"ok": true, "message": {"type": "channel", "channel": {}}}"#)
        .await;
    exec.push(r#"{"ok": true, "items": [{"type": "file"}]}"#)
        .await;
    let service = ReactionService::new(exec);

    let err = service
        .get_reactions(&GetReactionParams::new(
            ItemRef::message("C", "1.0").unwrap(),
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Malformed(MalformedResponse::UnknownType(ref t)) if t == "channel"
    ));

    let err = service
        .list_reactions(&ListReactionParams::new("U"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Malformed(MalformedResponse::MissingObject { kind: "file", .. })
    ));
}

#[tokio::test]
async fn references_survive_an_echo() {
    let service = ReactionService::new(EchoExecutor);

    for (item, _) in refs() {
        let params = AddReactionParams::new("thumbsup", item.clone());
        let body = service
            .executor()
            .execute("reactions.add", &params.to_params())
            .await
            .unwrap();

        #[derive(serde::Deserialize)]
        struct Echo {
            echo: Params,
        }
        let echo: Echo = serde_json::from_slice(&body).unwrap();
        assert_eq!(ItemRef::from_params(&echo.echo).unwrap(), item);
        assert_eq!(echo.echo.get("name").map(SmolStr::as_str), Some("thumbsup"));

        // and the full round trip through the service succeeds
        service.add_reaction(&params).await.unwrap();
    }
}

#[tokio::test]
async fn shared_service_handles_concurrent_calls() {
    let exec = MockExecutor::default();
    for _ in 0..8 {
        exec.push(r#"{ "ok": true }"#).await;
    }
    let service = Arc::new(ReactionService::new(exec.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                let item = ItemRef::file(format!("F{i}")).unwrap();
                service
                    .add_reaction(&AddReactionParams::new("wave", item))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let mut files: Vec<_> = exec
        .take_log()
        .await
        .into_iter()
        .map(|(_, p)| p["file"].clone())
        .collect();
    files.sort();
    assert_eq!(files.len(), 8);
    assert_eq!(files[0], "F0");
}
