//! Client behavior with in-memory transports: cancellation, concurrency, and
//! transport failures.

use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, StreamExt};
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use speechkit::{
    Error, SpeechKitClient, SynthesisOptions, Transport, TransportError, TransportResponse,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn client(transport: Arc<dyn Transport>, folder_id: &str) -> SpeechKitClient {
    SpeechKitClient::builder("tok")
        .folder_id(folder_id)
        .transport(transport)
        .build()
        .expect("client")
}

fn query(url: &url::Url) -> HashMap<String, String> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Records every request and answers 200 with the `text` parameter as body.
#[derive(Default)]
struct EchoTransport {
    seen: Mutex<Vec<(url::Url, String)>>,
}

#[async_trait]
impl Transport for EchoTransport {
    async fn execute(
        &self,
        request: reqwest::Request,
    ) -> Result<TransportResponse, TransportError> {
        let auth = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let text = query(request.url()).remove("text").unwrap_or_default();
        self.seen.lock().unwrap().push((request.url().clone(), auth));

        // Let the other call interleave.
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(TransportResponse::from_bytes(StatusCode::OK, text))
    }
}

/// Never answers; counts how often it was called.
#[derive(Default)]
struct HangingTransport {
    calls: AtomicUsize,
}

#[async_trait]
impl Transport for HangingTransport {
    async fn execute(
        &self,
        _request: reqwest::Request,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        futures::future::pending().await
    }
}

struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn execute(
        &self,
        _request: reqwest::Request,
    ) -> Result<TransportResponse, TransportError> {
        Err(TransportError::Other("connection reset by peer".into()))
    }
}

/// Answers 200 with one chunk, then a body that never finishes.
struct StallingBodyTransport;

#[async_trait]
impl Transport for StallingBodyTransport {
    async fn execute(
        &self,
        _request: reqwest::Request,
    ) -> Result<TransportResponse, TransportError> {
        let body = stream::iter(vec![Ok::<_, Error>(Bytes::from_static(b"OggS"))])
            .chain(stream::pending());
        Ok(TransportResponse::new(StatusCode::OK, Box::pin(body)))
    }
}

/// Answers 400 with a partial error body that never finishes.
struct StallingErrorTransport;

#[async_trait]
impl Transport for StallingErrorTransport {
    async fn execute(
        &self,
        _request: reqwest::Request,
    ) -> Result<TransportResponse, TransportError> {
        let body = stream::iter(vec![Ok::<_, Error>(Bytes::from_static(b"{\"error_code\":"))])
            .chain(stream::pending());
        Ok(TransportResponse::new(StatusCode::BAD_REQUEST, Box::pin(body)))
    }
}

#[tokio::test]
async fn concurrent_calls_do_not_share_parameters() {
    let transport = Arc::new(EchoTransport::default());
    let client = client(transport.clone(), "folder-1");

    let first = SynthesisOptions::new("first phrase").with_voice("omazh");
    let second = SynthesisOptions::new("second phrase").with_voice("zahar");
    let cancel = CancellationToken::new();

    let (a, b) = tokio::join!(
        client.synthesize(&cancel, &first),
        client.synthesize(&cancel, &second)
    );
    assert_eq!(&a.unwrap().bytes().await.unwrap()[..], b"first phrase");
    assert_eq!(&b.unwrap().bytes().await.unwrap()[..], b"second phrase");

    let seen = transport.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    for (url, auth) in seen.iter() {
        let params = query(url);
        let expected_voice = match params["text"].as_str() {
            "first phrase" => "omazh",
            "second phrase" => "zahar",
            other => panic!("unexpected text {:?}", other),
        };
        assert_eq!(params["voice"], expected_voice);
        assert_eq!(params["folderId"], "folder-1");
        assert_eq!(auth, "Bearer tok");
    }
}

#[tokio::test]
async fn clones_are_usable_from_spawned_tasks() {
    let transport = Arc::new(EchoTransport::default());
    let client = client(transport.clone(), "");

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let options = SynthesisOptions::new(format!("phrase {}", i));
                let audio = client
                    .synthesize(&CancellationToken::new(), &options)
                    .await?;
                audio.bytes().await
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let body = handle.await.unwrap().unwrap();
        assert_eq!(body, Bytes::from(format!("phrase {}", i)));
    }

    let seen = transport.seen.lock().unwrap();
    assert_eq!(seen.len(), 4);
    assert!(seen.iter().all(|(url, _)| !query(url).contains_key("folderId")));
}

#[tokio::test]
async fn cancellation_aborts_pending_request() {
    let transport = Arc::new(HangingTransport::default());
    let client = client(transport.clone(), "");
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        })
    };

    let result = client
        .synthesize(&cancel, &SynthesisOptions::new("never"))
        .await;
    canceller.await.unwrap();

    let err = result.unwrap_err();
    assert!(err.is_cancelled(), "got {:?}", err);
    assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn already_cancelled_token_skips_transport() {
    let transport = Arc::new(HangingTransport::default());
    let client = client(transport.clone(), "");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client
        .synthesize(&cancel, &SynthesisOptions::new("never"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled));
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cancellation_interrupts_error_body_read() {
    let client = client(Arc::new(StallingErrorTransport), "");
    let cancel = CancellationToken::new();

    let canceller = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            cancel.cancel();
        })
    };

    let result = client
        .synthesize(&cancel, &SynthesisOptions::new("rejected"))
        .await;
    canceller.await.unwrap();

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Cancelled), "got {:?}", err);
}

#[tokio::test]
async fn cancellation_after_success_stops_the_download() {
    let client = client(Arc::new(StallingBodyTransport), "");
    let cancel = CancellationToken::new();

    let mut audio = client
        .synthesize(&cancel, &SynthesisOptions::new("long text"))
        .await
        .unwrap();
    assert_eq!(&audio.next().await.unwrap().unwrap()[..], b"OggS");

    cancel.cancel();
    assert!(matches!(audio.next().await, Some(Err(Error::Cancelled))));
    assert!(audio.next().await.is_none());
}

#[tokio::test]
async fn transport_failure_is_surfaced_with_context() {
    let client = client(Arc::new(FailingTransport), "");
    let err = client
        .synthesize(&CancellationToken::new(), &SynthesisOptions::new("x"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Other(_))));
    assert_eq!(
        err.to_string(),
        "failed to send request: Transport error: connection reset by peer"
    );
}
