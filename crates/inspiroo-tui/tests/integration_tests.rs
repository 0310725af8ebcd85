// Integration tests for INSPIRØØ.
//
// These drive the app event loop over its channels the same way the terminal
// does: key events go through the TUI input handler, resulting commands are
// sent to `app::run`, and UI updates are applied back to a `ScreenState`
// that is rendered on a test backend. One test puts the real Gemini client
// behind a local SSE server.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use inspiroo_core::analysis::AnalysisError;
use inspiroo_core::config::{Config, CredentialsConfig, LlmConfig, StorageConfig, UiConfig};
use inspiroo_core::db::Database;
use inspiroo_core::protocol::{UiUpdate, UserCommand};
use inspiroo_core::view::Phase;
use inspiroo_llm::analyzer::Analyzer;
use inspiroo_llm::client::{GenerativeBackend, LlmClient};
use inspiroo_tui::app::{self, AppState, SPARK_SAVED_NOTICE};
use inspiroo_tui::tui::{self, input, widgets, Overlay, ScreenState};

// ===========================================================================
// Test helpers
// ===========================================================================

fn result_json() -> String {
    json!({
        "spark_translation": "Consertos pequenos, alívio grande.",
        "structure": {
            "title": "Conserta Já",
            "one_liner": "Reparos domésticos em 15 minutos.",
            "value_prop": "Preço fixo, sem espera.",
            "problem": "Ninguém aceita serviço pequeno.",
            "target_audience": "Moradores de apartamento.",
            "why_now": "Serviços sob demanda viraram hábito."
        },
        "creative_paths": ["Assinatura de manutenção", "Kit + videochamada", "Parceria com condomínios"],
        "startup_evolution": {
            "pitch_30s": "Trocar um chuveiro não deveria levar um dia.",
            "pitch_140_char": "Reparos rápidos, preço fixo.",
            "first_feature": "Pedido por foto.",
            "business_models": ["Comissão por tarefa"],
            "validation_steps": ["Grupo do prédio", "10 atendimentos manuais"]
        },
        "smart_connections": ["Síndicos"],
        "hook_message": "Bora tirar do papel?"
    })
    .to_string()
}

/// Replies with a fixed text in two chunks and records the user text.
struct CannedBackend {
    reply: Result<String, AnalysisError>,
    seen: std::sync::Mutex<Vec<String>>,
}

#[async_trait]
impl GenerativeBackend for CannedBackend {
    async fn generate(
        &self,
        _system: &str,
        user_text: &str,
        _schema: &Value,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<String, AnalysisError> {
        self.seen.lock().unwrap().push(user_text.to_string());
        let text = self.reply.clone()?;
        let mid = text.char_indices().nth(text.chars().count() / 2).map_or(0, |(i, _)| i);
        on_chunk(&text[..mid]);
        on_chunk(&text[mid..]);
        Ok(text)
    }
}

fn test_config(api_base_url: &str, api_key: Option<&str>) -> Config {
    Config {
        llm: LlmConfig {
            model: "gemini-2.5-flash".into(),
            temperature: 0.7,
            api_base_url: api_base_url.into(),
        },
        storage: StorageConfig {
            db_path: ":memory:".into(),
        },
        ui: UiConfig {
            online_users_start: 1420,
            online_tick_secs: 60,
            inspiration_tick_secs: 3,
        },
        credentials: CredentialsConfig {
            gemini_api_key: api_key.map(str::to_string),
        },
    }
}

/// A running app loop plus the TUI-side state it feeds.
struct Harness {
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    screen: ScreenState,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    async fn start(config: Config, analyzer: Analyzer, db: Database) -> Self {
        let (llm_tx, llm_rx) = mpsc::channel(64);
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, ui_rx) = mpsc::channel(64);

        let mut state = AppState::new(config, db, analyzer, llm_tx);
        app::recover_session(&mut state).unwrap();
        let handle = tokio::spawn(app::run(llm_rx, cmd_rx, ui_tx, state));

        let mut harness = Harness {
            cmd_tx,
            ui_rx,
            screen: ScreenState::default(),
            handle,
        };
        harness.pump_until(|s| s.online_count > 0).await;
        harness
    }

    /// Feed a key through the input handler, forwarding any command.
    async fn press(&mut self, code: KeyCode) {
        self.press_with(code, KeyModifiers::NONE).await;
    }

    async fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let event = KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        if let Some(cmd) = input::handle_key(event, &mut self.screen) {
            self.cmd_tx.send(cmd).await.unwrap();
        }
    }

    async fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c)).await;
        }
    }

    /// Apply updates until `done` holds for the screen state.
    async fn pump_until<F>(&mut self, done: F)
    where
        F: Fn(&ScreenState) -> bool,
    {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !done(&self.screen) {
                let update = self.ui_rx.recv().await.expect("app loop ended early");
                tui::apply_ui_update(&mut self.screen, update);
            }
        })
        .await
        .expect("timed out waiting for UI state");
    }

    fn render(&self) -> String {
        widgets_render(&self.screen)
    }

    async fn quit(self) {
        self.cmd_tx.send(UserCommand::Quit).await.unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

fn widgets_render(screen: &ScreenState) -> String {
    let backend = ratatui::backend::TestBackend::new(140, 45);
    let mut terminal = ratatui::Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| tui::render_frame(frame, screen))
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn canned(reply: Result<String, AnalysisError>) -> (Analyzer, Arc<CannedBackend>) {
    let backend = Arc::new(CannedBackend {
        reply,
        seen: std::sync::Mutex::new(Vec::new()),
    });
    (Analyzer::new(backend.clone()), backend)
}

// ===========================================================================
// Tests
// ===========================================================================

#[tokio::test]
async fn idea_to_result_to_shared_spark() {
    let (analyzer, backend) = canned(Ok(result_json()));
    let config = test_config("http://127.0.0.1:1", None);
    let mut h = Harness::start(config, analyzer, Database::open(":memory:").unwrap()).await;

    assert!(h.render().contains("1420 CRIADORES ONLINE"));

    h.type_text("Uber dos reparos domésticos").await;
    h.press(KeyCode::Enter).await;
    h.pump_until(|s| s.phase() == Phase::Result).await;

    assert_eq!(
        backend.seen.lock().unwrap().as_slice(),
        ["Uber dos reparos domésticos".to_string()]
    );
    assert!(h.screen.idea_text.is_empty());
    let screen = h.render();
    assert!(screen.contains("Conserta Já"));
    assert!(screen.contains("SALVAR IDEIA"));

    // Tick the second next step.
    h.press(KeyCode::Down).await;
    h.press(KeyCode::Char(' ')).await;
    h.pump_until(|s| s.snapshot.checklist.is_checked(1)).await;

    // Saving as a visitor opens the sign-up flow instead.
    h.press(KeyCode::Char('s')).await;
    h.pump_until(|s| matches!(s.overlay, Some(Overlay::SignUp(_))))
        .await;

    h.type_text("Laura").await;
    h.press(KeyCode::Enter).await;
    h.press(KeyCode::Enter).await;
    h.pump_until(|s| s.is_signed_in() && s.overlay.is_none()).await;

    let before = h.screen.snapshot.sparks.len();
    h.press(KeyCode::Char('s')).await;
    h.pump_until(|s| s.snapshot.sparks.len() == before + 1).await;

    let newest = &h.screen.snapshot.sparks[0];
    assert_eq!(newest.author, "Laura");
    assert_eq!(newest.concept, "Conserta Já: Reparos domésticos em 15 minutos.");
    assert_eq!(
        h.screen.notice.as_ref().map(|n| n.text.as_str()),
        Some(SPARK_SAVED_NOTICE)
    );
    assert!(h.render().contains("SALVO!"));

    // Back to a blank slate; the checklist does not carry over.
    h.press(KeyCode::Char('r')).await;
    h.pump_until(|s| s.phase() == Phase::Idle).await;
    assert_eq!(h.screen.snapshot.checklist.checked_count(), 0);

    h.quit().await;
}

#[tokio::test]
async fn missing_key_shows_error_and_keeps_idea() {
    let analyzer = Analyzer::new(Arc::new(LlmClient::Disabled));
    let config = test_config("http://127.0.0.1:1", None);
    let mut h = Harness::start(config, analyzer, Database::open(":memory:").unwrap()).await;

    h.type_text("Horta comunitária no telhado").await;
    h.press(KeyCode::Enter).await;
    h.pump_until(|s| s.phase() == Phase::Error).await;

    let info = h.screen.snapshot.view.error().cloned().unwrap();
    assert!(info.api_key_missing);
    let screen = h.render();
    assert!(screen.contains(widgets::error_panel::ERROR_TITLE));
    assert!(screen.contains(widgets::error_panel::MISSING_KEY_MESSAGE));

    // Enter on the error panel resets; the typed idea survives.
    h.press(KeyCode::Enter).await;
    h.pump_until(|s| s.phase() == Phase::Idle).await;
    assert_eq!(h.screen.idea_text, "Horta comunitária no telhado");

    h.quit().await;
}

#[tokio::test]
async fn blank_idea_is_rejected_with_notice() {
    let (analyzer, backend) = canned(Ok(result_json()));
    let config = test_config("http://127.0.0.1:1", None);
    let mut h = Harness::start(config, analyzer, Database::open(":memory:").unwrap()).await;

    h.type_text("   ").await;
    h.press(KeyCode::Enter).await;
    h.pump_until(|s| s.notice.is_some()).await;

    assert_eq!(h.screen.phase(), Phase::Idle);
    assert_eq!(h.screen.notice.as_ref().unwrap().text, app::BLANK_IDEA_NOTICE);
    assert!(backend.seen.lock().unwrap().is_empty());

    h.quit().await;
}

#[tokio::test]
async fn malformed_reply_lands_in_generic_error() {
    let (analyzer, _) = canned(Ok("{\"spark_translation\": \"só isso\"}".to_string()));
    let config = test_config("http://127.0.0.1:1", None);
    let mut h = Harness::start(config, analyzer, Database::open(":memory:").unwrap()).await;

    h.type_text("ideia").await;
    h.press(KeyCode::Enter).await;
    h.pump_until(|s| s.phase() == Phase::Error).await;

    assert!(!h.screen.snapshot.view.error().unwrap().api_key_missing);
    assert!(h.render().contains(widgets::error_panel::GENERIC_MESSAGE));

    h.quit().await;
}

#[tokio::test]
async fn community_actions_require_sign_in_then_apply() {
    let (analyzer, _) = canned(Ok(result_json()));
    let config = test_config("http://127.0.0.1:1", None);
    let mut h = Harness::start(config, analyzer, Database::open(":memory:").unwrap()).await;

    h.press(KeyCode::Tab).await;
    h.press(KeyCode::Char('l')).await;
    h.pump_until(|s| s.overlay.is_some()).await;
    assert!(matches!(h.screen.overlay, Some(Overlay::SignUp(_))));

    h.type_text("Ana").await;
    h.press(KeyCode::Enter).await;
    h.press(KeyCode::Enter).await;
    h.pump_until(|s| s.is_signed_in()).await;

    let likes = h.screen.snapshot.sparks[0].likes;
    h.press(KeyCode::Char('l')).await;
    h.pump_until(|s| s.snapshot.sparks[0].liked_by_current_user)
        .await;
    assert_eq!(h.screen.snapshot.sparks[0].likes, likes + 1);

    h.press(KeyCode::Char('c')).await;
    h.pump_until(|s| {
        s.notice
            .as_ref()
            .is_some_and(|n| n.text.contains("Solicitação de conexão"))
    })
    .await;

    h.quit().await;
}

#[tokio::test]
async fn signed_in_user_survives_restart() {
    let dir = std::env::temp_dir().join(format!("inspiroo-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let db_path = dir.join("session.db");
    let db_path = db_path.to_string_lossy().to_string();
    let _ = std::fs::remove_file(&db_path);

    {
        let (analyzer, _) = canned(Ok(result_json()));
        let config = test_config("http://127.0.0.1:1", None);
        let mut h = Harness::start(config, analyzer, Database::open(&db_path).unwrap()).await;
        h.press_with(KeyCode::Char('p'), KeyModifiers::CONTROL).await;
        h.type_text("Bia").await;
        h.press(KeyCode::Enter).await;
        h.press(KeyCode::Enter).await;
        h.pump_until(|s| s.is_signed_in()).await;
        h.quit().await;
    }

    {
        let (analyzer, _) = canned(Ok(result_json()));
        let config = test_config("http://127.0.0.1:1", None);
        let mut h = Harness::start(config, analyzer, Database::open(&db_path).unwrap()).await;
        h.pump_until(|s| s.is_signed_in()).await;
        assert_eq!(h.screen.snapshot.user.as_ref().unwrap().name, "Bia");

        // Signing out forgets the stored user.
        h.press_with(KeyCode::Char('p'), KeyModifiers::CONTROL).await;
        h.press(KeyCode::Char('o')).await;
        h.pump_until(|s| !s.is_signed_in()).await;
        h.quit().await;
    }

    let db = Database::open(&db_path).unwrap();
    assert!(db.load_user().unwrap().is_none());
    let _ = std::fs::remove_dir_all(&dir);
}

/// Real Gemini client against a local server speaking the streaming
/// `streamGenerateContent?alt=sse` protocol.
#[tokio::test]
async fn gemini_stream_end_to_end() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let payload = result_json();

    let server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let mid = payload.char_indices().nth(60).map(|(i, _)| i).unwrap();
        let mut body = String::new();
        for part in [&payload[..mid], &payload[mid..]] {
            let chunk = json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": part }] } }]
            });
            body.push_str(&format!("data: {chunk}\r\n\r\n"));
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/event-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        request
    });

    let config = test_config(&format!("http://{addr}"), Some("test-key"));
    let analyzer = Analyzer::from_config(&config);
    let mut h = Harness::start(config, analyzer, Database::open(":memory:").unwrap()).await;

    h.type_text("Uber dos reparos domésticos").await;
    h.press(KeyCode::Enter).await;
    h.pump_until(|s| s.phase() != Phase::Idle && s.phase() != Phase::Thinking)
        .await;
    assert_eq!(h.screen.phase(), Phase::Result);
    assert_eq!(
        h.screen.snapshot.view.result().unwrap().structure.title,
        "Conserta Já"
    );

    let request = server.await.unwrap();
    let head = request.to_lowercase();
    assert!(head.starts_with("post /models/gemini-2.5-flash:streamgeneratecontent?alt=sse"));
    assert!(head.contains("x-goog-api-key: test-key"));
    assert!(request.contains("Uber dos reparos domésticos"));

    h.quit().await;
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&data[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if data.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&data).into_owned()
}
