// Shared fixtures for this crate's unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use inspiroo_core::analysis::AnalysisError;
use serde_json::{json, Value};
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;

use crate::client::GenerativeBackend;

/// A schema-conforming analysis payload whose structure title is `title`.
pub(crate) fn sample_result_json(title: &str) -> String {
    json!({
        "spark_translation": "Pequenos consertos, grande alívio.",
        "structure": {
            "title": title,
            "one_liner": "Profissional de confiança em 15 minutos para reparos rápidos.",
            "value_prop": "Preço fixo e resposta imediata.",
            "problem": "Ninguém aceita serviço pequeno.",
            "target_audience": "Quem mora em apartamento e não tem tempo.",
            "why_now": "Serviços sob demanda viraram hábito."
        },
        "creative_paths": ["Plano de manutenção mensal", "Kit + videochamada", "Parceria com condomínios"],
        "startup_evolution": {
            "pitch_30s": "Trocar um chuveiro não deveria custar um dia inteiro.",
            "pitch_140_char": "Reparos rápidos, preço fixo, profissional em 15 min.",
            "first_feature": "Pedido por foto com preço fechado.",
            "business_models": ["Comissão por tarefa", "Assinatura"],
            "validation_steps": ["Grupo do prédio", "10 atendimentos manuais", "Medir recompra"]
        },
        "smart_connections": ["Síndicos", "Lojas de material de construção"],
        "hook_message": "Marque o primeiro passo hoje."
    })
    .to_string()
}

/// One SSE event carrying `text` as a Gemini chunk.
pub(crate) fn sse_chunk(text: &str) -> String {
    let chunk = json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    });
    format!("data: {chunk}\r\n\r\n")
}

/// Read one full HTTP request (head plus `Content-Length` body).
pub(crate) async fn read_http_request(socket: &mut TcpStream) -> String {
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

/// What a [`ScriptedBackend`] call saw.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub system: String,
    pub user_text: String,
    pub schema: Value,
}

/// Backend that replays fixed chunks (or a fixed error) and records calls.
pub(crate) struct ScriptedBackend {
    outcome: Result<Vec<String>, AnalysisError>,
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedBackend {
    pub(crate) fn chunks(chunks: &[&str]) -> Self {
        ScriptedBackend {
            outcome: Ok(chunks.iter().map(|c| c.to_string()).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(err: AnalysisError) -> Self {
        ScriptedBackend {
            outcome: Err(err),
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerativeBackend for ScriptedBackend {
    async fn generate(
        &self,
        system: &str,
        user_text: &str,
        schema: &Value,
        on_chunk: &mut (dyn for<'c> FnMut(&'c str) + Send),
    ) -> Result<String, AnalysisError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system.to_string(),
            user_text: user_text.to_string(),
            schema: schema.clone(),
        });
        let chunks = self.outcome.clone()?;
        for chunk in &chunks {
            on_chunk(chunk);
        }
        Ok(chunks.concat())
    }
}
