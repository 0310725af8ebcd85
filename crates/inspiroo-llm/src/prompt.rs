// Instruction templates and the response schema sent with every analysis.
//
// The schema is expressed in Gemini's OpenAPI subset (upper-case type names,
// `required` lists per object) so the model is constrained to emit exactly
// the shape `AnalysisResult` deserializes.

use inspiroo_core::analysis::AnalysisMode;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Mode instructions
// ---------------------------------------------------------------------------

/// The mode-specific block of the system instruction.
pub fn mode_instruction(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Personal => {
            "MODO: DESBLOQUEIO PESSOAL (CLAREZA MENTAL).\n\
             FOCO: Ajude o usuário a entender a própria ideia. Tire o ruído. Simplifique ao extremo.\n\
             ESTILO: Como um mentor criativo pessoal. Use metáforas visuais.\n\
             Na 'startup_evolution', foque em passos pequenos e realizáveis hoje."
        }
        AnalysisMode::Partners => {
            "MODO: ALINHAMENTO PARA SÓCIOS.\n\
             FOCO: Visão de longo prazo, propósito compartilhado e potencial de impacto.\n\
             ESTILO: Persuasivo, inspirador e visionário.\n\
             Na 'startup_evolution', foque em escalabilidade e \"Big Picture\"."
        }
        AnalysisMode::Startup => {
            "MODO: STARTUP E MERCADO.\n\
             FOCO: Validação, dor do cliente, dinheiro e tração.\n\
             ESTILO: Direto, estratégico e orientado a negócios (mas ainda humano).\n\
             Na 'startup_evolution', foque em MVP, CAC, LTV (conceitual) e Monetização."
        }
    }
}

// ---------------------------------------------------------------------------
// System instruction
// ---------------------------------------------------------------------------

/// Full system instruction for one analysis in `mode`.
pub fn system_instruction(mode: AnalysisMode) -> String {
    format!(
        "Você é o INSPIRØØ.\n\
         Sua missão: Transformar ideias cruas em conceitos poderosos.\n\
         \n\
         {}\n\
         \n\
         PRINCÍPIOS OBRIGATÓRIOS (ESTILO AUSTIN KLEON / RASCUNHO):\n\
         1. Seja VISUAL na escrita: Use palavras que criam imagens.\n\
         2. Seja BREVE e IMPACTANTE: Sem \"textão\". Frases de soco.\n\
         3. Estilo \"Manifesto\": Fale com energia.\n\
         4. Rápido e Devagar: Clareza imediata.\n\
         \n\
         Retorne APENAS um JSON válido seguindo o schema.",
        mode_instruction(mode)
    )
}

// ---------------------------------------------------------------------------
// Response schema
// ---------------------------------------------------------------------------

fn string_field(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn string_list(description: &str) -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description
    })
}

/// The declared output schema.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "spark_translation": string_field(
                "Interpretação da ideia: O que ela significa e qual dor toca. Texto fluido e inspirador."
            ),
            "structure": {
                "type": "OBJECT",
                "properties": {
                    "one_liner": string_field("Resumo da ideia em 1 frase poderosa."),
                    "title": string_field("Sugestão de nome para o projeto."),
                    "value_prop": string_field("Proposta de valor resumida."),
                    "problem": string_field("O problema real que resolve."),
                    "target_audience": string_field("Quem ama essa ideia (Público alvo)."),
                    "why_now": string_field("Por que isso faz sentido agora (Timing).")
                },
                "required": ["one_liner", "title", "value_prop", "problem", "target_audience", "why_now"]
            },
            "creative_paths": string_list("3 caminhos alternativos/variações criativas da ideia."),
            "startup_evolution": {
                "type": "OBJECT",
                "properties": {
                    "pitch_30s": string_field("Pitch de elevador (30 segundos)."),
                    "pitch_140_char": string_field("Pitch para Twitter (140 caracteres)."),
                    "first_feature": string_field("A primeira funcionalidade essencial (MVP)."),
                    "business_models": string_list("2 modelos de negócio possíveis."),
                    "validation_steps": string_list("3 primeiros passos práticos para validar.")
                },
                "required": ["pitch_30s", "pitch_140_char", "first_feature", "business_models", "validation_steps"]
            },
            "smart_connections": string_list("Sugestões de mercados, tendências ou conexões."),
            "hook_message": string_field(
                "Uma frase curta e motivadora convidando a marcar os próximos passos."
            )
        },
        "required": [
            "spark_translation",
            "structure",
            "creative_paths",
            "startup_evolution",
            "smart_connections",
            "hook_message"
        ]
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
